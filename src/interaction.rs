//! What pressing (e) does: find the object under the player's hitbox and resolve it.

use rand::Rng;
use tracing::{debug, info};

use crate::combat;
use crate::error::GameResult;
use crate::geometry::Rect;
use crate::player::Player;
use crate::ui::{Frontend, Menu, choose, say};
use crate::world::{DoorRef, NpcId, RoomId, World};

/// The object an interaction would land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Chest(usize),
    Door(usize),
    Prop(usize),
    Npc(NpcId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing under the hitbox.
    Nothing,
    /// Something happened; the player is still in the same room.
    Stayed,
    /// Walked through a door.
    Entered(RoomId),
    /// Reached the escape room; the session is over.
    Escaped,
    /// Lost an encounter; the session is over.
    Defeated,
}

/// First overlapping object in priority order: chests, doors, props, NPCs.
/// Opened chests and NPCs that are no longer wild are not interactable.
pub fn find_target(world: &World, room: RoomId, hitbox: Rect) -> Option<Target> {
    let r = world.room(room);
    if let Some(i) = r
        .chests
        .iter()
        .position(|c| !c.opened && c.rect.overlaps(&hitbox))
    {
        return Some(Target::Chest(i));
    }
    if let Some(i) = r.doors.iter().position(|d| d.rect.overlaps(&hitbox)) {
        return Some(Target::Door(i));
    }
    if let Some(i) = r.props.iter().position(|p| p.rect.overlaps(&hitbox)) {
        return Some(Target::Prop(i));
    }
    world
        .npcs_in(room)
        .find(|(_, n)| n.is_wild() && n.rect().overlaps(&hitbox))
        .map(|(id, _)| Target::Npc(id))
}

/// The HUD prompt for whatever is under the hitbox.
pub fn interaction_hint(world: &World, room: RoomId, hitbox: Rect) -> Option<&'static str> {
    let hint = match find_target(world, room, hitbox)? {
        Target::Chest(_) => "op(e)n chest",
        Target::Door(_) => "op(e)n door",
        Target::Prop(_) => "insp(e)ct",
        Target::Npc(id) if world.npc(id).enemy => "engag(e)",
        Target::Npc(_) => "sp(e)ak",
    };
    Some(hint)
}

pub fn resolve_interaction<R: Rng>(
    world: &mut World,
    player: &mut Player,
    room: RoomId,
    ui: &mut dyn Frontend,
    rng: &mut R,
) -> GameResult<Outcome> {
    let Some(target) = find_target(world, room, player.hitbox()) else {
        return Ok(Outcome::Nothing);
    };
    debug!(?target, "interacting");

    match target {
        Target::Chest(i) => {
            open_chest(world, player, room, i, ui)?;
            Ok(Outcome::Stayed)
        }
        Target::Door(index) => use_door(world, player, DoorRef { room, index }, ui),
        Target::Prop(i) => {
            let desc = world.room(room).props[i].desc.clone();
            say(ui, desc)?;
            Ok(Outcome::Stayed)
        }
        Target::Npc(id) if world.npc(id).enemy => {
            if combat::engage(world, player, room, ui, rng)? {
                Ok(Outcome::Stayed)
            } else {
                Ok(Outcome::Defeated)
            }
        }
        Target::Npc(id) => {
            talk(world, id, ui)?;
            if player.party.recruit(world, id) {
                say(ui, format!("{} joins your party.", world.npc(id).name))?;
            }
            Ok(Outcome::Stayed)
        }
    }
}

fn open_chest(
    world: &mut World,
    player: &mut Player,
    room: RoomId,
    index: usize,
    ui: &mut dyn Frontend,
) -> GameResult<()> {
    let chest = &mut world.room_mut(room).chests[index];
    if chest.opened {
        return Ok(());
    }
    chest.opened = true;
    if player.give_item(&chest.item) {
        if let Some(bonus) = chest.bonus {
            player.apply_bonus(bonus);
        }
    }
    if let Some(flag) = &chest.flag {
        player.set_flag(flag, true);
    }
    info!(item = %chest.item, "chest opened");
    say(ui, format!("You find {}!", chest.item))
}

fn use_door(
    world: &mut World,
    player: &mut Player,
    at: DoorRef,
    ui: &mut dyn Frontend,
) -> GameResult<Outcome> {
    let door = world.door(at);
    if door.is_locked() {
        let key = door.key.clone().unwrap_or_default();
        if key.is_empty() || !player.has_item(&key) {
            say(ui, "The door is locked.")?;
            return Ok(Outcome::Stayed);
        }
        unlock(world, at);
        say(ui, format!("You unlock the door with the {key}."))?;
    }
    Ok(enter(world, player, at))
}

/// Opens `at` and the door on the far side that leads back.
pub fn unlock(world: &mut World, at: DoorRef) {
    world.door_mut(at).open = true;
    if let Some(back) = world.reciprocal(at) {
        world.door_mut(back).open = true;
    }
}

/// Walks through an open door, bringing the party along.
pub fn enter(world: &mut World, player: &mut Player, at: DoorRef) -> Outcome {
    let to = world.door(at).to;
    player.pos = match world.reciprocal(at) {
        Some(back) => world.door(back).rect.center(),
        None => world.spawn,
    };
    for &id in player.party.members() {
        let npc = world.npc_mut(id);
        npc.room = to;
        npc.pos = player.pos;
    }
    info!(from = %world.room(at.room).name, to = %world.room(to).name, "entered room");
    if to == world.escape_room {
        Outcome::Escaped
    } else {
        Outcome::Entered(to)
    }
}

/// Runs a friendly NPC's dialogue until a closing choice is picked.
fn talk(world: &World, id: NpcId, ui: &mut dyn Frontend) -> GameResult<()> {
    let npc = world.npc(id);
    let Some(dialogue) = &npc.dialogue else {
        return Ok(());
    };
    let options: Vec<String> = dialogue.choices.iter().map(|c| c.text.clone()).collect();
    let menu = Menu::new(&dialogue.prompt, options).spoken_by(&npc.name);
    loop {
        let choice = &dialogue.choices[choose(ui, &menu)?];
        say(ui, choice.reply.clone())?;
        if choice.ends {
            return Ok(());
        }
    }
}
