use rand::Rng;
use tracing::{debug, info};

use super::battle::{Actor, Battle, BattleStatus, Combatant, Effect};
use super::{MAX_COMPANIONS_IN_BATTLE, MAX_ENEMIES};
use crate::error::GameResult;
use crate::player::Player;
use crate::render::frame::Color;
use crate::render::render_battle;
use crate::ui::{FloatingNumber, Frontend, Menu, choose, say};
use crate::world::{NpcId, NpcStatus, RoomId, World};

/// Fights every wild hostile NPC in `room` as one group. On victory they are
/// marked defeated; the caller ends the session on defeat.
pub fn engage<R: Rng>(
    world: &mut World,
    player: &Player,
    room: RoomId,
    ui: &mut dyn Frontend,
    rng: &mut R,
) -> GameResult<bool> {
    let foes: Vec<NpcId> = world
        .npcs_in(room)
        .filter(|(_, n)| n.enemy && n.is_wild())
        .map(|(id, _)| id)
        .take(MAX_ENEMIES)
        .collect();
    if foes.is_empty() {
        return Ok(false);
    }

    let mut battle = line_up(world, player, &foes);
    info!(
        allies = battle.ally_count(),
        enemies = foes.len(),
        "encounter started"
    );
    let status = run(&mut battle, ui, rng)?;
    let won = status == BattleStatus::Victory;
    if won {
        for id in foes {
            world.npc_mut(id).status = NpcStatus::Defeated;
        }
    }
    info!(won, "encounter finished");
    Ok(won)
}

/// The player plus the first few companions against the given foes.
pub fn line_up(world: &World, player: &Player, foes: &[NpcId]) -> Battle {
    let mut allies = vec![Combatant::new(
        player.name.clone(),
        Actor::Player,
        player.class,
        player.persona(),
        player.attributes,
    )];
    allies.extend(
        player
            .party
            .members()
            .iter()
            .take(MAX_COMPANIONS_IN_BATTLE)
            .map(|&id| npc_combatant(world, id)),
    );
    let enemies = foes.iter().map(|&id| npc_combatant(world, id)).collect();
    Battle::new(allies, enemies)
}

fn npc_combatant(world: &World, id: NpcId) -> Combatant {
    let npc = world.npc(id);
    Combatant::new(
        npc.name.clone(),
        Actor::Npc(id),
        npc.class,
        npc.persona,
        npc.attributes(),
    )
}

/// Rounds until one side is done. Quit propagates out mid-round.
pub fn run<R: Rng>(
    battle: &mut Battle,
    ui: &mut dyn Frontend,
    rng: &mut R,
) -> GameResult<BattleStatus> {
    let mut round = 0u32;
    'rounds: while battle.status() == BattleStatus::Ongoing {
        round += 1;
        debug!(round, "round start");
        for idx in battle.initiative(rng) {
            if !battle.combatant(idx).is_alive() {
                continue;
            }
            ui.present(&render_battle(battle))?;
            let effect = if battle.combatant(idx).is_player() {
                player_turn(battle, idx, ui)?
            } else {
                npc_turn(battle, idx, ui)?
            };
            if let Some(effect) = effect {
                show_effect(battle, effect, ui)?;
            }
            if battle.status() != BattleStatus::Ongoing {
                break 'rounds;
            }
        }
    }

    ui.present(&render_battle(battle))?;
    let status = battle.status();
    match status {
        BattleStatus::Victory => say(ui, "You are victorious!")?,
        _ => say(ui, "You were defeated...")?,
    }
    Ok(status)
}

fn player_turn(
    battle: &mut Battle,
    idx: usize,
    ui: &mut dyn Frontend,
) -> GameResult<Option<Effect>> {
    let me = battle.combatant(idx);
    let abilities = me.abilities();
    let names = abilities.iter().map(|a| a.name.to_string()).collect();
    let pick = choose(ui, &Menu::new("Choose an ability:", names))?;
    let ability = abilities[pick];

    let targets = battle.targets(idx, &ability);
    let target = match targets.as_slice() {
        [] => return Ok(None),
        [only] => *only,
        many => {
            let names = many
                .iter()
                .map(|&t| battle.combatant(t).name.clone())
                .collect();
            many[choose(ui, &Menu::new("Choose a target:", names))?]
        }
    };

    say(
        ui,
        format!("{} uses {}!", battle.combatant(idx).name, ability.name),
    )?;
    Ok(Some(battle.apply(idx, &ability, target)))
}

fn npc_turn(battle: &mut Battle, idx: usize, ui: &mut dyn Frontend) -> GameResult<Option<Effect>> {
    let Some((ability, target)) = battle.npc_choice(idx) else {
        return Ok(None);
    };
    say(ui, format!("{} attacks!", battle.combatant(idx).name))?;
    Ok(Some(battle.apply(idx, &ability, target)))
}

fn show_effect(battle: &Battle, effect: Effect, ui: &mut dyn Frontend) -> GameResult<()> {
    let target = battle.combatant(effect.target);
    ui.floating_number(&FloatingNumber {
        value: effect.delta,
        at: target.pos,
        color: if effect.delta < 0 {
            Color::RED
        } else {
            Color::GREEN
        },
        caption: target.name.clone(),
    })
}
