pub mod frame;
pub mod sprites;

use crate::combat::Battle;
use crate::geometry::Point;
use crate::player::Player;
use crate::world::{RoomId, World};

use frame::{Color, Frame};
use sprites::{SCREEN, draw_chest, draw_door, draw_health_bar, draw_prop, draw_room_shape};

/// One exploration frame: scenery, wild NPCs, the player and companions, then HUD.
pub fn render_room(world: &World, room_id: RoomId, player: &Player, hint: Option<&str>) -> Frame {
    let mut frame = Frame::new();
    let room = world.room(room_id);

    frame.fill(SCREEN, Color::BLACK);
    draw_room_shape(&mut frame, room.shape);

    for door in &room.doors {
        draw_door(&mut frame, door, &world.room(door.to).name);
    }
    for chest in &room.chests {
        draw_chest(&mut frame, chest);
    }
    for prop in &room.props {
        draw_prop(&mut frame, prop);
    }

    for (_, npc) in world.npcs_in(room_id).filter(|(_, n)| n.is_wild()) {
        npc.persona.draw(&mut frame, npc.pos);
        let color = if npc.enemy { Color::RED } else { Color::WHITE };
        frame.text(npc.pos.offset(-8, -64), npc.name.as_str(), color);
    }

    // Companions trail behind, so draw them under the player.
    for &id in player.party.members().iter().rev() {
        let npc = world.npc(id);
        npc.persona.draw(&mut frame, npc.pos);
    }
    player.persona().draw(&mut frame, player.pos);
    frame.text(player.pos.offset(-8, -64), player.name.as_str(), Color::CYAN);

    frame.text(Point::new(10, 10), room.name.as_str(), Color::WHITE);
    frame.text(Point::new(10, 430), "(i)nventory", Color::WHITE);
    frame.text(Point::new(10, 445), "(p)arty", Color::WHITE);
    if let Some(hint) = hint {
        frame.text(Point::new(10, 460), hint, Color::YELLOW);
    }
    frame
}

/// One battle frame: every living combatant with a name and a health bar.
pub fn render_battle(battle: &Battle) -> Frame {
    let mut frame = Frame::new();
    frame.fill(SCREEN, Color::BLACK);
    for c in battle.combatants().iter().filter(|c| c.is_alive()) {
        c.persona.draw(&mut frame, c.pos);
        draw_health_bar(&mut frame, c.pos, c.hp, c.max_hp);
        frame.text(
            c.pos.offset(-20, 8),
            format!("{} {}/{}", c.name, c.hp, c.max_hp),
            Color::WHITE,
        );
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ClassId;
    use crate::world::{BUNDLED_WORLD, load_world_from_str};

    #[test]
    fn hud_names_the_room_and_hint() {
        let world = load_world_from_str(BUNDLED_WORLD).unwrap();
        let player = Player::new("Tav", ClassId::Mage, world.spawn);
        let frame = render_room(&world, world.start_room, &player, Some("sp(e)ak"));
        let texts: Vec<&str> = frame.texts().collect();
        assert!(texts.contains(&"Pod Room"));
        assert!(texts.contains(&"(i)nventory"));
        assert!(texts.contains(&"(p)arty"));
        assert!(texts.contains(&"sp(e)ak"));
        assert!(texts.contains(&"Corridor"));
    }

    #[test]
    fn battle_frame_labels_every_combatant() {
        let world = load_world_from_str(BUNDLED_WORLD).unwrap();
        let player = Player::new("Tav", ClassId::Fighter, world.spawn);
        let imp = world.npc_by_key("imp_1").unwrap();
        let battle = crate::combat::line_up(&world, &player, &[imp]);
        let frame = render_battle(&battle);
        assert_eq!(frame.texts().count(), 2);
    }
}
