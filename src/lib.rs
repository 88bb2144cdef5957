pub mod catalog;
pub mod combat;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod party;
pub mod persona;
pub mod player;
pub mod render;
pub mod ui;
pub mod world;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use catalog::ClassId;
use error::{GameError, GameResult};
use interaction::{Outcome, interaction_hint, resolve_interaction};
use player::{Direction, Player};
use render::frame::Frame;
use ui::{Frontend, InputEvent, Menu, choose, say};
use world::{RoomId, World};

pub use world::{load_world_from_file, load_world_from_str};

pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Escaped,
    Defeated,
}

pub struct GameState {
    pub world: World,
    pub player: Player,
    pub current_room: RoomId,
    rng: ChaCha8Rng,
    ending: Option<Ending>,
}

impl GameState {
    /// A session with an already created player standing at the world's spawn.
    pub fn new(world: World, name: impl Into<String>, class: ClassId, seed: u64) -> Self {
        let player = Player::new(name, class, world.spawn);
        let current_room = world.start_room;
        GameState {
            world,
            player,
            current_room,
            rng: ChaCha8Rng::seed_from_u64(seed),
            ending: None,
        }
    }

    /// Character creation: a name, then one of the playable classes.
    pub fn create(world: World, seed: u64, ui: &mut dyn Frontend) -> GameResult<Self> {
        let name = ui.text_input("Enter your name:")?;
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            n => n.to_string(),
        };
        let options = ClassId::PLAYABLE.iter().map(|c| c.to_string()).collect();
        let class = ClassId::PLAYABLE[choose(ui, &Menu::new("Choose your class:", options))?];
        info!(%name, %class, seed, "character created");
        Ok(GameState::new(world, name, class, seed))
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    pub fn hint(&self) -> Option<&'static str> {
        interaction_hint(&self.world, self.current_room, self.player.hitbox())
    }

    pub fn frame(&self) -> Frame {
        render::render_room(&self.world, self.current_room, &self.player, self.hint())
    }

    /// Drives the session until it ends. Quit comes back as `Err(GameError::Quit)`.
    pub fn run(&mut self, ui: &mut dyn Frontend) -> GameResult<Ending> {
        loop {
            if let Some(ending) = self.ending {
                return Ok(ending);
            }
            ui.present(&self.frame())?;
            let event = ui.poll_input()?;
            self.handle(event, ui)?;
        }
    }

    /// Process a single input event.
    pub fn handle(&mut self, event: InputEvent, ui: &mut dyn Frontend) -> GameResult<()> {
        if self.is_over() {
            return Ok(());
        }
        match event {
            InputEvent::Quit => return Err(GameError::Quit),
            InputEvent::Move(dir) => self.player.step(dir),
            InputEvent::Interact => self.interact(ui)?,
            InputEvent::Inventory => self.show_inventory(ui)?,
            InputEvent::Party => self.show_party(ui)?,
        }
        // Every handled event is a frame; companions catch up whether or not the player moved.
        self.tick(None);
        Ok(())
    }

    /// One frame: an optional step, then companions follow.
    pub fn tick(&mut self, held: Option<Direction>) {
        if let Some(dir) = held {
            self.player.step(dir);
        }
        self.player
            .party
            .follow_update(self.player.pos, &mut self.world);
    }

    fn interact(&mut self, ui: &mut dyn Frontend) -> GameResult<()> {
        let outcome = resolve_interaction(
            &mut self.world,
            &mut self.player,
            self.current_room,
            ui,
            &mut self.rng,
        )?;
        match outcome {
            Outcome::Nothing | Outcome::Stayed => {}
            Outcome::Entered(to) => self.current_room = to,
            Outcome::Escaped => {
                self.current_room = self.world.escape_room;
                self.ending = Some(Ending::Escaped);
                info!("escaped");
                ui.credits(&self.summary())?;
            }
            Outcome::Defeated => {
                self.ending = Some(Ending::Defeated);
                info!("defeated");
            }
        }
        Ok(())
    }

    fn show_inventory(&self, ui: &mut dyn Frontend) -> GameResult<()> {
        ui.message(&inventory_lines(&self.player))
    }

    fn show_party(&mut self, ui: &mut dyn Frontend) -> GameResult<()> {
        if self.player.party.is_empty() {
            return say(ui, "You have no companions.");
        }
        let mut options: Vec<String> = self
            .player
            .party
            .members()
            .iter()
            .map(|&id| {
                let npc = self.world.npc(id);
                format!("{} ({}, {} hp)", npc.name, npc.class, npc.attributes().hp)
            })
            .collect();
        options.push("Back".to_string());
        let back = options.len() - 1;

        let pick = choose(ui, &Menu::new("Party:", options))?;
        if pick == back {
            return Ok(());
        }
        let name = self.world.npc(self.player.party.members()[pick]).name.clone();
        let question = format!("Dismiss {name}?");
        let confirm = Menu::new(&question, vec!["Yes".to_string(), "No".to_string()]);
        if choose(ui, &confirm)? == 0 {
            self.player
                .party
                .dismiss(&mut self.world, pick, self.current_room);
            say(ui, format!("{name} leaves your party."))?;
        }
        Ok(())
    }

    /// End-of-game roll: survivors, then what they carried out.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec!["You and your companions have survived!".to_string()];
        if !self.player.party.is_empty() {
            lines.push(String::new());
            lines.push("Companions:".to_string());
            for &id in self.player.party.members() {
                let npc = self.world.npc(id);
                lines.push(format!(" - {} the {}", npc.name, npc.class));
            }
        }
        if !self.player.inventory.is_empty() {
            lines.push(String::new());
            lines.push("Inventory:".to_string());
            lines.extend(self.player.inventory.iter().map(|i| format!(" - {i}")));
        }
        lines
    }
}

pub fn inventory_lines(player: &Player) -> Vec<String> {
    if player.inventory.is_empty() {
        return vec!["Your inventory is empty.".to_string()];
    }
    let mut lines = vec!["Inventory:".to_string()];
    lines.extend(player.inventory.iter().map(|i| format!(" - {i}")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::world::BUNDLED_WORLD;

    /// Accepts every prompt without showing anything.
    struct Silent;

    impl Frontend for Silent {
        fn present(&mut self, _frame: &Frame) -> GameResult<()> {
            Ok(())
        }
        fn poll_input(&mut self) -> GameResult<InputEvent> {
            Err(GameError::Quit)
        }
        fn message(&mut self, _lines: &[String]) -> GameResult<()> {
            Ok(())
        }
        fn menu(&mut self, _menu: &Menu<'_>) -> GameResult<usize> {
            Ok(0)
        }
        fn text_input(&mut self, _prompt: &str) -> GameResult<String> {
            Ok(String::new())
        }
        fn floating_number(&mut self, _number: &ui::FloatingNumber) -> GameResult<()> {
            Ok(())
        }
    }

    fn state() -> GameState {
        let world = load_world_from_str(BUNDLED_WORLD).unwrap();
        GameState::new(world, "Tav", ClassId::Fighter, 1)
    }

    #[test]
    fn starts_in_the_pod_room() {
        let s = state();
        assert_eq!(s.world.room(s.current_room).name, "Pod Room");
        assert_eq!(s.player.pos, Point::new(320, 240));
        assert!(!s.is_over());
    }

    #[test]
    fn empty_inventory_message() {
        let s = state();
        assert_eq!(inventory_lines(&s.player), vec!["Your inventory is empty."]);
    }

    #[test]
    fn summary_lists_items_and_companions() {
        let mut s = state();
        let familiar = s.world.npc_by_key("familiar").unwrap();
        s.player.party.recruit(&mut s.world, familiar);
        s.player.give_item("small key");
        assert_eq!(
            s.summary(),
            vec![
                "You and your companions have survived!",
                "",
                "Companions:",
                " - Familiar the Beast",
                "",
                "Inventory:",
                " - small key",
            ]
        );
    }

    #[test]
    fn companions_close_the_gap_while_the_player_stands_still() {
        let mut s = state();
        let familiar = s.world.npc_by_key("familiar").unwrap();
        s.player.party.recruit(&mut s.world, familiar);
        s.world.npc_mut(familiar).pos = Point::new(20, 240);

        let mut ui = Silent;
        s.handle(InputEvent::Inventory, &mut ui).unwrap();
        assert_eq!(s.world.npc(familiar).pos, Point::new(50, 240));
        s.handle(InputEvent::Inventory, &mut ui).unwrap();
        // 10% of the remaining 270
        assert_eq!(s.world.npc(familiar).pos, Point::new(77, 240));
        assert_eq!(s.player.pos, Point::new(320, 240));
    }

    #[test]
    fn tick_moves_the_party() {
        let mut s = state();
        let familiar = s.world.npc_by_key("familiar").unwrap();
        s.player.party.recruit(&mut s.world, familiar);
        for _ in 0..40 {
            s.tick(Some(Direction::Right));
        }
        assert_eq!(s.player.pos, Point::new(480, 240));
        let gap = s.world.npc(familiar).pos.distance(s.player.pos);
        assert!(gap < 200.0, "familiar fell behind: {gap}");
    }
}
