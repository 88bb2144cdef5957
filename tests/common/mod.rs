#![allow(dead_code)]

use std::collections::VecDeque;

use nautiloid::GameState;
use nautiloid::catalog::ClassId;
use nautiloid::error::{GameError, GameResult};
use nautiloid::geometry::Point;
use nautiloid::load_world_from_str;
use nautiloid::render::frame::Frame;
use nautiloid::ui::{FloatingNumber, Frontend, InputEvent, Menu};
use nautiloid::world::BUNDLED_WORLD;

/// Replays canned answers and records everything shown.
#[derive(Default)]
pub struct Scripted {
    pub events: VecDeque<InputEvent>,
    /// Menu answers; once exhausted every menu is answered with 0.
    pub answers: VecDeque<usize>,
    pub texts: VecDeque<String>,
    pub messages: Vec<String>,
    pub questions: Vec<String>,
    pub floats: Vec<FloatingNumber>,
    pub credits: Vec<String>,
    pub frames: usize,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: &[usize]) -> Self {
        Scripted {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn said(&self, line: &str) -> bool {
        self.messages.iter().any(|m| m == line)
    }
}

impl Frontend for Scripted {
    fn present(&mut self, _frame: &Frame) -> GameResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn poll_input(&mut self) -> GameResult<InputEvent> {
        self.events.pop_front().ok_or(GameError::Quit)
    }

    fn message(&mut self, lines: &[String]) -> GameResult<()> {
        self.messages.extend(lines.iter().cloned());
        Ok(())
    }

    fn menu(&mut self, menu: &Menu<'_>) -> GameResult<usize> {
        self.questions.push(menu.question.to_string());
        Ok(self.answers.pop_front().unwrap_or(0))
    }

    fn text_input(&mut self, _prompt: &str) -> GameResult<String> {
        self.texts.pop_front().ok_or(GameError::Quit)
    }

    fn floating_number(&mut self, number: &FloatingNumber) -> GameResult<()> {
        self.floats.push(number.clone());
        Ok(())
    }

    fn credits(&mut self, lines: &[String]) -> GameResult<()> {
        self.credits.extend(lines.iter().cloned());
        Ok(())
    }
}

pub fn game(class: ClassId) -> GameState {
    seeded(class, 7)
}

pub fn seeded(class: ClassId, seed: u64) -> GameState {
    let world = load_world_from_str(BUNDLED_WORLD).expect("bundled world loads");
    GameState::new(world, "Tav", class, seed)
}

/// Drops the player at `feet` in the named room.
pub fn place(game: &mut GameState, room: &str, feet: Point) {
    game.current_room = game.world.room_id(room).expect("room exists");
    game.player.pos = feet;
}
