//! The seam to the presentation layer. The core never draws or polls directly; it
//! hands frames to a [`Frontend`] and asks it for blocking answers.

use tracing::debug;

use crate::error::GameResult;
use crate::geometry::Point;
use crate::player::Direction;
use crate::render::frame::{Color, Frame};

/// A single resolved input event from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Move(Direction),
    Interact,
    Inventory,
    Party,
}

/// A numbered choice menu.
#[derive(Debug, Clone)]
pub struct Menu<'a> {
    pub question: &'a str,
    pub options: Vec<String>,
    pub speaker: Option<&'a str>,
}

impl<'a> Menu<'a> {
    pub fn new(question: &'a str, options: Vec<String>) -> Self {
        Menu {
            question,
            options,
            speaker: None,
        }
    }

    pub fn spoken_by(mut self, speaker: &'a str) -> Self {
        self.speaker = Some(speaker);
        self
    }
}

/// A transient number rising from a combatant; carries no state of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingNumber {
    /// Negative for damage, positive for healing.
    pub value: i32,
    /// Where the target stands; the frontend animates the rise from here.
    pub at: Point,
    pub color: Color,
    pub caption: String,
}

impl FloatingNumber {
    pub fn label(&self) -> String {
        if self.value < 0 {
            format!("-{}", -self.value)
        } else {
            format!("+{}", self.value)
        }
    }
}

/// Every method may return `GameError::Quit`, which callers propagate untouched.
pub trait Frontend {
    /// Show one frame of the current state.
    fn present(&mut self, frame: &Frame) -> GameResult<()>;

    /// Next resolved input event. Blocks until one is available.
    fn poll_input(&mut self) -> GameResult<InputEvent>;

    /// Blocking message box; returns once the player acknowledges it.
    fn message(&mut self, lines: &[String]) -> GameResult<()>;

    /// Blocking numbered menu. Returns the raw zero-based selection, which may be
    /// out of range; use [`choose`] to get a validated answer.
    fn menu(&mut self, menu: &Menu<'_>) -> GameResult<usize>;

    /// Blocking single-line text entry.
    fn text_input(&mut self, prompt: &str) -> GameResult<String>;

    /// Play a floating number over the current frame.
    fn floating_number(&mut self, number: &FloatingNumber) -> GameResult<()>;

    /// End-of-game roll. Defaults to a plain message box.
    fn credits(&mut self, lines: &[String]) -> GameResult<()> {
        self.message(lines)
    }
}

/// Ask until the player picks an existing option. Out-of-range keys are ignored.
pub fn choose(ui: &mut dyn Frontend, menu: &Menu<'_>) -> GameResult<usize> {
    loop {
        let idx = ui.menu(menu)?;
        if idx < menu.options.len() {
            return Ok(idx);
        }
        debug!(idx, options = menu.options.len(), "menu choice out of range");
    }
}

/// One-line convenience for `Frontend::message`.
pub fn say(ui: &mut dyn Frontend, line: impl Into<String>) -> GameResult<()> {
    ui.message(&[line.into()])
}
