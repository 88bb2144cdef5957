use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const SILVER: Color = Color::rgb(192, 192, 192);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const PURPLE: Color = Color::rgb(160, 32, 240);
    pub const SIENNA: Color = Color::rgb(160, 82, 45);
    pub const OLIVE: Color = Color::rgb(128, 128, 0);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 139);
    pub const FIREBRICK: Color = Color::rgb(178, 34, 34);
    pub const SKY_BLUE: Color = Color::rgb(135, 206, 235);
    pub const KHAKI: Color = Color::rgb(240, 230, 140);
    pub const OLIVE_DRAB: Color = Color::rgb(107, 142, 35);
    pub const DARK_OLIVE: Color = Color::rgb(85, 107, 47);
    pub const SLATE_BLUE: Color = Color::rgb(106, 90, 205);
}

/// One primitive for the render collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    OutlineRect { rect: Rect, color: Color },
    Line { from: Point, to: Point, color: Color },
    Text { at: Point, text: String, color: Color },
}

/// A frame is an ordered list of draw primitives; later commands paint over earlier ones.
#[derive(Default, Debug, Clone)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        if rect.w > 0 && rect.h > 0 {
            self.commands.push(DrawCommand::FillRect { rect, color });
        }
    }

    pub fn outline(&mut self, rect: Rect, color: Color) {
        if rect.w > 0 && rect.h > 0 {
            self.commands.push(DrawCommand::OutlineRect { rect, color });
        }
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    pub fn text(&mut self, at: Point, s: impl Into<String>, color: Color) {
        let text = s.into();
        if !text.trim().is_empty() {
            self.commands.push(DrawCommand::Text { at, text, color });
        }
    }

    /// Closed polyline through `points`.
    pub fn polygon(&mut self, points: &[Point], color: Color) {
        for (i, from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(*from, to, color);
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
