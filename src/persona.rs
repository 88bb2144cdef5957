//! How an NPC (or the player) looks. Each persona supplies its own sprite routine;
//! dialogue is carried separately on the NPC because hostile personas have none.

use strum::{Display, EnumString};

use crate::catalog::ClassId;
use crate::geometry::{Point, Rect};
use crate::render::frame::{Color, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Persona {
    Warrior,
    Rogue,
    Mage,
    Cleric,
    Familiar,
    Imp,
    Plain,
}

impl Persona {
    /// Sprite used for a player of the given class.
    pub fn for_class(class: ClassId) -> Persona {
        match class {
            ClassId::Fighter => Persona::Warrior,
            ClassId::Rogue => Persona::Rogue,
            ClassId::Mage => Persona::Mage,
            ClassId::Healer => Persona::Cleric,
            ClassId::Beast => Persona::Familiar,
            ClassId::Demon => Persona::Imp,
        }
    }

    pub fn draw(self, frame: &mut Frame, feet: Point) {
        match self {
            Persona::Warrior => draw_warrior(frame, feet),
            Persona::Rogue => draw_rogue(frame, feet),
            Persona::Mage => draw_mage(frame, feet),
            Persona::Cleric => draw_cleric(frame, feet),
            Persona::Familiar => draw_familiar(frame, feet),
            Persona::Imp => draw_imp(frame, feet),
            Persona::Plain => draw_humanoid(frame, feet, Color::WHITE),
        }
    }
}

fn draw_humanoid(frame: &mut Frame, p: Point, color: Color) {
    // head + eyes + mouth
    frame.fill(Rect::new(p.x - 5, p.y - 48, 10, 10), color);
    frame.fill(Rect::new(p.x - 3, p.y - 46, 2, 2), Color::WHITE);
    frame.fill(Rect::new(p.x + 1, p.y - 46, 2, 2), Color::WHITE);
    frame.fill(Rect::new(p.x - 2, p.y - 42, 4, 1), Color::BLACK);
    // torso
    frame.fill(Rect::new(p.x - 4, p.y - 38, 8, 20), color);
    // arms
    frame.fill(Rect::new(p.x - 8, p.y - 38, 3, 15), color);
    frame.fill(Rect::new(p.x + 5, p.y - 38, 3, 15), color);
    // legs
    frame.fill(Rect::new(p.x - 4, p.y - 18, 3, 18), color);
    frame.fill(Rect::new(p.x + 1, p.y - 18, 3, 18), color);
}

fn draw_warrior(frame: &mut Frame, p: Point) {
    draw_humanoid(frame, p, Color::FIREBRICK);
    frame.fill(Rect::new(p.x - 5, p.y - 52, 10, 3), Color::SIENNA);
    frame.line(p.offset(6, -20), p.offset(10, -36), Color::SILVER);
}

fn draw_cleric(frame: &mut Frame, p: Point) {
    draw_humanoid(frame, p, Color::SKY_BLUE);
    frame.fill(Rect::new(p.x - 5, p.y - 52, 10, 2), Color::KHAKI);
    frame.line(p.offset(0, -28), p.offset(0, -44), Color::WHITE);
    frame.line(p.offset(-4, -36), p.offset(4, -36), Color::WHITE);
}

fn draw_rogue(frame: &mut Frame, p: Point) {
    draw_humanoid(frame, p, Color::OLIVE_DRAB);
    // hood
    frame.fill(Rect::new(p.x - 6, p.y - 48, 12, 8), Color::DARK_OLIVE);
    frame.fill(Rect::new(p.x - 5, p.y - 46, 10, 3), Color::BLACK);
    frame.fill(Rect::new(p.x - 3, p.y - 46, 2, 2), Color::WHITE);
    frame.fill(Rect::new(p.x + 1, p.y - 46, 2, 2), Color::WHITE);
    frame.line(p.offset(6, -20), p.offset(10, -30), Color::SILVER);
}

fn draw_mage(frame: &mut Frame, p: Point) {
    draw_humanoid(frame, p, Color::SLATE_BLUE);
    frame.polygon(
        &[p.offset(-6, -48), p.offset(6, -48), p.offset(0, -60)],
        Color::PURPLE,
    );
    frame.line(p.offset(6, -20), p.offset(6, -40), Color::SIENNA);
    frame.fill(Rect::new(p.x + 3, p.y - 45, 6, 6), Color::SIENNA);
}

fn draw_familiar(frame: &mut Frame, p: Point) {
    // a blob: two crossed rectangles read as a circle at this size
    frame.fill(Rect::new(p.x - 8, p.y - 13, 16, 10), Color::CYAN);
    frame.fill(Rect::new(p.x - 5, p.y - 16, 10, 16), Color::CYAN);
}

fn draw_imp(frame: &mut Frame, p: Point) {
    frame.fill(Rect::new(p.x - 6, p.y - 16, 12, 16), Color::RED);
    frame.line(p.offset(-4, -16), p.offset(-2, -20), Color::BLACK);
    frame.line(p.offset(4, -16), p.offset(2, -20), Color::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn personas_parse_from_world_files() {
        assert_eq!(Persona::from_str("cleric").unwrap(), Persona::Cleric);
        assert_eq!(Persona::from_str("Imp").unwrap(), Persona::Imp);
        assert!(Persona::from_str("dragon").is_err());
    }

    #[test]
    fn every_persona_draws_something() {
        for persona in [
            Persona::Warrior,
            Persona::Rogue,
            Persona::Mage,
            Persona::Cleric,
            Persona::Familiar,
            Persona::Imp,
            Persona::Plain,
        ] {
            let mut frame = Frame::new();
            persona.draw(&mut frame, Point::new(100, 100));
            assert!(!frame.commands.is_empty(), "{persona} drew nothing");
        }
    }
}
