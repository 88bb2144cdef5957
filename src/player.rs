use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use tracing::warn;

use crate::catalog::{Attributes, ClassId};
use crate::geometry::{Point, Rect};
use crate::party::Party;
use crate::persona::Persona;
use crate::world::Bonus;

pub const INVENTORY_CAPACITY: usize = 8;
pub const FLAG_CAPACITY: usize = 16;

/// Units moved per tick while a direction is held.
pub const MOVE_SPEED: i32 = 4;
pub const BOUNDS_MIN: Point = Point::new(20, 20);
pub const BOUNDS_MAX: Point = Point::new(620, 460);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -MOVE_SPEED),
            Direction::Down => (0, MOVE_SPEED),
            Direction::Left => (-MOVE_SPEED, 0),
            Direction::Right => (MOVE_SPEED, 0),
        }
    }
}

pub struct Player {
    pub pos: Point,
    pub name: String,
    pub class: ClassId,
    /// Class attributes plus equipment bonuses picked up so far.
    pub attributes: Attributes,
    pub party: Party,
    pub inventory: ArrayVec<String, INVENTORY_CAPACITY>,
    pub flags: BTreeMap<String, bool>,
}

impl Player {
    pub fn new(name: impl Into<String>, class: ClassId, pos: Point) -> Self {
        Player {
            pos,
            name: name.into(),
            class,
            attributes: class.info().attributes,
            party: Party::default(),
            inventory: ArrayVec::new(),
            flags: BTreeMap::new(),
        }
    }

    pub fn persona(&self) -> Persona {
        Persona::for_class(self.class)
    }

    pub fn hitbox(&self) -> Rect {
        Rect::hitbox(self.pos)
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Returns false (and changes nothing) when the inventory is full.
    pub fn give_item(&mut self, item: &str) -> bool {
        match self.inventory.try_push(item.to_string()) {
            Ok(()) => true,
            Err(_) => {
                warn!(item, "inventory full, item dropped");
                false
            }
        }
    }

    pub fn apply_bonus(&mut self, bonus: Bonus) {
        self.attributes.add(bonus.attribute, bonus.amount);
    }

    /// New flags beyond the capacity are ignored; existing ones can always be updated.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        if let Some(slot) = self.flags.get_mut(name) {
            *slot = value;
        } else if self.flags.len() < FLAG_CAPACITY {
            self.flags.insert(name.to_string(), value);
        } else {
            warn!(flag = name, "flag table full, flag dropped");
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn step(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        self.pos = Point::new(
            (self.pos.x + dx).clamp(BOUNDS_MIN.x, BOUNDS_MAX.x),
            (self.pos.y + dy).clamp(BOUNDS_MIN.y, BOUNDS_MAX.y),
        );
    }
}
