//! Static class catalog: abilities, base attributes and the attribute each class
//! attacks and defends with.

use strum::{Display, EnumString};

use TargetKind::{Ally, Enemy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Ally,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ability {
    pub name: &'static str,
    pub target: TargetKind,
    pub melee: bool,
    pub power: i32,
}

impl Ability {
    const fn new(name: &'static str, target: TargetKind, power: i32, melee: bool) -> Self {
        Ability {
            name,
            target,
            melee,
            power,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub wisdom: i32,
    /// Max hit points of a fresh combatant.
    pub hp: i32,
}

impl Attributes {
    const fn new(strength: i32, agility: i32, wisdom: i32, hp: i32) -> Self {
        Attributes {
            strength,
            agility,
            wisdom,
            hp,
        }
    }

    pub fn get(&self, attr: Attribute) -> i32 {
        match attr {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Wisdom => self.wisdom,
            Attribute::Hp => self.hp,
        }
    }

    pub fn add(&mut self, attr: Attribute, amount: i32) {
        match attr {
            Attribute::Strength => self.strength += amount,
            Attribute::Agility => self.agility += amount,
            Attribute::Wisdom => self.wisdom += amount,
            Attribute::Hp => self.hp += amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Attribute {
    Strength,
    Agility,
    Wisdom,
    Hp,
}

#[derive(Debug)]
pub struct ClassInfo {
    pub name: &'static str,
    pub abilities: &'static [Ability],
    pub attributes: Attributes,
    pub attack: Attribute,
    pub defense: Attribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ClassId {
    Fighter,
    Rogue,
    Mage,
    Healer,
    Beast,
    Demon,
}

impl ClassId {
    /// Classes offered at character creation, in menu order.
    pub const PLAYABLE: [ClassId; 4] = [
        ClassId::Fighter,
        ClassId::Rogue,
        ClassId::Mage,
        ClassId::Healer,
    ];

    pub fn info(self) -> &'static ClassInfo {
        match self {
            ClassId::Fighter => &FIGHTER,
            ClassId::Rogue => &ROGUE,
            ClassId::Mage => &MAGE,
            ClassId::Healer => &HEALER,
            ClassId::Beast => &BEAST,
            ClassId::Demon => &DEMON,
        }
    }

    pub fn is_playable(self) -> bool {
        Self::PLAYABLE.contains(&self)
    }
}

static FIGHTER: ClassInfo = ClassInfo {
    name: "Fighter",
    abilities: &[
        Ability::new("Strike", Enemy, 3, true),
        Ability::new("Power Attack", Enemy, 5, true),
    ],
    attributes: Attributes::new(8, 4, 3, 12),
    attack: Attribute::Strength,
    defense: Attribute::Strength,
};

static ROGUE: ClassInfo = ClassInfo {
    name: "Rogue",
    abilities: &[
        Ability::new("Stab", Enemy, 3, true),
        Ability::new("Sneak Attack", Enemy, 4, true),
    ],
    attributes: Attributes::new(5, 8, 3, 10),
    attack: Attribute::Agility,
    defense: Attribute::Agility,
};

static MAGE: ClassInfo = ClassInfo {
    name: "Mage",
    abilities: &[
        Ability::new("Firebolt", Enemy, 4, false),
        Ability::new("Barrier", Ally, 3, false),
    ],
    attributes: Attributes::new(3, 5, 8, 8),
    attack: Attribute::Wisdom,
    defense: Attribute::Wisdom,
};

static HEALER: ClassInfo = ClassInfo {
    name: "Healer",
    abilities: &[
        Ability::new("Smite", Enemy, 3, true),
        Ability::new("Heal", Ally, 4, false),
    ],
    attributes: Attributes::new(4, 4, 8, 10),
    attack: Attribute::Wisdom,
    defense: Attribute::Wisdom,
};

static BEAST: ClassInfo = ClassInfo {
    name: "Beast",
    abilities: &[
        Ability::new("Bite", Enemy, 2, true),
        Ability::new("Encourage", Ally, 2, false),
    ],
    attributes: Attributes::new(6, 6, 2, 8),
    attack: Attribute::Strength,
    defense: Attribute::Agility,
};

static DEMON: ClassInfo = ClassInfo {
    name: "Demon",
    abilities: &[Ability::new("Claw", Enemy, 2, true)],
    attributes: Attributes::new(5, 5, 5, 10),
    attack: Attribute::Strength,
    defense: Attribute::Strength,
};
