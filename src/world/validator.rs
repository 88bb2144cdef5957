use std::collections::HashSet;

use thiserror::Error;

use super::model::World;
use crate::combat::MAX_ENEMIES;

/// Maximum number of dialogue choices; menus are answered with the keys 1-9.
pub const MAX_CHOICES: usize = 9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.rooms.is_empty() {
        errors.push(ValidationError::new("world has no rooms"));
    }

    if world.start_room == world.escape_room {
        errors.push(ValidationError::new(
            "start_room and escape_room must be different rooms",
        ));
    }

    // Every key a door asks for must be obtainable somewhere.
    let loot: HashSet<&str> = world
        .rooms
        .iter()
        .flat_map(|r| r.chests.iter().map(|c| c.item.as_str()))
        .collect();

    for room in &world.rooms {
        for door in &room.doors {
            if let Some(key) = &door.key {
                if door.is_locked() && !loot.contains(key.as_str()) {
                    errors.push(ValidationError::new(format!(
                        "room '{}' door to '{}' needs '{}' but no chest holds it",
                        room.name,
                        world.room(door.to).name,
                        key
                    )));
                }
            }
        }

        for chest in &room.chests {
            if chest.item.is_empty() {
                errors.push(ValidationError::new(format!(
                    "room '{}' has a chest with no item",
                    room.name
                )));
            }
        }

        let hostiles = world.npcs_in(room.id).filter(|(_, n)| n.enemy).count();
        if hostiles > MAX_ENEMIES {
            errors.push(ValidationError::new(format!(
                "room '{}' holds {} hostile npcs; an encounter takes at most {}",
                room.name, hostiles, MAX_ENEMIES
            )));
        }
    }

    // Validate NPC dialogue
    for npc in &world.npcs {
        let Some(dialogue) = &npc.dialogue else {
            continue;
        };

        if npc.enemy {
            errors.push(ValidationError::new(format!(
                "npc '{}' is hostile but has dialogue",
                npc.id
            )));
        }

        if dialogue.choices.is_empty() || dialogue.choices.len() > MAX_CHOICES {
            errors.push(ValidationError::new(format!(
                "npc '{}' dialogue needs between 1 and {} choices (has {})",
                npc.id,
                MAX_CHOICES,
                dialogue.choices.len()
            )));
        }

        if !dialogue.choices.iter().any(|c| c.ends) {
            errors.push(ValidationError::new(format!(
                "npc '{}' dialogue has no choice that ends the conversation",
                npc.id
            )));
        }
    }

    errors
}
