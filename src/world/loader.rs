use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use super::model::{
    Bonus, Chest, Dialogue, DialogueChoice, Door, Npc, NpcStatus, Prop, Room, RoomId, RoomShape,
    World,
};
use super::validator::validate_world;
use crate::catalog::{Attribute, ClassId};
use crate::error::{GameError, GameResult};
use crate::geometry::{Point, Rect};
use crate::persona::Persona;

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start_room: String,
    escape_room: String,
    #[serde(default)]
    desc: String,
    #[serde(default = "default_spawn")]
    spawn: [i32; 2],
}

#[derive(Deserialize)]
struct RoomConfig {
    name: String,
    #[serde(default)]
    shape: Option<String>,

    #[serde(default)]
    chest: Vec<ChestConfig>, // [[room.chest]]
    #[serde(default)]
    prop: Vec<PropConfig>, // [[room.prop]]
    #[serde(default)]
    door: Vec<DoorConfig>, // [[room.door]]
    #[serde(default)]
    npc: Vec<NpcConfig>, // [[room.npc]]
}

#[derive(Deserialize)]
struct ChestConfig {
    rect: [i32; 4],
    item: String,

    #[serde(default)]
    flag: Option<String>,

    #[serde(default)]
    bonus: Option<BonusConfig>,
}

#[derive(Deserialize)]
struct BonusConfig {
    attribute: String,
    amount: i32,
}

#[derive(Deserialize)]
struct PropConfig {
    rect: [i32; 4],
    desc: String,
}

#[derive(Deserialize)]
struct DoorConfig {
    rect: [i32; 4],
    to: String,

    #[serde(default)]
    key: Option<String>,

    /// Only meaningful for keyed doors: start unlocked anyway.
    #[serde(default)]
    open: bool,
}

#[derive(Deserialize)]
struct NpcConfig {
    id: String,
    name: String,
    class: String,
    pos: [i32; 2],

    #[serde(default)]
    persona: Option<String>,

    #[serde(default)]
    enemy: bool,

    #[serde(default)]
    dialogue: Option<DialogueConfig>,
}

#[derive(Deserialize)]
struct DialogueConfig {
    prompt: String,
    #[serde(default)]
    choice: Vec<ChoiceConfig>, // [[room.npc.dialogue.choice]]
}

#[derive(Deserialize)]
struct ChoiceConfig {
    text: String,
    reply: String,
    #[serde(default)]
    ends: bool,
}

fn default_spawn() -> [i32; 2] {
    [320, 240]
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Load and validate a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> GameResult<World> {
    let contents = fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_world_from_str(&contents)
}

/// Load and validate a world from TOML text.
pub fn load_world_from_str(contents: &str) -> GameResult<World> {
    let world_file: WorldFile = toml::from_str(contents)?;

    if world_file.world.id.trim().is_empty() {
        return Err(GameError::invalid("world.id may not be empty"));
    }

    // Room ids are assigned in file order so doors can be resolved by name.
    let mut room_ids: HashMap<String, RoomId> = HashMap::new();
    for (i, rc) in world_file.room.iter().enumerate() {
        if room_ids.insert(rc.name.clone(), RoomId(i)).is_some() {
            return Err(GameError::invalid(format!("Duplicate room name: {}", rc.name)));
        }
    }

    let lookup_room = |name: &str, what: &str| -> GameResult<RoomId> {
        room_ids.get(name).copied().ok_or_else(|| {
            GameError::invalid(format!("{what} '{name}' not found among rooms"))
        })
    };

    let start_room = lookup_room(&world_file.world.start_room, "start_room")?;
    let escape_room = lookup_room(&world_file.world.escape_room, "escape_room")?;

    let mut rooms: Vec<Room> = Vec::new();
    let mut npcs: Vec<Npc> = Vec::new();
    let mut npc_keys: HashSet<String> = HashSet::new();

    for (i, rc) in world_file.room.into_iter().enumerate() {
        let id = RoomId(i);

        let shape = match rc.shape.as_deref() {
            Some(s) => parse_named::<RoomShape>(s, "room shape")?,
            None => RoomShape::default(),
        };

        let chests = rc
            .chest
            .into_iter()
            .map(|c| {
                let bonus = match c.bonus {
                    Some(b) => Some(Bonus {
                        attribute: parse_named::<Attribute>(&b.attribute, "attribute")?,
                        amount: b.amount,
                    }),
                    None => None,
                };
                Ok(Chest {
                    rect: to_rect(c.rect),
                    item: c.item.trim().to_string(),
                    flag: c.flag.filter(|f| !f.trim().is_empty()),
                    bonus,
                    opened: false,
                })
            })
            .collect::<GameResult<Vec<Chest>>>()?;

        let props = rc
            .prop
            .into_iter()
            .map(|p| Prop {
                rect: to_rect(p.rect),
                desc: normalize_multiline_desc(&p.desc),
            })
            .collect();

        let doors = rc
            .door
            .into_iter()
            .map(|d| {
                let to = lookup_room(&d.to, &format!("room '{}' door target", rc.name))?;
                let key = d.key.filter(|k| !k.trim().is_empty());
                Ok(Door {
                    rect: to_rect(d.rect),
                    to,
                    open: key.is_none() || d.open,
                    key,
                })
            })
            .collect::<GameResult<Vec<Door>>>()?;

        for nc in rc.npc {
            if !npc_keys.insert(nc.id.clone()) {
                return Err(GameError::invalid(format!("Duplicate npc id: {}", nc.id)));
            }

            let class = parse_named::<ClassId>(&nc.class, "class")?;
            let persona = match nc.persona.as_deref() {
                Some(p) => parse_named::<Persona>(p, "persona")?,
                None => Persona::Plain,
            };

            let dialogue = nc.dialogue.map(|d| Dialogue {
                prompt: normalize_multiline_desc(&d.prompt),
                choices: d
                    .choice
                    .into_iter()
                    .map(|c| DialogueChoice {
                        text: c.text,
                        reply: normalize_multiline_desc(&c.reply),
                        ends: c.ends,
                    })
                    .collect(),
            });

            npcs.push(Npc {
                id: nc.id,
                name: nc.name,
                class,
                persona,
                dialogue,
                enemy: nc.enemy,
                pos: Point::new(nc.pos[0], nc.pos[1]),
                room: id,
                status: NpcStatus::Wild,
            });
        }

        rooms.push(Room {
            id,
            name: rc.name,
            shape,
            chests,
            props,
            doors,
        });
    }

    let [sx, sy] = world_file.world.spawn;
    let world = World::new(
        world_file.world.id,
        world_file.world.name,
        normalize_multiline_desc(&world_file.world.desc),
        rooms,
        npcs,
        start_room,
        escape_room,
        Point::new(sx, sy),
    );

    let errors = validate_world(&world);
    if !errors.is_empty() {
        return Err(GameError::Validation(errors));
    }

    debug!(
        world = %world.id,
        rooms = world.rooms.len(),
        npcs = world.npcs.len(),
        "world loaded"
    );
    Ok(world)
}

fn to_rect([x, y, w, h]: [i32; 4]) -> Rect {
    Rect::new(x, y, w, h)
}

fn parse_named<T: FromStr>(raw: &str, what: &str) -> GameResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| GameError::invalid(format!("unknown {what} '{raw}'")))
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !result.is_empty() {
            match pending_blank_lines {
                // Wrapped line in TOML joins with a space
                0 => result.push(' '),
                1 => result.push('\n'),
                _ => result.push_str("\n\n"),
            }
        }
        result.push_str(trimmed);
        pending_blank_lines = 0;
    }

    result
}
