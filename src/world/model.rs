use std::collections::HashMap;

use strum::{Display, EnumString};

use crate::catalog::{Attribute, Attributes, ClassId};
use crate::geometry::{Point, Rect};
use crate::persona::Persona;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NpcId(pub usize);

/// A door addressed by the room it stands in and its position in that room's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoorRef {
    pub room: RoomId,
    pub index: usize,
}

/// Runtime world: owns every room and every NPC for the whole session.
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub start_room: RoomId,
    pub escape_room: RoomId,
    pub spawn: Point,
    pub rooms: Vec<Room>,
    pub npcs: Vec<Npc>,
    room_index: HashMap<String, RoomId>,
    reciprocal: HashMap<DoorRef, DoorRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RoomShape {
    #[default]
    Square,
    Circle,
    Wide,
    Tall,
    Control,
}

pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub shape: RoomShape,
    pub chests: Vec<Chest>,
    pub props: Vec<Prop>,
    pub doors: Vec<Door>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    pub attribute: Attribute,
    pub amount: i32,
}

pub struct Chest {
    pub rect: Rect,
    pub item: String,
    pub flag: Option<String>,
    pub bonus: Option<Bonus>,
    pub opened: bool,
}

pub struct Prop {
    pub rect: Rect,
    pub desc: String,
}

/// A directed edge of the room graph.
pub struct Door {
    pub rect: Rect,
    pub to: RoomId,
    pub key: Option<String>,
    pub open: bool,
}

impl Door {
    pub fn is_locked(&self) -> bool {
        !self.open
    }
}

pub struct DialogueChoice {
    pub text: String,
    pub reply: String,
    /// Picking this choice closes the conversation.
    pub ends: bool,
}

pub struct Dialogue {
    pub prompt: String,
    pub choices: Vec<DialogueChoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcStatus {
    Wild,
    Joined,
    Defeated,
}

pub struct Npc {
    pub id: String,
    pub name: String,
    pub class: ClassId,
    pub persona: Persona,
    pub dialogue: Option<Dialogue>,
    pub enemy: bool,
    pub pos: Point,
    pub room: RoomId,
    pub status: NpcStatus,
}

impl Npc {
    pub fn rect(&self) -> Rect {
        Rect::hitbox(self.pos)
    }

    pub fn is_wild(&self) -> bool {
        self.status == NpcStatus::Wild
    }

    pub fn joined(&self) -> bool {
        self.status == NpcStatus::Joined
    }

    pub fn attributes(&self) -> Attributes {
        self.class.info().attributes
    }
}

impl World {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        name: String,
        desc: String,
        rooms: Vec<Room>,
        npcs: Vec<Npc>,
        start_room: RoomId,
        escape_room: RoomId,
        spawn: Point,
    ) -> Self {
        let room_index = rooms.iter().map(|r| (r.name.clone(), r.id)).collect();
        let mut world = World {
            id,
            name,
            desc,
            start_room,
            escape_room,
            spawn,
            rooms,
            npcs,
            room_index,
            reciprocal: HashMap::new(),
        };
        world.link_doors();
        world
    }

    /// Pair every door with the first door of its destination that leads back.
    fn link_doors(&mut self) {
        for room in &self.rooms {
            for (index, door) in room.doors.iter().enumerate() {
                let back = self.rooms[door.to.0]
                    .doors
                    .iter()
                    .position(|d| d.to == room.id);
                if let Some(back_index) = back {
                    self.reciprocal.insert(
                        DoorRef {
                            room: room.id,
                            index,
                        },
                        DoorRef {
                            room: door.to,
                            index: back_index,
                        },
                    );
                }
            }
        }
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.0]
    }

    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.room_index.get(name).copied()
    }

    pub fn npc(&self, id: NpcId) -> &Npc {
        &self.npcs[id.0]
    }

    pub fn npc_mut(&mut self, id: NpcId) -> &mut Npc {
        &mut self.npcs[id.0]
    }

    pub fn npc_by_key(&self, key: &str) -> Option<NpcId> {
        self.npcs.iter().position(|n| n.id == key).map(NpcId)
    }

    /// NPCs currently placed in `room`, in world-file order.
    pub fn npcs_in(&self, room: RoomId) -> impl Iterator<Item = (NpcId, &Npc)> {
        self.npcs
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.room == room)
            .map(|(i, n)| (NpcId(i), n))
    }

    pub fn door(&self, at: DoorRef) -> &Door {
        &self.rooms[at.room.0].doors[at.index]
    }

    pub fn door_mut(&mut self, at: DoorRef) -> &mut Door {
        &mut self.rooms[at.room.0].doors[at.index]
    }

    /// The door on the far side of `at` that leads back to `at`'s room.
    pub fn reciprocal(&self, at: DoorRef) -> Option<DoorRef> {
        self.reciprocal.get(&at).copied()
    }
}
