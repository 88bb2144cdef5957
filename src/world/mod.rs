mod loader;
mod model;
mod validator;

pub use loader::{load_world_from_file, load_world_from_str};

pub use model::{
    Bonus, Chest, Dialogue, DialogueChoice, Door, DoorRef, Npc, NpcId, NpcStatus, Prop, Room,
    RoomId, RoomShape, World,
};
pub use validator::{ValidationError, validate_world};

/// The world shipped in `public/nautiloid.toml`, embedded for tests and tooling.
pub const BUNDLED_WORLD: &str = include_str!("../../public/nautiloid.toml");
