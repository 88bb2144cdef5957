mod battle;
mod damage;
mod encounter;

pub use battle::{
    Actor, Battle, BattleStatus, Combatant, Effect, INITIATIVE_BONUS, Side, initiative_order,
};
pub use damage::{ability_value, heal};
pub use encounter::{engage, line_up, run};

/// Largest hostile group a single encounter takes on.
pub const MAX_ENEMIES: usize = 4;
/// Companions beyond this many sit the fight out.
pub const MAX_COMPANIONS_IN_BATTLE: usize = 3;
