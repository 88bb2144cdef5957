//! The single formula every ability goes through.

/// `power + attack - defense / 2`, never below 1. Integer division truncates.
pub fn ability_value(power: i32, attack: i32, defense: i32) -> i32 {
    (power + attack - defense / 2).max(1)
}

/// Applies a heal without overshooting `max_hp`. A combatant already above its
/// maximum keeps its current hp.
pub fn heal(hp: i32, amount: i32, max_hp: i32) -> i32 {
    if hp >= max_hp { hp } else { (hp + amount).min(max_hp) }
}
