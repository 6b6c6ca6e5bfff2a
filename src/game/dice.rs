//! Gear-dependent dice.
//!
//! Each gear rolls a different die; higher gears move farther but have a
//! higher floor, which is what makes curve approaches dangerous.

use rand::Rng;

/// Lowest selectable gear.
pub const MIN_GEAR: u8 = 1;

/// Highest selectable gear.
pub const MAX_GEAR: u8 = 6;

/// Highest gear selectable while in the pit lane.
pub const PIT_GEAR_LIMIT: u8 = 4;

/// Largest value any gear die can roll. Bounds every traversal budget.
pub const MAX_ROLL: u32 = 30;

/// Inclusive roll ranges, indexed by gear - 1.
const ROLL_RANGES: [(u32, u32); 6] = [(1, 2), (2, 4), (4, 8), (7, 12), (11, 20), (21, 30)];

/// Inclusive (min, max) roll range of a gear's die.
///
/// Returns `None` for gears outside 1..=6.
#[must_use]
pub const fn roll_range(gear: u8) -> Option<(u32, u32)> {
    if gear >= MIN_GEAR && gear <= MAX_GEAR {
        Some(ROLL_RANGES[(gear - 1) as usize])
    } else {
        None
    }
}

/// Smallest roll a gear's die can produce, or `None` for invalid gears.
#[must_use]
pub const fn min_roll(gear: u8) -> Option<u32> {
    match roll_range(gear) {
        Some((low, _)) => Some(low),
        None => None,
    }
}

/// Largest roll a gear's die can produce, or `None` for invalid gears.
#[must_use]
pub const fn max_roll(gear: u8) -> Option<u32> {
    match roll_range(gear) {
        Some((_, high)) => Some(high),
        None => None,
    }
}

/// Roll the die for a gear, uniform over its inclusive range.
///
/// Returns `None` for gears outside 1..=6.
pub fn roll_gear<R: Rng>(rng: &mut R, gear: u8) -> Option<u32> {
    let (low, high) = roll_range(gear)?;
    Some(rng.gen_range(low..=high))
}
