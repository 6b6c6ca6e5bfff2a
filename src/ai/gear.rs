//! Gear-selection heuristics.

use crate::game::{
    MAX_GEAR, MIN_GEAR, NodeKind, PIT_GEAR_LIMIT, PlayerState, Track, max_roll, min_roll,
    roll_range, validate_gear,
};

/// Full heuristic gear choice for a turn.
pub(crate) fn heuristic_gear(track: &Track, you: &PlayerState, in_pits: bool) -> u8 {
    if you.gear == 0 {
        // Standing start.
        return MIN_GEAR;
    }
    let desired = if owes_stops(track, you) {
        gear_for_pending_stops(track, you)
    } else {
        gear_for_open_road(track, you)
    };
    legalize(you.gear, desired, you.hitpoints, in_pits)
}

/// Conservative baseline: shift up to third on open road, drop to second
/// while stops are owed.
pub(crate) fn steady_gear(track: &Track, you: &PlayerState, in_pits: bool) -> u8 {
    if you.gear == 0 {
        return MIN_GEAR;
    }
    let wanted = if owes_stops(track, you) {
        2
    } else {
        (you.gear + 1).min(3)
    };
    legalize(you.gear, wanted, you.hitpoints, in_pits)
}

/// Clamp a desired gear to the legality rule.
///
/// Deep upshifts are cut to one step; a downshift whose damage cost is
/// illegal or unsurvivable demotes by exactly one gear instead.
pub(crate) fn legalize(old: u8, wanted: u8, hitpoints: i32, in_pits: bool) -> u8 {
    let mut gear = wanted.clamp(MIN_GEAR, MAX_GEAR);
    if in_pits {
        gear = gear.min(PIT_GEAR_LIMIT);
    }
    if gear > old {
        gear = gear.min(old + 1);
    }
    if validate_gear(old, gear, hitpoints, in_pits).is_ok() {
        gear
    } else {
        // A plain one-step downshift is always legal.
        old.saturating_sub(1).max(MIN_GEAR)
    }
}

fn owes_stops(track: &Track, you: &PlayerState) -> bool {
    track
        .kind(you.node)
        .is_some_and(|kind| kind.is_curve() && kind.stop_count() > you.curve_stops)
}

/// Stops still owed in the current curve: pick the highest gear whose
/// worst-case roll can still be braked down before the forced exit without
/// running out of hitpoints. Second gear is the floor.
fn gear_for_pending_stops(track: &Track, you: &PlayerState) -> u8 {
    let Some(distance_out) = track.distance_to_curve_exit(you.node) else {
        return 2;
    };
    let hitpoints = u64::try_from(you.hitpoints.max(0)).unwrap_or(0);
    for gear in (2..=MAX_GEAR).rev() {
        if let Some(worst) = max_roll(gear) {
            if u64::from(worst) < u64::from(distance_out) + hitpoints {
                return gear;
            }
        }
    }
    2
}

/// Clear of stops: gear by what the next curve demands.
fn gear_for_open_road(track: &Track, you: &PlayerState) -> u8 {
    let largest_legal = (you.gear + 1).min(MAX_GEAR);
    let Some((distance_curve, entry)) = track.next_curve_entry(you.node) else {
        return largest_legal;
    };
    let stops = track.kind(entry).map_or(0, NodeKind::stop_count);
    if stops > 1 {
        // A heavy curve: smallest gear from third up that is guaranteed to
        // arrive, so the approach stays controllable.
        for gear in 3..=MAX_GEAR {
            if min_roll(gear).is_some_and(|least| least >= distance_curve) {
                return gear;
            }
        }
        return largest_legal;
    }
    // A light curve: aim the likely roll at the start of the straight
    // beyond it, counting overshoot double.
    let target = track
        .distance_to_straight_after_curve(you.node)
        .unwrap_or(distance_curve);
    let mut best: Option<(i64, u8)> = None;
    for gear in 2..=largest_legal {
        let Some((least, most)) = roll_range(gear) else {
            continue;
        };
        if least < distance_curve {
            continue;
        }
        let expected = i64::from(least + most) / 2;
        let deviation = expected - i64::from(target);
        let score = if deviation > 0 { deviation * 2 } else { -deviation };
        if best.is_none_or(|(held, _)| score < held) {
            best = Some((score, gear));
        }
    }
    best.map_or(largest_legal, |(_, gear)| gear)
}
