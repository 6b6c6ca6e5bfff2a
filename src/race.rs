//! Race driver for Chicane.
//!
//! Provides a pure function interface: `(seed, pilots, track, config) ->
//! RaceResult`. The driver owns all mutable player state; the core rules
//! layer only ever sees snapshots. Because every random draw flows through
//! one seeded generator, the same inputs always produce the same race.

mod invariants;
mod trackgen;

pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use trackgen::{SegmentPlan, TrackGenError, generate_track, random_plan, standard_plan};

use std::collections::BTreeSet;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::ai::PilotKind;
use crate::error::{EngineError, GearError, TrackError};
use crate::game::{
    MoveOutcome, NodeId, NodeKind, PlayerId, PlayerState, Track, collision_roll, death_check,
    is_close_to, roll_gear, validate_gear,
};

/// Configuration for a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RaceConfig {
    /// Laps each car must complete.
    pub laps: i32,
    /// Starting hitpoints per car.
    pub hitpoints: i32,
    /// Hard turn limit; a safety stop for degenerate tracks.
    pub max_turns: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            laps: 2,
            hitpoints: 18,
            max_turns: 500,
        }
    }
}

/// Errors that prevent a race from running to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// The track failed validation.
    Track(TrackError),
    /// The movement engine hit a fatal internal error.
    Engine(EngineError),
    /// A pilot produced an illegal gear request.
    Gear {
        /// Offending player.
        player: PlayerId,
        /// The rejection.
        error: GearError,
    },
    /// Fewer than two cars entered.
    NotEnoughPlayers(usize),
    /// The grid has fewer start boxes than cars.
    GridTooSmall {
        /// Start boxes on the track.
        boxes: usize,
        /// Cars entered.
        players: usize,
    },
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::Track(err) => write!(f, "track error: {err}"),
            RaceError::Engine(err) => write!(f, "engine error: {err}"),
            RaceError::Gear { player, error } => {
                write!(f, "player {player} requested an illegal gear: {error}")
            }
            RaceError::NotEnoughPlayers(count) => {
                write!(f, "need at least 2 cars, got {count}")
            }
            RaceError::GridTooSmall { boxes, players } => {
                write!(f, "grid has {boxes} start boxes for {players} cars")
            }
        }
    }
}

impl std::error::Error for RaceError {}

impl From<TrackError> for RaceError {
    fn from(err: TrackError) -> Self {
        RaceError::Track(err)
    }
}

impl From<EngineError> for RaceError {
    fn from(err: EngineError) -> Self {
        RaceError::Engine(err)
    }
}

/// One applied move in the turn log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnEvent {
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Acting player.
    pub player: PlayerId,
    /// Gear the roll was made in.
    pub gear: u8,
    /// The die roll.
    pub roll: u32,
    /// Node the car started the turn on.
    pub from: NodeId,
    /// Node the car ended the turn on.
    pub to: NodeId,
    /// Overshoot damage of the chosen option.
    pub overshoot: u32,
    /// Braking damage of the chosen option.
    pub braking: u32,
    /// Hitpoints paid for a deep downshift.
    pub shift_damage: i32,
    /// Whether the move crossed the finish line.
    pub crossed_finish: bool,
}

/// Final classification of one car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    /// Player identity.
    pub id: PlayerId,
    /// Strategy that drove the car.
    pub pilot: PilotKind,
    /// Final position, 1-based.
    pub position: u32,
    /// Turn the car finished, if it did.
    pub finished_turn: Option<u32>,
    /// Turn the car was eliminated, if it was.
    pub eliminated_turn: Option<u32>,
    /// Laps fully completed.
    pub laps_completed: i32,
    /// Total hitpoints lost over the race.
    pub damage_taken: i32,
    /// Hitpoints remaining at the end.
    pub hitpoints_left: i32,
}

/// Result of a complete race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceResult {
    /// Seed the race was run with.
    pub seed: u64,
    /// Turns actually played.
    pub turns_played: u32,
    /// First car across the line, if any finished.
    pub winner: Option<PlayerId>,
    /// All cars in classification order.
    pub standings: Vec<PlayerStanding>,
    /// Move-by-move log.
    pub events: Vec<TurnEvent>,
}

/// Internal per-car bookkeeping.
#[derive(Debug, Clone)]
struct Car {
    state: PlayerState,
    pilot: PilotKind,
    finished_turn: Option<u32>,
    eliminated_turn: Option<u32>,
    damage_taken: i32,
    position: Option<u32>,
}

impl Car {
    fn racing(&self) -> bool {
        self.state.is_alive() && !self.state.has_finished()
    }

    fn take_damage(&mut self, amount: i32) {
        self.state.hitpoints -= amount;
        self.damage_taken += amount;
    }
}

/// Run one race to completion.
///
/// Each turn, every surviving car selects a gear through its pilot, pays
/// any downshift cost, rolls the gear die, enumerates its survivable
/// targets (with the death-check fallback when there are none), lets the
/// pilot pick one, and applies the move: damage, curve-stop bookkeeping,
/// lap counting. After all cars have moved, every close pair of cars rolls
/// for collision damage. The race ends when every car has finished or been
/// eliminated, or at the configured turn limit.
///
/// # Errors
///
/// Returns a [`RaceError`] for invalid entries (too few cars, too small a
/// grid, a track without start or finish) and for fatal engine errors.
pub fn run_race(
    seed: u64,
    pilots: &[PilotKind],
    track: &Track,
    config: &RaceConfig,
) -> Result<RaceResult, RaceError> {
    if pilots.len() < 2 {
        return Err(RaceError::NotEnoughPlayers(pilots.len()));
    }
    track.validate()?;
    let grid = track.start_nodes();
    if grid.len() < pilots.len() {
        return Err(RaceError::GridTooSmall {
            boxes: grid.len(),
            players: pilots.len(),
        });
    }

    let parents = track.parent_map();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    // The highest-id start box sits at the front of the grid, so entry
    // order is grid order: car 1 takes pole.
    let mut cars: Vec<Car> = pilots
        .iter()
        .enumerate()
        .map(|(index, &pilot)| Car {
            state: PlayerState::new(
                index as PlayerId + 1,
                grid[grid.len() - 1 - index],
                config.hitpoints,
                config.laps,
            ),
            pilot,
            finished_turn: None,
            eliminated_turn: None,
            damage_taken: 0,
            position: None,
        })
        .collect();

    let mut events = Vec::new();
    let mut turns_played = 0;
    let mut next_position = 1u32;

    for turn in 1..=config.max_turns {
        turns_played = turn;
        for index in 0..cars.len() {
            if !cars[index].racing() {
                continue;
            }
            let you = cars[index].state.clone();
            // Generated circuits model no pit lane; the flag is an input of
            // the rules layer, not of this driver.
            let in_pits = false;

            let gear = cars[index].pilot.select_gear(track, &you, in_pits);
            let shift_damage = validate_gear(you.gear, gear, you.hitpoints, in_pits)
                .map_err(|error| RaceError::Gear { player: you.id, error })?;
            cars[index].state.gear = gear;
            if shift_damage > 0 {
                cars[index].take_damage(shift_damage);
            }

            let Some(roll) = roll_gear(&mut rng, gear) else {
                return Err(RaceError::Gear {
                    player: you.id,
                    error: GearError::OutOfRange(gear),
                });
            };

            let forbidden: BTreeSet<NodeId> = cars
                .iter()
                .enumerate()
                .filter(|&(other, car)| other != index && car.racing())
                .map(|(_, car)| car.state.node)
                .collect();

            let outcome = death_check(
                track,
                you.node,
                roll,
                cars[index].state.hitpoints,
                you.curve_stops,
                you.on_final_lap(),
                &forbidden,
            )?;
            let MoveOutcome::Options(targets) = outcome else {
                // Boxed in with no legal move at any braking amount.
                let remaining = cars[index].state.hitpoints;
                cars[index].take_damage(remaining);
                cars[index].eliminated_turn = Some(turn);
                continue;
            };

            let picked = cars[index]
                .pilot
                .select_move(track, &you, &targets, &mut rng);
            let picked = if picked < targets.len() { picked } else { 0 };
            let target = &targets[picked];

            let move_damage = i32::try_from(target.total_damage()).unwrap_or(i32::MAX);
            cars[index].take_damage(move_damage);
            cars[index].state.node = target.node;

            // Curve-stop bookkeeping: ending a turn inside a curve counts
            // one stop; passing over any straight on the way resets the run.
            let ended_in_curve = track
                .kind(target.node)
                .is_some_and(NodeKind::is_curve);
            if ended_in_curve {
                let whole_path_in_curves = target
                    .path
                    .iter()
                    .all(|&node| track.kind(node).is_some_and(NodeKind::is_curve));
                cars[index].state.curve_stops = if whole_path_in_curves {
                    you.curve_stops + 1
                } else {
                    1
                };
            } else {
                cars[index].state.curve_stops = 0;
            }

            let crossings = target.path[1..]
                .iter()
                .filter(|&&node| track.kind(node) == Some(NodeKind::Finish))
                .count();
            cars[index].state.laps_left -= i32::try_from(crossings).unwrap_or(i32::MAX);

            events.push(TurnEvent {
                turn,
                player: you.id,
                gear,
                roll,
                from: you.node,
                to: target.node,
                overshoot: target.overshoot,
                braking: target.braking,
                shift_damage,
                crossed_finish: crossings > 0,
            });

            if !cars[index].state.is_alive() {
                cars[index].eliminated_turn = Some(turn);
                continue;
            }
            if cars[index].state.has_finished() {
                cars[index].finished_turn = Some(turn);
                cars[index].position = Some(next_position);
                next_position += 1;
            }
        }

        // Collision phase: every close pair risks damage, one independent
        // roll per car.
        for a in 0..cars.len() {
            for b in a + 1..cars.len() {
                if !cars[a].racing() || !cars[b].racing() {
                    continue;
                }
                if !is_close_to(track, &parents, cars[a].state.node, cars[b].state.node) {
                    continue;
                }
                for car in [a, b] {
                    if collision_roll(&mut rng) {
                        cars[car].take_damage(1);
                        if !cars[car].state.is_alive() {
                            cars[car].eliminated_turn = Some(turn);
                        }
                    }
                }
            }
        }

        let snapshots: Vec<PlayerState> = cars.iter().map(|car| car.state.clone()).collect();
        assert_invariants(track, &snapshots, config.hitpoints, config.laps);

        if cars.iter().all(|car| !car.racing()) {
            break;
        }
    }

    Ok(assemble_result(seed, turns_played, config.laps, cars, events, next_position))
}

/// Classify the field: finishers in crossing order, then cars still
/// running at the turn limit by progress, then eliminated cars by how long
/// they lasted.
fn assemble_result(
    seed: u64,
    turns_played: u32,
    laps: i32,
    mut cars: Vec<Car>,
    events: Vec<TurnEvent>,
    mut next_position: u32,
) -> RaceResult {
    let mut runners: Vec<usize> = (0..cars.len())
        .filter(|&index| cars[index].position.is_none() && cars[index].state.is_alive())
        .collect();
    runners.sort_by_key(|&index| {
        (
            cars[index].state.laps_left,
            std::cmp::Reverse(cars[index].state.hitpoints),
            cars[index].state.id,
        )
    });
    for index in runners {
        cars[index].position = Some(next_position);
        next_position += 1;
    }

    let mut eliminated: Vec<usize> = (0..cars.len())
        .filter(|&index| cars[index].position.is_none())
        .collect();
    eliminated.sort_by_key(|&index| {
        (
            std::cmp::Reverse(cars[index].eliminated_turn.unwrap_or(0)),
            cars[index].state.id,
        )
    });
    for index in eliminated {
        cars[index].position = Some(next_position);
        next_position += 1;
    }

    let winner = cars
        .iter()
        .find(|car| car.finished_turn.is_some() && car.position == Some(1))
        .map(|car| car.state.id);

    let mut standings: Vec<PlayerStanding> = cars
        .iter()
        .map(|car| PlayerStanding {
            id: car.state.id,
            pilot: car.pilot,
            position: car.position.unwrap_or(u32::MAX),
            finished_turn: car.finished_turn,
            eliminated_turn: car.eliminated_turn,
            laps_completed: laps - car.state.laps_left,
            damage_taken: car.damage_taken,
            hitpoints_left: car.state.hitpoints,
        })
        .collect();
    standings.sort_by_key(|standing| standing.position);

    RaceResult {
        seed,
        turns_played,
        winner,
        standings,
        events,
    }
}
