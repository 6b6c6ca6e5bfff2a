//! Output formatting utilities for CLI.

use chicane::PilotKind;
use chicane::race::RaceResult;
use serde::Serialize;

/// Championship points by finishing position (1st through 6th).
const POINTS: [u64; 6] = [10, 6, 4, 3, 2, 1];

/// Format a race result as human-readable text.
pub(super) fn format_text(result: &RaceResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Race result (seed: {})\n", result.seed));
    match result.winner {
        Some(winner) => output.push_str(&format!("  Winner: car {winner}\n")),
        None => output.push_str("  Winner: none (no car finished)\n"),
    }
    output.push_str(&format!("  Turns: {}\n\n", result.turns_played));

    for standing in &result.standings {
        output.push_str(&format!(
            "  P{} car {} ({})",
            standing.position,
            standing.id,
            standing.pilot.name()
        ));
        if let Some(turn) = standing.finished_turn {
            output.push_str(&format!(" finished on turn {turn}"));
        } else if let Some(turn) = standing.eliminated_turn {
            output.push_str(&format!(" eliminated on turn {turn}"));
        } else {
            output.push_str(&format!(" running, {} laps down", standing.laps_completed));
        }
        output.push_str(&format!(
            " [damage {}, hp {}]\n",
            standing.damage_taken, standing.hitpoints_left
        ));
    }

    output
}

/// Championship statistics aggregated over many races.
#[derive(Debug, Serialize)]
pub(super) struct ChampionshipStats {
    /// Total races run.
    pub(super) races: u64,
    /// Pilot of each car, by car index.
    pub(super) pilots: Vec<PilotKind>,
    /// Win count per car.
    pub(super) wins: Vec<u64>,
    /// Championship points per car.
    pub(super) points: Vec<u64>,
    /// Elimination count per car.
    pub(super) eliminations: Vec<u64>,
    /// Total damage taken per car.
    pub(super) damage: Vec<i64>,
}

impl ChampionshipStats {
    /// Create empty stats for a field of pilots.
    pub(super) fn new(pilots: Vec<PilotKind>) -> Self {
        let field = pilots.len();
        Self {
            races: 0,
            pilots,
            wins: vec![0; field],
            points: vec![0; field],
            eliminations: vec![0; field],
            damage: vec![0; field],
        }
    }

    /// Fold one race into the stats.
    pub(super) fn record(&mut self, result: &RaceResult) {
        self.races += 1;
        for standing in &result.standings {
            let index = usize::from(standing.id) - 1;
            if Some(standing.id) == result.winner {
                self.wins[index] += 1;
            }
            if standing.eliminated_turn.is_some() {
                self.eliminations[index] += 1;
            }
            if standing.finished_turn.is_some() {
                let place = standing.position as usize;
                if place >= 1 && place <= POINTS.len() {
                    self.points[index] += POINTS[place - 1];
                }
            }
            self.damage[index] += i64::from(standing.damage_taken);
        }
    }

    /// Format as a human-readable standings table.
    pub(super) fn format_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Championship over {} races\n\n", self.races));
        output.push_str("  car  pilot      wins  points  eliminated  avg damage\n");
        let mut order: Vec<usize> = (0..self.pilots.len()).collect();
        order.sort_by_key(|&index| std::cmp::Reverse(self.points[index]));
        for index in order {
            let avg_damage = if self.races > 0 {
                self.damage[index] as f64 / self.races as f64
            } else {
                0.0
            };
            output.push_str(&format!(
                "  {:>3}  {:<9} {:>5}  {:>6}  {:>10}  {:>10.1}\n",
                index + 1,
                self.pilots[index].name(),
                self.wins[index],
                self.points[index],
                self.eliminations[index],
                avg_damage,
            ));
        }
        output
    }

    /// Format as CSV.
    pub(super) fn format_csv(&self) -> String {
        let mut output = String::from("car,pilot,wins,points,eliminations,total_damage\n");
        for index in 0..self.pilots.len() {
            output.push_str(&format!(
                "{},{},{},{},{},{}\n",
                index + 1,
                self.pilots[index].name(),
                self.wins[index],
                self.points[index],
                self.eliminations[index],
                self.damage[index],
            ));
        }
        output
    }
}
