//! Simulation report generation.

use super::runner::RunStats;
use crate::achievements::ALL_ACHIEVEMENTS;
use crate::utils::format_number;
use serde::Serialize;

/// Share of runs that unlocked an achievement, and how fast.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementPacing {
    pub name: &'static str,
    pub reach_rate: f64,
    pub avg_roll: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    pub avg_total_rolls: f64,
    pub avg_best_roll: f64,
    pub avg_super_rolls: f64,
    pub avg_rare_rolls: f64,
    pub avg_purchases: f64,

    /// Rolls and simulated hours to the first prestige, over runs that got there
    pub avg_rolls_to_first_prestige: f64,
    pub avg_hours_to_first_prestige: f64,
    pub min_rolls_to_first_prestige: u64,
    pub max_rolls_to_first_prestige: u64,

    pub achievements: Vec<AchievementPacing>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    sum / count.max(1) as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_rolls: u64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.total_rolls >= max_rolls)
            .count() as u32;

        // First cycle of each run that actually prestiged.
        let first_cycles: Vec<_> = runs
            .iter()
            .filter(|r| r.final_prestige > 0)
            .filter_map(|r| r.prestige_cycles.first())
            .collect();

        let achievements = ALL_ACHIEVEMENTS
            .iter()
            .map(|def| {
                let hits: Vec<u64> = runs
                    .iter()
                    .filter_map(|r| r.achievement_rolls.get(&def.id).copied())
                    .collect();
                AchievementPacing {
                    name: def.name,
                    reach_rate: hits.len() as f64 / num_runs.max(1) as f64,
                    avg_roll: mean(hits.iter().map(|&r| r as f64)),
                }
            })
            .collect();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            avg_total_rolls: mean(runs.iter().map(|r| r.total_rolls as f64)),
            avg_best_roll: mean(runs.iter().map(|r| r.best_roll as f64)),
            avg_super_rolls: mean(runs.iter().map(|r| r.super_rolls as f64)),
            avg_rare_rolls: mean(runs.iter().map(|r| r.rare_rolls as f64)),
            avg_purchases: mean(runs.iter().map(|r| r.purchases as f64)),
            avg_rolls_to_first_prestige: mean(first_cycles.iter().map(|c| c.rolls as f64)),
            avg_hours_to_first_prestige: mean(
                first_cycles.iter().map(|c| c.sim_seconds / 3600.0),
            ),
            min_rolls_to_first_prestige: first_cycles.iter().map(|c| c.rolls).min().unwrap_or(0),
            max_rolls_to_first_prestige: first_cycles.iter().map(|c| c.rolls).max().unwrap_or(0),
            achievements,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("               (Using Real Game Mechanics)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── ROLLING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Total Rolls:     {:.0}\n",
            self.avg_total_rolls
        ));
        report.push_str(&format!(
            "  Avg Best Roll:       {}\n",
            format_number(self.avg_best_roll as u64)
        ));
        report.push_str(&format!(
            "  Avg Super Rolls:     {:.0}\n",
            self.avg_super_rolls
        ));
        report.push_str(&format!(
            "  Avg Rare Rolls:      {:.0}\n",
            self.avg_rare_rolls
        ));
        report.push_str(&format!(
            "  Avg Purchases:       {:.1}\n\n",
            self.avg_purchases
        ));

        report.push_str("── FIRST PRESTIGE ───────────────────────────────────────────────\n");
        if self.max_rolls_to_first_prestige == 0 {
            report.push_str("  No run reached prestige\n\n");
        } else {
            report.push_str(&format!(
                "  Avg Rolls:           {:.0}\n",
                self.avg_rolls_to_first_prestige
            ));
            report.push_str(&format!(
                "  Min / Max Rolls:     {} / {}\n",
                self.min_rolls_to_first_prestige, self.max_rolls_to_first_prestige
            ));
            report.push_str(&format!(
                "  Avg Auto-Roll Time:  {:.1}h\n\n",
                self.avg_hours_to_first_prestige
            ));
        }

        report.push_str("── ACHIEVEMENTS ─────────────────────────────────────────────────\n");
        for pacing in &self.achievements {
            let pct = pacing.reach_rate * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:<18} {:>5.1}% @ roll {:>8.0} {}\n",
                pacing.name, pct, pacing.avg_roll, bar
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let completion_rate = (self.runs_completed as f64 / self.num_runs.max(1) as f64) * 100.0;
        report.push_str(&format!("  Completion Rate: {:.1}%\n", completion_rate));
        if self.runs_timed_out > self.num_runs / 2 {
            report.push_str("  ⚠️  Most runs timed out - prestige wall too high?\n");
        }
        if self.avg_hours_to_first_prestige > 0.0 && self.avg_hours_to_first_prestige < 0.5 {
            report.push_str("  ⚠️  First prestige in under 30 minutes - too easy?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::simulator::runner::PrestigeCycle;
    use std::collections::BTreeMap;

    fn run(rolls: u64, prestiged: bool) -> RunStats {
        let mut achievement_rolls = BTreeMap::new();
        achievement_rolls.insert(AchievementId::First100, 12);
        RunStats {
            total_rolls: rolls,
            sim_seconds: rolls as f64 * 0.5,
            final_prestige: u32::from(prestiged),
            reached_target: prestiged,
            best_roll: 1_000,
            super_rolls: rolls / 11,
            rare_rolls: 5,
            purchases: 2,
            potions_drunk: 3,
            prestige_cycles: vec![PrestigeCycle {
                rank: 0,
                rolls,
                sim_seconds: rolls as f64 * 0.5,
                highest_roll: 1_000,
                final_luck: 12.0,
            }],
            achievement_rolls,
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![run(7_200, true), run(10_000, false)], 10_000);
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_completed, 1);
        assert_eq!(report.runs_timed_out, 1);
        assert_eq!(report.min_rolls_to_first_prestige, 7_200);
        assert!((report.avg_hours_to_first_prestige - 1.0).abs() < 1e-9);
        assert!((report.achievements[0].reach_rate - 1.0).abs() < 1e-9);
        assert_eq!(report.achievements[1].reach_rate, 0.0);

        let text = report.to_text();
        assert!(text.contains("Runs: 2 total, 1 completed, 1 timed out"));
        assert!(report.to_json().contains("\"avg_rolls_to_first_prestige\""));
    }
}
