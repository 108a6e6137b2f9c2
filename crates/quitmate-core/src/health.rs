//! Recovery metrics derived from the smoking profile and time smoke-free.
//!
//! Each metric starts from a profile-based risk score, recovers with time
//! since the last cigarette at a metric-specific pace, and takes an acute
//! hit from today's consumption. Scores are display values (5..=100), not
//! medical claims.

use serde::{Deserialize, Serialize};

/// Inputs for the metric model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthProfile {
    /// Days since the last cigarette (fractional days allowed).
    pub elapsed_days: f64,
    /// Pre-quit daily baseline.
    pub cigs_per_day: u32,
    pub years_smoking: Option<u32>,
    pub age: Option<u32>,
    /// Cigarettes logged today (acute impact).
    pub cigarettes_today: u32,
}

/// Derived health scores, 5..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub oxygen: u32,
    pub energy: u32,
    pub taste: u32,
    pub lungs: u32,
}

enum Metric {
    Lungs,
    Taste,
    Oxygen,
    Energy,
}

impl Metric {
    /// (max penalty, recovery rate, floor of the starting score)
    fn curve(&self) -> (f64, f64, f64) {
        match self {
            // Lung recovery plays out over months.
            Metric::Lungs => (60.0, 0.015, 25.0),
            // Taste returns within days to weeks.
            Metric::Taste => (45.0, 0.12, 35.0),
            // Blood oxygen rebounds within hours.
            Metric::Oxygen => (40.0, 0.25, 40.0),
            Metric::Energy => (55.0, 0.05, 30.0),
        }
    }
}

/// Compute all four metrics for a profile.
pub fn health_metrics(profile: &HealthProfile) -> HealthMetrics {
    let years = profile.years_smoking.unwrap_or(0) as f64;
    let age = profile.age.unwrap_or(30) as f64;
    let daily_cigs = profile.cigs_per_day as f64;

    // Profile risk, 0..=90.
    let years_score = (years * 1.5).min(45.0);
    let cigs_score = ((daily_cigs / 20.0) * 20.0).min(30.0);
    let age_score = ((age - 25.0).max(0.0) * 0.4).min(15.0);
    let risk_score = (years_score + cigs_score + age_score).min(90.0);

    let metric = |m: Metric| -> u32 {
        let (max_penalty, recovery_rate, min_base) = m.curve();
        let effective_penalty = risk_score.min(max_penalty);
        let start = (100.0 - effective_penalty).max(min_base);

        let recovered = (profile.elapsed_days * recovery_rate * 10.0).min(100.0 - start);
        let mut current = start + recovered;

        // Acute hit from today's cigarettes.
        let daily_impact = (profile.cigarettes_today as f64 * 4.0).min(35.0);
        current = (current - daily_impact).max(5.0);

        current.round() as u32
    };

    HealthMetrics {
        oxygen: metric(Metric::Oxygen),
        energy: metric(Metric::Energy),
        taste: metric(Metric::Taste),
        lungs: metric(Metric::Lungs),
    }
}
