//! Templated narrative summary over a computed result.
//!
//! This is the deterministic fallback generator; AI-written prose is a
//! concern of the surrounding application, not this crate.

use huni_core::{LivabilityResult, Subscores};

fn overall_band(overall: f64) -> &'static str {
    if overall >= 80.0 {
        "excellent"
    } else if overall >= 60.0 {
        "good"
    } else if overall >= 40.0 {
        "moderate"
    } else {
        "limited"
    }
}

fn labeled(subscores: &Subscores) -> [(&'static str, u32); 4] {
    [
        ("daily services", subscores.services),
        ("mobility", subscores.mobility),
        ("safety", subscores.safety),
        ("green space and recreation", subscores.environment),
    ]
}

/// Render a short plain-text summary of a scoring run.
#[must_use]
pub fn render_summary(result: &LivabilityResult) -> String {
    let scores = labeled(&result.subscores);
    // max_by_key/min_by_key take the last maximum; iterate explicitly so
    // ties resolve to the first label, which reads more naturally.
    let mut best = scores[0];
    let mut worst = scores[0];
    for entry in &scores[1..] {
        if entry.1 > best.1 {
            best = *entry;
        }
        if entry.1 < worst.1 {
            worst = *entry;
        }
    }

    let mut text = format!(
        "{} scores {:.1} out of 100 — {} overall livability.",
        result.location.address, result.overall,
        overall_band(result.overall)
    );
    if best.1 == 0 {
        text.push_str(" No scored amenities were found within walking distance.");
        return text;
    }
    text.push_str(&format!(
        " Its strongest area is {} ({}); the weakest is {} ({}).",
        best.0, best.1, worst.0, worst.1
    ));
    let total_facilities: u32 = result.facility_counts.values().sum();
    text.push_str(&format!(
        " {total_facilities} nearby facilities contributed to the score."
    ));
    text
}
