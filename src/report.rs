use std::fmt::Write;

use chrono::NaiveDate;

use crate::emissions::badge_for_total;
use crate::models::{Badge, EcoActivity, RejectedSubmission, ScoredSubmission};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAverages {
    pub transport_kg: f64,
    pub power_kg: f64,
    pub water_kg: f64,
    pub diet_kg: f64,
}

/// Lowest totals first; equal totals are ordered by name.
pub fn eco_leaders(scored: &[ScoredSubmission], limit: usize) -> Vec<&ScoredSubmission> {
    let mut leaders: Vec<&ScoredSubmission> = scored.iter().collect();
    leaders.sort_by(|a, b| {
        a.result
            .total_kg
            .partial_cmp(&b.result.total_kg)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.report.name.cmp(&b.report.name))
    });
    leaders.truncate(limit);
    leaders
}

pub fn category_averages(scored: &[ScoredSubmission]) -> CategoryAverages {
    let count = scored.len() as f64;
    let average = |pick: fn(&ScoredSubmission) -> f64| {
        if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(pick).sum::<f64>() / count
        }
    };

    CategoryAverages {
        transport_kg: average(|s| s.result.transport_kg),
        power_kg: average(|s| s.result.power_kg),
        water_kg: average(|s| s.result.water_kg),
        diet_kg: average(|s| s.result.diet_kg),
    }
}

/// Participants per catalog activity, in catalog order, zeros included.
pub fn activity_participation(scored: &[ScoredSubmission]) -> Vec<(EcoActivity, usize)> {
    EcoActivity::ALL
        .into_iter()
        .map(|activity| {
            let count = scored
                .iter()
                .filter(|s| s.report.eco_activities.contains(&activity))
                .count();
            (activity, count)
        })
        .collect()
}

pub fn badge_counts(scored: &[ScoredSubmission]) -> Vec<(Badge, usize)> {
    Badge::ALL
        .into_iter()
        .map(|badge| {
            let count = scored
                .iter()
                .filter(|s| badge_for_total(s.result.total_kg) == badge)
                .count();
            (badge, count)
        })
        .collect()
}

pub fn build_batch_report(
    generated_on: NaiveDate,
    scored: &[ScoredSubmission],
    rejected: &[RejectedSubmission],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Campus Carbon Footprint Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(
        output,
        "- {} submissions scored, {} rejected",
        scored.len(),
        rejected.len()
    );

    if !scored.is_empty() {
        let average_total =
            scored.iter().map(|s| s.result.total_kg).sum::<f64>() / scored.len() as f64;
        let _ = writeln!(
            output,
            "- Average footprint {:.2} kg CO2e per month",
            average_total
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Eco Leaders");

    if scored.is_empty() {
        let _ = writeln!(output, "No valid submissions in this batch.");
    } else {
        for (rank, entry) in eco_leaders(scored, 5).iter().enumerate() {
            let _ = writeln!(
                output,
                "{}. {} ({}) {:.2} kg CO2e - {}",
                rank + 1,
                entry.report.name,
                entry.report.diet,
                entry.result.total_kg,
                badge_for_total(entry.result.total_kg)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Category Mix");

    if scored.is_empty() {
        let _ = writeln!(output, "No valid submissions in this batch.");
    } else {
        let averages = category_averages(scored);
        let _ = writeln!(output, "- Transport: {:.2} kg avg", averages.transport_kg);
        let _ = writeln!(output, "- Electricity: {:.2} kg avg", averages.power_kg);
        let _ = writeln!(output, "- Water: {:.2} kg avg", averages.water_kg);
        let _ = writeln!(output, "- Diet: {:.2} kg avg", averages.diet_kg);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Eco Activity Participation");
    for (activity, count) in activity_participation(scored) {
        let _ = writeln!(output, "- {}: {}", activity, count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Badges");
    for (badge, count) in badge_counts(scored) {
        let _ = writeln!(output, "- {}: {}", badge, count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Rejected Submissions");

    if rejected.is_empty() {
        let _ = writeln!(output, "None.");
    } else {
        for entry in rejected {
            let name = if entry.name.trim().is_empty() {
                "(unnamed)"
            } else {
                entry.name.as_str()
            };
            let _ = writeln!(
                output,
                "- line {} {}: {}",
                entry.line,
                name,
                entry.reasons.join("; ")
            );
        }
    }

    output
}
