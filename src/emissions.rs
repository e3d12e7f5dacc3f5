use tracing::{debug, info};

use crate::factors::{
    diet_kg_per_day, CAR_KG_PER_KM, DIET_DAYS_PER_MONTH, ECO_BONUS_MULTIPLIER,
    ELECTRICITY_KG_PER_KWH, NO_BONUS_MULTIPLIER, WATER_KG_PER_LITRE,
};
use crate::models::{ActivityReport, Badge, EmissionsResult, RejectedSubmission, ScoredSubmission};
use crate::validation::{self, ValidationError};

/// Rounds to cents. Values too large to scale by 100 are already coarser
/// than a cent and are returned as is.
pub fn round2(value: f64) -> f64 {
    let cents = value * 100.0;
    if !cents.is_finite() {
        return value;
    }
    cents.round() / 100.0
}

/// Monthly footprint of an already validated report.
pub fn compute(report: &ActivityReport) -> EmissionsResult {
    let transport_kg =
        report.daily_commute_distance_km * 2.0 * report.campus_days_last_month * CAR_KG_PER_KM;
    let power_kg = report.electricity_kwh_per_month * ELECTRICITY_KG_PER_KWH;
    let water_kg = report.water_litres_per_month * WATER_KG_PER_LITRE;
    let diet_kg = diet_kg_per_day(report.diet) * DIET_DAYS_PER_MONTH;
    let eco_bonus_multiplier = if report.eco_activities.is_empty() {
        NO_BONUS_MULTIPLIER
    } else {
        ECO_BONUS_MULTIPLIER
    };
    let total_kg = round2((transport_kg + power_kg + diet_kg + water_kg) * eco_bonus_multiplier);

    debug!(
        transport_kg,
        power_kg, water_kg, diet_kg, eco_bonus_multiplier, total_kg, "computed emissions"
    );

    EmissionsResult {
        transport_kg,
        power_kg,
        water_kg,
        diet_kg,
        eco_bonus_multiplier,
        total_kg,
    }
}

pub fn submit(report: ActivityReport) -> Result<EmissionsResult, ValidationError> {
    let report = validation::validate(report)?;
    Ok(compute(&report))
}

pub fn badge_for_total(total_kg: f64) -> Badge {
    if total_kg < 120.0 {
        Badge::EcoChampion
    } else if total_kg < 200.0 {
        Badge::SustainabilityStarter
    } else {
        Badge::FreshGreenJourney
    }
}

/// Splits a batch into scored and rejected submissions. A rejected row never
/// stops the rest of the batch.
pub fn score_batch(
    rows: Vec<(u64, ActivityReport)>,
) -> (Vec<ScoredSubmission>, Vec<RejectedSubmission>) {
    let mut scored = Vec::new();
    let mut rejected = Vec::new();

    for (line, report) in rows {
        let errors = validation::violations(&report);
        if errors.is_empty() {
            let result = compute(&report);
            scored.push(ScoredSubmission { report, result });
        } else {
            rejected.push(RejectedSubmission {
                line,
                name: report.name,
                reasons: errors.iter().map(ToString::to_string).collect(),
            });
        }
    }

    info!(
        scored = scored.len(),
        rejected = rejected.len(),
        "scored submission batch"
    );
    (scored, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietType, EcoActivity};
    use crate::validation::tests::sample_report;

    #[test]
    fn meat_heavy_commuter_without_activities() {
        let result = compute(&sample_report());
        assert!((result.transport_kg - 84.48).abs() < 1e-9);
        assert!((result.power_kg - 82.0).abs() < 1e-9);
        assert!((result.water_kg - 0.3).abs() < 1e-9);
        assert!((result.diet_kg - 210.0).abs() < 1e-9);
        assert_eq!(result.eco_bonus_multiplier, 1.0);
        assert_eq!(result.total_kg, 376.78);
    }

    #[test]
    fn cycling_earns_the_eco_bonus() {
        let mut report = sample_report();
        report.eco_activities.insert(EcoActivity::Cycling);
        let result = compute(&report);
        assert_eq!(result.eco_bonus_multiplier, 0.9);
        assert_eq!(result.total_kg, 339.10);
    }

    #[test]
    fn bonus_does_not_scale_with_activity_count() {
        let mut one = sample_report();
        one.eco_activities.insert(EcoActivity::Recycling);
        let mut all = sample_report();
        all.eco_activities.extend(EcoActivity::ALL);

        assert_eq!(compute(&one).eco_bonus_multiplier, 0.9);
        assert_eq!(compute(&all).eco_bonus_multiplier, 0.9);
        assert_eq!(compute(&one).total_kg, compute(&all).total_kg);
    }

    #[test]
    fn diet_term_ignores_campus_days() {
        let mut report = sample_report();
        report.diet = DietType::Vegan;
        report.campus_days_last_month = 5.0;
        assert!((compute(&report).diet_kg - 87.0).abs() < 1e-9);
    }

    #[test]
    fn compute_is_deterministic() {
        let report = sample_report();
        let first = compute(&report);
        let second = compute(&report);
        assert_eq!(first.total_kg.to_bits(), second.total_kg.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn submit_stops_at_validation() {
        let mut report = sample_report();
        report.phone = "12345".to_string();
        assert_eq!(submit(report), Err(ValidationError::InvalidPhone));
        assert_eq!(submit(sample_report()).map(|r| r.total_kg), Ok(376.78));
    }

    #[test]
    fn badges_follow_total_tiers() {
        assert_eq!(badge_for_total(119.99), Badge::EcoChampion);
        assert_eq!(badge_for_total(120.0), Badge::SustainabilityStarter);
        assert_eq!(badge_for_total(199.99), Badge::SustainabilityStarter);
        assert_eq!(badge_for_total(376.78), Badge::FreshGreenJourney);
    }

    #[test]
    fn batch_keeps_going_past_rejections() {
        let mut bad = sample_report();
        bad.name = "Jules Moreno".to_string();
        bad.electricity_kwh_per_month = 0.0;

        let (scored, rejected) =
            score_batch(vec![(2, sample_report()), (3, bad), (4, sample_report())]);
        assert_eq!(scored.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].line, 3);
        assert_eq!(rejected[0].name, "Jules Moreno");
        assert_eq!(
            rejected[0].reasons,
            vec!["electricity must be a number greater than zero".to_string()]
        );
    }

    #[test]
    fn rounds_half_cents_away_from_zero() {
        assert_eq!(round2(2.1), 2.1);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(339.102), 339.1);
    }

    #[test]
    fn huge_usage_keeps_a_finite_total() {
        let mut report = sample_report();
        report.electricity_kwh_per_month = 1e307;
        let result = submit(report).unwrap();
        assert!(result.power_kg.is_finite());
        assert!(result.total_kg.is_finite());
        assert!(result.total_kg > 8.0e306);
    }
}
