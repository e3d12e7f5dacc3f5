use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Lowercases and drops separators so "Meat-heavy", "meat_heavy" and
/// "MeatHeavy" all compare equal.
fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DietType {
    MeatHeavy,
    Vegetarian,
    Vegan,
}

impl DietType {
    pub const ALL: [DietType; 3] = [DietType::MeatHeavy, DietType::Vegetarian, DietType::Vegan];

    pub fn label(self) -> &'static str {
        match self {
            DietType::MeatHeavy => "Meat-heavy",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietType {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        DietType::ALL
            .into_iter()
            .find(|diet| normalize_label(diet.label()) == wanted)
            .ok_or_else(|| UnknownLabel {
                kind: "diet",
                value: value.to_string(),
            })
    }
}

/// Low-carbon activities a student can report for the monthly eco bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EcoActivity {
    PlantedTrees,
    Recycling,
    Carpool,
    Cycling,
    GreenClub,
}

impl EcoActivity {
    pub const ALL: [EcoActivity; 5] = [
        EcoActivity::PlantedTrees,
        EcoActivity::Recycling,
        EcoActivity::Carpool,
        EcoActivity::Cycling,
        EcoActivity::GreenClub,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EcoActivity::PlantedTrees => "Planted Trees",
            EcoActivity::Recycling => "Recycling",
            EcoActivity::Carpool => "Carpool",
            EcoActivity::Cycling => "Cycling",
            EcoActivity::GreenClub => "Green Club",
        }
    }
}

impl fmt::Display for EcoActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EcoActivity {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(value);
        EcoActivity::ALL
            .into_iter()
            .find(|activity| normalize_label(activity.label()) == wanted)
            .ok_or_else(|| UnknownLabel {
                kind: "eco activity",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub daily_commute_distance_km: f64,
    pub diet: DietType,
    pub electricity_kwh_per_month: f64,
    pub water_litres_per_month: f64,
    pub campus_days_last_month: f64,
    pub eco_activities: BTreeSet<EcoActivity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionsResult {
    pub transport_kg: f64,
    pub power_kg: f64,
    pub water_kg: f64,
    pub diet_kg: f64,
    pub eco_bonus_multiplier: f64,
    pub total_kg: f64,
}

impl EmissionsResult {
    /// Sum of the four categories before the eco bonus.
    pub fn subtotal_kg(&self) -> f64 {
        self.transport_kg + self.power_kg + self.water_kg + self.diet_kg
    }

    /// Percentage each category contributes to the pre-bonus subtotal.
    pub fn shares(&self) -> CategoryShares {
        let subtotal = self.subtotal_kg();
        let percent = |value: f64| {
            if subtotal == 0.0 {
                0.0
            } else {
                value / subtotal * 100.0
            }
        };

        CategoryShares {
            transport: percent(self.transport_kg),
            power: percent(self.power_kg),
            water: percent(self.water_kg),
            diet: percent(self.diet_kg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryShares {
    pub transport: f64,
    pub power: f64,
    pub water: f64,
    pub diet: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Badge {
    EcoChampion,
    SustainabilityStarter,
    FreshGreenJourney,
}

impl Badge {
    pub const ALL: [Badge; 3] = [
        Badge::EcoChampion,
        Badge::SustainabilityStarter,
        Badge::FreshGreenJourney,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Badge::EcoChampion => "Eco Champion",
            Badge::SustainabilityStarter => "Sustainability Starter",
            Badge::FreshGreenJourney => "Fresh Green Journey",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Car,
    Bus,
    Bike,
    Walk,
}

impl TransportMode {
    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Bike => "bike",
            TransportMode::Walk => "walk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripEstimate {
    pub mode: TransportMode,
    pub distance_km: f64,
    pub kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BusComparison {
    pub bus_kg: f64,
    pub saving_percent: i64,
}

#[derive(Debug, Clone)]
pub struct ScoredSubmission {
    pub report: ActivityReport,
    pub result: EmissionsResult,
}

#[derive(Debug, Clone)]
pub struct RejectedSubmission {
    pub line: u64,
    pub name: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSummary {
    pub total_kg: f64,
    pub average_kg: f64,
    pub best_day: DailyTotal,
    pub worst_day: DailyTotal,
    pub days_within_goal: usize,
    pub day_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diet_labels_parse_leniently() {
        assert_eq!("Meat-heavy".parse::<DietType>(), Ok(DietType::MeatHeavy));
        assert_eq!("meat_heavy".parse::<DietType>(), Ok(DietType::MeatHeavy));
        assert_eq!("VEGAN".parse::<DietType>(), Ok(DietType::Vegan));
        assert!("pescatarian".parse::<DietType>().is_err());
    }

    #[test]
    fn activity_labels_round_trip_through_display() {
        for activity in EcoActivity::ALL {
            assert_eq!(activity.to_string().parse::<EcoActivity>(), Ok(activity));
        }
        assert_eq!("green club".parse::<EcoActivity>(), Ok(EcoActivity::GreenClub));
    }

    #[test]
    fn unknown_activity_names_the_value() {
        let err = "Skydiving".parse::<EcoActivity>().unwrap_err();
        assert_eq!(err.to_string(), "unknown eco activity 'Skydiving'");
    }

    #[test]
    fn shares_split_the_subtotal() {
        let result = EmissionsResult {
            transport_kg: 50.0,
            power_kg: 25.0,
            water_kg: 0.0,
            diet_kg: 25.0,
            eco_bonus_multiplier: 0.9,
            total_kg: 90.0,
        };
        let shares = result.shares();
        assert_eq!(shares.transport, 50.0);
        assert_eq!(shares.power, 25.0);
        assert_eq!(shares.water, 0.0);
        assert_eq!(shares.diet, 25.0);
    }

    #[test]
    fn shares_of_empty_result_are_zero() {
        let result = EmissionsResult {
            transport_kg: 0.0,
            power_kg: 0.0,
            water_kg: 0.0,
            diet_kg: 0.0,
            eco_bonus_multiplier: 1.0,
            total_kg: 0.0,
        };
        assert_eq!(result.shares().transport, 0.0);
    }
}
