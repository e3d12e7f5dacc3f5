use anyhow::bail;
use tracing::info;

use crate::models::{DietType, TransportMode};

/// kg CO2e per km of car commute, counted for each leg of the round trip.
pub const CAR_KG_PER_KM: f64 = 0.192;
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.82;
pub const WATER_KG_PER_LITRE: f64 = 0.0003;
/// The diet term always assumes a 30 day month, whatever the campus days.
pub const DIET_DAYS_PER_MONTH: f64 = 30.0;
pub const ECO_BONUS_MULTIPLIER: f64 = 0.9;
pub const NO_BONUS_MULTIPLIER: f64 = 1.0;

pub fn diet_kg_per_day(diet: DietType) -> f64 {
    match diet {
        DietType::MeatHeavy => 7.0,
        DietType::Vegetarian => 3.8,
        DietType::Vegan => 2.9,
    }
}

/// Per-km factors used by the quick trip log.
pub fn trip_kg_per_km(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Car => 0.21,
        TransportMode::Bus => 0.08,
        TransportMode::Bike | TransportMode::Walk => 0.0,
    }
}

const COMMUTE_PRESETS: [(&str, f64); 5] = [
    ("Karunya Hostel", 0.5),
    ("Karunya Guest House", 2.0),
    ("Peelamedu", 28.0),
    ("Gandhipuram", 32.0),
    ("Ukkadam", 25.0),
];

/// One-way distance in km from a known campus base location.
pub fn commute_preset_km(location: &str) -> Option<f64> {
    let location = location.trim();
    COMMUTE_PRESETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(location))
        .map(|(_, km)| *km)
}

/// An explicit distance wins; otherwise the location must be a known preset.
pub fn resolve_commute_km(distance: Option<f64>, location: &str) -> anyhow::Result<f64> {
    if let Some(km) = distance {
        return Ok(km);
    }
    match commute_preset_km(location) {
        Some(km) => {
            info!(location, km, "using campus commute preset");
            Ok(km)
        }
        None => bail!("--distance is required unless --location is a known campus location"),
    }
}
