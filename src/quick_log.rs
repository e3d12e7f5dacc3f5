use tracing::debug;

use crate::emissions::round2;
use crate::factors::trip_kg_per_km;
use crate::models::{BusComparison, TransportMode, TripEstimate};

pub fn estimate_trip(mode: TransportMode, distance_km: f64) -> TripEstimate {
    let kg = round2(trip_kg_per_km(mode) * distance_km);
    debug!(mode = mode.label(), distance_km, kg, "estimated trip");
    TripEstimate {
        mode,
        distance_km,
        kg,
    }
}

/// What the same trip would have cost by bus, and the share of the logged
/// emissions that switching would save.
pub fn bus_alternative(estimate: &TripEstimate) -> BusComparison {
    let bus_kg = round2(trip_kg_per_km(TransportMode::Bus) * estimate.distance_km);
    let saving_percent = if estimate.kg == 0.0 {
        0
    } else {
        ((estimate.kg - bus_kg) / estimate.kg * 100.0).round() as i64
    };

    BusComparison {
        bus_kg,
        saving_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_trip_saves_nothing() {
        let estimate = estimate_trip(TransportMode::Bus, 10.0);
        assert_eq!(estimate.kg, 0.8);
        let comparison = bus_alternative(&estimate);
        assert_eq!(comparison.bus_kg, 0.8);
        assert_eq!(comparison.saving_percent, 0);
    }

    #[test]
    fn car_trip_compares_against_bus() {
        let estimate = estimate_trip(TransportMode::Car, 10.0);
        assert_eq!(estimate.kg, 2.1);
        let comparison = bus_alternative(&estimate);
        assert_eq!(comparison.bus_kg, 0.8);
        assert_eq!(comparison.saving_percent, 62);
    }

    #[test]
    fn zero_emission_trip_does_not_divide_by_zero() {
        for mode in [TransportMode::Bike, TransportMode::Walk] {
            let estimate = estimate_trip(mode, 12.0);
            assert_eq!(estimate.kg, 0.0);
            let comparison = bus_alternative(&estimate);
            assert_eq!(comparison.bus_kg, 0.96);
            assert_eq!(comparison.saving_percent, 0);
        }
    }

    #[test]
    fn very_long_trip_stays_finite() {
        let estimate = estimate_trip(TransportMode::Car, 1e308);
        assert!(estimate.kg.is_finite());
        let comparison = bus_alternative(&estimate);
        assert!(comparison.bus_kg.is_finite());
        assert_eq!(comparison.saving_percent, 62);
    }

    #[test]
    fn kg_is_rounded_to_cents() {
        let estimate = estimate_trip(TransportMode::Car, 3.333);
        assert_eq!(estimate.kg, 0.7);
    }
}
