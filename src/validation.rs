use tracing::debug;

use crate::models::ActivityReport;

/// Reasons a submission is sent back to the user. None of these are fatal;
/// the caller shows the message and asks for corrected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("phone must be exactly 10 digits")]
    InvalidPhone,
    #[error("{0} must be a number greater than zero")]
    InvalidField(&'static str),
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Every failing check, in form order.
pub fn violations(report: &ActivityReport) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if report.name.trim().is_empty() {
        errors.push(ValidationError::MissingField("name"));
    }
    if !is_valid_phone(&report.phone) {
        errors.push(ValidationError::InvalidPhone);
    }

    let numeric_checks = [
        ("distance", report.daily_commute_distance_km),
        ("electricity", report.electricity_kwh_per_month),
        ("water", report.water_litres_per_month),
        ("campusDays", report.campus_days_last_month),
    ];
    for (field, value) in numeric_checks {
        if !is_positive(value) {
            errors.push(ValidationError::InvalidField(field));
        }
    }

    errors
}

/// Fails with the first violated check.
pub fn validate(report: ActivityReport) -> Result<ActivityReport, ValidationError> {
    match violations(&report).into_iter().next() {
        Some(error) => {
            debug!(name = %report.name, %error, "rejected activity report");
            Err(error)
        }
        None => Ok(report),
    }
}

/// Trip distances for the quick log must be positive and finite.
pub fn validate_trip_distance(distance_km: f64) -> Result<f64, ValidationError> {
    if is_positive(distance_km) {
        Ok(distance_km)
    } else {
        Err(ValidationError::InvalidField("distance"))
    }
}
