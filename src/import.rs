use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::models::{ActivityReport, DailyTotal, DietType, EcoActivity};

#[derive(serde::Deserialize)]
struct SubmissionRow {
    name: String,
    phone: String,
    #[serde(default)]
    location: String,
    distance: f64,
    diet: String,
    electricity: f64,
    water: f64,
    campus_days: f64,
    activities: Option<String>,
}

pub fn parse_activities(value: &str) -> anyhow::Result<BTreeSet<EcoActivity>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<EcoActivity>().map_err(anyhow::Error::from))
        .collect()
}

impl SubmissionRow {
    fn into_report(self) -> anyhow::Result<ActivityReport> {
        let diet: DietType = self.diet.parse()?;
        let eco_activities = match self.activities.as_deref() {
            Some(value) => parse_activities(value)?,
            None => BTreeSet::new(),
        };

        Ok(ActivityReport {
            name: self.name,
            phone: self.phone,
            location: self.location,
            daily_commute_distance_km: self.distance,
            diet,
            electricity_kwh_per_month: self.electricity,
            water_litres_per_month: self.water,
            campus_days_last_month: self.campus_days,
            eco_activities,
        })
    }
}

/// Reads submissions paired with their line number in the file. Rows are not
/// validated here; malformed CSV (bad numbers, unknown diet) is an error.
pub fn load_submissions(csv_path: &Path) -> anyhow::Result<Vec<(u64, ActivityReport)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let headers = reader.headers()?.clone();
    let mut submissions = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: SubmissionRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("line {line}: malformed submission"))?;
        let report = row.into_report().with_context(|| format!("line {line}"))?;
        submissions.push((line, report));
    }

    info!(
        count = submissions.len(),
        path = %csv_path.display(),
        "loaded submissions"
    );
    Ok(submissions)
}

pub fn load_daily_totals(csv_path: &Path) -> anyhow::Result<Vec<DailyTotal>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let headers = reader.headers()?.clone();
    let mut days = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let day: DailyTotal = record
            .deserialize(Some(&headers))
            .with_context(|| format!("line {line}: malformed daily total"))?;
        days.push(day);
    }

    info!(count = days.len(), "loaded daily totals");
    Ok(days)
}
