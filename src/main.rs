use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod emissions;
mod factors;
mod import;
mod models;
mod progress;
mod quick_log;
mod report;
mod validation;

use models::{ActivityReport, DietType, EcoActivity, TransportMode};

#[derive(Parser)]
#[command(name = "carbon-footprint")]
#[command(about = "Monthly carbon footprint calculator for campus residents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a monthly activity report and estimate its footprint
    Calculate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Hostel or region; known campus locations fill in the distance
        #[arg(long, default_value = "")]
        location: String,
        /// One-way daily commute in km
        #[arg(long)]
        distance: Option<f64>,
        #[arg(long)]
        diet: DietType,
        /// kWh per month
        #[arg(long)]
        electricity: f64,
        /// Litres per month
        #[arg(long)]
        water: f64,
        #[arg(long)]
        campus_days: f64,
        /// Repeat for each eco activity
        #[arg(long = "activity")]
        activities: Vec<EcoActivity>,
        #[arg(long)]
        json: bool,
    },
    /// Estimate a single trip and compare it with taking the bus
    QuickLog {
        #[arg(long, value_enum)]
        mode: TransportMode,
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        json: bool,
    },
    /// Score a CSV of submissions and write a markdown report
    Batch {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Summarize a week of daily totals against a goal
    Progress {
        #[arg(long)]
        csv: PathBuf,
        /// kg CO2e per day
        #[arg(long, default_value_t = 6.5)]
        goal: f64,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CARBON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            name,
            phone,
            location,
            distance,
            diet,
            electricity,
            water,
            campus_days,
            activities,
            json,
        } => {
            let daily_commute_distance_km = factors::resolve_commute_km(distance, &location)?;

            let report = ActivityReport {
                name,
                phone,
                location,
                daily_commute_distance_km,
                diet,
                electricity_kwh_per_month: electricity,
                water_litres_per_month: water,
                campus_days_last_month: campus_days,
                eco_activities: activities.into_iter().collect::<BTreeSet<_>>(),
            };

            let result = match emissions::submit(report.clone()) {
                Ok(result) => result,
                Err(_) => {
                    eprintln!("Please correct the following and try again:");
                    for error in validation::violations(&report) {
                        eprintln!("- {error}");
                    }
                    return Ok(ExitCode::FAILURE);
                }
            };
            let badge = emissions::badge_for_total(result.total_kg);

            if json {
                let payload = serde_json::json!({
                    "name": report.name,
                    "result": result,
                    "shares": result.shares(),
                    "badge": badge.label(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(ExitCode::SUCCESS);
            }

            let shares = result.shares();
            println!(
                "{}, your carbon footprint this month is {:.2} kg CO2e",
                report.name, result.total_kg
            );
            println!(
                "Commute: {} km each way over {} campus days",
                report.daily_commute_distance_km, report.campus_days_last_month
            );
            println!("Breakdown:");
            println!("- Transport: {:.2} kg ({:.1}%)", result.transport_kg, shares.transport);
            println!("- Electricity: {:.2} kg ({:.1}%)", result.power_kg, shares.power);
            println!("- Water: {:.2} kg ({:.1}%)", result.water_kg, shares.water);
            println!("- Diet: {:.2} kg ({:.1}%)", result.diet_kg, shares.diet);
            if result.eco_bonus_multiplier < 1.0 {
                let names: Vec<&str> = report.eco_activities.iter().map(|a| a.label()).collect();
                println!("Eco bonus applied for: {}", names.join(", "));
            }
            println!("Award: {badge}");
        }
        Commands::QuickLog {
            mode,
            distance,
            json,
        } => {
            let distance = match validation::validate_trip_distance(distance) {
                Ok(km) => km,
                Err(error) => {
                    eprintln!("{error}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            let estimate = quick_log::estimate_trip(mode, distance);
            let comparison = quick_log::bus_alternative(&estimate);

            if json {
                let payload = serde_json::json!({
                    "trip": estimate,
                    "bus_alternative": comparison,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(ExitCode::SUCCESS);
            }

            println!(
                "Your {}km {} trip generated {:.2} kg of CO2",
                estimate.distance_km,
                estimate.mode.label(),
                estimate.kg
            );
            println!(
                "Taking the bus would have generated {:.2} kg of CO2, a {}% saving.",
                comparison.bus_kg, comparison.saving_percent
            );
        }
        Commands::Batch { csv, out } => {
            let rows = import::load_submissions(&csv)?;
            let (scored, rejected) = emissions::score_batch(rows);
            for entry in &rejected {
                warn!(line = entry.line, reasons = ?entry.reasons, "submission rejected");
            }

            let generated_on = chrono::Local::now().date_naive();
            let report = report::build_batch_report(generated_on, &scored, &rejected);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Scored {} submissions ({} rejected); report written to {}.",
                scored.len(),
                rejected.len(),
                out.display()
            );
        }
        Commands::Progress { csv, goal } => {
            let days = import::load_daily_totals(&csv)?;
            let Some(summary) = progress::summarize_week(&days, goal) else {
                println!("No daily totals found in {}.", csv.display());
                return Ok(ExitCode::SUCCESS);
            };

            println!("Goal: {goal} kg/day");
            println!("Weekly total: {:.1} kg", summary.total_kg);
            println!("Daily average: {:.2} kg", summary.average_kg);
            println!(
                "Best day: {} with {} kg",
                summary.best_day.day.format("%a %Y-%m-%d"),
                summary.best_day.kg
            );
            println!(
                "Worst day: {} with {} kg",
                summary.worst_day.day.format("%a %Y-%m-%d"),
                summary.worst_day.kg
            );
            println!(
                "Days at or under goal: {} of {}",
                summary.days_within_goal, summary.day_count
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
