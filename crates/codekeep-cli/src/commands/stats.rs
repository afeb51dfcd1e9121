//! Library statistics command.

use chrono::Datelike;
use clap::Args;
use tabled::{Table, Tabled};

use codekeep_core::error::AppError;
use codekeep_service::stats::{ActivityCalendar, DashboardStats};

use super::Session;
use crate::output::{self, OutputFormat};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Also show creation activity for this year
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Tabled)]
struct LanguageRow {
    #[tabled(rename = "Language")]
    name: String,
    #[tabled(rename = "Snippets")]
    count: u64,
}

#[derive(Debug, Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Created")]
    count: u32,
    #[tabled(rename = "Active days")]
    active_days: u32,
}

/// Per-month totals, January first.
fn month_rows(calendar: &ActivityCalendar) -> Vec<MonthRow> {
    let mut rows: Vec<MonthRow> = (1..=12)
        .map(|m| MonthRow {
            month: format!("{}-{:02}", calendar.year, m),
            count: 0,
            active_days: 0,
        })
        .collect();
    for day in &calendar.days {
        let row = &mut rows[day.date.month0() as usize];
        row.count += day.count;
        if day.count > 0 {
            row.active_days += 1;
        }
    }
    rows
}

fn print_dashboard(stats: &DashboardStats) {
    output::print_kv("Snippets", &stats.total_snippets.to_string());
    output::print_kv("Languages", &stats.total_languages.to_string());
    output::print_kv("Tags", &stats.total_tags.to_string());
    output::print_kv(
        "Per language",
        &format!("{:.1}", stats.avg_snippets_per_language),
    );

    if !stats.language_distribution.is_empty() {
        println!();
        let rows = stats.language_distribution.iter().map(|l| LanguageRow {
            name: l.name.clone(),
            count: l.count,
        });
        println!("{}", Table::new(rows));
    }

    if !stats.recent.is_empty() {
        println!();
        println!("Recent:");
        for snippet in &stats.recent {
            println!(
                "  {}  {} ({})",
                snippet.created_at.format("%Y-%m-%d"),
                snippet.name,
                snippet.language
            );
        }
    }
}

/// Execute the stats command
pub async fn execute(args: &StatsArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let session = Session::open(config_path).await?;
    let stats_service = &session.state.stats_service;

    let result = async {
        let dashboard = stats_service.dashboard(&session.ctx).await?;
        let activity = match args.year {
            Some(year) => Some(stats_service.activity(&session.ctx, Some(year)).await?),
            None => None,
        };

        match format {
            OutputFormat::Table => {
                print_dashboard(&dashboard);
                if let Some(calendar) = &activity {
                    println!();
                    println!("Activity {} ({} created):", calendar.year, calendar.total);
                    println!("{}", Table::new(month_rows(calendar)));
                }
            }
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "dashboard": dashboard,
                "activity": activity,
            })),
        }
        Ok::<(), AppError>(())
    }
    .await;

    session.close().await;
    result
}
