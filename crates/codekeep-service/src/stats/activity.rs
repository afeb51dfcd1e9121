//! Per-day creation counts for a calendar year.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use codekeep_core::error::AppError;
use codekeep_entity::snippet::Snippet;

/// One cell of the activity calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    /// Snippets created that day (UTC).
    pub count: u32,
    /// Intensity bucket from 0 to 4.
    pub level: u8,
}

/// Every day of one year with its snippet count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCalendar {
    pub year: i32,
    /// Snippets created during the year.
    pub total: u32,
    /// Empty cells before January 1st in a Sunday-first week grid.
    pub leading_blanks: u32,
    pub days: Vec<ActivityDay>,
}

/// Maps a day's count to an intensity level.
pub fn activity_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=5 => 3,
        _ => 4,
    }
}

impl ActivityCalendar {
    /// Builds the calendar for `year` from snippet creation times.
    pub fn build(year: i32, snippets: &[Snippet]) -> Result<Self, AppError> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::validation(format!("Year {year} is out of range")))?;

        let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
        for snippet in snippets {
            let date = snippet.created_at.date_naive();
            if date.year() == year {
                *counts.entry(date).or_default() += 1;
            }
        }

        let days: Vec<ActivityDay> = first
            .iter_days()
            .take_while(|d| d.year() == year)
            .map(|date| {
                let count = counts.get(&date).copied().unwrap_or(0);
                ActivityDay {
                    date,
                    count,
                    level: activity_level(count),
                }
            })
            .collect();

        Ok(Self {
            year,
            total: counts.values().sum(),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }
}
