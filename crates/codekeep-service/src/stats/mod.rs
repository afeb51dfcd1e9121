//! Dashboard statistics and the activity calendar.

pub mod activity;
pub mod dashboard;
pub mod service;

pub use activity::{ActivityCalendar, ActivityDay, activity_level};
pub use dashboard::{DashboardStats, LanguageCount};
pub use service::StatsService;
