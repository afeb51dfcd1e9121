//! Statistics service.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use codekeep_core::error::AppError;
use codekeep_database::repositories::SnippetRepository;

use crate::context::AccountContext;
use crate::stats::activity::ActivityCalendar;
use crate::stats::dashboard::DashboardStats;

/// Read-only aggregates for the dashboard.
#[derive(Debug, Clone)]
pub struct StatsService {
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(snippet_repo: Arc<SnippetRepository>) -> Self {
        Self { snippet_repo }
    }

    /// Computes the dashboard headline numbers.
    pub async fn dashboard(&self, ctx: &AccountContext) -> Result<DashboardStats, AppError> {
        let snippets = self.snippet_repo.find_by_account(ctx.account_id).await?;
        Ok(DashboardStats::compute(&snippets))
    }

    /// Builds the activity calendar; defaults to the current year.
    pub async fn activity(
        &self,
        ctx: &AccountContext,
        year: Option<i32>,
    ) -> Result<ActivityCalendar, AppError> {
        let year = year.unwrap_or_else(|| Utc::now().year());
        let snippets = self.snippet_repo.find_by_account(ctx.account_id).await?;
        ActivityCalendar::build(year, &snippets)
    }
}
