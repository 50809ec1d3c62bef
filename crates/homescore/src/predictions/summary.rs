use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{HousePredictionRecord, LoanPredictionRecord, PredictionId};

pub const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    House,
    Loan,
}

/// One row of the dashboard feed. `value` is the predicted price for house entries and the
/// requested loan amount for loan entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: PredictionId,
    pub kind: ActivityKind,
    pub created_at: DateTime<Utc>,
    pub value: f64,
}

/// Per-user totals plus the most recent activity across both histories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_valuations: usize,
    pub applications_scored: usize,
    pub recent_activity: Vec<ActivityEntry>,
}

impl HistorySummary {
    pub fn from_history(house: &[HousePredictionRecord], loan: &[LoanPredictionRecord]) -> Self {
        let mut recent_activity: Vec<ActivityEntry> = house
            .iter()
            .map(|record| ActivityEntry {
                id: record.id,
                kind: ActivityKind::House,
                created_at: record.created_at,
                value: record.predicted_price as f64,
            })
            .chain(loan.iter().map(|record| ActivityEntry {
                id: record.id,
                kind: ActivityKind::Loan,
                created_at: record.created_at,
                value: record.input.loan_amount,
            }))
            .collect();

        // Same ordering as the per-kind histories: newest first, higher id on equal timestamps.
        recent_activity.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            total_valuations: house.len(),
            applications_scored: loan.len(),
            recent_activity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_valuations == 0 && self.applications_scored == 0
    }
}
