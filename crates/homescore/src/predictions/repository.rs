use super::domain::{
    HousePredictionRecord, LoanPredictionRecord, NewHousePrediction, NewLoanPrediction, UserId,
};

/// Append-only storage for prediction history.
///
/// Implementations assign `id` and `createdAt` on insert and return history for a single
/// user ordered newest first.
pub trait PredictionRepository: Send + Sync {
    fn insert_house(
        &self,
        prediction: NewHousePrediction,
    ) -> Result<HousePredictionRecord, RepositoryError>;
    fn house_history(&self, user: &UserId) -> Result<Vec<HousePredictionRecord>, RepositoryError>;
    fn insert_loan(
        &self,
        prediction: NewLoanPrediction,
    ) -> Result<LoanPredictionRecord, RepositoryError>;
    fn loan_history(&self, user: &UserId) -> Result<Vec<LoanPredictionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Newest first; ids break timestamp ties so ordering is total.
pub fn sort_house_newest_first(records: &mut [HousePredictionRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

pub fn sort_loan_newest_first(records: &mut [LoanPredictionRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
