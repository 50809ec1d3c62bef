use std::sync::Arc;

use tracing::{debug, info};

use super::contract::{HouseQuote, LoanVerdict};
use super::domain::{
    HousePredictionRecord, LoanPredictionRecord, NewHousePrediction, NewLoanPrediction, UserId,
};
use super::repository::{PredictionRepository, RepositoryError};
use super::scoring::{estimate_house_price, score_loan_eligibility, MarketNoise};
use super::summary::HistorySummary;
use super::validation::{HousePredictionRequest, LoanPredictionRequest, ValidationError};

/// Service composing validation, the scoring heuristics, and the history repository.
pub struct PredictionService<R> {
    repository: Arc<R>,
    noise: Arc<dyn MarketNoise>,
}

impl<R> PredictionService<R>
where
    R: PredictionRepository + 'static,
{
    pub fn new(repository: Arc<R>, noise: Arc<dyn MarketNoise>) -> Self {
        Self { repository, noise }
    }

    /// Validate, estimate, and record a house submission.
    ///
    /// Persistence failure is reported even though the estimate was computed.
    pub fn predict_house(
        &self,
        user: &UserId,
        request: HousePredictionRequest,
    ) -> Result<HouseQuote, PredictionServiceError> {
        let input = request.validate()?;
        let estimate = estimate_house_price(&input, self.noise.as_ref());

        let record = self.repository.insert_house(NewHousePrediction {
            user_id: Some(user.clone()),
            input,
            predicted_price: estimate.price,
        })?;
        info!(
            user = %user.0,
            prediction_id = record.id.0,
            price = estimate.price,
            "house estimate recorded"
        );

        Ok(HouseQuote::from(estimate))
    }

    /// Validate, score, and record a loan submission.
    pub fn predict_loan(
        &self,
        user: &UserId,
        request: LoanPredictionRequest,
    ) -> Result<LoanVerdict, PredictionServiceError> {
        let input = request.validate()?;
        let assessment = score_loan_eligibility(&input);
        debug!(score = assessment.score, "loan scored");

        let record = self.repository.insert_loan(NewLoanPrediction {
            user_id: Some(user.clone()),
            input,
            is_eligible: assessment.eligible,
        })?;
        info!(
            user = %user.0,
            prediction_id = record.id.0,
            eligible = assessment.eligible,
            "loan verdict recorded"
        );

        Ok(LoanVerdict::from(assessment))
    }

    pub fn house_history(
        &self,
        user: &UserId,
    ) -> Result<Vec<HousePredictionRecord>, PredictionServiceError> {
        Ok(self.repository.house_history(user)?)
    }

    pub fn loan_history(
        &self,
        user: &UserId,
    ) -> Result<Vec<LoanPredictionRecord>, PredictionServiceError> {
        Ok(self.repository.loan_history(user)?)
    }

    pub fn summary(&self, user: &UserId) -> Result<HistorySummary, PredictionServiceError> {
        let house = self.repository.house_history(user)?;
        let loan = self.repository.loan_history(user)?;
        Ok(HistorySummary::from_history(&house, &loan))
    }
}

/// Error raised by the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum PredictionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
