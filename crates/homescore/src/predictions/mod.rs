//! House price estimates and loan eligibility verdicts.
//!
//! Requests flow through [`validation`] into strictly typed inputs, are scored by the pure
//! functions in [`scoring`], appended to a [`PredictionRepository`], and answered with the
//! shapes declared in [`contract`].

pub mod contract;
pub mod currency;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;
pub mod validation;

#[cfg(test)]
mod tests;

pub use contract::{build_url, EndpointContract, HouseQuote, LoanVerdict, ENDPOINTS};
pub use domain::{
    HouseInput, HousePredictionRecord, LoanInput, LoanPredictionRecord, NewHousePrediction,
    NewLoanPrediction, PredictionId, PropertyArea, UserId,
};
pub use repository::{PredictionRepository, RepositoryError};
pub use router::{prediction_router, PredictionState};
pub use scoring::{
    estimate_house_price, score_loan_eligibility, FixedNoise, HouseEstimate, LoanAssessment,
    MarketNoise, SeededNoise, ThreadRngNoise,
};
pub use service::{PredictionService, PredictionServiceError};
pub use summary::{ActivityEntry, ActivityKind, HistorySummary};
pub use validation::{HousePredictionRequest, LoanPredictionRequest, ValidationError};
