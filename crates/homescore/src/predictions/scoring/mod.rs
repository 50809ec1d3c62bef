//! Closed-form heuristics. Inputs arrive validated, so nothing here can fail.

mod house;
mod loan;
mod noise;

pub use house::{adjusted_price, estimate_house_price, HouseEstimate};
pub use loan::{
    confidence_for, eligibility_score, score_loan_eligibility, LoanAssessment, ELIGIBLE_MESSAGE,
    INELIGIBLE_MESSAGE,
};
pub use noise::{
    noise_from_seed, FixedNoise, MarketNoise, SeededNoise, ThreadRngNoise, FLUCTUATION_MAX,
    FLUCTUATION_MIN,
};
