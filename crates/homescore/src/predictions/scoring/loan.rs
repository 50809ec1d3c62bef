use crate::predictions::domain::{LoanInput, PropertyArea};

pub const ELIGIBLE_MESSAGE: &str = "Congratulations! Your profile meets our criteria.";
pub const INELIGIBLE_MESSAGE: &str =
    "Based on the provided details, we cannot approve this loan at this time.";

const DEFAULT_TERM_MONTHS: u32 = 360;
const ELIGIBILITY_THRESHOLD: i32 = 20;
const MAX_CONFIDENCE: f64 = 0.99;

/// Deterministic verdict. `score` is internal and never serialized to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanAssessment {
    pub score: i32,
    pub eligible: bool,
    pub confidence: f64,
    pub message: &'static str,
}

pub fn score_loan_eligibility(input: &LoanInput) -> LoanAssessment {
    let score = eligibility_score(input);
    let eligible = score > ELIGIBILITY_THRESHOLD;

    LoanAssessment {
        score,
        eligible,
        confidence: confidence_for(score),
        message: if eligible {
            ELIGIBLE_MESSAGE
        } else {
            INELIGIBLE_MESSAGE
        },
    }
}

/// Point total behind the verdict. Thresholds and weights are fixed heuristics.
pub fn eligibility_score(input: &LoanInput) -> i32 {
    let mut score = if input.credit_history == 1 { 50 } else { -50 };

    let total_income = input.applicant_income + input.coapplicant_income;
    let term = if input.loan_term > 0 {
        input.loan_term
    } else {
        DEFAULT_TERM_MONTHS
    };
    let monthly_payment = input.loan_amount / f64::from(term);
    let ratio = total_income / monthly_payment;

    score += if ratio > 300.0 {
        30
    } else if ratio > 100.0 {
        10
    } else {
        -20
    };

    if input.education {
        score += 10;
    }
    if input.married {
        score += 5;
    }
    if input.property_area == PropertyArea::Semiurban {
        score += 5;
    }

    score
}

/// Heuristic scalar in [0, 0.99]; not a probability.
pub fn confidence_for(score: i32) -> f64 {
    (0.5 + f64::from(score) / 200.0).clamp(0.0, MAX_CONFIDENCE)
}
