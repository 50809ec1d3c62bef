use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the user owning a submission. Weak reference only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Repository-assigned identifier for a stored prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PredictionId(pub u64);

/// Location class of the property backing a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

impl PropertyArea {
    pub const ALL: [PropertyArea; 3] = [
        PropertyArea::Urban,
        PropertyArea::Semiurban,
        PropertyArea::Rural,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            PropertyArea::Urban => "Urban",
            PropertyArea::Semiurban => "Semiurban",
            PropertyArea::Rural => "Rural",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.label() == value)
    }
}

/// Validated property specification. Only [`crate::predictions::validation`] builds these
/// from untrusted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseInput {
    pub bedrooms: u32,
    pub bathrooms: f64,
    /// Living area in square feet.
    pub flat_area: f64,
    /// Lot area in square feet.
    pub lot_area: f64,
    /// 1 (poor) to 5 (excellent), centered on 3.
    pub condition: u8,
    /// 1 to 13, centered on 7.
    pub grade: u8,
    pub zipcode: String,
}

/// Validated loan applicant details. Incomes are monthly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    /// Term in months.
    pub loan_term: u32,
    /// 1 when the applicant has a clean credit history, otherwise 0.
    pub credit_history: u8,
    pub property_area: PropertyArea,
    pub married: bool,
    /// Graduate applicant.
    pub education: bool,
}

/// Insert payload for the house history; the repository assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHousePrediction {
    pub user_id: Option<UserId>,
    pub input: HouseInput,
    pub predicted_price: i64,
}

/// Insert payload for the loan history.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoanPrediction {
    pub user_id: Option<UserId>,
    pub input: LoanInput,
    pub is_eligible: bool,
}

/// Stored house estimate. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePredictionRecord {
    pub id: PredictionId,
    pub user_id: Option<UserId>,
    #[serde(flatten)]
    pub input: HouseInput,
    pub predicted_price: i64,
    pub created_at: DateTime<Utc>,
}

impl HousePredictionRecord {
    pub fn from_new(id: PredictionId, created_at: DateTime<Utc>, new: NewHousePrediction) -> Self {
        Self {
            id,
            user_id: new.user_id,
            input: new.input,
            predicted_price: new.predicted_price,
            created_at,
        }
    }
}

/// Stored loan verdict. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPredictionRecord {
    pub id: PredictionId,
    pub user_id: Option<UserId>,
    #[serde(flatten)]
    pub input: LoanInput,
    pub is_eligible: bool,
    pub created_at: DateTime<Utc>,
}

impl LoanPredictionRecord {
    pub fn from_new(id: PredictionId, created_at: DateTime<Utc>, new: NewLoanPrediction) -> Self {
        Self {
            id,
            user_id: new.user_id,
            input: new.input,
            is_eligible: new.is_eligible,
            created_at,
        }
    }
}
