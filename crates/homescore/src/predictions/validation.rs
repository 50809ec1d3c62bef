use serde::{Deserialize, Serialize};

use super::domain::{HouseInput, LoanInput, PropertyArea};
use super::scoring::{adjusted_price, FLUCTUATION_MAX};

/// Field-level rejection of a request body, surfaced as a 400.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Rejection not attributable to a single field (malformed JSON, wrong content type).
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// Wire shape of `POST /api/predict/house`. Every field is optional so a missing value
/// produces a field-specific message; unknown fields such as `predictedPrice` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePredictionRequest {
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub flat_area: Option<f64>,
    pub lot_area: Option<f64>,
    pub condition: Option<f64>,
    pub grade: Option<f64>,
    pub zipcode: Option<String>,
}

impl HousePredictionRequest {
    pub fn validate(self) -> Result<HouseInput, ValidationError> {
        let bedrooms = whole_number(required(self.bedrooms, "bedrooms")?, "bedrooms")?;
        let bathrooms = non_negative(required(self.bathrooms, "bathrooms")?, "bathrooms")?;
        let flat_area = positive(required(self.flat_area, "flatArea")?, "flatArea")?;
        let lot_area = positive(required(self.lot_area, "lotArea")?, "lotArea")?;
        let condition = bounded_integer(required(self.condition, "condition")?, "condition", 1, 5)?;
        let grade = bounded_integer(required(self.grade, "grade")?, "grade", 1, 13)?;

        let zipcode = required(self.zipcode, "zipcode")?.trim().to_string();
        if zipcode.is_empty() {
            return Err(ValidationError::field("zipcode", "zipcode must not be empty"));
        }

        let input = HouseInput {
            bedrooms,
            bathrooms,
            flat_area,
            lot_area,
            condition,
            grade,
            zipcode,
        };
        ensure_priceable(&input)?;
        Ok(input)
    }
}

/// The highest possible noisy estimate must still round into an `i64` price.
fn ensure_priceable(input: &HouseInput) -> Result<(), ValidationError> {
    if priceable(input) {
        return Ok(());
    }

    let without_bathrooms = HouseInput {
        bathrooms: 0.0,
        ..input.clone()
    };
    let field = if priceable(&without_bathrooms) {
        "bathrooms"
    } else {
        "flatArea"
    };
    Err(ValidationError::field(
        field,
        format!("{field} is too large to produce a price"),
    ))
}

fn priceable(input: &HouseInput) -> bool {
    let ceiling = adjusted_price(input) * FLUCTUATION_MAX;
    ceiling.is_finite() && ceiling < i64::MAX as f64
}

impl From<&HouseInput> for HousePredictionRequest {
    fn from(input: &HouseInput) -> Self {
        Self {
            bedrooms: Some(f64::from(input.bedrooms)),
            bathrooms: Some(input.bathrooms),
            flat_area: Some(input.flat_area),
            lot_area: Some(input.lot_area),
            condition: Some(f64::from(input.condition)),
            grade: Some(f64::from(input.grade)),
            zipcode: Some(input.zipcode.clone()),
        }
    }
}

/// Wire shape of `POST /api/predict/loan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPredictionRequest {
    pub applicant_income: Option<f64>,
    pub coapplicant_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub loan_term: Option<f64>,
    pub credit_history: Option<f64>,
    pub property_area: Option<String>,
    pub married: Option<bool>,
    pub education: Option<bool>,
}

impl LoanPredictionRequest {
    pub fn validate(self) -> Result<LoanInput, ValidationError> {
        let applicant_income = non_negative(
            required(self.applicant_income, "applicantIncome")?,
            "applicantIncome",
        )?;
        let coapplicant_income = non_negative(
            required(self.coapplicant_income, "coapplicantIncome")?,
            "coapplicantIncome",
        )?;
        let loan_amount = positive(required(self.loan_amount, "loanAmount")?, "loanAmount")?;

        let loan_term = whole_number(required(self.loan_term, "loanTerm")?, "loanTerm")?;
        if loan_term == 0 {
            return Err(ValidationError::field(
                "loanTerm",
                "loanTerm must be a positive number of months",
            ));
        }

        let credit_history = required(self.credit_history, "creditHistory")?;
        let credit_history = if credit_history == 0.0 {
            0
        } else if credit_history == 1.0 {
            1
        } else {
            return Err(ValidationError::field(
                "creditHistory",
                "creditHistory must be 0 or 1",
            ));
        };

        let area = required(self.property_area, "propertyArea")?;
        let property_area = PropertyArea::from_label(&area).ok_or_else(|| {
            ValidationError::field(
                "propertyArea",
                format!("propertyArea must be one of Urban, Semiurban, Rural (found '{area}')"),
            )
        })?;

        Ok(LoanInput {
            applicant_income,
            coapplicant_income,
            loan_amount,
            loan_term,
            credit_history,
            property_area,
            married: required(self.married, "married")?,
            education: required(self.education, "education")?,
        })
    }
}

impl From<&LoanInput> for LoanPredictionRequest {
    fn from(input: &LoanInput) -> Self {
        Self {
            applicant_income: Some(input.applicant_income),
            coapplicant_income: Some(input.coapplicant_income),
            loan_amount: Some(input.loan_amount),
            loan_term: Some(f64::from(input.loan_term)),
            credit_history: Some(f64::from(input.credit_history)),
            property_area: Some(input.property_area.label().to_string()),
            married: Some(input.married),
            education: Some(input.education),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::field(field, format!("{field} is required")))
}

fn finite(value: f64, field: &str) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::field(field, format!("{field} must be a finite number")))
    }
}

fn non_negative(value: f64, field: &str) -> Result<f64, ValidationError> {
    let value = finite(value, field)?;
    if value < 0.0 {
        return Err(ValidationError::field(field, format!("{field} must not be negative")));
    }
    Ok(value)
}

fn positive(value: f64, field: &str) -> Result<f64, ValidationError> {
    let value = finite(value, field)?;
    if value <= 0.0 {
        return Err(ValidationError::field(field, format!("{field} must be greater than 0")));
    }
    Ok(value)
}

fn whole_number(value: f64, field: &str) -> Result<u32, ValidationError> {
    let value = non_negative(value, field)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::field(
            field,
            format!("{field} must be a whole number"),
        ));
    }
    Ok(value as u32)
}

fn bounded_integer(value: f64, field: &str, min: u8, max: u8) -> Result<u8, ValidationError> {
    let out_of_range = || {
        ValidationError::field(field, format!("{field} must be an integer between {min} and {max}"))
    };
    let value = whole_number(value, field).map_err(|_| out_of_range())?;
    if value < u32::from(min) || value > u32::from(max) {
        return Err(out_of_range());
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> HousePredictionRequest {
        HousePredictionRequest {
            bedrooms: Some(3.0),
            bathrooms: Some(2.5),
            flat_area: Some(1500.0),
            lot_area: Some(5000.0),
            condition: Some(3.0),
            grade: Some(7.0),
            zipcode: Some(" 98001 ".to_string()),
        }
    }

    #[test]
    fn accepts_whole_valued_floats_and_trims_zipcode() {
        let input = house().validate().expect("valid house");
        assert_eq!(input.bedrooms, 3);
        assert_eq!(input.bathrooms, 2.5);
        assert_eq!(input.zipcode, "98001");
    }

    #[test]
    fn reports_the_first_missing_field() {
        let mut request = house();
        request.lot_area = None;
        let err = request.validate().expect_err("lot area missing");
        assert_eq!(err.field.as_deref(), Some("lotArea"));
        assert_eq!(err.message, "lotArea is required");
    }

    #[test]
    fn rejects_out_of_range_grade_and_fractional_bedrooms() {
        let mut request = house();
        request.grade = Some(14.0);
        let err = request.validate().expect_err("grade too high");
        assert_eq!(err.field.as_deref(), Some("grade"));

        let mut request = house();
        request.bedrooms = Some(2.5);
        let err = request.validate().expect_err("fractional bedrooms");
        assert_eq!(err.field.as_deref(), Some("bedrooms"));

        let mut request = house();
        request.flat_area = Some(0.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_areas_too_large_to_price() {
        let mut request = house();
        request.flat_area = Some(1e300);
        let err = request.validate().expect_err("flat area overflows the price");
        assert_eq!(err.field.as_deref(), Some("flatArea"));
        assert_eq!(err.message, "flatArea is too large to produce a price");

        let mut request = house();
        request.bathrooms = Some(f64::MAX);
        request.flat_area = Some(f64::MAX);
        let err = request.validate().expect_err("sum overflows to infinity");
        assert_eq!(err.field.as_deref(), Some("flatArea"));

        let mut request = house();
        request.bathrooms = Some(1e18);
        let err = request.validate().expect_err("bathrooms overflow the price");
        assert_eq!(err.field.as_deref(), Some("bathrooms"));
    }

    #[test]
    fn large_but_priceable_houses_are_accepted() {
        let mut request = house();
        request.flat_area = Some(1e9);
        let input = request.validate().expect("still fits an i64 price");
        assert!(adjusted_price(&input) * FLUCTUATION_MAX < i64::MAX as f64);
    }

    #[test]
    fn loan_enforces_enum_and_credit_flag() {
        let request = LoanPredictionRequest {
            applicant_income: Some(5000.0),
            coapplicant_income: Some(0.0),
            loan_amount: Some(150000.0),
            loan_term: Some(360.0),
            credit_history: Some(1.0),
            property_area: Some("Suburban".to_string()),
            married: Some(false),
            education: Some(true),
        };

        let err = request.clone().validate().expect_err("unknown area");
        assert_eq!(err.field.as_deref(), Some("propertyArea"));

        let mut flagged = request.clone();
        flagged.property_area = Some("Semiurban".to_string());
        flagged.credit_history = Some(0.5);
        let err = flagged.validate().expect_err("credit flag must be binary");
        assert_eq!(err.field.as_deref(), Some("creditHistory"));

        let mut zero_term = request;
        zero_term.property_area = Some("Rural".to_string());
        zero_term.loan_term = Some(0.0);
        let err = zero_term.validate().expect_err("term must be positive");
        assert_eq!(err.field.as_deref(), Some("loanTerm"));
    }

    #[test]
    fn validation_error_body_omits_unknown_field() {
        let body = serde_json::to_value(ValidationError::body("expected value")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "expected value" }));
    }
}
