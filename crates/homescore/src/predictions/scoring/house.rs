use super::noise::MarketNoise;
use crate::predictions::currency::format_usd;
use crate::predictions::domain::HouseInput;

const BASE_PRICE: f64 = 100_000.0;
const BEDROOM_VALUE: f64 = 20_000.0;
const BATHROOM_VALUE: f64 = 15_000.0;
const PRICE_PER_SQFT: f64 = 150.0;
const CONDITION_BASELINE: i32 = 3;
const CONDITION_STEP: f64 = 0.10;
const GRADE_BASELINE: i32 = 7;
const GRADE_STEP: f64 = 0.15;

/// Rounded price plus the informational explanation shown to users.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseEstimate {
    pub price: i64,
    pub factors: Vec<String>,
}

/// Price before market noise and rounding.
pub fn adjusted_price(input: &HouseInput) -> f64 {
    let linear = BASE_PRICE
        + f64::from(input.bedrooms) * BEDROOM_VALUE
        + input.bathrooms * BATHROOM_VALUE
        + input.flat_area * PRICE_PER_SQFT;

    linear * condition_multiplier(input.condition) * grade_multiplier(input.grade)
}

pub fn estimate_house_price(input: &HouseInput, noise: &dyn MarketNoise) -> HouseEstimate {
    let fluctuation = noise.fluctuation();
    let price = (adjusted_price(input) * fluctuation).round() as i64;

    HouseEstimate {
        price,
        factors: explain(input, fluctuation),
    }
}

fn condition_multiplier(condition: u8) -> f64 {
    1.0 + f64::from(i32::from(condition) - CONDITION_BASELINE) * CONDITION_STEP
}

fn grade_multiplier(grade: u8) -> f64 {
    1.0 + f64::from(i32::from(grade) - GRADE_BASELINE) * GRADE_STEP
}

fn explain(input: &HouseInput, fluctuation: f64) -> Vec<String> {
    let mut factors = vec![
        format!("Base value {}", format_usd(BASE_PRICE as i64)),
        format!(
            "+{} bedrooms add {}",
            input.bedrooms,
            format_usd((f64::from(input.bedrooms) * BEDROOM_VALUE).round() as i64)
        ),
        format!(
            "+{} bathrooms add {}",
            input.bathrooms,
            format_usd((input.bathrooms * BATHROOM_VALUE).round() as i64)
        ),
        format!(
            "{} sqft living area adds {}",
            input.flat_area,
            format_usd((input.flat_area * PRICE_PER_SQFT).round() as i64)
        ),
    ];

    factors.push(relative_note(
        "Condition",
        i32::from(input.condition),
        CONDITION_BASELINE,
        5,
        CONDITION_STEP,
    ));
    factors.push(relative_note(
        "Grade",
        i32::from(input.grade),
        GRADE_BASELINE,
        13,
        GRADE_STEP,
    ));

    let swing = (fluctuation - 1.0) * 100.0;
    factors.push(format!("Market fluctuation {swing:+.1}%"));

    factors
}

fn relative_note(label: &str, value: i32, baseline: i32, max: i32, step: f64) -> String {
    let offset = value - baseline;
    let pct = (f64::from(offset.abs()) * step * 100.0).round();
    match offset {
        0 => format!("{label} {value}/{max} is average (no adjustment)"),
        o if o > 0 => format!("{label} {value}/{max} raises value by {pct}%"),
        _ => format!("{label} {value}/{max} lowers value by {pct}%"),
    }
}
