use clap::Args;
use homescore::error::AppError;
use homescore::predictions::currency::format_usd;
use homescore::predictions::scoring::noise_from_seed;
use homescore::predictions::{
    estimate_house_price, score_loan_eligibility, HousePredictionRequest, LoanPredictionRequest,
};

#[derive(Args, Debug)]
pub(crate) struct HouseEstimateArgs {
    #[arg(long)]
    pub(crate) bedrooms: f64,
    #[arg(long)]
    pub(crate) bathrooms: f64,
    /// Living area in square feet
    #[arg(long)]
    pub(crate) flat_area: f64,
    /// Lot area in square feet
    #[arg(long)]
    pub(crate) lot_area: f64,
    /// Condition rating, 1-5
    #[arg(long)]
    pub(crate) condition: f64,
    /// Construction grade, 1-13
    #[arg(long)]
    pub(crate) grade: f64,
    #[arg(long)]
    pub(crate) zipcode: String,
    /// Seed the market-noise draw for a reproducible estimate
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl HouseEstimateArgs {
    fn request(&self) -> HousePredictionRequest {
        HousePredictionRequest {
            bedrooms: Some(self.bedrooms),
            bathrooms: Some(self.bathrooms),
            flat_area: Some(self.flat_area),
            lot_area: Some(self.lot_area),
            condition: Some(self.condition),
            grade: Some(self.grade),
            zipcode: Some(self.zipcode.clone()),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct LoanEstimateArgs {
    /// Monthly applicant income
    #[arg(long)]
    pub(crate) applicant_income: f64,
    /// Monthly co-applicant income
    #[arg(long, default_value_t = 0.0)]
    pub(crate) coapplicant_income: f64,
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Term in months
    #[arg(long, default_value_t = 360.0)]
    pub(crate) loan_term: f64,
    /// 1 for a clean credit history, 0 otherwise
    #[arg(long)]
    pub(crate) credit_history: f64,
    /// Urban, Semiurban or Rural
    #[arg(long)]
    pub(crate) property_area: String,
    #[arg(long)]
    pub(crate) married: bool,
    #[arg(long)]
    pub(crate) graduate: bool,
}

impl LoanEstimateArgs {
    fn request(&self) -> LoanPredictionRequest {
        LoanPredictionRequest {
            applicant_income: Some(self.applicant_income),
            coapplicant_income: Some(self.coapplicant_income),
            loan_amount: Some(self.loan_amount),
            loan_term: Some(self.loan_term),
            credit_history: Some(self.credit_history),
            property_area: Some(self.property_area.clone()),
            married: Some(self.married),
            education: Some(self.graduate),
        }
    }
}

pub(crate) fn run_house_estimate(args: HouseEstimateArgs) -> Result<(), AppError> {
    let input = args.request().validate()?;
    let noise = noise_from_seed(args.seed);
    let estimate = estimate_house_price(&input, noise.as_ref());

    println!("House estimate for zipcode {}", input.zipcode);
    println!(
        "- {} bedrooms | {} bathrooms | {} sqft living | {} sqft lot",
        input.bedrooms, input.bathrooms, input.flat_area, input.lot_area
    );
    println!("Estimated price: {} (USD)", format_usd(estimate.price));
    println!("\nFactors");
    for factor in &estimate.factors {
        println!("- {}", factor);
    }

    Ok(())
}

pub(crate) fn run_loan_estimate(args: LoanEstimateArgs) -> Result<(), AppError> {
    let input = args.request().validate()?;
    let assessment = score_loan_eligibility(&input);

    println!(
        "Loan assessment for {} over {} months ({} area)",
        format_usd(input.loan_amount.round() as i64),
        input.loan_term,
        input.property_area.label()
    );
    println!(
        "Eligible: {} | confidence {:.0}%",
        if assessment.eligible { "yes" } else { "no" },
        assessment.confidence * 100.0
    );
    println!("{}", assessment.message);

    Ok(())
}
