use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use crate::auth::StaticSessionAuthenticator;
use crate::predictions::domain::{
    HousePredictionRecord, LoanPredictionRecord, NewHousePrediction, NewLoanPrediction,
    PredictionId, UserId,
};
use crate::predictions::repository::{
    sort_house_newest_first, sort_loan_newest_first, PredictionRepository, RepositoryError,
};
use crate::predictions::scoring::FixedNoise;
use crate::predictions::validation::{HousePredictionRequest, LoanPredictionRequest};
use crate::predictions::{prediction_router, PredictionService};

pub(super) const ALICE_TOKEN: &str = "alice-token";
pub(super) const BOB_TOKEN: &str = "bob-token";

pub(super) fn alice() -> UserId {
    UserId("alice".to_string())
}

pub(super) fn bob() -> UserId {
    UserId("bob".to_string())
}

pub(super) fn house_request() -> HousePredictionRequest {
    HousePredictionRequest {
        bedrooms: Some(3.0),
        bathrooms: Some(2.0),
        flat_area: Some(1500.0),
        lot_area: Some(5000.0),
        condition: Some(3.0),
        grade: Some(7.0),
        zipcode: Some("98001".to_string()),
    }
}

pub(super) fn loan_request() -> LoanPredictionRequest {
    LoanPredictionRequest {
        applicant_income: Some(5000.0),
        coapplicant_income: Some(0.0),
        loan_amount: Some(150_000.0),
        loan_term: Some(360.0),
        credit_history: Some(1.0),
        property_area: Some("Urban".to_string()),
        married: Some(false),
        education: Some(true),
    }
}

/// Deterministic store: each insert advances a fake clock by one minute.
#[derive(Default)]
pub(super) struct MemoryRepository {
    sequence: AtomicU64,
    house: Mutex<Vec<HousePredictionRecord>>,
    loan: Mutex<Vec<LoanPredictionRecord>>,
}

impl MemoryRepository {
    fn stamp(&self) -> (PredictionId, chrono::DateTime<Utc>) {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        (PredictionId(id), base + Duration::minutes(id as i64))
    }

    pub(super) fn house_len(&self) -> usize {
        self.house.lock().expect("house mutex poisoned").len()
    }

    pub(super) fn loan_len(&self) -> usize {
        self.loan.lock().expect("loan mutex poisoned").len()
    }
}

impl PredictionRepository for MemoryRepository {
    fn insert_house(
        &self,
        prediction: NewHousePrediction,
    ) -> Result<HousePredictionRecord, RepositoryError> {
        let (id, created_at) = self.stamp();
        let record = HousePredictionRecord::from_new(id, created_at, prediction);
        self.house
            .lock()
            .expect("house mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn house_history(&self, user: &UserId) -> Result<Vec<HousePredictionRecord>, RepositoryError> {
        let guard = self.house.lock().expect("house mutex poisoned");
        let mut records: Vec<_> = guard
            .iter()
            .filter(|record| record.user_id.as_ref() == Some(user))
            .cloned()
            .collect();
        sort_house_newest_first(&mut records);
        Ok(records)
    }

    fn insert_loan(
        &self,
        prediction: NewLoanPrediction,
    ) -> Result<LoanPredictionRecord, RepositoryError> {
        let (id, created_at) = self.stamp();
        let record = LoanPredictionRecord::from_new(id, created_at, prediction);
        self.loan
            .lock()
            .expect("loan mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn loan_history(&self, user: &UserId) -> Result<Vec<LoanPredictionRecord>, RepositoryError> {
        let guard = self.loan.lock().expect("loan mutex poisoned");
        let mut records: Vec<_> = guard
            .iter()
            .filter(|record| record.user_id.as_ref() == Some(user))
            .cloned()
            .collect();
        sort_loan_newest_first(&mut records);
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl PredictionRepository for UnavailableRepository {
    fn insert_house(
        &self,
        _prediction: NewHousePrediction,
    ) -> Result<HousePredictionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn house_history(
        &self,
        _user: &UserId,
    ) -> Result<Vec<HousePredictionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_loan(
        &self,
        _prediction: NewLoanPrediction,
    ) -> Result<LoanPredictionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn loan_history(&self, _user: &UserId) -> Result<Vec<LoanPredictionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (PredictionService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PredictionService::new(repository.clone(), Arc::new(FixedNoise::NEUTRAL));
    (service, repository)
}

pub(super) fn authenticator() -> StaticSessionAuthenticator {
    let sessions: HashMap<String, UserId> = [
        (ALICE_TOKEN.to_string(), alice()),
        (BOB_TOKEN.to_string(), bob()),
    ]
    .into_iter()
    .collect();
    StaticSessionAuthenticator::new(sessions)
}

pub(super) fn router_with_repository<R>(repository: Arc<R>) -> axum::Router
where
    R: PredictionRepository + 'static,
{
    let service = PredictionService::new(repository, Arc::new(FixedNoise::NEUTRAL));
    prediction_router(Arc::new(service), Arc::new(authenticator()))
}

pub(super) fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).expect("serializable body")))
        .expect("valid request")
}

pub(super) fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("valid request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
