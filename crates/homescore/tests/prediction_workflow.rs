//! End-to-end scenarios exercised through the public router so authentication, validation,
//! scoring, and history persistence are covered together.

mod common {
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::response::Response;
    use chrono::Utc;
    use serde_json::Value;

    use homescore::auth::StaticSessionAuthenticator;
    use homescore::predictions::repository::{sort_house_newest_first, sort_loan_newest_first};
    use homescore::predictions::{
        prediction_router, HousePredictionRecord, LoanPredictionRecord, NewHousePrediction,
        NewLoanPrediction, PredictionId, PredictionRepository, PredictionService,
        RepositoryError, SeededNoise, UserId,
    };

    pub(super) const TOKEN: &str = "session-123";

    #[derive(Default)]
    pub(super) struct VecRepository {
        house: Mutex<Vec<HousePredictionRecord>>,
        loan: Mutex<Vec<LoanPredictionRecord>>,
    }

    impl PredictionRepository for VecRepository {
        fn insert_house(
            &self,
            prediction: NewHousePrediction,
        ) -> Result<HousePredictionRecord, RepositoryError> {
            let mut guard = self.house.lock().expect("house mutex poisoned");
            let id = PredictionId(guard.len() as u64 + 1);
            let record = HousePredictionRecord::from_new(id, Utc::now(), prediction);
            guard.push(record.clone());
            Ok(record)
        }

        fn house_history(
            &self,
            user: &UserId,
        ) -> Result<Vec<HousePredictionRecord>, RepositoryError> {
            let mut records: Vec<_> = self
                .house
                .lock()
                .expect("house mutex poisoned")
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
            let mut guard = self.loan.lock().expect("loan mutex poisoned");
            let id = PredictionId(guard.len() as u64 + 1);
            let record = LoanPredictionRecord::from_new(id, Utc::now(), prediction);
            guard.push(record.clone());
            Ok(record)
        }

        fn loan_history(
            &self,
            user: &UserId,
        ) -> Result<Vec<LoanPredictionRecord>, RepositoryError> {
            let mut records: Vec<_> = self
                .loan
                .lock()
                .expect("loan mutex poisoned")
                .iter()
                .filter(|record| record.user_id.as_ref() == Some(user))
                .cloned()
                .collect();
            sort_loan_newest_first(&mut records);
            Ok(records)
        }
    }

    pub(super) fn router() -> axum::Router {
        let service = PredictionService::new(
            Arc::new(VecRepository::default()),
            Arc::new(SeededNoise::new(2024)),
        );
        let authenticator = StaticSessionAuthenticator::new([(
            TOKEN.to_string(),
            UserId("user-42".to_string()),
        )]);
        prediction_router(Arc::new(service), Arc::new(authenticator))
    }

    pub(super) fn post(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    pub(super) fn get(path: &str, token: &str) -> Request<Body> {
        Request::get(path)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("valid request")
    }

    pub(super) async fn json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }
}

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use tower::ServiceExt;

fn reference_house() -> serde_json::Value {
    json!({
        "bedrooms": 3,
        "bathrooms": 2,
        "flatArea": 1500,
        "lotArea": 5000,
        "condition": 3,
        "grade": 7,
        "zipcode": "98001"
    })
}

fn reference_loan() -> serde_json::Value {
    json!({
        "applicantIncome": 5000,
        "coapplicantIncome": 0,
        "loanAmount": 150000,
        "loanTerm": 360,
        "creditHistory": 1,
        "propertyArea": "Urban",
        "married": false,
        "education": true
    })
}

#[tokio::test]
async fn house_estimate_is_returned_and_recorded() {
    let router = router();

    let response = router
        .clone()
        .oneshot(post("/api/predict/house", Some(TOKEN), reference_house()))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let quote = json(response).await;
    let price = quote["price"].as_i64().expect("integer price");
    assert!((394_250..=435_750).contains(&price), "price {price} outside noise band");
    assert_eq!(quote["currency"], "USD");
    assert!(quote["formattedPrice"]
        .as_str()
        .is_some_and(|formatted| formatted.starts_with('$') && formatted.contains(',')));

    let response = router
        .oneshot(get("/api/history/house", TOKEN))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let history = json(response).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert_eq!(history[0]["predictedPrice"], price);
    assert_eq!(history[0]["zipcode"], "98001");
    assert!(history[0]["createdAt"].is_string());
}

#[tokio::test]
async fn house_estimate_requires_a_session() {
    let response = router()
        .oneshot(post("/api/predict/house", None, reference_house()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reference_applicant_is_eligible() {
    let response = router()
        .oneshot(post("/api/predict/loan", Some(TOKEN), reference_loan()))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let verdict = json(response).await;
    assert_eq!(verdict["eligible"], true);
    assert!(verdict["confidence"].as_f64().is_some_and(|c| c >= 0.5));
    assert_eq!(
        verdict["message"],
        "Congratulations! Your profile meets our criteria."
    );
}

#[tokio::test]
async fn loan_without_amount_is_a_bad_request() {
    let mut body = reference_loan();
    body.as_object_mut()
        .expect("object body")
        .remove("loanAmount");

    let response = router()
        .oneshot(post("/api/predict/loan", Some(TOKEN), body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = json(response).await;
    assert!(payload["message"].is_string());
}
