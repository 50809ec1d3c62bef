//! Wire contract shared by the HTTP handlers and any client: endpoint descriptors plus the
//! success payloads. Request shapes and their validation live in
//! [`crate::predictions::validation`].

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::currency::{format_usd, CURRENCY};
use super::scoring::{HouseEstimate, LoanAssessment};

/// Method, path, and documented status codes of one endpoint.
#[derive(Debug, Clone)]
pub struct EndpointContract {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub requires_auth: bool,
    pub statuses: &'static [StatusCode],
}

impl EndpointContract {
    pub fn documents(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status)
    }
}

const PREDICT_STATUSES: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::INTERNAL_SERVER_ERROR,
];

const HISTORY_STATUSES: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::UNAUTHORIZED,
    StatusCode::INTERNAL_SERVER_ERROR,
];

pub const PREDICT_HOUSE: EndpointContract = EndpointContract {
    name: "predict.house",
    method: Method::POST,
    path: "/api/predict/house",
    requires_auth: true,
    statuses: PREDICT_STATUSES,
};

pub const PREDICT_LOAN: EndpointContract = EndpointContract {
    name: "predict.loan",
    method: Method::POST,
    path: "/api/predict/loan",
    requires_auth: true,
    statuses: PREDICT_STATUSES,
};

pub const HISTORY_HOUSE: EndpointContract = EndpointContract {
    name: "history.house",
    method: Method::GET,
    path: "/api/history/house",
    requires_auth: true,
    statuses: HISTORY_STATUSES,
};

pub const HISTORY_LOAN: EndpointContract = EndpointContract {
    name: "history.loan",
    method: Method::GET,
    path: "/api/history/loan",
    requires_auth: true,
    statuses: HISTORY_STATUSES,
};

pub const HISTORY_SUMMARY: EndpointContract = EndpointContract {
    name: "history.summary",
    method: Method::GET,
    path: "/api/history/summary",
    requires_auth: true,
    statuses: HISTORY_STATUSES,
};

pub const ENDPOINTS: [EndpointContract; 5] = [
    PREDICT_HOUSE,
    PREDICT_LOAN,
    HISTORY_HOUSE,
    HISTORY_LOAN,
    HISTORY_SUMMARY,
];

/// Generic body for 500 responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 200 payload of `POST /api/predict/house`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseQuote {
    pub price: i64,
    pub currency: String,
    pub formatted_price: String,
    /// Informational only; not order-stable.
    pub factors: Vec<String>,
}

impl From<HouseEstimate> for HouseQuote {
    fn from(estimate: HouseEstimate) -> Self {
        Self {
            price: estimate.price,
            currency: CURRENCY.to_string(),
            formatted_price: format_usd(estimate.price),
            factors: estimate.factors,
        }
    }
}

/// 200 payload of `POST /api/predict/loan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanVerdict {
    pub eligible: bool,
    pub confidence: f64,
    pub message: String,
}

impl From<LoanAssessment> for LoanVerdict {
    fn from(assessment: LoanAssessment) -> Self {
        Self {
            eligible: assessment.eligible,
            confidence: assessment.confidence,
            message: assessment.message.to_string(),
        }
    }
}

/// Substitute `:name` path segments with the supplied values.
pub fn build_url(path: &str, params: &[(&str, &str)]) -> String {
    let mut url = path.to_string();
    for (key, value) in params {
        let placeholder = format!(":{key}");
        if url.contains(&placeholder) {
            url = url.replace(&placeholder, value);
        }
    }
    url
}
