use chrono::Utc;
use homescore::predictions::repository::{sort_house_newest_first, sort_loan_newest_first};
use homescore::predictions::{
    HousePredictionRecord, LoanPredictionRecord, NewHousePrediction, NewLoanPrediction,
    PredictionId, PredictionRepository, RepositoryError, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct HistoryTables {
    next_id: u64,
    house: Vec<HousePredictionRecord>,
    loan: Vec<LoanPredictionRecord>,
}

impl HistoryTables {
    fn allocate_id(&mut self) -> PredictionId {
        self.next_id += 1;
        PredictionId(self.next_id)
    }
}

/// Process-local append-only store. History is lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPredictionRepository {
    tables: Arc<Mutex<HistoryTables>>,
}

impl PredictionRepository for InMemoryPredictionRepository {
    fn insert_house(
        &self,
        prediction: NewHousePrediction,
    ) -> Result<HousePredictionRecord, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        let id = guard.allocate_id();
        let record = HousePredictionRecord::from_new(id, Utc::now(), prediction);
        guard.house.push(record.clone());
        Ok(record)
    }

    fn house_history(&self, user: &UserId) -> Result<Vec<HousePredictionRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .house
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
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        let id = guard.allocate_id();
        let record = LoanPredictionRecord::from_new(id, Utc::now(), prediction);
        guard.loan.push(record.clone());
        Ok(record)
    }

    fn loan_history(&self, user: &UserId) -> Result<Vec<LoanPredictionRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard
            .loan
            .iter()
            .filter(|record| record.user_id.as_ref() == Some(user))
            .cloned()
            .collect();
        sort_loan_newest_first(&mut records);
        Ok(records)
    }
}
