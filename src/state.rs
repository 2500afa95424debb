use crate::models::HabitData;
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns the store and the single in-memory copy of the habit data.
///
/// Handlers hold the lock across validate, mutate and persist, so each
/// request runs to completion before the next one touches the data.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub data: Arc<Mutex<HabitData>>,
}

impl AppState {
    pub fn new(store: Store, data: HabitData) -> Self {
        Self {
            store,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
