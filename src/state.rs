use crate::storage::{CounterStore, DailyLogStore, StorePaths};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub counter: CounterStore,
    pub log: DailyLogStore,
    /// Serializes interaction cycles inside this process.
    pub cycle_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(paths: StorePaths) -> Self {
        Self {
            counter: CounterStore::new(paths.counter),
            log: DailyLogStore::new(paths.log),
            cycle_lock: Arc::new(Mutex::new(())),
        }
    }
}
