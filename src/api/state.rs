use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{JournalService, ProgramService, VitalService};
use crate::store::RecordStore;

/// Shared handler state. Cloned per request; services only hold an `Arc`
/// to the store.
#[derive(Clone)]
pub struct AppState {
    pub environment: String,
    pub demo_user_id: Option<String>,
    pub program_service: ProgramService,
    pub journal_service: JournalService,
    pub vital_service: VitalService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: &AppConfig) -> Self {
        Self {
            environment: config.environment.clone(),
            demo_user_id: config.demo_user_id.clone(),
            program_service: ProgramService::new(store.clone()),
            journal_service: JournalService::new(store.clone()),
            vital_service: VitalService::new(store),
        }
    }
}
