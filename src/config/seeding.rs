use anyhow::Result;
use std::sync::Arc;

use crate::services::{calendar, InitOutcome, ProgramService};
use crate::store::RecordStore;

/// Seeds demo data at startup when `SEED_ON_STARTUP` is set.
pub struct DatabaseSeeder {
    store: Arc<dyn RecordStore>,
}

impl DatabaseSeeder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn seed_all(&self, demo_user_id: Option<&str>) -> Result<()> {
        tracing::info!("Starting database seeding...");

        match demo_user_id {
            Some(user_id) => self.seed_program(user_id).await?,
            None => tracing::warn!("DEMO_USER_ID not configured, skipping program seeding"),
        }

        tracing::info!("Database seeding completed!");
        Ok(())
    }

    async fn seed_program(&self, user_id: &str) -> Result<()> {
        let program_service = ProgramService::new(self.store.clone());

        match program_service.initialize(user_id, calendar::today()).await? {
            InitOutcome::Created { sessions_created, .. } => {
                tracing::info!(user_id, sessions_created, "Seeded demo program");
            }
            InitOutcome::AlreadyInitialized { existing_sessions, .. } => {
                tracing::info!(user_id, existing_sessions, "Demo program already seeded");
            }
        }

        Ok(())
    }
}
