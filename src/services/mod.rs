// Business logic services

pub mod calendar;
pub mod program_template;
pub mod program_service;
pub mod journal_service;
pub mod vital_service;

pub use program_service::{InitOutcome, ProgramError, ProgramService};
pub use journal_service::JournalService;
pub use vital_service::VitalService;
