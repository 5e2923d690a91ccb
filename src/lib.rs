//! Recovery tracker for a heart transplant patient: daily vitals, a
//! wellbeing journal and a 12-week progressive cardio program, served as a
//! JSON API.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod store;
