// API routes and handlers

pub mod common;
pub mod error;
pub mod health;
pub mod journal;
pub mod program;
pub mod routes;
pub mod state;
pub mod vitals;
