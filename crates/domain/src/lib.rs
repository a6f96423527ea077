//! Domain layer for the E-Helpdesk backend.
//!
//! This crate contains:
//! - Domain models (vehicles, tickets, comments, users, snapshots)
//! - Pure business logic (telemetry status derivation, chatbot matching)

pub mod models;
pub mod services;
