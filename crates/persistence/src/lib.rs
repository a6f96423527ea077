//! Persistence layer for the E-Helpdesk backend.
//!
//! This crate contains:
//! - Connection pool management for the three PostgreSQL targets
//! - Entity definitions (database row mappings)
//! - Repository implementations issuing raw parameterized SQL

pub mod db;
pub mod entities;
pub mod repositories;
