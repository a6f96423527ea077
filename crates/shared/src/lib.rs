//! Shared utilities and common types for the E-Helpdesk backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Page-number pagination helpers
//! - A TTL cache used by the fleet lookup handlers

pub mod cache;
pub mod pagination;
