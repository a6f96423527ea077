//! HTTP route handlers.

pub mod attachments;
pub mod chatbot;
pub mod comments;
pub mod health;
pub mod integrations;
pub mod snapshots;
pub mod tickets;
pub mod users;
pub mod vehicles;
