//! Pure business logic services.

pub mod chatbot;
pub mod telemetry;
