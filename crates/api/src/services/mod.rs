//! Application services.

pub mod m2m;
pub mod storage;
