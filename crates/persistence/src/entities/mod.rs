//! Database row mappings.

pub mod attachment;
pub mod comment;
pub mod m2m_token;
pub mod snapshot;
pub mod ticket;
pub mod user;
pub mod vehicle;

pub use attachment::*;
pub use comment::*;
pub use m2m_token::*;
pub use snapshot::*;
pub use ticket::*;
pub use user::*;
pub use vehicle::*;
