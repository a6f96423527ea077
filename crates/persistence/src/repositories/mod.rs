//! Repository implementations.

pub mod attachment;
pub mod comment;
pub mod m2m_token;
pub mod snapshot;
pub mod ticket;
pub mod user;
pub mod vehicle;

pub use attachment::AttachmentRepository;
pub use comment::CommentRepository;
pub use m2m_token::M2mTokenRepository;
pub use snapshot::SnapshotRepository;
pub use ticket::TicketRepository;
pub use user::UserRepository;
pub use vehicle::VehicleRepository;
