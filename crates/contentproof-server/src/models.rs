//! Database models for ContentProof.

pub mod content_record;
pub mod user;

pub use content_record::{ContentRecord, NewContentRecord};
pub use user::{NewUser, User};
