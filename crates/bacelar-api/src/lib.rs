//! Boundary with the record-oriented REST backend: typed client, error
//! mapping, session lifecycle, and the concurrent bulk mutation path.

pub mod bulk;
pub mod client;
pub mod error;
pub mod guard;
pub mod session;

pub use bulk::{BulkOperation, BulkOutcome, DeadlineWriter, run_bulk};
pub use client::{ApiClient, AttachmentRef, DeadlinePatch};
pub use error::ApiError;
pub use guard::FetchGuard;
pub use session::Session;
