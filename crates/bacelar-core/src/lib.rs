pub mod export;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod stats;
pub mod urgency;

pub use filter::{FilterPatch, FilterState, QuickFilter};
pub use model::{
    Classification, Deadline, DeadlineDraft, DeadlineStatus, HistoryItem, Profile, User,
    ValidationError,
};
pub use pipeline::{Projection, Selection, SortDirection, SortField, SortState};
pub use urgency::{Urgency, UrgencyLevel, classify};
