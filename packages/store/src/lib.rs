pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use models::{Feedback, FeedbackDraft, NewUser, User};
pub use repo::{FeedbackStore, StoreError, StoreResult};
