//! Persisted tracking summary
//!
//! The summary is a single `{steps, distance, calories}` record spread
//! over three flash keys plus a commit marker. It is overwritten on every
//! save and reads as all zeros until the first complete one.

pub mod record;
pub mod store;

pub use record::PersistedSummary;
pub use store::{StoreError, SummaryStore, MAX_VALUE_SIZE};
