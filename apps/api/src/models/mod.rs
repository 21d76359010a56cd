// Persisted entities of the account & resume store.
// Wire and storage field names are camelCase, matching the records the
// frontend reads and writes.

pub mod account;
pub mod audit;
pub mod resume;
pub mod stats;
