//! Storage adapters for hosts without a preference service of their own.

mod file_preference_store;

pub use file_preference_store::FilePreferenceStore;
