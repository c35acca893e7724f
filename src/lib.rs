pub mod config;
pub mod contracts;
pub mod correlation;
pub mod dashboard;
pub mod supabase;
pub mod types;
pub mod views;

// Re-export for tests
pub use contracts::ContractMatcher;
pub use correlation::Correlator;
