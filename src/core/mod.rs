//! Core business logic abstractions

pub mod client;
pub mod config;
pub mod error;
pub mod log;
pub mod model;

// Re-export main types for cleaner imports
pub use client::{ConsoleApi, Page, PageMeta, PageParams};
pub use error::LedgerError;
pub use model::{
    Investment, InvestmentRef, LogEntry, LogKind, LogMetadata, ParticipationRecord, RecordStatus,
    Referral, TransactionRecord,
};
