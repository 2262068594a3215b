//! Storage layer for veil
//!
//! This crate provides:
//! - SQLite history table (append-only)
//! - Upload directory for original and processed images

pub mod db;
pub mod error;
pub mod uploads;

pub use db::HistoryStore;
pub use error::{Result, StorageError};
pub use uploads::{UploadStore, sanitize_filename};
