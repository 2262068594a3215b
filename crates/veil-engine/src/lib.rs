//! Redaction engine for veil
//!
//! [`Redactor`] applies one redaction strategy to a decoded image.
//! [`Processor`] runs the whole upload pipeline: decode, redact, encode,
//! store the files and append a history row.

pub mod blur;
pub mod codec;
pub mod error;
pub mod processor;
pub mod redactor;

pub use error::{EngineError, Result};
pub use processor::{ProcessRequest, ProcessResult, Processor};
pub use redactor::{RedactionOutcome, Redactor};
