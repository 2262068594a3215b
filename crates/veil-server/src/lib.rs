//! HTTP front end for veil: upload form, result page, history and file serving

pub mod html;
pub mod server;

pub use server::{AppState, VeilServer, router};
