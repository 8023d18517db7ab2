//! Page-analysis relay and report generator
//!
//! Relays multimodal page-analysis requests to the OpenAI Responses API,
//! normalizing both the outgoing content parts and the reply shape, and
//! assembles `.docx` reports from the analysis results a browser client
//! collected.

pub mod ai;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod models;
pub mod report;

pub use error::{Error, Result};
