//! Upload a local document to the Gemini Files API and report its handle.

pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod ingest;
pub mod report;
mod upload;

#[cfg(test)]
mod test_support;

pub use genai_ingest_types as types;

pub use client::{Client, ClientBuilder, ClientConfig, HttpOptions};
pub use error::{Error, Result};
pub use ingest::IngestRequest;
