//! Wire types for the Gemini Files API used by `genai-ingest`.

pub mod enums;
pub mod files;
