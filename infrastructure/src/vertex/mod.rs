//! Vertex AI text generation adapter
//!
//! Implements the [`TextGenerator`](simulacra_application::TextGenerator)
//! port against the Vertex AI `:predict` endpoint for PaLM text models.

mod generator;
mod types;

pub use generator::VertexAiGenerator;
