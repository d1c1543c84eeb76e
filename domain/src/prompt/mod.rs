//! Prompt templates for the persona fan-out

pub mod template;

pub use template::PromptTemplate;
