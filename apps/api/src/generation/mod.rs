// Content generation: prompt building, the generate action, and the
// gradual reveal of its output.
// All endpoint calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod reveal;
