pub mod classify;
pub mod document;
pub mod join;
pub mod paragraph;
pub mod reflow;
pub mod ruleset;

// Re-export main types for convenient access
pub use document::Document;
pub use paragraph::{next_paragraph, Paragraphs, Span};
pub use reflow::{reflow, ReflowStats};
pub use ruleset::RuleSet;
