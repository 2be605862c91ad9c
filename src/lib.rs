//! Moodify Server Library
//!
//! Song catalog, emotion rules, text classifier and the HTTP server
//! composing them. The binaries and the end-to-end tests build on these.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod mood;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Catalog};
pub use classifier::{load_classifier, EmotionClassifier, TextEmotionClassifier};
pub use server::{run_server, RequestsLoggingLevel};
