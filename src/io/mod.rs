/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG mask import and render grid export
pub mod image;
/// Terminal progress display
pub mod progress;
/// JSON rule table persistence
pub mod rule_table;
/// Diagnostic overlay rendering
pub mod visualization;
