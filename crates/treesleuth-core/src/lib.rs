/// TreeSleuth Core — scanning, aggregation, and data model.
///
/// This crate contains all business logic with zero CLI dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, GUI).
///
/// # Modules
///
/// - [`model`] — Flat, streamed node records and display helpers.
/// - [`scanner`] — Lazy depth-first traversal plus background scanning
///   with progress reporting.
/// - [`risk`] — Growable risk-score accumulator.
/// - [`pool`] — Named scratch-buffer pool with a soft size budget.
/// - [`probe`] — Batched parallel existence checks.
/// - [`adapters`] — Checksum and compression helpers for file content.
pub mod adapters;
pub mod model;
pub mod pool;
pub mod probe;
pub mod risk;
pub mod scanner;
