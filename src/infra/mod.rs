// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Output-side concerns that the application layer calls into
// but that are not part of the balancing logic itself:
//
//   writer.rs       — Renders rewritten units to .docx or text
//                     (implements the DocumentSink trait)
//
//   report_store.rs — Saves the RunReport plus the config that
//                     produced it as JSON
//
//   metrics.rs      — Per-unit before/after counts as CSV
//
// Swapping one of these (say, writing PDF instead of .docx)
// does not touch Layers 2–5.

/// Output document rendering
pub mod writer;

/// JSON run reports
pub mod report_store;

/// Per-unit stats CSV
pub mod metrics;
