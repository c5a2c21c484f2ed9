// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define what the
// system talks about: genders, the name lexicon, text units,
// name mentions, counts and reports.
//
// Rules for this layer:
//   - NO file I/O (the CSV and .docx readers live in Layer 4)
//   - NO randomness (the Balancer owns the RNG)
//   - Only plain data types, their invariants, and traits
//
// Everything here is cheap to construct in unit tests.

// The two gender labels and label parsing
pub mod gender;

// The case-insensitive name → gender mapping
pub mod lexicon;

// One page (or other chunk) of document text
pub mod document;

// A matched name token with its byte span
pub mod mention;

// Counts, shares and per-unit / per-run reports
pub mod report;

// Domain error kinds
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
