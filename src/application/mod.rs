// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to process a whole document.
//
// Rules for this layer:
//   - No balancing math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct CSV / .docx parsing (that's Layers 4 and 6)
//   - Only workflow coordination and per-unit error policy

// Per-unit pipeline over a document and the RunReport it builds
pub mod aggregator;

// The full run: lexicon → units → aggregate → outputs
pub mod balance_use_case;
