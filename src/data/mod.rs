// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw inputs and counted mentions:
//
//   names.csv              document (.docx / .txt)
//       │                         │
//       ▼                         ▼
//   LexiconLoader          DocumentLoader   → text units
//       │                         │
//       └──────────┬──────────────┘
//                  ▼
//             Tokenizer             → word tokens with spans
//                  │
//                  ▼
//          NameCandidatePolicy      → title-case filter
//                  │
//                  ▼
//            NameExtractor          → name mentions
//                  │
//                  ▼
//                Tally              → (male, female)
//
// Each module does one step and is tested on its own.

/// Reads the reference CSV into a Lexicon
pub mod lexicon_loader;

/// Splits .docx / text documents into text units
pub mod loader;

/// Word tokenizer with byte spans
pub mod tokenizer;

/// Title-case / capitalised / stoplist name heuristics
pub mod policy;

/// Finds lexicon names in a text unit
pub mod extractor;

/// Counts mentions per gender
pub mod tally;
