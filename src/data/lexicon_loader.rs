// ============================================================
// Layer 4 — Lexicon Loader
// ============================================================
// Reads the reference CSV of names and genders into a Lexicon.
//
// Column resolution is header driven:
//   - the name column is the FIRST header from an ordered list
//     of accepted names that is present in the file
//   - same for the gender column
//   - either one missing → ConfigurationError, before any
//     document is touched
//
// Defaults follow the usual spellings found in public name
// datasets:
//   name:   Name, name, firstName, firstname
//   gender: Gender, gender, sex
//
// Rows with an empty name or gender cell are skipped; rows whose
// label is neither male nor female are kept out of matching by
// Lexicon::from_entries.

use std::{fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::domain::error::{BalanceError, Result};
use crate::domain::lexicon::Lexicon;

/// Ordered lists of header names accepted for each column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconSchema {
    pub name_headers:   Vec<String>,
    pub gender_headers: Vec<String>,
}

impl Default for LexiconSchema {
    fn default() -> Self {
        Self {
            name_headers:   ["Name", "name", "firstName", "firstname"]
                .into_iter()
                .map(String::from)
                .collect(),
            gender_headers: ["Gender", "gender", "sex"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl LexiconSchema {
    /// Index of the first accepted header present in `headers`
    fn resolve(accepted: &[String], headers: &csv::StringRecord) -> Option<usize> {
        accepted
            .iter()
            .find_map(|want| headers.iter().position(|h| h == want.as_str()))
    }
}

pub struct LexiconLoader {
    schema: LexiconSchema,
}

impl LexiconLoader {
    pub fn new(schema: LexiconSchema) -> Self {
        Self { schema }
    }

    /// Load a lexicon from a CSV file on disk
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Lexicon> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            BalanceError::configuration(format!(
                "Cannot open reference CSV '{}': {}",
                path.display(),
                e
            ))
        })?;
        let lexicon = self.load_reader(file)?;

        tracing::info!(
            "Loaded lexicon from '{}': {} names ({} excluded by label)",
            path.display(),
            lexicon.len(),
            lexicon.excluded()
        );
        if lexicon.is_empty() {
            tracing::warn!("Lexicon '{}' has no male or female names; nothing will match", path.display());
        }
        Ok(lexicon)
    }

    /// Load a lexicon from any CSV byte stream with a header row
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Lexicon> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();

        let name_idx   = LexiconSchema::resolve(&self.schema.name_headers, &headers);
        let gender_idx = LexiconSchema::resolve(&self.schema.gender_headers, &headers);

        let (name_idx, gender_idx) = match (name_idx, gender_idx) {
            (Some(n), Some(g)) => (n, g),
            _ => {
                return Err(BalanceError::configuration(format!(
                    "CSV must contain a name column (one of {:?}) and a gender column (one of {:?}); found {:?}",
                    self.schema.name_headers,
                    self.schema.gender_headers,
                    headers.iter().collect::<Vec<_>>()
                )))
            }
        };

        let mut rows    = Vec::new();
        let mut skipped = 0usize;

        for record in rdr.records() {
            let record = record?;
            match (record.get(name_idx), record.get(gender_idx)) {
                (Some(name), Some(gender)) if !name.is_empty() && !gender.is_empty() => {
                    rows.push((name.to_string(), gender.to_string()));
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} CSV rows with an empty name or gender", skipped);
        }

        Ok(Lexicon::from_entries(rows))
    }
}

impl Default for LexiconLoader {
    fn default() -> Self {
        Self::new(LexiconSchema::default())
    }
}
