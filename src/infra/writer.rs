// ============================================================
// Layer 6 — Document Writer
// ============================================================
// Serialises rewritten text units into the output document.
// The format follows the output path's extension:
//
//   .docx  — one paragraph per unit, built with docx-rs; line
//            breaks inside a unit become text-wrapping breaks
//   other  — UTF-8 text, units joined by form feed so the page
//            structure survives a round trip through the loader

use anyhow::{Context, Result};
use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::{fs, path::PathBuf};

use crate::data::loader::PAGE_BREAK;
use crate::domain::document::TextUnit;
use crate::domain::traits::DocumentSink;

pub struct DocumentWriter {
    path: PathBuf,
}

impl DocumentWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_docx(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("docx"))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }
        Ok(())
    }

    fn write_text(&self, units: &[TextUnit]) -> Result<()> {
        let separator = PAGE_BREAK.to_string();
        let body      = units
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join(separator.as_str());

        fs::write(&self.path, body)
            .with_context(|| format!("Cannot write '{}'", self.path.display()))
    }

    fn write_docx(&self, units: &[TextUnit]) -> Result<()> {
        let mut docx = Docx::new();

        for unit in units {
            let mut run = Run::new();
            for (i, line) in unit.text.lines().enumerate() {
                if i > 0 {
                    run = run.add_break(BreakType::TextWrapping);
                }
                run = run.add_text(line);
            }
            docx = docx.add_paragraph(Paragraph::new().add_run(run));
        }

        let file = fs::File::create(&self.path)
            .with_context(|| format!("Cannot create '{}'", self.path.display()))?;
        docx.build()
            .pack(file)
            .with_context(|| format!("Cannot write .docx to '{}'", self.path.display()))?;
        Ok(())
    }
}

impl DocumentSink for DocumentWriter {
    fn write_units(&self, units: &[TextUnit]) -> Result<()> {
        self.ensure_parent_dir()?;

        if self.is_docx() {
            self.write_docx(units)?;
        } else {
            self.write_text(units)?;
        }

        tracing::info!("Wrote {} units to '{}'", units.len(), self.path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::DocumentLoader;
    use crate::domain::traits::DocumentSource;

    #[test]
    fn test_text_output_reloads_as_same_pages() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("balanced.txt");

        let units = vec![
            TextUnit::new(1, "in.txt", "Alice met Bob."),
            TextUnit::new(2, "in.txt", "Carol left."),
        ];
        DocumentWriter::new(&path).write_units(&units).unwrap();

        let reloaded = DocumentLoader::new(&path).load_units().unwrap();
        let texts: Vec<String> = reloaded.into_iter().map(|u| u.unwrap().text).collect();
        assert_eq!(texts, vec!["Alice met Bob.", "Carol left."]);
    }

    #[test]
    fn test_docx_output_reloads_with_line_breaks() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("balanced.docx");

        let units = vec![
            TextUnit::new(1, "in.docx", "Alice met Bob.\nThen Carol."),
            TextUnit::new(2, "in.docx", "Dave left."),
        ];
        DocumentWriter::new(&path).write_units(&units).unwrap();

        let reloaded = DocumentLoader::new(&path).load_units().unwrap();
        let texts: Vec<String> = reloaded.into_iter().map(|u| u.unwrap().text).collect();
        assert_eq!(texts, vec!["Alice met Bob.\nThen Carol.", "Dave left."]);
    }
}
