// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Splits a source document into text units. Two formats:
//
//   .docx  — parsed with docx-rs. Each paragraph is one unit.
//            Paragraph → Run → Text is the path through the tree;
//            runs are concatenated with no separator because they
//            are pieces of the same sentence; a line break inside
//            a run becomes '\n', a tab becomes '\t'.
//
//   other  — read as UTF-8 text and split into pages on form
//            feed (\x0c), the page separator text extractors such
//            as pdftotext emit.
//
// A unit with no extractable text becomes an ExtractionFailure:
// the Aggregator logs it and carries on with the next unit.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use docx_rs::read_docx;

use crate::domain::document::{ExtractionFailure, TextUnit, UnitExtraction};
use crate::domain::traits::DocumentSource;

/// Page separator in plain-text input and output
pub const PAGE_BREAK: char = '\u{000C}';

pub struct DocumentLoader {
    path: PathBuf,
}

impl DocumentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn source_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

impl DocumentSource for DocumentLoader {
    fn load_units(&self) -> Result<Vec<UnitExtraction>> {
        let source = self.source_name();
        let units  = if is_docx(&self.path) {
            load_docx_units(&self.path, &source)?
        } else {
            let text = fs::read_to_string(&self.path)
                .with_context(|| format!("Cannot read '{}'", self.path.display()))?;
            split_pages(&text, &source)
        };

        tracing::info!("Loaded {} units from '{}'", units.len(), source);
        Ok(units)
    }
}

fn is_docx(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("docx"))
}

/// Split plain text into pages on form feed.
/// A trailing form feed does not create an extra empty page.
pub fn split_pages(text: &str, source: &str) -> Vec<UnitExtraction> {
    let mut pages: Vec<&str> = text.split(PAGE_BREAK).collect();
    if pages.len() > 1 && pages.last().map_or(false, |p| p.trim().is_empty()) {
        pages.pop();
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| unit_or_failure(i + 1, source, page.to_string()))
        .collect()
}

fn unit_or_failure(index: usize, source: &str, text: String) -> UnitExtraction {
    if text.trim().is_empty() {
        Err(ExtractionFailure {
            index,
            source: source.to_string(),
            reason: "no extractable text".to_string(),
        })
    } else {
        Ok(TextUnit::new(index, source, text))
    }
}

/// Parse a .docx file into one unit per paragraph.
/// Paragraphs without any runs (pure spacing) are dropped outright;
/// paragraphs whose runs carry no text (images, fields) are failures.
fn load_docx_units(path: &Path, source: &str) -> Result<Vec<UnitExtraction>> {
    // A .docx file is a ZIP archive of XML parts
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;

    let docx = read_docx(&bytes)
        .map_err(|e| anyhow::anyhow!("docx-rs parse error in '{}': {:?}", path.display(), e))?;

    let mut units = Vec::new();

    for child in &docx.document.children {
        use docx_rs::DocumentChild;

        // Tables, section properties, etc. are not prose
        if let DocumentChild::Paragraph(para) = child {
            let has_runs = para
                .children
                .iter()
                .any(|c| matches!(c, docx_rs::ParagraphChild::Run(_)));
            if !has_runs {
                continue;
            }
            let index = units.len() + 1;
            units.push(unit_or_failure(index, source, extract_paragraph_text(para)));
        }
    }

    Ok(units)
}

/// Concatenate the text of every run in a paragraph, keeping
/// line breaks so a paragraph written by the DocumentWriter reads
/// back with the same lines
fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut out = String::new();

    for child in &para.children {
        use docx_rs::ParagraphChild;

        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                use docx_rs::RunChild;

                match rc {
                    RunChild::Text(t) => out.push_str(&t.text),
                    RunChild::Tab(_)  => out.push('\t'),
                    RunChild::Break(_) | RunChild::CarriageReturn(_) => out.push('\n'),
                    _ => {}
                }
            }
        }
    }

    out
}
