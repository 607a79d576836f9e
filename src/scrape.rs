//! Extract conjugated forms from scraped inflection tables.
//!
//! The structural rule does most of the work: header cells (`th`) carry
//! grammatical labels, data cells (`td`) carry forms. A small substring
//! blocklist catches labels that sites occasionally misplace into data
//! cells.

use crate::config::ResolveConfig;
use scraper::{Html, Selector};

/// CSS selector matching inflection tables in reference-source markup.
const INFLECTION_TABLE_SELECTOR: &str =
    r#"table.conjugation, table.inflection, table[class*="conjug"], table[data-inflection]"#;

/// Grammatical-label substrings (lowercased) that never appear inside a
/// conjugated form: Romanian mood names plus number/person markers.
const LABEL_SUBSTRINGS: &[&str] = &[
    "indicativ",
    "conjunctiv",
    "condițional",
    "imperativ",
    "infinitiv",
    "participiu",
    "gerunziu",
    "supin",
    "singular",
    "plural",
    "persoana",
];

/// Subject pronouns that may prefix a scraped form ("eu vorbesc").
const SUBJECT_PRONOUNS: &[&str] = &["eu", "tu", "el", "ea", "noi", "voi", "ei", "ele"];

/// Role of a table cell in scraped markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Carries a conjugated form.
    Data,
    /// Carries a grammatical label (mood, tense, person).
    Label,
}

/// One table cell: role plus whitespace-normalized text.
#[derive(Debug, Clone)]
pub struct ScrapedCell {
    pub kind: CellKind,
    pub text: String,
}

/// Cells of one inflection table, in document order.
#[derive(Debug, Clone, Default)]
pub struct ScrapedTable {
    pub cells: Vec<ScrapedCell>,
}

/// Parse inflection tables out of raw HTML.
///
/// `th` cells are tagged [`CellKind::Label`], `td` cells [`CellKind::Data`].
/// Cell text has internal whitespace collapsed to single spaces and outer
/// whitespace trimmed. Pages without inflection tables yield an empty vec.
pub fn parse_inflection_tables(html: &str) -> Vec<ScrapedTable> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse(INFLECTION_TABLE_SELECTOR).unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();
    for table in document.select(&table_sel) {
        let mut scraped = ScrapedTable::default();
        for cell in table.select(&cell_sel) {
            let kind = if cell.value().name() == "th" {
                CellKind::Label
            } else {
                CellKind::Data
            };
            scraped.cells.push(ScrapedCell {
                kind,
                text: collapse_whitespace(&cell.text().collect::<String>()),
            });
        }
        tables.push(scraped);
    }
    tables
}

/// Normalize scraped tables into candidate form strings.
///
/// Keeps only data cells, drops any cell whose lowercased text contains a
/// known label substring, applies the pronoun output-shape policy, and
/// returns `None` if zero cells survive ("no data" sentinel, not an error).
pub fn normalize_tables(tables: &[ScrapedTable], config: &ResolveConfig) -> Option<Vec<String>> {
    let mut forms = Vec::new();

    for table in tables {
        for cell in &table.cells {
            if cell.kind != CellKind::Data {
                continue;
            }
            if cell.text.is_empty() || is_label_text(&cell.text) {
                continue;
            }
            let text = if config.keep_pronouns {
                cell.text.clone()
            } else {
                strip_leading_pronoun(&cell.text)
            };
            if !text.is_empty() {
                forms.push(text);
            }
        }
    }

    if forms.is_empty() {
        None
    } else {
        Some(forms)
    }
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Defense in depth against misclassified label cells.
fn is_label_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    LABEL_SUBSTRINGS.iter().any(|label| lowered.contains(label))
}

/// Strip one leading subject-pronoun token, if present.
fn strip_leading_pronoun(text: &str) -> String {
    if let Some((first, rest)) = text.split_once(' ') {
        if SUBJECT_PRONOUNS.contains(&first) {
            return rest.to_string();
        }
    }
    text.to_string()
}
