//! Parser for the flat-file records returned by `get`.
//!
//! A record is a sequence of `KEY value` lines; lines starting with a space
//! continue the most recent key:
//!
//! ```text
//! ENTRY       map00010                    Pathway
//! NAME        Glycolysis / Gluconeogenesis
//! REFERENCE   PMID:12345
//!   AUTHORS   Doe J
//!   TITLE     A title
//!   JOURNAL   A journal
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const REFERENCE: &str = "REFERENCE";
const PMID_PREFIX: &str = "PMID:";

/// A bibliographic entry from a record's REFERENCE section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Reference {
    pub authors: String,
    pub title: String,
    pub journal: String,
}

/// A parsed flat-file record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Values that appeared before the first key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unkeyed: Vec<String>,

    /// Sections in the order they first appeared.
    pub sections: IndexMap<String, Vec<String>>,

    /// Parsed REFERENCE section, keyed by PMID. `None` when reference
    /// parsing was not requested, in which case REFERENCE stays in
    /// `sections`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<IndexMap<String, Reference>>,
}

impl FlatRecord {
    /// All values of a section.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.sections.get(key).map(Vec::as_slice)
    }

    /// First value of a section, e.g. the ENTRY line.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)?.first().map(String::as_str)
    }

    /// Section keys in encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    pub fn references(&self) -> Option<&IndexMap<String, Reference>> {
        self.references.as_ref()
    }
}

/// Parse a `get` response.
///
/// Each line is split once on its first space; lines without a space carry
/// nothing and are skipped. A non-blank left part opens a new section, and
/// the trimmed right part is always appended to the current section. With
/// `parse_reference`, the REFERENCE section is regrouped into
/// [`Reference`]s keyed by PMID.
pub fn parse_record(text: &str, parse_reference: bool) -> FlatRecord {
    let mut record = FlatRecord::default();
    let mut current: Option<String> = None;

    for line in text.split('\n') {
        let Some((key, value)) = line.split_once(' ') else {
            continue;
        };
        let key = key.trim();
        if !key.is_empty() {
            current = Some(key.to_string());
        }
        let value = value.trim().to_string();
        match &current {
            Some(key) => record.sections.entry(key.clone()).or_default().push(value),
            None => record.unkeyed.push(value),
        }
    }

    if parse_reference {
        let raw = record.sections.shift_remove(REFERENCE).unwrap_or_default();
        record.references = Some(parse_references(&raw));
    }

    tracing::trace!(
        sections = record.sections.len(),
        unkeyed = record.unkeyed.len(),
        "parsed flat record"
    );
    record
}

/// Regroup REFERENCE values in blocks of four (PMID, authors, title,
/// journal). Blocks not led by a PMID and any incomplete trailing block are
/// dropped.
fn parse_references(values: &[String]) -> IndexMap<String, Reference> {
    values
        .chunks_exact(4)
        .filter(|chunk| chunk[0].starts_with(PMID_PREFIX))
        .map(|chunk| {
            (
                chunk[0].clone(),
                Reference {
                    authors: chunk[1].clone(),
                    title: chunk[2].clone(),
                    journal: chunk[3].clone(),
                },
            )
        })
        .collect()
}
