//! Parsers for KEGG's tab-delimited responses (`list`, `find`, `conv`, `link`).

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One tab-split line of a tabular response.
pub type Row = Vec<String>;

/// Ordered `entry -> description` mapping returned by `list` and `find`.
pub type Listing = IndexMap<String, String>;

/// Split a tabular response into rows of trimmed fields.
///
/// Lines whose first field is blank are dropped, which covers empty lines.
pub fn split_lines(text: &str) -> Vec<Row> {
    text.lines()
        .map(|line| line.split('\t').collect::<Vec<_>>())
        .filter(|fields| fields.first().is_some_and(|first| !first.trim().is_empty()))
        .map(|fields| fields.into_iter().map(|f| f.trim().to_string()).collect())
        .collect()
}

/// One direction of a relation table.
///
/// Reads never create entries: looking up an unknown entry yields an empty
/// slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationMap {
    entries: IndexMap<String, Vec<String>>,
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries related to `key`, in the order they were read.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, key: &str, value: &str) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
}

impl<'a> IntoIterator for &'a RelationMap {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn as_pair(row: &[String]) -> Result<(&str, &str)> {
    match row {
        [first, second] => Ok((first.as_str(), second.as_str())),
        _ => Err(Error::MalformedRelation {
            row: format!("{row:?}"),
        }),
    }
}

/// Build the direct and inverse relation tables from two-field rows.
///
/// For every row `(a, b)`, `b` is appended to `direct[a]` and `a` to
/// `inverse[b]`. Repeated rows repeat their entries. Any row that does not
/// have exactly two fields aborts the build.
pub fn build_relations<R: AsRef<[String]>>(rows: &[R]) -> Result<(RelationMap, RelationMap)> {
    let mut direct = RelationMap::new();
    let mut inverse = RelationMap::new();
    for row in rows {
        let (first, second) = as_pair(row.as_ref())?;
        direct.push(first, second);
        inverse.push(second, first);
    }
    tracing::trace!(
        direct = direct.len(),
        inverse = inverse.len(),
        "built relation tables"
    );
    Ok((direct, inverse))
}

/// Build an `entry -> description` listing from two-field rows.
///
/// A repeated entry keeps its first position and takes the last description.
pub fn build_listing<R: AsRef<[String]>>(rows: &[R]) -> Result<Listing> {
    let mut listing = Listing::with_capacity(rows.len());
    for row in rows {
        let (entry, description) = as_pair(row.as_ref())?;
        listing.insert(entry.to_string(), description.to_string());
    }
    Ok(listing)
}
