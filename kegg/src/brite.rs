//! Parser for BRITE hierarchies (htext).
//!
//! Only the three-level form is understood: `A` lines open a top-level
//! group, `B` lines a subgroup, and `C` lines are `identifier description`
//! leaves of the current subgroup.

use crate::{Error, Result};
use indexmap::IndexMap;

/// Leaves of a subgroup: identifier to description.
pub type BriteLeaves = IndexMap<String, String>;

/// Subgroups of a top-level group.
pub type BriteBranch = IndexMap<String, BriteLeaves>;

/// A parsed three-level BRITE hierarchy.
pub type BriteTree = IndexMap<String, BriteBranch>;

/// Parse an `A`/`B`/`C` tagged hierarchy.
///
/// Blank lines and htext markup (`#`, `!` and `+` lines) are skipped. A
/// level that appears before its parent, or any other tag, is an error.
pub fn parse_brite(text: &str) -> Result<BriteTree> {
    let mut tree = BriteTree::new();
    let mut group: Option<String> = None;
    let mut subgroup: Option<String> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let mut chars = line.chars();
        let Some(tag) = chars.next() else {
            continue;
        };
        let payload = chars.as_str().trim();

        match tag {
            'A' => {
                tree.insert(payload.to_string(), BriteBranch::new());
                group = Some(payload.to_string());
                subgroup = None;
            }
            'B' => {
                let branch = match &group {
                    Some(group) => tree.get_mut(group),
                    None => None,
                }
                .ok_or_else(|| malformed(line_no, "B level before any A level"))?;
                branch.insert(payload.to_string(), BriteLeaves::new());
                subgroup = Some(payload.to_string());
            }
            'C' => {
                let leaves = match (&group, &subgroup) {
                    (Some(group), Some(subgroup)) => tree
                        .get_mut(group)
                        .and_then(|branch| branch.get_mut(subgroup)),
                    _ => None,
                }
                .ok_or_else(|| malformed(line_no, "C level before any B level"))?;
                let (identifier, description) = payload.split_once(' ').unwrap_or((payload, ""));
                leaves.insert(identifier.to_string(), description.trim().to_string());
            }
            '#' | '!' | '+' => {}
            c if c.is_whitespace() && payload.is_empty() => {}
            other => {
                return Err(malformed(
                    line_no,
                    &format!("unsupported level tag {other:?}"),
                ));
            }
        }
    }

    tracing::trace!(groups = tree.len(), "parsed BRITE hierarchy");
    Ok(tree)
}

fn malformed(line: usize, reason: &str) -> Error {
    Error::MalformedHierarchy {
        line,
        reason: reason.to_string(),
    }
}
