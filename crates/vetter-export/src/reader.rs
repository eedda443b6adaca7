//! Readers for the three HotCRP CSV exports.
//!
//! Every reader is strict: a missing file or a row missing a required
//! column fails the whole run before any output is produced. Extra columns
//! in an export are ignored.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use vetter_core::{Author, DeclaredConflict};

use crate::error::ExportError;

#[derive(Debug, Deserialize)]
struct RosterRow {
    email: String,
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct AuthorRow {
    paper: String,
    first: String,
    last: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ConflictRow {
    email: String,
    paper: String,
    conflicttype: String,
}

fn open(path: &Path) -> Result<csv::Reader<File>, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

/// Reviewer roster from the PC-info export: lowercase email → display name.
///
/// Keys are lowercased here and at lookup; a reviewer exported under a
/// different address simply misses, and callers fall back to the raw email.
pub fn read_roster(path: &Path) -> Result<HashMap<String, String>, ExportError> {
    let mut reader = open(path)?;
    let mut roster = HashMap::new();
    for result in reader.deserialize() {
        let row: RosterRow = result?;
        roster.insert(
            row.email.to_lowercase(),
            format!("{} {}", row.first, row.last),
        );
    }
    info!(reviewers = roster.len(), path = %path.display(), "loaded reviewer roster");
    Ok(roster)
}

/// Paper id → ordered, duplicate-free author list, in export order.
pub fn read_authors(path: &Path) -> Result<HashMap<String, Vec<Author>>, ExportError> {
    let mut reader = open(path)?;
    let mut authors: HashMap<String, Vec<Author>> = HashMap::new();
    for result in reader.deserialize() {
        let row: AuthorRow = result?;
        let author = Author {
            name: format!("{} {}", row.first, row.last),
            email: row.email,
        };
        let entry = authors.entry(row.paper).or_default();
        // Repeated rows (resubmitted author lists) collapse to one entry.
        if !entry.contains(&author) {
            entry.push(author);
        }
    }
    info!(papers = authors.len(), path = %path.display(), "loaded author lists");
    Ok(authors)
}

/// Declared conflicts, in export order.
pub fn read_conflicts(path: &Path) -> Result<Vec<DeclaredConflict>, ExportError> {
    let mut reader = open(path)?;
    let mut declared = Vec::new();
    for result in reader.deserialize() {
        let row: ConflictRow = result?;
        declared.push(DeclaredConflict {
            reviewer: row.email,
            paper: row.paper,
            conflict_type: row.conflicttype,
        });
    }
    info!(conflicts = declared.len(), path = %path.display(), "loaded declared conflicts");
    Ok(declared)
}
