//! Domain types for declared reviewer-author conflicts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One author of a submitted paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    /// Rendering form used in messages: `First Last <email>`.
    pub fn descriptor(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Domain part of the author's address, or `None` when malformed.
    ///
    /// A malformed address fails open: the author contributes no domain
    /// match, so the conflict is not suppressed on their account.
    pub fn domain(&self) -> Option<&str> {
        crate::policy::email_domain(&self.email)
    }
}

/// A raw row from the conflicts export, exactly as declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredConflict {
    /// Reviewer email as exported; never normalised, so two case variants
    /// of one address group (and are mailed) separately.
    pub reviewer: String,
    pub paper: String,
    pub conflict_type: String,
}

/// A conflict that survived vetting, with the paper's author list
/// snapshotted at filter time. Immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub paper: String,
    pub conflict_type: String,
    pub authors: Vec<Author>,
}

/// Surviving conflicts grouped per reviewer.
///
/// The map order is the recipient processing order: ascending by reviewer
/// email. Each reviewer's record list is shuffled after grouping, so the
/// line order within a message is an unconstrained permutation.
pub type ConflictGroup = BTreeMap<String, Vec<ConflictRecord>>;
