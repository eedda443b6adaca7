//! Which declared conflicts warrant human vetting.
//!
//! Two rules, matching the HotCRP export semantics:
//!
//! - only a small set of conflict types is worth reviewer attention; plain
//!   co-authorship, PC-role conflicts and the like are dropped outright;
//! - a reviewer who shares an email domain with any author on the paper is
//!   treated as an already-explained institutional conflict and suppressed,
//!   unless the domain is public webmail, where a domain collision means
//!   nothing and the conflict is always kept.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::conflict::{Author, ConflictGroup, ConflictRecord, DeclaredConflict};

/// Conflict types that trigger vetting; every other type is dropped.
const VETTED_TYPES: &[&str] = &["Pinned conflict", "Personal", "Other"];

/// Public webmail domains where institutional matching is meaningless.
const WEBMAIL_DOMAINS: &[&str] = &["outlook.com", "yahoo.com", "gmail.com"];

/// Filtering policy. The type set and domain list are plain data so tests
/// can substitute deterministic fixtures for the real lists.
#[derive(Debug, Clone)]
pub struct VettingPolicy {
    vetted_types: Vec<String>,
    webmail_domains: Vec<String>,
}

impl Default for VettingPolicy {
    fn default() -> Self {
        Self::new(
            VETTED_TYPES.iter().map(|s| s.to_string()),
            WEBMAIL_DOMAINS.iter().map(|s| s.to_string()),
        )
    }
}

impl VettingPolicy {
    pub fn new(
        vetted_types: impl IntoIterator<Item = String>,
        webmail_domains: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            vetted_types: vetted_types.into_iter().collect(),
            webmail_domains: webmail_domains.into_iter().collect(),
        }
    }

    /// Decide whether one declared conflict needs human vetting.
    pub fn keep(&self, conflict: &DeclaredConflict, authors: &[Author]) -> bool {
        if !self.vetted_types.iter().any(|t| t == &conflict.conflict_type) {
            return false;
        }
        // No extractable reviewer domain: nothing to match against, keep.
        let Some(reviewer_domain) = email_domain(&conflict.reviewer) else {
            return true;
        };
        if self.webmail_domains.iter().any(|d| d == reviewer_domain) {
            return true;
        }
        let institutional = authors
            .iter()
            .any(|author| author.domain() == Some(reviewer_domain));
        if institutional {
            debug!(
                reviewer = %conflict.reviewer,
                paper = %conflict.paper,
                "suppressing domain-matched conflict"
            );
        }
        !institutional
    }
}

/// Filter every declared conflict and group the survivors per reviewer,
/// snapshotting each paper's author list into the surviving record.
///
/// Each reviewer's list is shuffled afterwards so the rendered line order
/// carries no information about the export order. The shuffle draws from a
/// thread-local RNG and is not reproducible across runs.
pub fn group_conflicts(
    policy: &VettingPolicy,
    declared: &[DeclaredConflict],
    authors_by_paper: &HashMap<String, Vec<Author>>,
) -> ConflictGroup {
    let mut groups = ConflictGroup::new();
    for conflict in declared {
        let authors = authors_by_paper
            .get(&conflict.paper)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if !policy.keep(conflict, authors) {
            continue;
        }
        groups
            .entry(conflict.reviewer.clone())
            .or_default()
            .push(ConflictRecord {
                paper: conflict.paper.clone(),
                conflict_type: conflict.conflict_type.clone(),
                authors: authors.to_vec(),
            });
    }

    let mut rng = rand::thread_rng();
    for records in groups.values_mut() {
        records.shuffle(&mut rng);
    }
    groups
}

/// Domain part of an email address, or `None` when there is no usable `@`.
pub fn email_domain(email: &str) -> Option<&str> {
    let (_, domain) = email.split_once('@')?;
    (!domain.is_empty()).then_some(domain)
}
