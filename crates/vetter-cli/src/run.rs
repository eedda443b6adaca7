//! The batch pipeline: load exports, filter, obscure, compose, deliver.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;
use vetter_core::{RunConfig, UidGenerator, VettingPolicy, group_conflicts};
use vetter_export::{AuditWriter, read_authors, read_conflicts, read_roster};
use vetter_mail::{Delivery, Outbound, compose};

pub struct RunStats {
    pub reviewers: usize,
    pub conflicts: usize,
    pub sent: usize,
}

/// Execute one full run against the `<conference>-*.csv` exports in
/// `data_dir`, writing the audit mapping to `uidmap`.
///
/// Strictly sequential: reviewers are visited in ascending email order, and
/// the first unrecoverable error (bad export, hash failure, transmission
/// failure) aborts the remaining recipients.
pub fn run(config: &RunConfig, data_dir: &Path, uidmap: &Path) -> anyhow::Result<RunStats> {
    let roster =
        read_roster(&export_path(config, data_dir, "pcinfo")).context("reading PC info export")?;
    let authors = read_authors(&export_path(config, data_dir, "authors"))
        .context("reading authors export")?;
    let declared = read_conflicts(&export_path(config, data_dir, "pcconflicts"))
        .context("reading PC conflicts export")?;

    let policy = VettingPolicy::default();
    let groups = group_conflicts(&policy, &declared, &authors);
    info!(reviewers = groups.len(), "conflicts grouped for vetting");

    // Built once: a dry run can never transmit, whatever happens below.
    let outbound = if config.really_send {
        Outbound::smtp(&config.sender).context("setting up SMTP submission")?
    } else {
        Outbound::dry_run()
    };

    let generator = UidGenerator::new(config.hashcode.clone());
    let mut audit = AuditWriter::create(uidmap).context("creating audit mapping")?;

    let mut stats = RunStats {
        reviewers: 0,
        conflicts: 0,
        sent: 0,
    };
    for (reviewer, records) in &groups {
        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            let uid = generator.derive(reviewer, &record.paper)?;
            // The audit row must be on disk before the message can leave.
            audit.record(reviewer, &record.paper, &uid)?;
            lines.push((record.clone(), uid));
        }

        let display_name = roster.get(&reviewer.to_lowercase()).map(String::as_str);
        let mail = compose(
            reviewer,
            display_name,
            &config.sender.name,
            &config.form_url,
            &lines,
        );
        let delivery = outbound
            .deliver(&mail)
            .with_context(|| format!("delivering to {reviewer}"))?;

        if delivery == Delivery::Sent {
            stats.sent += 1;
        }
        stats.reviewers += 1;
        stats.conflicts += lines.len();
    }
    Ok(stats)
}

fn export_path(config: &RunConfig, data_dir: &Path, kind: &str) -> PathBuf {
    data_dir.join(format!("{}-{}.csv", config.conference, kind))
}
