//! `vetter`: mails reviewers their declared conflicts for legitimacy checks.

mod run;

use std::path::PathBuf;

use clap::Parser;
use vetter_core::{RunConfig, SenderIdentity};

/// Reconcile declared reviewer-author conflicts: read the HotCRP exports
/// for a conference, obscure the paper numbers, and mail each reviewer the
/// conflicts they should double-check for legitimacy.
#[derive(Debug, Parser)]
#[command(name = "vetter", version)]
struct Args {
    /// Conference tag, as in `asplos21`; selects the `<tag>-*.csv` exports.
    #[arg(long)]
    conference: String,

    /// Shared secret mixed into every obscured paper identifier.
    #[arg(long)]
    hashcode: String,

    /// Sender display name, used to sign the messages.
    #[arg(long = "your-name")]
    your_name: String,

    /// Sender email address.
    #[arg(long = "your-email")]
    your_email: String,

    /// SMTP credential (e.g. an app password). Only used with --really-send.
    #[arg(long = "your-password", env = "VETTER_PASSWORD", default_value = "")]
    your_password: String,

    /// Verification form reviewers should fill in for bogus conflicts.
    #[arg(long = "form-url")]
    form_url: String,

    /// Actually transmit mail. Without this flag the run is a dry run that
    /// only prints each message.
    #[arg(long = "really-send")]
    really_send: bool,

    /// Where to write the token-to-paper audit mapping.
    #[arg(long, default_value = "uidmap.csv")]
    uidmap: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = RunConfig {
        conference: args.conference,
        hashcode: args.hashcode,
        sender: SenderIdentity {
            name: args.your_name,
            email: args.your_email,
            password: args.your_password,
        },
        form_url: args.form_url,
        really_send: args.really_send,
    };

    let stats = run::run(&config, std::path::Path::new("."), &args.uidmap)?;
    tracing::info!(
        reviewers = stats.reviewers,
        conflicts = stats.conflicts,
        sent = stats.sent,
        "run complete"
    );
    Ok(())
}
