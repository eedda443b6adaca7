//! Run configuration threaded through the pipeline.
//!
//! Everything the stages need (sender identity, shared secret, form URL,
//! live-send switch) travels in one explicit value, so no stage reads
//! ambient state and each can be tested with a fixture config.

/// Identity used for the From header, the message signature, and SMTP
/// authentication.
#[derive(Debug, Clone)]
pub struct SenderIdentity {
    /// Display name, also used to sign the message body.
    pub name: String,
    pub email: String,
    /// SMTP credential (e.g. a Gmail app password). Ignored in dry runs.
    pub password: String,
}

impl SenderIdentity {
    /// RFC 5322 mailbox form: `Name <email>`.
    pub fn mailbox(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// One run's worth of configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Conference tag, as in `asplos21`; selects the `<tag>-*.csv` exports.
    pub conference: String,
    /// Shared secret mixed into every UID derivation.
    pub hashcode: String,
    pub sender: SenderIdentity,
    /// External verification form the message points reviewers at.
    pub form_url: String,
    /// Unless set, nothing is transmitted anywhere in the run.
    pub really_send: bool,
}
