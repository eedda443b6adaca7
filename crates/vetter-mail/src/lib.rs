//! Outbound mail channel for vetting requests.
//!
//! Messages are composed as plaintext and either printed (dry run, the
//! default) or submitted over authenticated SMTP. The live/dry decision is
//! made once when the channel is built, never per message, so a dry run can
//! never partially send.

mod compose;

pub use compose::{ComposedMail, compose};

use std::thread;
use std::time::Duration;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;
use vetter_core::SenderIdentity;

/// Authenticated submission endpoint (STARTTLS on the submission port).
const SMTP_HOST: &str = "smtp.gmail.com";

/// Pause before each live submission; the receiving server throttles
/// faster senders.
const SEND_PACING: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("message build failed: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp failure: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// What happened to a composed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Dry run: the message was printed, nothing was transmitted.
    Printed,
    Sent,
}

/// The outbound channel, built once per run.
pub enum Outbound {
    /// Print every message to stdout; never open a connection.
    DryRun,
    Smtp {
        sender: Mailbox,
        transport: SmtpTransport,
    },
}

impl Outbound {
    /// Dry-run channel: surfaces each message for inspection only.
    pub fn dry_run() -> Self {
        Outbound::DryRun
    }

    /// Authenticated STARTTLS submission channel for live sending.
    ///
    /// No connection is opened here; the transport connects lazily on the
    /// first send.
    pub fn smtp(sender: &SenderIdentity) -> Result<Self, MailError> {
        let transport = SmtpTransport::starttls_relay(SMTP_HOST)?
            .credentials(Credentials::new(
                sender.email.clone(),
                sender.password.clone(),
            ))
            .build();
        Ok(Outbound::Smtp {
            sender: sender.mailbox().parse()?,
            transport,
        })
    }

    /// Deliver one composed message.
    ///
    /// Live sends are paced by a fixed delay to respect the server's rate
    /// limit; dry runs skip the delay along with the network. Any SMTP
    /// failure is returned as-is, and the caller aborts the remaining
    /// recipients rather than retrying.
    pub fn deliver(&self, mail: &ComposedMail) -> Result<Delivery, MailError> {
        match self {
            Outbound::DryRun => {
                println!("not sending mail to {}", mail.recipient);
                println!("(use --really-send to actually send mail)");
                println!("Subject: {}\n\n{}", mail.subject, mail.body);
                Ok(Delivery::Printed)
            }
            Outbound::Smtp { sender, transport } => {
                thread::sleep(SEND_PACING);
                let message = Message::builder()
                    .from(sender.clone())
                    .to(mail.recipient.parse()?)
                    .subject(mail.subject.clone())
                    .body(mail.body.clone())?;
                info!(recipient = %mail.recipient, "sending mail");
                transport.send(&message)?;
                Ok(Delivery::Sent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> SenderIdentity {
        SenderIdentity {
            name: "Pat Chair".into(),
            email: "chair@conf.example".into(),
            password: "app-password".into(),
        }
    }

    #[test]
    fn dry_run_prints_without_transmitting() {
        let outbound = Outbound::dry_run();
        let mail = ComposedMail {
            recipient: "a@x.example".into(),
            subject: "Conflicts to vet: a@x.example".into(),
            body: "Hi,\n".into(),
        };
        assert_eq!(outbound.deliver(&mail).unwrap(), Delivery::Printed);
    }

    #[test]
    fn smtp_channel_builds_without_connecting() {
        let outbound = Outbound::smtp(&sender()).unwrap();
        assert!(matches!(outbound, Outbound::Smtp { .. }));
    }

    #[test]
    fn smtp_channel_rejects_unparseable_sender() {
        let bad = SenderIdentity {
            name: "Pat <Chair".into(),
            email: "not an address".into(),
            password: String::new(),
        };
        assert!(matches!(
            Outbound::smtp(&bad),
            Err(MailError::Address(_))
        ));
    }
}
