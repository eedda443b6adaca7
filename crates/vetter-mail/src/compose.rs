//! Plaintext message composition for vetting requests.

use vetter_core::{Author, ConflictRecord};

/// Human-facing relabel of the auto-detected conflict type. Display-only:
/// filtering and the audit mapping always carry the export's string.
fn display_type(conflict_type: &str) -> &str {
    if conflict_type == "Pinned conflict" {
        "Auto-detected conflict (probably institutional)"
    } else {
        conflict_type
    }
}

/// A composed message, ready for the outbound channel.
#[derive(Debug, Clone)]
pub struct ComposedMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Compose the vetting request for one reviewer.
///
/// `lines` pairs each surviving conflict with its already-recorded token,
/// in the (shuffled) order the records should be rendered.
pub fn compose(
    recipient: &str,
    display_name: Option<&str>,
    sender_name: &str,
    form_url: &str,
    lines: &[(ConflictRecord, String)],
) -> ComposedMail {
    let subject = format!("Conflicts to vet: {}", display_name.unwrap_or(recipient));

    let mut body = String::from("Hi,\n\n");
    body.push_str(
        "This mail contains a list of all papers for which you have been marked\n\
         as a conflict. The actual paper numbers have been encrypted.\n\n\
         Please check each author list to verify that at least one of the authors for\n\
         each paper looks like a legitimate conflict. IF NOT, please enter each one on this form:\n\n  ",
    );
    body.push_str(form_url);
    body.push_str(".\n\n");

    for (index, (record, uid)) in lines.iter().enumerate() {
        let authors = record
            .authors
            .iter()
            .map(Author::descriptor)
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "{}. (UID = {}) - {} : {}\n",
            index + 1,
            uid,
            display_type(&record.conflict_type),
            authors
        ));
    }

    body.push_str("\n\nThanks,\n");
    body.push_str(sender_name);
    body.push('\n');

    ComposedMail {
        recipient: recipient.to_string(),
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(paper: &str, conflict_type: &str, authors: &[(&str, &str)]) -> ConflictRecord {
        ConflictRecord {
            paper: paper.into(),
            conflict_type: conflict_type.into(),
            authors: authors
                .iter()
                .map(|(name, email)| Author {
                    name: (*name).into(),
                    email: (*email).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn subject_uses_display_name_when_known() {
        let mail = compose(
            "a@x.example",
            Some("Ada Lovelace"),
            "Chair",
            "https://forms.example/f",
            &[],
        );
        assert_eq!(mail.subject, "Conflicts to vet: Ada Lovelace");
    }

    #[test]
    fn subject_falls_back_to_raw_email() {
        let mail = compose("a@x.example", None, "Chair", "https://forms.example/f", &[]);
        assert_eq!(mail.subject, "Conflicts to vet: a@x.example");
    }

    #[test]
    fn lines_are_numbered_from_one() {
        let lines = vec![
            (record("12", "Personal", &[("Bea Smith", "bea@univ.edu")]), "tok-one".to_string()),
            (record("7", "Other", &[("Cal Jones", "cal@lab.example")]), "tok-two".to_string()),
        ];
        let mail = compose("a@x.example", None, "Chair", "https://forms.example/f", &lines);
        assert!(mail.body.contains("1. (UID = tok-one) - Personal : Bea Smith <bea@univ.edu>\n"));
        assert!(mail.body.contains("2. (UID = tok-two) - Other : Cal Jones <cal@lab.example>\n"));
    }

    #[test]
    fn pinned_conflict_is_relabelled_for_display() {
        let lines = vec![(
            record("3", "Pinned conflict", &[("Bea Smith", "bea@univ.edu")]),
            "tok".to_string(),
        )];
        let mail = compose("a@x.example", None, "Chair", "https://forms.example/f", &lines);
        assert!(mail.body.contains("Auto-detected conflict (probably institutional)"));
        assert!(!mail.body.contains("Pinned conflict"));
    }

    #[test]
    fn authors_are_comma_joined() {
        let lines = vec![(
            record(
                "3",
                "Personal",
                &[("Bea Smith", "bea@univ.edu"), ("Cal Jones", "cal@lab.example")],
            ),
            "tok".to_string(),
        )];
        let mail = compose("a@x.example", None, "Chair", "https://forms.example/f", &lines);
        assert!(mail.body.contains("Bea Smith <bea@univ.edu>, Cal Jones <cal@lab.example>"));
    }

    #[test]
    fn body_references_the_form_and_signs_with_sender_name() {
        let mail = compose("a@x.example", None, "Pat Chair", "https://forms.example/f", &[]);
        assert!(mail.body.contains("  https://forms.example/f.\n"));
        assert!(mail.body.ends_with("Thanks,\nPat Chair\n"));
    }
}
