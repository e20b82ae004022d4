//! Participant entities.

use crate::error::ReconcileError;

/// A participant we intend to register, in canonical form.
///
/// `first_name` and `last_name` are always non-empty once a record exists;
/// construction rejects rows without them. `email` is optional; its absence
/// signals guest-only intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantRecord {
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl ParticipantRecord {
    /// Build a canonical record from raw field values.
    ///
    /// Fields are trimmed; an empty or whitespace-only email becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::MalformedRecord`] if the first or last name
    /// is missing after trimming.
    pub fn from_parts(
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
    ) -> Result<Self, ReconcileError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(ReconcileError::MalformedRecord {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            });
        }

        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        Ok(Self {
            email,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    /// Whether this record carries an email address (email registration path).
    #[must_use]
    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// Display name used in operator-facing log messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A participant already present in the target event.
///
/// Read-only snapshot entry, fetched once before reconciliation begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExistingParticipant {
    pub first_name: String,
    pub last_name: String,
}

impl ExistingParticipant {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Exact, case-sensitive name match against an intended participant.
    #[must_use]
    pub fn matches(&self, record: &ParticipantRecord) -> bool {
        self.first_name == record.first_name && self.last_name == record.last_name
    }
}

/// A roster entry pushed by the remote service's registration stream.
///
/// The platform does not always capture a name at registration time, so both
/// name fields are optional here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifiedPlayer {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NotifiedPlayer {
    /// Whether the platform captured a usable name for this registration.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.first_name.as_deref().is_some_and(|n| !n.is_empty())
            && self.last_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}
