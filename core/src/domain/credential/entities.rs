use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// Supplied at build or launch time.
    Injected,
    /// Persisted by the user in local storage.
    Stored,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Injected => f.write_str("injected"),
            CredentialSource::Stored => f.write_str("stored"),
        }
    }
}

/// A non-empty, trimmed API key and where it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    value: String,
    source: CredentialSource,
}

impl ResolvedCredential {
    /// Returns `None` for blank input.
    pub fn new(value: &str, source: CredentialSource) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            value: value.to_string(),
            source,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn is_editable(&self) -> bool {
        self.source == CredentialSource::Stored
    }

    /// Keeps the last four characters visible.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("value", &self.masked())
            .field("source", &self.source)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub source: Option<CredentialSource>,
    pub editable: bool,
    pub preview: Option<String>,
}

impl From<Option<&ResolvedCredential>> for CredentialStatus {
    fn from(credential: Option<&ResolvedCredential>) -> Self {
        match credential {
            Some(credential) => Self {
                source: Some(credential.source()),
                editable: credential.is_editable(),
                preview: Some(credential.masked()),
            },
            // Nothing injected means the user may store one.
            None => Self {
                source: None,
                editable: true,
                preview: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_never_resolve() {
        assert!(ResolvedCredential::new("", CredentialSource::Stored).is_none());
        assert!(ResolvedCredential::new(" \t\n", CredentialSource::Injected).is_none());
    }

    #[test]
    fn values_are_trimmed() {
        let credential = ResolvedCredential::new("  AIzaKey  ", CredentialSource::Stored).unwrap();
        assert_eq!(credential.value(), "AIzaKey");
    }

    #[test]
    fn masking_hides_all_but_last_four() {
        let credential =
            ResolvedCredential::new("AIzaSyExample1234", CredentialSource::Injected).unwrap();
        assert_eq!(credential.masked(), "*************1234");
        assert!(!format!("{credential:?}").contains("AIza"));

        let short = ResolvedCredential::new("abc", CredentialSource::Stored).unwrap();
        assert_eq!(short.masked(), "***");
    }

    #[test]
    fn only_stored_credentials_are_editable() {
        let stored = ResolvedCredential::new("k1", CredentialSource::Stored).unwrap();
        let injected = ResolvedCredential::new("k2", CredentialSource::Injected).unwrap();
        assert!(stored.is_editable());
        assert!(!injected.is_editable());
        assert!(!CredentialStatus::from(Some(&injected)).editable);
        assert!(CredentialStatus::from(None).editable);
    }
}
