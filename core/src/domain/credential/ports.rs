use crate::domain::{
    common::entities::app_errors::CoreError,
    credential::entities::{CredentialStatus, ResolvedCredential},
};

pub trait CredentialService: Send + Sync {
    /// Injected key first, then the persisted one. Blank values count as absent.
    fn resolve_credential(&self) -> Option<ResolvedCredential>;

    /// Persists a trimmed key. Storage failures are logged, not returned.
    fn store_credential(&self, credential: &str) -> Result<(), CoreError>;

    fn clear_credential(&self) -> Result<(), CoreError>;

    fn credential_status(&self) -> CredentialStatus;
}
