pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{CredentialSource, CredentialStatus, ResolvedCredential};
pub use ports::CredentialService;
