//! Load Credentials Use Case
//!
//! Bulk-loads a credential file into the credential store.
//!
//! The whole document is parsed before anything is stored, so a document
//! that is not a JSON array of `{username, password}` objects changes
//! nothing. Entries are then validated and upserted one at a time in file
//! order. An entry whose hash is not an Argon2 PHC string stops the load, and the
//! entries before it stay applied: there is no rollback.

use std::path::Path;
use std::sync::Arc;

use platform::password::HashedPassword;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::domain::entity::credential::{Credential, CredentialRecord};
use crate::domain::repository::CredentialRepository;
use crate::error::{GateError, GateResult};

/// Load credentials use case
pub struct LoadCredentialsUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
}

impl<C> LoadCredentialsUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>) -> Self {
        Self { credential_repo }
    }

    /// Load from an in-memory document. Returns the number of entries applied.
    pub async fn execute(&self, data: &[u8]) -> GateResult<usize> {
        let records: Vec<CredentialRecord> = serde_json::from_slice(data)?;

        let mut applied = 0;
        for (index, CredentialRecord { username, password }) in records.into_iter().enumerate() {
            let password_hash = match HashedPassword::from_phc_string(password) {
                Ok(hash) => hash,
                Err(source) => {
                    tracing::warn!(
                        index,
                        username = %username,
                        applied,
                        "Credential load stopped at invalid hash; earlier entries remain applied"
                    );
                    return Err(GateError::InvalidHashEntry {
                        index,
                        username,
                        source,
                    });
                }
            };

            self.credential_repo
                .upsert(Credential {
                    username,
                    password_hash,
                })
                .await?;
            applied += 1;
        }

        tracing::info!(applied, "Credentials loaded");

        Ok(applied)
    }

    /// Read the source to the end, then load
    pub async fn execute_reader<R>(&self, mut reader: R) -> GateResult<usize>
    where
        R: AsyncRead + Unpin,
    {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.execute(&data).await
    }

    pub async fn execute_file(&self, path: impl AsRef<Path>) -> GateResult<usize> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Reading credential file");
        let data = tokio::fs::read(path).await?;
        self.execute(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::PasswordHashError;

    use crate::infra::memory::InMemoryCredentialStore;
    use crate::tests::support::{cheap_hash, credential_json};

    fn use_case() -> (Arc<InMemoryCredentialStore>, LoadCredentialsUseCase<InMemoryCredentialStore>) {
        let store = Arc::new(InMemoryCredentialStore::new());
        (store.clone(), LoadCredentialsUseCase::new(store))
    }

    #[tokio::test]
    async fn test_load_applies_every_entry() {
        let (store, use_case) = use_case();
        let data = credential_json(&[("chris", "danny bliss"), ("alex", "hunter2")]);

        assert_eq!(use_case.execute(&data).await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_array_is_fine() {
        let (store, use_case) = use_case();

        assert_eq!(use_case.execute(b"[]").await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_document_applies_nothing() {
        let (store, use_case) = use_case();

        for bad in [
            &b"not json"[..],
            &br#"{"username": "chris", "password": "x"}"#[..],
            &br#"[{"username": "chris"}]"#[..],
            &br#"[{"username": "chris", "password": "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA"},"#[..],
        ] {
            let err = use_case.execute(bad).await.unwrap_err();
            assert!(matches!(err, GateError::Parse(_)), "{err:?}");
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_hash_keeps_earlier_entries() {
        let (store, use_case) = use_case();
        let data = serde_json::to_vec(&vec![
            CredentialRecord {
                username: "first".to_string(),
                password: cheap_hash("one"),
            },
            CredentialRecord {
                username: "broken".to_string(),
                password: "plaintext-by-mistake".to_string(),
            },
            CredentialRecord {
                username: "third".to_string(),
                password: cheap_hash("three"),
            },
        ])
        .unwrap();

        let err = use_case.execute(&data).await.unwrap_err();
        assert!(matches!(
            err,
            GateError::InvalidHashEntry { index: 1, ref username, .. } if username == "broken"
        ));

        assert!(store.find_hash("first").await.unwrap().is_some());
        assert!(store.find_hash("broken").await.unwrap().is_none());
        assert!(store.find_hash("third").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_argon2_hash_is_invalid_entry() {
        let (store, use_case) = use_case();
        let data = serde_json::to_vec(&vec![CredentialRecord {
            username: "legacy".to_string(),
            password: "$scrypt$ln=16,r=8,p=1$aM15713r3Xsvxbi31lqr1Q$nFNh2CVHVjNldFVKDHDlm4CbdRSCdEBsjjJxD+iCs5E"
                .to_string(),
        }])
        .unwrap();

        let err = use_case.execute(&data).await.unwrap_err();
        assert!(matches!(
            err,
            GateError::InvalidHashEntry {
                index: 0,
                source: PasswordHashError::UnsupportedAlgorithm(_),
                ..
            }
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_execute_reader() {
        let (store, use_case) = use_case();
        let data = credential_json(&[("chris", "danny bliss")]);

        let applied = use_case.execute_reader(&data[..]).await.unwrap();
        assert_eq!(applied, 1);
        assert!(store.find_hash("chris").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let (_, use_case) = use_case();

        let err = use_case
            .execute_file("/nonexistent/credentials.json")
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::Io(_)));
    }
}
