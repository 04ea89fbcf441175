//! Verify Credentials Use Case
//!
//! Checks a username/password pair against the credential store.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::repository::CredentialRepository;
use crate::error::{GateError, GateResult};

/// Verify credentials use case
pub struct VerifyCredentialsUseCase<C>
where
    C: CredentialRepository,
{
    credential_repo: Arc<C>,
}

impl<C> VerifyCredentialsUseCase<C>
where
    C: CredentialRepository,
{
    pub fn new(credential_repo: Arc<C>) -> Self {
        Self { credential_repo }
    }

    /// `Ok(())` iff the username exists and the password matches its hash
    ///
    /// Unknown user and wrong password both yield `InvalidCredentials`.
    /// The store lock is released before the Argon2 comparison starts, and
    /// the comparison runs on the blocking pool so slow attempts do not
    /// stall other requests.
    pub async fn execute(&self, username: &str, password: String) -> GateResult<()> {
        let Some(stored) = self.credential_repo.find_hash(username).await? else {
            return Err(GateError::InvalidCredentials);
        };

        let candidate = ClearTextPassword::candidate(password);
        let matched = tokio::task::spawn_blocking(move || stored.verify(&candidate))
            .await
            .map_err(|e| GateError::Internal(format!("Password verification task failed: {e}")))?;

        if matched {
            Ok(())
        } else {
            Err(GateError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use argon2::password_hash::{PasswordHasher, SaltString};
    use argon2::{Algorithm, Argon2, Params, Version};
    use platform::password::HashedPassword;

    use crate::application::load_credentials::LoadCredentialsUseCase;
    use crate::domain::entity::credential::Credential;
    use crate::infra::memory::InMemoryCredentialStore;
    use crate::tests::support::{cheap_hash, credential_json};

    async fn loaded(users: &[(&str, &str)]) -> VerifyCredentialsUseCase<InMemoryCredentialStore> {
        let store = Arc::new(InMemoryCredentialStore::new());
        LoadCredentialsUseCase::new(store.clone())
            .execute(&credential_json(users))
            .await
            .unwrap();
        VerifyCredentialsUseCase::new(store)
    }

    #[tokio::test]
    async fn test_correct_password() {
        let use_case = loaded(&[("chris", "danny bliss")]).await;
        assert!(use_case.execute("chris", "danny bliss".into()).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_alike() {
        let use_case = loaded(&[("chris", "danny bliss")]).await;

        let wrong = use_case.execute("chris", "wrong".into()).await.unwrap_err();
        let unknown = use_case.execute("nobody", "danny bliss".into()).await.unwrap_err();

        assert!(matches!(wrong, GateError::InvalidCredentials));
        assert!(matches!(unknown, GateError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_last_load_wins() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let loader = LoadCredentialsUseCase::new(store.clone());
        loader
            .execute(&credential_json(&[("chris", "old password")]))
            .await
            .unwrap();
        loader
            .execute(&credential_json(&[("chris", "new password")]))
            .await
            .unwrap();

        let use_case = VerifyCredentialsUseCase::new(store);
        assert!(use_case.execute("chris", "new password".into()).await.is_ok());
        assert!(use_case.execute("chris", "old password".into()).await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_in_one_file_last_entry_wins() {
        let use_case = loaded(&[("chris", "first"), ("chris", "second")]).await;

        assert!(use_case.execute("chris", "second".into()).await.is_ok());
        assert!(use_case.execute("chris", "first".into()).await.is_err());
    }

    #[tokio::test]
    async fn test_password_bytes_are_compared_unnormalized() {
        // Ligature "fi" and fullwidth "A": NFKC would fold this to "fileA"
        let raw = "\u{FB01}le\u{FF21}";
        let use_case = loaded(&[("chris", raw)]).await;

        assert!(use_case.execute("chris", raw.into()).await.is_ok());
        assert!(use_case.execute("chris", "fileA".into()).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_store_stays_writable_during_verification() {
        // 64 MiB, 4 passes: slow enough to still be running below
        let params = Params::new(64 * 1024, 4, 1, None).unwrap();
        let salt = SaltString::encode_b64(b"gate-slow-salt-0").unwrap();
        let slow = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(b"danny bliss", &salt)
            .unwrap()
            .to_string();

        let store = Arc::new(InMemoryCredentialStore::new());
        store
            .upsert(Credential {
                username: "chris".to_string(),
                password_hash: HashedPassword::from_phc_string(slow).unwrap(),
            })
            .await
            .unwrap();

        let use_case = VerifyCredentialsUseCase::new(store.clone());
        let verify =
            tokio::spawn(async move { use_case.execute("chris", "danny bliss".into()).await });
        tokio::time::sleep(Duration::from_millis(20)).await;

        tokio::time::timeout(Duration::from_secs(1), async {
            store
                .upsert(Credential {
                    username: "ops".to_string(),
                    password_hash: HashedPassword::from_phc_string(cheap_hash("pw")).unwrap(),
                })
                .await
                .unwrap();
            assert!(store.find_hash("ops").await.unwrap().is_some());
        })
        .await
        .expect("store blocked while a verification was running");
        assert!(!verify.is_finished());

        assert!(verify.await.unwrap().is_ok());
    }
}
