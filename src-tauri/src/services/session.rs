//! Session service
//!
//! Holds the signed-in identity and publishes changes on a watch
//! channel. Passwords are hashed with Argon2id; the signed-in account
//! id is persisted in settings so the session survives restarts.

use crate::config;
use crate::database::{Repository, User};
use crate::error::{AppError, Result};
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The authenticated account as seen by the rest of the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Service managing the current session
#[derive(Clone)]
pub struct SessionService {
    repo: Repository,
    tx: watch::Sender<Option<Identity>>,
}

impl SessionService {
    pub fn new(repo: Repository) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { repo, tx }
    }

    /// Restore the previously signed-in account, if any.
    ///
    /// A stored session pointing at an unknown account degrades to
    /// "signed out" instead of failing startup.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let Some(user_id) = self.repo.get_setting(config::SESSION_SETTING_KEY).await? else {
            return Ok(None);
        };

        match self.repo.get_user(&user_id).await? {
            Some(user) => {
                let identity = Identity::from(user);
                self.tx.send_replace(Some(identity.clone()));
                Ok(Some(identity))
            }
            None => {
                tracing::warn!("Stored session references unknown account, signing out");
                self.repo.delete_setting(config::SESSION_SETTING_KEY).await?;
                Ok(None)
            }
        }
    }

    /// Create an account and sign it in
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        if password.len() < config::MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must have at least {} characters",
                config::MIN_PASSWORD_LENGTH
            )));
        }

        let hash = hash_password(password)?;
        let user = self.repo.create_user(&email, &hash).await?;

        tracing::info!("Created account: {}", email);
        self.establish(user).await
    }

    /// Sign in with e-mail and password
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let email = normalize_email(email)?;
        let user = self
            .repo
            .get_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        tracing::info!("Signed in: {}", email);
        self.establish(user).await
    }

    /// Sign out and forget the persisted session
    pub async fn sign_out(&self) -> Result<()> {
        self.repo.delete_setting(config::SESSION_SETTING_KEY).await?;
        self.tx.send_replace(None);

        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    /// Subscribe to identity changes (sign-in, sign-out)
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }

    async fn establish(&self, user: User) -> Result<Identity> {
        self.repo
            .set_setting(config::SESSION_SETTING_KEY, &user.id)
            .await?;

        let identity = Identity::from(user);
        self.tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid e-mail is required".to_string()));
    }
    Ok(email)
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Generic(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Generic(format!("Stored password hash is invalid: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::InvalidCredentials)
}
