//! Access-token lifecycle for the Google Calendar client.
//!
//! Tokens live in a scoped store with an explicit refresh-before-use
//! lifecycle rather than in process-global mutable state. Every caller goes
//! through [`TokenStore::get_valid`], which refreshes through the OAuth
//! refresh grant when the cached access token is absent or about to expire.

use chrono::{DateTime, Duration, Utc};
use google_calendar::Client;
use tokio::sync::RwLock;
use tracing::debug;

use creneau_core::{BookingError, BookingResult};

use crate::settings::GoogleSettings;

// Unused by the refresh grant, but the client constructor requires one.
const REDIRECT_URI: &str = "http://localhost:8085/callback";

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Tokens for the configured account.
#[derive(Debug, Clone)]
pub struct AccountTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccountTokens {
    fn needs_refresh(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS),
            None => false,
        }
    }
}

/// Cached access token, shared across requests.
pub struct TokenStore {
    settings: GoogleSettings,
    tokens: RwLock<Option<AccountTokens>>,
}

impl TokenStore {
    pub fn new(settings: GoogleSettings) -> Self {
        TokenStore {
            settings,
            tokens: RwLock::new(None),
        }
    }

    /// Get tokens for the account, refreshing if needed.
    pub async fn get_valid(&self) -> BookingResult<AccountTokens> {
        if let Some(tokens) = self.tokens.read().await.as_ref() {
            if !tokens.needs_refresh() {
                return Ok(tokens.clone());
            }
        }

        let mut guard = self.tokens.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(tokens) = guard.as_ref() {
            if !tokens.needs_refresh() {
                return Ok(tokens.clone());
            }
        }

        debug!("access token missing or expiring, refreshing");
        let refreshed = self.refresh(guard.as_ref()).await?;
        *guard = Some(refreshed.clone());
        Ok(refreshed)
    }

    /// Build a Google client from stored tokens.
    pub fn client(&self, tokens: &AccountTokens) -> Client {
        Client::new(
            self.settings.client_id.clone(),
            self.settings.client_secret.clone(),
            REDIRECT_URI.to_string(),
            tokens.access_token.clone(),
            tokens.refresh_token.clone(),
        )
    }

    async fn refresh(&self, current: Option<&AccountTokens>) -> BookingResult<AccountTokens> {
        let refresh_token = current
            .map(|t| t.refresh_token.clone())
            .unwrap_or_else(|| self.settings.refresh_token.clone());

        let client = Client::new(
            self.settings.client_id.clone(),
            self.settings.client_secret.clone(),
            REDIRECT_URI.to_string(),
            String::new(),
            refresh_token.clone(),
        );

        let access_token = client
            .refresh_access_token()
            .await
            .map_err(|e| BookingError::Calendar(format!("token refresh failed: {e}")))?;

        let expires_at = if access_token.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(access_token.expires_in))
        } else {
            None
        };

        // Google typically doesn't return a new refresh_token on refresh.
        let refresh_token = if access_token.refresh_token.is_empty() {
            refresh_token
        } else {
            access_token.refresh_token
        };

        Ok(AccountTokens {
            access_token: access_token.access_token,
            refresh_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_needed_near_expiry() {
        let tokens = AccountTokens {
            access_token: "abc".into(),
            refresh_token: "def".into(),
            expires_at: Some(Utc::now() + Duration::seconds(30)),
        };
        assert!(tokens.needs_refresh());
    }

    #[test]
    fn test_fresh_token_kept() {
        let tokens = AccountTokens {
            access_token: "abc".into(),
            refresh_token: "def".into(),
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };
        assert!(!tokens.needs_refresh());
    }

    #[test]
    fn test_unknown_expiry_trusted() {
        let tokens = AccountTokens {
            access_token: "abc".into(),
            refresh_token: "def".into(),
            expires_at: None,
        };
        assert!(!tokens.needs_refresh());
    }
}
