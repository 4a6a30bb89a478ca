//! Google OAuth 2.0 authorization-code flow.
//!
//! [`GoogleOAuth`] builds the consent-screen URL, exchanges the returned
//! code for an access token and reads the signed-in user's profile.

use std::time::Duration;

use serde::Deserialize;
use stitchflow_db::models::user::ExternalProfile;

use crate::config::GoogleOAuthConfig;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";

/// HTTP request timeout for identity-provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for identity-provider failures.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status code.
    #[error("Identity provider returned HTTP {0}")]
    HttpStatus(u16),

    /// The profile has no email address to match accounts on.
    #[error("Identity provider profile has no email")]
    MissingEmail,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl UserInfo {
    fn into_profile(self) -> Result<ExternalProfile, OAuthError> {
        let email = self.email.ok_or(OAuthError::MissingEmail)?;
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Ok(ExternalProfile {
            google_id: self.sub,
            email,
            name,
            avatar_url: self.picture,
        })
    }
}

// ---------------------------------------------------------------------------
// GoogleOAuth
// ---------------------------------------------------------------------------

/// Google sign-in client.
pub struct GoogleOAuth {
    client: reqwest::Client,
    config: GoogleOAuthConfig,
    redirect_uri: String,
}

impl GoogleOAuth {
    pub fn new(config: GoogleOAuthConfig, redirect_uri: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            config,
            redirect_uri,
        }
    }

    /// Consent-screen URL carrying the signed `state`.
    pub fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("state", state),
            ("prompt", "select_account"),
        ];
        match reqwest::Url::parse_with_params(AUTHORIZE_URL, &params) {
            Ok(url) => url.to_string(),
            // AUTHORIZE_URL is a valid constant.
            Err(_) => AUTHORIZE_URL.to_string(),
        }
    }

    /// Exchange an authorization code and fetch the signed-in profile.
    pub async fn authenticate(&self, code: &str) -> Result<ExternalProfile, OAuthError> {
        let token = self.exchange_code(code).await?;
        self.fetch_profile(&token).await
    }

    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let form = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        let response = self.client.post(TOKEN_URL).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(OAuthError::HttpStatus(response.status().as_u16()));
        }
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuthError> {
        let response = self
            .client
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OAuthError::HttpStatus(response.status().as_u16()));
        }
        let info: UserInfo = response.json().await?;
        info.into_profile()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn client() -> GoogleOAuth {
        GoogleOAuth::new(
            GoogleOAuthConfig {
                client_id: "client-123".into(),
                client_secret: "shh".into(),
            },
            "http://localhost:5000/auth/google/callback".into(),
        )
    }

    #[test]
    fn authorize_url_carries_client_and_state() {
        let url = client().authorize_url("signed-state");
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=signed-state"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fauth%2Fgoogle%2Fcallback"
        ));
    }

    #[test]
    fn profile_falls_back_to_email_local_part() {
        let info = UserInfo {
            sub: "g-1".into(),
            email: Some("asha@example.com".into()),
            name: None,
            picture: None,
        };
        let profile = info.into_profile().unwrap();
        assert_eq!(profile.name, "asha");
        assert_eq!(profile.google_id, "g-1");
    }

    #[test]
    fn profile_without_email_is_rejected() {
        let info = UserInfo {
            sub: "g-1".into(),
            email: None,
            name: Some("Asha".into()),
            picture: None,
        };
        assert_matches!(info.into_profile(), Err(OAuthError::MissingEmail));
    }
}
