//! Identity Toolkit and Secure Token REST calls.
//!
//! Endpoints (relative to the configured base URLs):
//! - `POST {identity}/accounts:signUp?key=`
//! - `POST {identity}/accounts:signInWithPassword?key=`
//! - `POST {identity}/accounts:signInWithIdp?key=`
//! - `POST {secure_token}/token?key=` (form encoded refresh)

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::config::FirebaseSettings;
use crate::identity::{ServiceError, ServiceResult, codes};
use crate::profile::{Account, AccountId};

/// Tokens issued for a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub account: Account,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Creates an email/password account.
pub async fn sign_up(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    email: &str,
    password: &str,
) -> ServiceResult<AuthTokens> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "returnSecureToken": true,
    });
    let response: SignInResponse = post_identity(http, settings, "accounts:signUp", &body).await?;
    Ok(response.into_tokens(email))
}

/// Signs in with email and password.
pub async fn sign_in_with_password(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    email: &str,
    password: &str,
) -> ServiceResult<AuthTokens> {
    let body = serde_json::json!({
        "email": email,
        "password": password,
        "returnSecureToken": true,
    });
    let response: SignInResponse =
        post_identity(http, settings, "accounts:signInWithPassword", &body).await?;
    Ok(response.into_tokens(email))
}

/// Exchanges a Google id token for a Firebase session.
pub async fn sign_in_with_google(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    google_id_token: &str,
) -> ServiceResult<AuthTokens> {
    let post_body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", google_id_token)
        .append_pair("providerId", "google.com")
        .finish();
    let body = serde_json::json!({
        "postBody": post_body,
        "requestUri": "http://localhost",
        "returnSecureToken": true,
        "returnIdpCredential": true,
    });
    let response: SignInResponse =
        post_identity(http, settings, "accounts:signInWithIdp", &body).await?;
    Ok(response.into_tokens(""))
}

/// Exchanges a refresh token for a new id token.
///
/// The account's email and display name are not part of the response and
/// are carried over from `account`.
pub async fn refresh(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    account: &Account,
    refresh_token: &str,
) -> ServiceResult<AuthTokens> {
    let url = format!("{}/token", settings.secure_token_url);
    let response = http
        .post(&url)
        .query(&[("key", settings.api_key.as_str())])
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("Token refresh failed: {e}")))?;

    let data: RefreshResponse = parse_response(response).await?;
    Ok(AuthTokens {
        account: Account {
            id: AccountId::new(data.user_id),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        },
        id_token: data.id_token,
        refresh_token: data.refresh_token,
        expires_at: expires_at(&data.expires_in),
    })
}

impl SignInResponse {
    fn into_tokens(self, fallback_email: &str) -> AuthTokens {
        AuthTokens {
            account: Account {
                id: AccountId::new(self.local_id),
                email: self
                    .email
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| fallback_email.to_string()),
                display_name: self.display_name.filter(|n| !n.trim().is_empty()),
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at: expires_at(&self.expires_in),
        }
    }
}

fn expires_at(expires_in: &str) -> DateTime<Utc> {
    let secs = expires_in.trim().parse::<i64>().unwrap_or(3600);
    Utc::now() + Duration::seconds(secs)
}

async fn post_identity<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    settings: &FirebaseSettings,
    method: &str,
    body: &serde_json::Value,
) -> ServiceResult<T> {
    let url = format!("{}/{method}", settings.identity_toolkit_url);
    tracing::debug!(%method, "identity toolkit request");
    let response = http
        .post(&url)
        .query(&[("key", settings.api_key.as_str())])
        .json(body)
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("{method} request failed: {e}")))?;
    parse_response(response).await
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> ServiceResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to parse response: {e}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status.as_u16(), &body))
}

/// Maps an Identity Toolkit error payload to a canonical service error.
pub(crate) fn error_from_body(status: u16, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            let message = envelope.error.message;
            ServiceError::new(code_for_message(&message), message)
        }
        Ok(envelope) => match envelope.error.status {
            Some(status) => ServiceError::new(format!("auth/{}", kebab(&status)), status),
            None => ServiceError::internal(format!("HTTP {status}")),
        },
        Err(_) => ServiceError::internal(format!("HTTP {status}: {body}")),
    }
}

/// Maps an Identity Toolkit error message (`WEAK_PASSWORD : ...`) to a code.
pub fn code_for_message(message: &str) -> String {
    let key = message.split(':').next().unwrap_or_default().trim();
    let code = match key {
        "EMAIL_EXISTS" => codes::EMAIL_ALREADY_IN_USE,
        "INVALID_EMAIL" | "MISSING_EMAIL" => codes::INVALID_EMAIL,
        "WEAK_PASSWORD" => codes::WEAK_PASSWORD,
        "EMAIL_NOT_FOUND" => codes::USER_NOT_FOUND,
        "INVALID_PASSWORD" | "MISSING_PASSWORD" => codes::WRONG_PASSWORD,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => codes::INVALID_CREDENTIAL,
        "USER_DISABLED" => codes::USER_DISABLED,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => codes::TOO_MANY_REQUESTS,
        "OPERATION_NOT_ALLOWED" => codes::FEDERATED_UNAVAILABLE,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" | "INVALID_ID_TOKEN" => {
            codes::REQUIRES_RECENT_LOGIN
        }
        other => return format!("auth/{}", kebab(other)),
    };
    code.to_string()
}

fn kebab(value: &str) -> String {
    value.trim().to_lowercase().replace('_', "-")
}
