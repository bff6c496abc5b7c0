//! Google OAuth 2.0 authorization code flow with PKCE.
//!
//! The consent screen opens in the system browser and redirects to a
//! loopback listener on `127.0.0.1:{port}/callback`. The resulting Google id
//! token is handed to Identity Toolkit by the caller.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::GoogleSettings;
use crate::identity::{ServiceError, ServiceResult, codes};

/// Local OAuth callback path (port is dynamic).
pub const LOCAL_CALLBACK_PATH: &str = "/callback";
const SCOPES: &str = "openid email profile";
/// How long to wait for the browser to come back.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Opens a URL for the user. Defaults to the system browser.
pub type BrowserLauncher = dyn Fn(&str) -> std::io::Result<()> + Send + Sync;

/// PKCE code verifier and challenge
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

/// Generate PKCE code verifier and challenge
pub fn generate_pkce() -> Pkce {
    // Two UUIDs give 32 random bytes.
    let uuid1 = uuid::Uuid::new_v4();
    let uuid2 = uuid::Uuid::new_v4();
    let mut verifier_bytes = [0u8; 32];
    verifier_bytes[..16].copy_from_slice(uuid1.as_bytes());
    verifier_bytes[16..].copy_from_slice(uuid2.as_bytes());
    let verifier = URL_SAFE_NO_PAD.encode(verifier_bytes);

    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    let challenge = URL_SAFE_NO_PAD.encode(hasher.finalize());

    Pkce {
        verifier,
        challenge,
    }
}

/// Build the Google authorization URL
pub fn build_auth_url(
    settings: &GoogleSettings,
    pkce: &Pkce,
    state: &str,
    redirect_uri: &str,
) -> String {
    let params = [
        ("client_id", settings.client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri),
        ("scope", SCOPES),
        ("code_challenge", &pkce.challenge),
        ("code_challenge_method", "S256"),
        ("state", state),
        ("prompt", "select_account"),
    ];

    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    format!("{}?{query}", settings.auth_url)
}

/// Builds the redirect URI for a given loopback port.
pub fn build_redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{port}{LOCAL_CALLBACK_PATH}")
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
}

/// Runs the whole browser round trip and returns a Google id token.
pub async fn authorize(
    http: &reqwest::Client,
    settings: &GoogleSettings,
    open_browser: &BrowserLauncher,
) -> ServiceResult<String> {
    let listener = TcpListener::bind(("127.0.0.1", settings.callback_port))
        .await
        .map_err(|e| ServiceError::internal(format!("Failed to bind OAuth callback: {e}")))?;
    let port = listener
        .local_addr()
        .map_err(|e| ServiceError::internal(format!("Failed to read callback port: {e}")))?
        .port();

    let pkce = generate_pkce();
    let state = uuid::Uuid::new_v4().simple().to_string();
    let redirect_uri = build_redirect_uri(port);
    let url = build_auth_url(settings, &pkce, &state, &redirect_uri);

    tracing::info!(port, "waiting for Google sign-in in the browser");
    open_browser(&url).map_err(|e| {
        ServiceError::new(
            codes::POPUP_CLOSED,
            format!("Failed to open the browser: {e}"),
        )
    })?;

    let code = tokio::time::timeout(CALLBACK_TIMEOUT, wait_for_code(&listener, &state))
        .await
        .map_err(|elapsed| {
            ServiceError::new(
                codes::POPUP_CLOSED,
                format!("Timed out waiting for the browser ({elapsed})"),
            )
        })??;

    exchange_code(http, settings, &code, &pkce, &redirect_uri).await
}

/// Accepts loopback connections until one carries the authorization code.
///
/// Requests for other paths (favicon) get a 404 and are skipped.
pub async fn wait_for_code(listener: &TcpListener, expected_state: &str) -> ServiceResult<String> {
    loop {
        let (mut stream, _) = listener
            .accept()
            .await
            .map_err(|e| ServiceError::internal(format!("OAuth callback failed: {e}")))?;

        let mut buffer = [0u8; 4096];
        let read = stream.read(&mut buffer).await.unwrap_or(0);
        let request = String::from_utf8_lossy(&buffer[..read]);

        let outcome = parse_callback(&request, expected_state);
        let response = match &outcome {
            Callback::Code(_) => success_response(),
            Callback::Denied(_) | Callback::StateMismatch => error_response(),
            Callback::Other => not_found_response(),
        };
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;

        match outcome {
            Callback::Code(code) => return Ok(code),
            Callback::Denied(reason) => {
                return Err(ServiceError::new(codes::POPUP_CLOSED, reason));
            }
            Callback::StateMismatch => {
                return Err(ServiceError::new(
                    codes::INVALID_CREDENTIAL,
                    "OAuth state mismatch",
                ));
            }
            Callback::Other => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Callback {
    Code(String),
    Denied(String),
    StateMismatch,
    Other,
}

fn parse_callback(request: &str, expected_state: &str) -> Callback {
    let Some(target) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    else {
        return Callback::Other;
    };
    let Ok(url) = url::Url::parse(&format!("http://127.0.0.1{target}")) else {
        return Callback::Other;
    };
    if url.path() != LOCAL_CALLBACK_PATH {
        return Callback::Other;
    }

    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };
    if param("state").as_deref() != Some(expected_state) {
        return Callback::StateMismatch;
    }
    if let Some(error) = param("error") {
        return Callback::Denied(error);
    }
    match param("code") {
        Some(code) => Callback::Code(code),
        None => Callback::Denied("missing code".to_string()),
    }
}

/// Exchanges the authorization code for a Google id token.
pub async fn exchange_code(
    http: &reqwest::Client,
    settings: &GoogleSettings,
    code: &str,
    pkce: &Pkce,
    redirect_uri: &str,
) -> ServiceResult<String> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", settings.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("code_verifier", pkce.verifier.as_str()),
    ];
    if let Some(secret) = &settings.client_secret {
        form.push(("client_secret", secret.as_str()));
    }

    let response = http
        .post(&settings.token_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| ServiceError::network(format!("Token exchange failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::new(
            codes::INVALID_CREDENTIAL,
            format!("Token exchange failed (HTTP {status}): {body}"),
        ));
    }

    let data: TokenResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::internal(format!("Failed to parse token response: {e}")))?;
    Ok(data.id_token)
}

fn success_response() -> String {
    let body = "<html><body><h3>Signed in to INDYFY</h3><p>You can close this window.</p></body></html>";
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn error_response() -> String {
    let body = "<html><body><h3>Sign-in failed</h3><p>Please return to the terminal and try again.</p></body></html>";
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

fn not_found_response() -> String {
    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
}
