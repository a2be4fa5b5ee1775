use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_URL: &str =
    "https://openidconnect.googleapis.com/v1/userinfo";
pub const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";
pub const FIREBASE_SIGN_IN_URL: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithIdp";

/// `requestUri` sent with the Firebase exchange; only its shape is checked.
const FIREBASE_REQUEST_URI: &str = "http://localhost";

pub const CALLBACK_PATH: &str = "/oauth2callback";
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Profile plus an ID token that Firebase accepts as a Google credential.
const SCOPES: &str = "openid email profile";

/// PKCE code verifier and its S256 challenge.
pub(crate) struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

pub(crate) fn generate_pkce() -> Pkce {
    let mut verifier_bytes = [0u8; 32];
    verifier_bytes[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
    verifier_bytes[16..].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
    let verifier = URL_SAFE_NO_PAD.encode(verifier_bytes);
    let challenge = pkce_challenge(&verifier);

    Pkce {
        verifier,
        challenge,
    }
}

fn pkce_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

pub(crate) fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{port}{CALLBACK_PATH}")
}

pub(crate) fn build_auth_url(
    authorize_url: &str,
    client_id: &str,
    redirect_uri: &str,
    pkce: &Pkce,
    state: &str,
) -> String {
    let params = [
        ("response_type", "code"),
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("scope", SCOPES),
        ("code_challenge", &pkce.challenge),
        ("code_challenge_method", "S256"),
        ("state", state),
        ("access_type", "offline"),
        ("prompt", "select_account"),
    ];

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    format!("{authorize_url}?{query}")
}

/// What a request hitting the loopback listener turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Callback {
    /// Not the redirect (favicon and the like).
    Ignored,
    Rejected(String),
    Code(String),
}

pub(crate) fn parse_callback(request: &str, expected_state: &str) -> Callback {
    let Some(target) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    else {
        return Callback::Ignored;
    };

    let Ok(url) = url::Url::parse(&format!("http://127.0.0.1{target}")) else {
        return Callback::Ignored;
    };
    if url.path() != CALLBACK_PATH {
        return Callback::Ignored;
    }

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if param("state").as_deref() != Some(expected_state) {
        return Callback::Rejected(String::from("state mismatch"));
    }
    if let Some(error) = param("error") {
        return Callback::Rejected(error);
    }
    match param("code") {
        Some(code) if !code.is_empty() => Callback::Code(code),
        _ => Callback::Rejected(String::from("missing authorization code")),
    }
}

pub(crate) fn success_response() -> String {
    html_response(
        "200 OK",
        "Signed in. You can close this tab and return to qrgate.",
    )
}

pub(crate) fn error_response() -> String {
    html_response("400 Bad Request", "Sign-in failed. Return to qrgate.")
}

pub(crate) fn not_found_response() -> String {
    html_response("404 Not Found", "Not found")
}

fn html_response(status: &str, message: &str) -> String {
    let body = format!(
        "<!doctype html><html><head><meta charset=\"utf-8\" />\
         <title>qrgate</title></head><body><p>{message}</p></body></html>"
    );
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Body of `accounts:signInWithIdp`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirebaseSignInRequest {
    pub post_body: String,
    pub request_uri: &'static str,
    pub return_idp_credential: bool,
    pub return_secure_token: bool,
}

impl FirebaseSignInRequest {
    pub(crate) fn for_google_id_token(id_token: &str) -> Self {
        let post_body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", id_token)
            .append_pair("providerId", "google.com")
            .finish();
        Self {
            post_body,
            request_uri: FIREBASE_REQUEST_URI,
            return_idp_credential: false,
            return_secure_token: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FirebaseSignInResponse {
    pub id_token: String,
}

/// `endpoint?key=<api key>` for the Firebase exchange.
pub(crate) fn firebase_sign_in_url(endpoint: &str, api_key: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("key", api_key)
        .finish();
    format!("{endpoint}?{query}")
}

#[derive(Deserialize)]
pub(crate) struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(target: &str) -> String {
        format!("GET {target} HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n")
    }

    #[test]
    fn given_pkce_when_generated_then_challenge_is_s256_of_verifier() {
        let pkce = generate_pkce();

        assert_eq!(pkce.verifier.len(), 43);
        assert_eq!(pkce.challenge, pkce_challenge(&pkce.verifier));
        assert_ne!(pkce.challenge, pkce.verifier);
    }

    #[test]
    fn given_known_verifier_when_hashed_then_rfc7636_challenge_is_produced() {
        let challenge =
            pkce_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");

        assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn given_client_when_auth_url_built_then_pkce_and_state_are_included() {
        let pkce = generate_pkce();

        let url = build_auth_url(
            AUTHORIZE_URL,
            "client-1",
            &redirect_uri(8085),
            &pkce,
            "state-1",
        );

        let parsed = url::Url::parse(&url).expect("url");
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert!(url.starts_with(AUTHORIZE_URL));
        assert_eq!(get("client_id"), Some("client-1"));
        assert_eq!(
            get("redirect_uri"),
            Some("http://127.0.0.1:8085/oauth2callback")
        );
        assert_eq!(get("code_challenge"), Some(pkce.challenge.as_str()));
        assert_eq!(get("code_challenge_method"), Some("S256"));
        assert_eq!(get("state"), Some("state-1"));
        assert_eq!(get("scope"), Some("openid email profile"));
    }

    #[test]
    fn given_redirect_with_code_when_parsed_then_code_is_returned() {
        let callback = parse_callback(
            &request("/oauth2callback?state=abc&code=4%2F0Axyz"),
            "abc",
        );

        assert_eq!(callback, Callback::Code(String::from("4/0Axyz")));
    }

    #[test]
    fn given_other_path_when_parsed_then_request_is_ignored() {
        let callback = parse_callback(&request("/favicon.ico"), "abc");

        assert_eq!(callback, Callback::Ignored);
    }

    #[test]
    fn given_wrong_state_when_parsed_then_callback_is_rejected() {
        let callback = parse_callback(
            &request("/oauth2callback?state=evil&code=123"),
            "abc",
        );

        assert_eq!(callback, Callback::Rejected(String::from("state mismatch")));
    }

    #[test]
    fn given_user_cancel_when_parsed_then_provider_error_is_reported() {
        let callback = parse_callback(
            &request("/oauth2callback?state=abc&error=access_denied"),
            "abc",
        );

        assert_eq!(callback, Callback::Rejected(String::from("access_denied")));
    }

    #[test]
    fn given_garbage_when_parsed_then_request_is_ignored() {
        assert_eq!(parse_callback("", "abc"), Callback::Ignored);
        assert_eq!(parse_callback("\u{0}\u{0}", "abc"), Callback::Ignored);
    }

    #[test]
    fn given_google_id_token_when_firebase_request_built_then_body_matches() {
        let request = FirebaseSignInRequest::for_google_id_token("a.b+c");

        let json = serde_json::to_value(&request).expect("json");

        assert_eq!(json["postBody"], "id_token=a.b%2Bc&providerId=google.com");
        assert_eq!(json["requestUri"], "http://localhost");
        assert_eq!(json["returnSecureToken"], true);
        assert_eq!(
            firebase_sign_in_url(FIREBASE_SIGN_IN_URL, "key-1"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithIdp\
             ?key=key-1"
        );
    }

    #[test]
    fn given_success_response_when_built_then_content_length_matches_body() {
        let response = success_response();
        let (head, body) = response.split_once("\r\n\r\n").expect("split");

        assert!(head.starts_with("HTTP/1.1 200 OK"));
        assert!(head.contains(&format!("Content-Length: {}", body.len())));
    }
}
