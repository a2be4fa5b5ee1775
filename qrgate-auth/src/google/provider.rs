use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::watch;
use zeroize::Zeroizing;

use super::oauth::{
    self, AUTHORIZE_URL, CALLBACK_TIMEOUT, Callback, FIREBASE_SIGN_IN_URL,
    FirebaseSignInRequest, FirebaseSignInResponse, Pkce, REVOKE_URL,
    TOKEN_URL, TokenResponse, USERINFO_URL, UserInfo,
};
use super::session::{SessionStore, StoredSession};
use crate::errors::SignInError;
use crate::identity::{AuthState, AuthSubscription, Identity};
use crate::provider::IdentityProvider;

const CALLBACK_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
    pub revoke: String,
    pub firebase_sign_in: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            authorize: AUTHORIZE_URL.to_string(),
            token: TOKEN_URL.to_string(),
            userinfo: USERINFO_URL.to_string(),
            revoke: REVOKE_URL.to_string(),
            firebase_sign_in: FIREBASE_SIGN_IN_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: Option<SecretString>,
    /// Loopback port for the redirect; `0` picks a free one.
    pub redirect_port: u16,
    /// Web API key of the Firebase project holding the allow-list. Without
    /// it no bearer credential is offered to the allow-list.
    pub firebase_api_key: Option<String>,
    pub endpoints: GoogleEndpoints,
}

impl GoogleConfig {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty()
    }

    fn firebase_api_key(&self) -> Option<&str> {
        self.firebase_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

struct Tokens {
    access: SecretString,
    refresh: Option<SecretString>,
    /// Firebase ID token handed to the allow-list.
    firebase: Option<SecretString>,
}

pub struct GoogleIdentityProvider {
    config: GoogleConfig,
    http: reqwest::Client,
    store: SessionStore,
    state: watch::Sender<AuthState>,
    tokens: Mutex<Option<Tokens>>,
}

impl GoogleIdentityProvider {
    /// Starts in [`AuthState::Pending`] until
    /// [`IdentityProvider::restore_session`] runs.
    pub fn new(config: GoogleConfig, store: SessionStore) -> Self {
        let (state, _) = watch::channel(AuthState::Pending);
        Self {
            config,
            http: reqwest::Client::new(),
            store,
            state,
            tokens: Mutex::new(None),
        }
    }

    /// Share a connection pool with the rest of the application.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn publish(&self, state: AuthState) {
        self.state.send_replace(state);
    }

    fn tokens(&self) -> MutexGuard<'_, Option<Tokens>> {
        self.tokens
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn request_tokens(
        &self,
        grant: &[(&str, &str)],
    ) -> Result<TokenResponse, SignInError> {
        let body = {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            form.extend_pairs(grant.iter().copied())
                .append_pair("client_id", &self.config.client_id);
            if let Some(secret) = &self.config.client_secret {
                form.append_pair("client_secret", secret.expose_secret());
            }
            Zeroizing::new(form.finish())
        };

        let response = self
            .http
            .post(&self.config.endpoints.token)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.as_str().to_owned())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SignInError::Status {
                endpoint: "token",
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    async fn exchange_code(
        &self,
        code: &str,
        pkce: &Pkce,
        redirect_uri: &str,
    ) -> Result<TokenResponse, SignInError> {
        self.request_tokens(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("code_verifier", &pkce.verifier),
            ("redirect_uri", redirect_uri),
        ])
        .await
    }

    async fn refresh(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, SignInError> {
        self.request_tokens(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn fetch_identity(
        &self,
        access_token: &str,
    ) -> Result<Identity, SignInError> {
        let response = self
            .http
            .get(&self.config.endpoints.userinfo)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SignInError::Status {
                endpoint: "userinfo",
                status: response.status().as_u16(),
            });
        }

        let info: UserInfo = response.json().await?;
        let email = info
            .email
            .filter(|email| !email.is_empty())
            .ok_or(SignInError::MissingEmail)?;

        Ok(Identity {
            email,
            display_name: info.name,
            photo_url: info.picture,
        })
    }

    /// Trade Google's ID token for a Firebase ID token. `None` when no
    /// Firebase project is configured.
    async fn firebase_token(
        &self,
        response: &TokenResponse,
    ) -> Result<Option<SecretString>, SignInError> {
        let Some(api_key) = self.config.firebase_api_key() else {
            return Ok(None);
        };
        let id_token = response
            .id_token
            .as_deref()
            .ok_or(SignInError::MissingIdToken)?;

        let url = oauth::firebase_sign_in_url(
            &self.config.endpoints.firebase_sign_in,
            api_key,
        );
        let request = FirebaseSignInRequest::for_google_id_token(id_token);
        let response = self.http.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(SignInError::Status {
                endpoint: "signInWithIdp",
                status: response.status().as_u16(),
            });
        }

        let body: FirebaseSignInResponse = response.json().await?;
        Ok(Some(SecretString::from(body.id_token)))
    }

    /// Keep the new tokens and persist the refresh token, if any.
    fn install_session(
        &self,
        response: TokenResponse,
        firebase: Option<SecretString>,
        previous_refresh: Option<&str>,
        identity: &Identity,
    ) {
        let refresh = response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_owned));

        if let Some(refresh_token) = &refresh {
            let stored = StoredSession {
                refresh_token: refresh_token.clone(),
                identity: identity.clone(),
            };
            if let Err(err) = self.store.save(&stored) {
                log::warn!("failed to persist google session: {err}");
            }
        }

        *self.tokens() = Some(Tokens {
            access: SecretString::from(response.access_token),
            refresh: refresh.map(SecretString::from),
            firebase,
        });
    }

    async fn revoke(&self, token: &SecretString) -> Result<(), SignInError> {
        let body = Zeroizing::new(
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("token", token.expose_secret())
                .finish(),
        );

        let response = self
            .http
            .post(&self.config.endpoints.revoke)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.as_str().to_owned())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SignInError::Status {
                endpoint: "revoke",
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.state.subscribe())
    }

    async fn restore_session(&self) {
        let stored = match self.store.load() {
            Ok(Some(stored)) if self.config.is_configured() => stored,
            Ok(_) => {
                self.publish(AuthState::SignedOut);
                return;
            },
            Err(err) => {
                log::warn!(
                    "ignoring unreadable session {}: {err}",
                    self.store.path().display()
                );
                self.publish(AuthState::SignedOut);
                return;
            },
        };

        let restored = async {
            let response = self.refresh(&stored.refresh_token).await?;
            let identity = self.fetch_identity(&response.access_token).await?;
            let firebase = self.firebase_token(&response).await?;
            Ok::<_, SignInError>((response, identity, firebase))
        }
        .await;

        match restored {
            Ok((response, identity, firebase)) => {
                log::info!("restored google session for {}", identity.email);
                self.install_session(
                    response,
                    firebase,
                    Some(stored.refresh_token.as_str()),
                    &identity,
                );
                self.publish(AuthState::SignedIn(identity));
            },
            Err(err) => {
                log::warn!("could not restore google session: {err}");
                if let Err(err) = self.store.clear() {
                    log::warn!("failed to clear stale session: {err}");
                }
                self.publish(AuthState::SignedOut);
            },
        }
    }

    async fn sign_in_with_popup(&self) -> Result<Identity, SignInError> {
        if !self.config.is_configured() {
            return Err(SignInError::NotConfigured);
        }

        let listener =
            TcpListener::bind(("127.0.0.1", self.config.redirect_port))
                .await
                .map_err(SignInError::Listener)?;
        let port = listener.local_addr().map_err(SignInError::Listener)?.port();
        let redirect_uri = oauth::redirect_uri(port);

        let pkce = oauth::generate_pkce();
        let state = uuid::Uuid::new_v4().simple().to_string();
        let auth_url = oauth::build_auth_url(
            &self.config.endpoints.authorize,
            &self.config.client_id,
            &redirect_uri,
            &pkce,
            &state,
        );

        log::info!("opening browser for google sign-in on port {port}");
        open::that_detached(&auth_url).map_err(SignInError::Browser)?;

        let code = tokio::time::timeout(
            CALLBACK_TIMEOUT,
            wait_for_code(&listener, &state),
        )
        .await
        .map_err(|_| SignInError::Timeout)??;
        drop(listener);

        let response = self.exchange_code(&code, &pkce, &redirect_uri).await?;
        let identity = self.fetch_identity(&response.access_token).await?;
        let firebase = self.firebase_token(&response).await?;

        log::info!("google sign-in completed for {}", identity.email);
        self.install_session(response, firebase, None, &identity);
        self.publish(AuthState::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), SignInError> {
        let tokens = self.tokens().take();

        if let Some(tokens) = tokens {
            let token = tokens.refresh.as_ref().unwrap_or(&tokens.access);
            if let Err(err) = self.revoke(token).await {
                log::warn!("google token revocation failed: {err}");
            }
        }

        self.publish(AuthState::SignedOut);
        self.store.clear()?;
        Ok(())
    }

    fn bearer_token(&self) -> Option<SecretString> {
        self.tokens()
            .as_ref()
            .and_then(|tokens| tokens.firebase.as_ref())
            .map(|token| SecretString::from(token.expose_secret().to_owned()))
    }
}

/// Serve the loopback listener until the redirect arrives.
async fn wait_for_code(
    listener: &TcpListener,
    expected_state: &str,
) -> Result<String, SignInError> {
    loop {
        let (mut stream, _) =
            listener.accept().await.map_err(SignInError::Listener)?;

        let mut buffer = Zeroizing::new(vec![0u8; CALLBACK_BUFFER_SIZE]);
        let read = match stream.read(&mut buffer).await {
            Ok(read) => read,
            Err(err) => {
                log::debug!("dropping unreadable callback connection: {err}");
                continue;
            },
        };
        let request = Zeroizing::new(
            String::from_utf8_lossy(&buffer[..read]).into_owned(),
        );

        let (response, outcome) =
            match oauth::parse_callback(&request, expected_state) {
                Callback::Ignored => (oauth::not_found_response(), None),
                Callback::Rejected(reason) => (
                    oauth::error_response(),
                    Some(Err(SignInError::CallbackRejected { reason })),
                ),
                Callback::Code(code) => {
                    (oauth::success_response(), Some(Ok(code)))
                },
            };

        if let Err(err) = stream.write_all(response.as_bytes()).await {
            log::debug!("failed to answer callback request: {err}");
        }
        if let Some(outcome) = outcome {
            return outcome;
        }
    }
}
