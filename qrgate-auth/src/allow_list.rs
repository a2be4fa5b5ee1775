use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::errors::AllowListError;

pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_COLLECTION: &str = "allowed_users";

/// Existence-only lookup of authorized emails.
#[async_trait]
pub trait AllowList: Send + Sync {
    /// `Ok(true)` when an entry keyed by exactly `email` exists.
    async fn contains(
        &self,
        email: &str,
        credentials: Option<&SecretString>,
    ) -> Result<bool, AllowListError>;
}

/// Allow-list backed by one Firestore document per authorized email.
#[derive(Debug, Clone)]
pub struct FirestoreAllowList {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
}

impl FirestoreAllowList {
    pub fn new(
        project_id: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            project_id: project_id.into(),
            collection: collection.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Share a connection pool with the rest of the application.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn document_url(&self, email: &str) -> Result<Url, AllowListError> {
        let invalid = || AllowListError::InvalidEndpoint {
            base_url: self.base_url.clone(),
        };

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                &self.project_id,
                "databases",
                "(default)",
                "documents",
                &self.collection,
                email,
            ]);
        Ok(url)
    }
}

#[async_trait]
impl AllowList for FirestoreAllowList {
    async fn contains(
        &self,
        email: &str,
        credentials: Option<&SecretString>,
    ) -> Result<bool, AllowListError> {
        let url = self.document_url(email)?;
        let mut request = self.http.get(url);
        if let Some(token) = credentials {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(AllowListError::Status {
                status: status.as_u16(),
            }),
        }
    }
}

/// Allow-list configured in place.
#[derive(Debug, Clone, Default)]
pub struct StaticAllowList {
    emails: BTreeSet<String>,
}

impl StaticAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl AllowList for StaticAllowList {
    async fn contains(
        &self,
        email: &str,
        _credentials: Option<&SecretString>,
    ) -> Result<bool, AllowListError> {
        Ok(self.emails.contains(email))
    }
}
