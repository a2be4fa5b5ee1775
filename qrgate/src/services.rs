use std::path::PathBuf;
use std::sync::Arc;

use qrgate_auth::google::{
    GoogleConfig, GoogleEndpoints, GoogleIdentityProvider, SessionStore,
};
use qrgate_auth::{
    AllowList, AvatarFetcher, FirestoreAllowList, IdentityProvider,
    StaticAllowList,
};

use crate::config::{AllowListSettings, AppConfig};

/// External collaborators injected into the app.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) allow_list: Arc<dyn AllowList>,
    pub(crate) avatars: AvatarFetcher,
    pub(crate) export_dir: PathBuf,
}

impl Services {
    /// Build the Google provider and configured allow-list.
    ///
    /// An invalid allow-list config falls back to an empty list, so every
    /// sign-in is denied rather than waved through.
    pub(crate) fn from_config(config: AppConfig, session_dir: PathBuf) -> Self {
        let http = reqwest::Client::new();
        let google = GoogleConfig {
            client_id: config.google.client_id.clone(),
            client_secret: config.google.client_secret.clone(),
            redirect_port: config.google.redirect_port,
            firebase_api_key: config.google.firebase_api_key.clone(),
            endpoints: GoogleEndpoints::default(),
        };
        if !google.is_configured() {
            log::warn!(
                "google client id is not configured; sign-in will fail until \
                 {} is set",
                crate::config::ENV_CLIENT_ID
            );
        }
        let identity: Arc<dyn IdentityProvider> = Arc::new(
            GoogleIdentityProvider::new(
                google,
                SessionStore::in_dir(&session_dir),
            )
            .with_http_client(http.clone()),
        );

        let allow_list: Arc<dyn AllowList> = match config.validate() {
            Ok(()) => {
                let uses_firestore = matches!(
                    config.allow_list,
                    AllowListSettings::Firestore { .. }
                );
                if uses_firestore && config.google.firebase_api_key.is_none() {
                    log::warn!(
                        "no firebase api key; firestore lookups are sent \
                         without credentials (set {})",
                        crate::config::ENV_FIREBASE_API_KEY
                    );
                }
                allow_list_from_settings(&config.allow_list, &http)
            },
            Err(err) => {
                log::error!("{err}; denying all sign-ins");
                Arc::new(StaticAllowList::default())
            },
        };

        let export_dir = config
            .export_dir
            .unwrap_or_else(qrgate_render::default_export_dir);

        Self {
            identity,
            allow_list,
            avatars: AvatarFetcher::new(http),
            export_dir,
        }
    }
}

fn allow_list_from_settings(
    settings: &AllowListSettings,
    http: &reqwest::Client,
) -> Arc<dyn AllowList> {
    match settings {
        AllowListSettings::Firestore {
            project_id,
            collection,
            base_url,
        } => {
            log::info!(
                "allow-list: firestore project {project_id}, collection \
                 {collection}"
            );
            Arc::new(
                FirestoreAllowList::new(project_id, collection)
                    .with_base_url(base_url.clone())
                    .with_http_client(http.clone()),
            )
        },
        AllowListSettings::Static { emails } => {
            log::info!("allow-list: {} static entries", emails.len());
            Arc::new(StaticAllowList::new(emails.iter().cloned()))
        },
    }
}

#[cfg(test)]
impl Services {
    /// Services backed by in-memory fakes.
    pub(crate) fn fake(
        identity: Arc<qrgate_auth::testing::FakeIdentityProvider>,
        allow_list: Arc<qrgate_auth::testing::FakeAllowList>,
    ) -> Self {
        Self {
            identity,
            allow_list,
            avatars: AvatarFetcher::new(reqwest::Client::new()),
            export_dir: std::env::temp_dir().join("qrgate-tests"),
        }
    }
}
