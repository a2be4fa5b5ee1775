use iced::widget::image;
use qrgate_auth::Identity;

/// Display image lifecycle for the signed-in identity.
#[derive(Debug, Clone, Default)]
pub(crate) enum Avatar {
    #[default]
    None,
    Loading {
        url: String,
    },
    Ready(image::Handle),
    Failed,
}

/// Chrome state: who is signed in and their display image.
#[derive(Debug, Default)]
pub(crate) struct ChromeState {
    identity: Option<Identity>,
    avatar: Avatar,
}

impl ChromeState {
    pub(crate) fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub(crate) fn avatar_handle(&self) -> Option<&image::Handle> {
        match &self.avatar {
            Avatar::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    /// Replace the identity. Returns the image URL to fetch, if any.
    pub(crate) fn set_identity(
        &mut self,
        identity: Option<Identity>,
    ) -> Option<String> {
        if identity == self.identity {
            return None;
        }

        let url = identity.as_ref().and_then(|id| id.photo_url.clone());
        self.avatar = match &url {
            Some(url) => Avatar::Loading { url: url.clone() },
            None => Avatar::None,
        };
        self.identity = identity;
        url
    }

    /// Apply a fetched image if it still belongs to the current identity.
    pub(crate) fn apply_avatar(
        &mut self,
        url: &str,
        result: Result<Vec<u8>, String>,
    ) -> bool {
        let matches = matches!(
            &self.avatar,
            Avatar::Loading { url: pending } if pending == url
        );
        if !matches {
            return false;
        }

        self.avatar = match result {
            Ok(bytes) => Avatar::Ready(image::Handle::from_bytes(bytes)),
            Err(message) => {
                log::warn!("avatar fetch failed: {message}");
                Avatar::Failed
            },
        };
        true
    }
}
