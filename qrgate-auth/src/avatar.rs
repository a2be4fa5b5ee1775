use crate::errors::AvatarError;

/// Profile images beyond this size are refused.
pub const MAX_AVATAR_BYTES: usize = 1024 * 1024;

/// Downloads profile images over a shared HTTP client.
#[derive(Debug, Clone)]
pub struct AvatarFetcher {
    http: reqwest::Client,
    max_bytes: usize,
}

impl AvatarFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            max_bytes: MAX_AVATAR_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Download the image at `photo_url`, stopping once it exceeds the cap.
    pub async fn fetch(&self, photo_url: &str) -> Result<Vec<u8>, AvatarError> {
        let too_large = AvatarError::TooLarge {
            limit: self.max_bytes,
        };

        let mut response =
            self.http.get(photo_url).send().await?.error_for_status()?;
        if response
            .content_length()
            .is_some_and(|length| length > self.max_bytes as u64)
        {
            return Err(too_large);
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(too_large);
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}
