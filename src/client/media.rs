//! Media downloads.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use url::Url;

use crate::transport::{HttpClient, HttpRequest};

use super::{MediaError, WhatsAppClient};

/// File stem used when the caller does not choose one.
pub const DEFAULT_MEDIA_STEM: &str = "temp";

impl<H: HttpClient> WhatsAppClient<H> {
    /// Downloads media from a provider media URL into a local file.
    ///
    /// The request carries the same authorization headers as every send.
    /// The file is written to `{file_stem}.{subtype}`, where `subtype` is
    /// the part of `mime_type` after the `/` (parameters stripped), and
    /// `file_stem` defaults to [`DEFAULT_MEDIA_STEM`]. Returns the path
    /// written.
    ///
    /// # Errors
    ///
    /// - [`MediaError::InvalidMimeType`] before any request if `mime_type`
    ///   has no subtype
    /// - [`MediaError::Transport`] if no response arrives
    /// - [`MediaError::Status`] for a non-success status
    /// - [`MediaError::Write`] if the file cannot be written
    pub async fn download_media(
        &self,
        media_url: Url,
        mime_type: &str,
        file_stem: Option<&Path>,
    ) -> Result<PathBuf, MediaError> {
        let extension = media_extension(mime_type)
            .ok_or_else(|| MediaError::InvalidMimeType(mime_type.to_string()))?;

        tracing::info!(url = %media_url, mime_type, "Downloading media");
        let request = HttpRequest::get(media_url).with_headers(self.config().headers().clone());
        let response = self.http().request(request).await?;

        if !response.is_success() {
            tracing::warn!(status = %response.status, "Media download failed");
            return Err(MediaError::Status {
                status: response.status,
            });
        }

        let path = media_path(file_stem.unwrap_or_else(|| Path::new(DEFAULT_MEDIA_STEM)), extension);
        tokio::fs::write(&path, &response.body)
            .await
            .map_err(|source| MediaError::Write {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), bytes = response.body.len(), "Media downloaded");
        Ok(path)
    }
}

/// `image/jpeg` -> `jpeg`, `audio/ogg; codecs=opus` -> `ogg`.
fn media_extension(mime_type: &str) -> Option<&str> {
    let (_, subtype) = mime_type.split_once('/')?;
    let subtype = subtype.split(';').next().unwrap_or_default().trim();
    (!subtype.is_empty()).then_some(subtype)
}

fn media_path(stem: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
