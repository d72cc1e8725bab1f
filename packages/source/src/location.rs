//! Where a resource is read from.

use std::fmt;
use std::path::PathBuf;

use crate::{FetchOptions, SourceError, retry};

/// Location string selecting the built-in FIPS state-name table.
pub const BUILTIN_FIPS: &str = "builtin:fips";

/// A resource location parsed from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// An `http://` or `https://` URL.
    Remote(String),
    /// A file on the local filesystem.
    Local(PathBuf),
    /// The compiled-in FIPS state-name table.
    BuiltinFips,
}

impl ResourceLocation {
    /// Parses a location string. URLs are recognized by scheme; everything
    /// else is treated as a file path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed == BUILTIN_FIPS {
            Self::BuiltinFips
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }

    /// Reads the resource as text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or file read fails, or
    /// [`SourceError::NotReadable`] for [`ResourceLocation::BuiltinFips`],
    /// which has no textual form.
    pub async fn read_text(
        &self,
        client: &reqwest::Client,
        options: &FetchOptions,
    ) -> Result<String, SourceError> {
        match self {
            Self::Remote(url) => {
                log::debug!("GET {url}");
                retry::send_text(
                    || {
                        let request = client.get(url);
                        match options.timeout {
                            Some(timeout) => request.timeout(timeout),
                            None => request,
                        }
                    },
                    options.retries,
                )
                .await
            }
            Self::Local(path) => {
                log::debug!("Reading {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            Self::BuiltinFips => Err(SourceError::NotReadable {
                location: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::BuiltinFips => write!(f, "{BUILTIN_FIPS}"),
        }
    }
}
