//! Verbatim persistence of fetched bodies.

use std::path::PathBuf;

use dissect_core::{ContentType, DumpError};
use tokio::io::AsyncWriteExt;

/// File name for a DMAP-tagged body.
pub const DAAP_DUMP_FILE: &str = "daap_server_response";

/// File name for a binary plist body.
pub const AIRPLAY_DUMP_FILE: &str = "airplay_server_response.bplist";

/// Writes raw bodies to one fixed file per format.
#[derive(Debug, Clone)]
pub struct BodyDump {
    dir: PathBuf,
    enabled: bool,
}

impl Default for BodyDump {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            enabled: true,
        }
    }
}

impl BodyDump {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
        }
    }

    /// A dump that never writes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn file_name(content_type: ContentType) -> &'static str {
        match content_type {
            ContentType::DmapTagged => DAAP_DUMP_FILE,
            ContentType::BinaryPlist => AIRPLAY_DUMP_FILE,
        }
    }

    pub fn path_for(&self, content_type: ContentType) -> PathBuf {
        self.dir.join(Self::file_name(content_type))
    }

    /// Write `body` unchanged, replacing any previous dump of the same format.
    ///
    /// Returns the written path, or `None` when dumping is disabled. Files are
    /// created owner read/write only on unix.
    pub async fn write(
        &self,
        content_type: ContentType,
        body: &[u8],
    ) -> Result<Option<PathBuf>, DumpError> {
        if !self.enabled {
            return Ok(None);
        }

        let path = self.path_for(content_type);
        let wrap = |source| DumpError {
            path: path.clone(),
            source,
        };

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&path).await.map_err(wrap)?;
        file.write_all(body).await.map_err(wrap)?;
        file.flush().await.map_err(wrap)?;

        tracing::info!(bytes = body.len(), "Wrote {}", path.display());
        Ok(Some(path))
    }
}
