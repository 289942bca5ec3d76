//! Server settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then configuration file, then `CAMPUS_*`
//! environment variables, then command-line flags.

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_MAX_UPLOAD_BYTES, ImagePolicy};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Settings for the HTTP server and its on-disk state.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Directory holding `users.json`, `incidents.json`, and `alerts.json`.
    pub data_dir: Option<String>,
    /// Directory receiving uploaded images.
    pub upload_dir: Option<String>,
    /// Per-file upload limit in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Write the demo accounts when `users.json` does not exist yet.
    #[ortho_config(default = true)]
    pub seed_demo_users: bool,
}

impl AppSettings {
    /// Address pair handed to `HttpServer::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Data directory, `./data` unless configured.
    #[must_use]
    pub fn data_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    /// Upload directory, `./uploads` unless configured.
    #[must_use]
    pub fn upload_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.upload_dir.as_deref().unwrap_or(DEFAULT_UPLOAD_DIR))
    }

    /// Upload admission rules derived from the byte limit.
    #[must_use]
    pub fn image_policy(&self) -> ImagePolicy {
        ImagePolicy::new(self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES))
    }
}
