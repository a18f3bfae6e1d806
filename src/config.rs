//! Server configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once at startup from `.env`/environment
/// variables with sensible defaults for local development.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Root directory under which `certificates/` and `services/` are
    /// created lazily on first write.
    pub data_dir: PathBuf,
    /// Logo asset drawn on every document; a missing file is tolerated.
    pub logo_path: PathBuf,
    /// Extra CORS origin on top of the local development defaults.
    pub cors_allowed_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let logo_path = env::var("LOGO_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static/logo.png"));
        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN").ok();

        AppConfig {
            bind_addr,
            port,
            data_dir,
            logo_path,
            cors_allowed_origin,
        }
    }

    pub fn certificates_dir(&self) -> PathBuf {
        self.data_dir.join("certificates")
    }

    pub fn services_dir(&self) -> PathBuf {
        self.data_dir.join("services")
    }

    pub fn certificate_path(&self, certificate_id: &str) -> PathBuf {
        self.certificates_dir().join(format!("{certificate_id}.pdf"))
    }

    pub fn service_path(&self, service_id: &str) -> PathBuf {
        self.services_dir().join(format!("{service_id}.pdf"))
    }

    /// The logo path, or `None` when the asset file does not exist.
    pub fn logo(&self) -> Option<PathBuf> {
        self.logo_path.exists().then(|| self.logo_path.clone())
    }
}
