use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

fn default_port() -> u16 {
    3001
}

#[derive(Deserialize)]
pub struct Env {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, deserialize_with = "kickoff_api_interview::filter_empty")]
    pub sentry_dsn: Option<String>,
    #[serde(default, deserialize_with = "kickoff_api_interview::filter_empty")]
    pub public_base_url: Option<String>,

    #[serde(flatten)]
    pub completion: kickoff_api_interview::CompletionEnv,
}

impl Env {
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}

static ENV: OnceLock<Env> = OnceLock::new();

pub fn env() -> &'static Env {
    ENV.get_or_init(|| {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        let _ = dotenvy::from_path(manifest_dir.join(".env"));
        envy::from_env().expect("Failed to load environment")
    })
}
