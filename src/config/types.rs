use mediaforge_av::MediaKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Directory converted files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Media kind assumed when a request does not name one
    #[serde(default = "default_kind")]
    pub default_kind: MediaKind,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_kind() -> MediaKind {
    MediaKind::Video
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_kind: default_kind(),
        }
    }
}
