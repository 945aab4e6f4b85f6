use std::path::PathBuf;

use serde::{Serialize, Deserialize};

pub const CONFIG_NAME : &str = "swumeta_server";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SServerConfig {
    pub site_dir: PathBuf,
    pub address: String,
    pub port: u16,
}

impl Default for SServerConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            address: String::from("127.0.0.1"),
            port: 8080,
        }
    }
}

impl SServerConfig {
    pub fn load() -> Result<Self, String> {
        confy::load(CONFIG_NAME, None).map_err(|e| format!("Failed to load {} config with: {}", CONFIG_NAME, e))
    }

    pub fn store(&self) -> Result<(), String> {
        confy::store(CONFIG_NAME, None, self).map_err(|e| format!("Failed to store {} config with: {}", CONFIG_NAME, e))
    }

    pub fn site_dir(mut self, val: Option<PathBuf>) -> Self {
        if let Some(dir) = val {
            self.site_dir = dir;
        }
        self
    }

    pub fn port(mut self, val: Option<u16>) -> Self {
        if let Some(port) = val {
            self.port = port;
        }
        self
    }
}
