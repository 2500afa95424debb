use crate::storage::STORAGE_KEY;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = env::var("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path());

        Self { port, data_path }
    }
}

pub fn default_data_path() -> PathBuf {
    PathBuf::from("data").join(format!("{STORAGE_KEY}.json"))
}
