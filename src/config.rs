use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::context::{RecorderProperties, is_odata_identifier, url_origin};

#[derive(Parser, Debug)]
#[command(name = "learning-recorder")]
#[command(about = "Records visits to learning pages on the hub site", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the page-load hook over HTTP (default)
    Serve,
    /// Run the page-load hook once for a single page
    Record {
        /// Absolute URL of the site (web) the page belongs to
        #[arg(long = "web-url")]
        web_url: String,
        /// Absolute URL of the page that was loaded
        #[arg(long = "page-url")]
        page_url: String,
    },
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".learning-recorder")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
}

fn default_port() -> u16 {
    8080
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SharePoint {
    /// Bearer token for the one-shot `record` command. Never used by `serve`.
    #[serde(default)]
    pub access_token: Option<String>,
    /// When set, `serve` only accepts pages on this tenant's origin.
    #[serde(default)]
    pub tenant_url: Option<String>,
}

impl SharePoint {
    pub fn token(&self) -> Option<String> {
        self.access_token.clone().filter(|t| !t.is_empty())
    }

    pub fn tenant_origin(&self) -> Result<Option<String>> {
        match self.tenant_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => Ok(Some(url_origin(url)?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    pub recorder: RecorderProperties,
    #[serde(default)]
    pub sharepoint: SharePoint,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let cfg = Config::load_config(path)?;
        Ok(cfg)
    }

    fn load_config(path: &str) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        if config.recorder.record_list_title.is_empty() {
            anyhow::bail!("recorder.record_list_title must not be empty");
        }
        if !is_odata_identifier(&config.recorder.verification_property_name) {
            anyhow::bail!(
                "recorder.verification_property_name {:?} is not a field internal name",
                config.recorder.verification_property_name
            );
        }
        config.sharepoint.tenant_origin().context("invalid sharepoint.tenant_url")?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            let Some(end) = result[actual_start..].find('}') else {
                break;
            };
            let expr = &result[actual_start + 2..actual_start + end];

            // ${VAR:-default}
            let env_value = match expr.split_once(":-") {
                Some((var, default_val)) => env::var(var).unwrap_or_else(|_| default_val.to_string()),
                None => env::var(expr).unwrap_or_else(|_| {
                    tracing::warn!(var = expr, "environment variable not found");
                    String::new()
                }),
            };

            result.replace_range(actual_start..actual_start + end + 1, &env_value);
            offset = actual_start + env_value.len();
        }

        Ok(result)
    }
}
