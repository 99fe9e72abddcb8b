// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Settings from the optional TOML config file.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "flashdeck.toml";

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Contents of the config file. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open_browser: Option<bool>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Fallible<Self> {
        toml::from_str(content).map_err(|e| ErrorReport::new(format!("invalid config: {e}")))
    }

    /// Read the file at `path`, or the default file if it exists. A missing
    /// default file means an empty config; a missing explicit one is an error.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path: PathBuf = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        log::debug!("Reading config from {}", path.display());
        Self::parse(&read_to_string(&path)?)
    }
}

/// Command-line values; each overrides the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open_browser: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

impl Settings {
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            open_browser: overrides.open_browser.or(file.open_browser).unwrap_or(true),
        }
    }

    pub fn load(config: Option<&Path>, overrides: Overrides) -> Fallible<Self> {
        Ok(Self::resolve(ConfigFile::load(config)?, overrides))
    }
}
