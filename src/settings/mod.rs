/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of eco-compare.
 *
 * eco-compare is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * eco-compare is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with eco-compare. If not, see <https://www.gnu.org/licenses/>.
 */


use std::{fs, io};
use std::time::Duration;
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("config error. `{0}`")]
    Config(#[from] ConfigError),
    #[error("io error")]
    Io(#[from] io::Error),
    #[error("failed to encode settings to toml. `{0}`")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalSettings {
    api_base_url: String,
    catalog_limit: u32,
    request_timeout_secs: u64,
    lowest_emissions_limit: u32
}

impl GlobalSettings {
    const API_BASE_URL: &'static str = "api_base_url";
    const CATALOG_LIMIT: &'static str = "catalog_limit";
    const REQUEST_TIMEOUT_SECS: &'static str = "request_timeout_secs";
    const LOWEST_EMISSIONS_LIMIT: &'static str = "lowest_emissions_limit";
    const CONFIG_FILENAME: &'static str = "eco-compare-conf";

    pub const DEFAULT_API_BASE_URL: &'static str = "http://127.0.0.1:8000";
    const DEFAULT_CATALOG_LIMIT: u32 = 10000;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_LOWEST_EMISSIONS_LIMIT: u32 = 5;

    pub fn default() -> Self {
        GlobalSettings {
            api_base_url: GlobalSettings::DEFAULT_API_BASE_URL.to_string(),
            catalog_limit: GlobalSettings::DEFAULT_CATALOG_LIMIT,
            request_timeout_secs: GlobalSettings::DEFAULT_REQUEST_TIMEOUT_SECS,
            lowest_emissions_limit: GlobalSettings::DEFAULT_LOWEST_EMISSIONS_LIMIT
        }
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default(GlobalSettings::API_BASE_URL, GlobalSettings::DEFAULT_API_BASE_URL)?
            .set_default(GlobalSettings::CATALOG_LIMIT, GlobalSettings::DEFAULT_CATALOG_LIMIT as i64)?
            .set_default(GlobalSettings::REQUEST_TIMEOUT_SECS, GlobalSettings::DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default(GlobalSettings::LOWEST_EMISSIONS_LIMIT, GlobalSettings::DEFAULT_LOWEST_EMISSIONS_LIMIT as i64)
    }

    /// Loads the settings file from the working directory with `APP_` prefixed
    /// environment variables layered on top. If the file can't be read the defaults
    /// are used and written out so there's a file to edit next time.
    pub fn load() -> Result<Self, SettingsError> {
        return match GlobalSettings::builder_with_defaults()?
            .add_source(config::File::with_name(GlobalSettings::CONFIG_FILENAME))
            .add_source(config::Environment::with_prefix("APP"))
            .build() {
            Ok(settings) => {
                Ok(settings.try_deserialize()?)
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                let settings = GlobalSettings::builder_with_defaults()?
                    .add_source(config::Environment::with_prefix("APP"))
                    .build()?;
                let ret: GlobalSettings = settings.try_deserialize()?;
                ret.write().unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
                Ok(ret)
            }
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn set_api_base_url(&mut self, new_url: &str) {
        self.api_base_url = new_url.trim().to_string();
    }

    pub fn catalog_limit(&self) -> u32 {
        self.catalog_limit
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn lowest_emissions_limit(&self) -> u32 {
        self.lowest_emissions_limit
    }

    pub fn write(&self) -> Result<(), SettingsError> {
        fs::write(format!("{}.toml", GlobalSettings::CONFIG_FILENAME), toml::to_string(&self)?)?;
        Ok(())
    }
}
