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


use tracing::{error, info, warn};
use lifecycle::{Catalog, VehicleRecord};
use vehicle_api::{ApiError, VehicleApiClient};
use crate::settings::GlobalSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded(usize),
    Failed(String)
}

impl LoadState {
    pub fn describe(&self) -> String {
        match self {
            LoadState::NotLoaded => "Not loaded".to_string(),
            LoadState::Loading => "Loading...".to_string(),
            LoadState::Loaded(count) => format!("{} vehicles loaded", count),
            LoadState::Failed(reason) => format!("Failed to load vehicle list. {}", reason)
        }
    }
}

pub struct ApplicationData {
    pub(crate) settings: GlobalSettings,
    api: Result<VehicleApiClient, ApiError>,
    pub(crate) catalog: Catalog,
    pub(crate) catalog_state: LoadState,
    pub(crate) lowest_emissions: Vec<VehicleRecord>,
    refresh_generation: u64
}

impl ApplicationData {
    pub(crate) fn new() -> ApplicationData {
        let settings = GlobalSettings::load().unwrap_or_else(|e| {
            warn!("Failed to load settings. {}", e.to_string());
            GlobalSettings::default()
        });
        ApplicationData::with_settings(settings)
    }

    pub(crate) fn with_settings(settings: GlobalSettings) -> ApplicationData {
        info!("Vehicle API address set to {}", settings.api_base_url());
        let api = Self::create_client(&settings);
        ApplicationData {
            settings,
            api,
            catalog: Catalog::default(),
            catalog_state: LoadState::NotLoaded,
            lowest_emissions: Vec::new(),
            refresh_generation: 0
        }
    }

    fn create_client(settings: &GlobalSettings) -> Result<VehicleApiClient, ApiError> {
        VehicleApiClient::new(settings.api_base_url(), settings.request_timeout()).map_err(|e| {
            error!("Failed to create API client. {}", e.to_string());
            e
        })
    }

    /// A handle to the API client for use in a background command
    pub(crate) fn api(&self) -> Result<VehicleApiClient, ApiError> {
        self.api.clone()
    }

    /// Switches to a new API address. The settings are only changed and written if a
    /// client can be created for the address.
    pub(crate) fn update_api_base_url(&mut self, new_url: &str) -> Result<(), String> {
        let mut new_settings = self.settings.clone();
        new_settings.set_api_base_url(new_url);
        let client = Self::create_client(&new_settings).map_err(|e| e.to_string())?;
        self.settings = new_settings;
        self.api = Ok(client);
        match self.settings.write() {
            Ok(_) => { info!("Wrote settings successfully"); }
            Err(e) => { error!("Failed to write settings. {}", e.to_string()); }
        }
        Ok(())
    }

    /// Marks the catalog as loading and starts a new refresh generation. Responses
    /// tagged with an older generation were requested before the latest refresh, possibly
    /// from a different API address, and are dropped.
    pub(crate) fn begin_refresh(&mut self) -> u64 {
        self.refresh_generation += 1;
        self.catalog_state = LoadState::Loading;
        self.refresh_generation
    }

    fn is_current_refresh(&self, generation: u64) -> bool {
        if generation != self.refresh_generation {
            info!("Ignoring stale response for refresh {} (current {})", generation, self.refresh_generation);
            return false;
        }
        true
    }

    /// Returns whether the result was applied
    pub(crate) fn update_catalog(&mut self, generation: u64, result: Result<Vec<VehicleRecord>, ApiError>) -> bool {
        if !self.is_current_refresh(generation) {
            return false;
        }
        match result {
            Ok(records) => {
                info!("Catalog refreshed with {} vehicles", records.len());
                self.catalog_state = LoadState::Loaded(records.len());
                self.catalog = Catalog::new(records);
            }
            Err(e) => {
                error!("Failed to load vehicle list. {}", e.to_string());
                self.catalog_state = LoadState::Failed(e.to_string());
            }
        }
        true
    }

    pub(crate) fn update_lowest_emissions(&mut self, generation: u64, result: Result<Vec<VehicleRecord>, ApiError>) -> bool {
        if !self.is_current_refresh(generation) {
            return false;
        }
        match result {
            Ok(records) => {
                info!("Found {} lowest emission vehicles", records.len());
                self.lowest_emissions = records;
            }
            Err(e) => {
                warn!("Failed to load lowest emission vehicles. {}", e.to_string());
                self.lowest_emissions.clear();
            }
        }
        true
    }
}
