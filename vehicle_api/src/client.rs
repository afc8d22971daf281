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


use std::time::Duration;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{error, info, span, warn, Instrument, Level};
use lifecycle::VehicleRecord;
use crate::query::MatchQuery;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid api address `{0}`. `{1}`")]
    InvalidAddress(String, String),
    #[error("no vehicle matching `{0}`")]
    NoMatch(String),
    #[error("request to `{0}` failed. `{1}`")]
    NetworkFailure(String, String),
}

/// Result of a best match lookup. The UI decides what to show for each case.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(VehicleRecord),
    NotFound,
    NetworkError(String)
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn found(self) -> Option<VehicleRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            _ => None
        }
    }
}

impl From<Result<VehicleRecord, ApiError>> for LookupOutcome {
    fn from(res: Result<VehicleRecord, ApiError>) -> Self {
        match res {
            Ok(record) => LookupOutcome::Found(record),
            Err(ApiError::NoMatch(_)) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::NetworkError(e.to_string())
        }
    }
}

/// Client for the vehicle emissions API
#[derive(Debug, Clone)]
pub struct VehicleApiClient {
    http: reqwest::Client,
    base_url: Url
}

impl VehicleApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<VehicleApiClient, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidAddress(base_url.to_string(), e.to_string()))?;
        Ok(VehicleApiClient { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, pairs: &[(&str, String)]) -> Url {
        // base_url always ends in '/' so joining a relative path can't fail
        let mut url = self.base_url.join(path).unwrap_or_else(|_| self.base_url.clone());
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, val) in pairs {
                query.append_pair(key, val);
            }
        }
        url
    }

    pub fn cars_url(&self, limit: u32) -> Url {
        self.endpoint("cars", &[("limit", limit.to_string())])
    }

    pub fn match_url(&self, query: &MatchQuery) -> Url {
        self.endpoint("cars/match", &query.query_pairs())
    }

    pub fn lowest_emissions_url(&self, limit: u32) -> Url {
        self.endpoint("cars/lowest-emissions", &[("limit", limit.to_string())])
    }

    /// The full vehicle list, up to `limit` entries
    pub async fn list_cars(&self, limit: u32) -> Result<Vec<VehicleRecord>, ApiError> {
        let url = self.cars_url(limit);
        let span = span!(Level::INFO, "Fetching vehicle list", limit);
        async move {
            let cars: Vec<VehicleRecord> = self.get_json(url, None).await?;
            info!("Fetched {} vehicles", cars.len());
            Ok(cars)
        }.instrument(span).await
    }

    /// Vehicles with the lowest total lifecycle emissions, lowest first
    pub async fn lowest_emissions(&self, limit: u32) -> Result<Vec<VehicleRecord>, ApiError> {
        let url = self.lowest_emissions_url(limit);
        let span = span!(Level::INFO, "Fetching lowest emission vehicles", limit);
        async move {
            self.get_json(url, None).await
        }.instrument(span).await
    }

    pub async fn find_match(&self, query: &MatchQuery) -> LookupOutcome {
        let url = self.match_url(query);
        let span = span!(Level::INFO, "Looking up best match", query = %query);
        async move {
            let res: Result<VehicleRecord, ApiError> = self.get_json(url, Some(query)).await;
            match &res {
                Ok(record) => info!("Matched {}", record.title("unknown vehicle")),
                Err(ApiError::NoMatch(_)) => warn!("No vehicle matches {}", query),
                Err(e) => error!("{}", e)
            }
            LookupOutcome::from(res)
        }.instrument(span).await
    }

    /// Looks up both vehicles concurrently
    pub async fn find_pair(&self, vehicle_a: &MatchQuery, vehicle_b: &MatchQuery) -> (LookupOutcome, LookupOutcome) {
        tokio::join!(self.find_match(vehicle_a), self.find_match(vehicle_b))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: Option<&MatchQuery>) -> Result<T, ApiError> {
        let url_str = url.to_string();
        let response = self.http.get(url).send().await.map_err(|e| {
            ApiError::NetworkFailure(url_str.clone(), e.to_string())
        })?;
        check_status(&url_str, response.status(), query)?;
        response.json::<T>().await.map_err(|e| {
            ApiError::NetworkFailure(url_str, format!("couldn't decode response. {}", e))
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{}/", trimmed) };
    let url = Url::parse(&with_slash).map_err(|e| {
        ApiError::InvalidAddress(trimmed.to_string(), e.to_string())
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidAddress(trimmed.to_string(), format!("unsupported scheme {}", other)))
    }
}

/// A 404 from a lookup means nothing matched. Any other failure status is treated
/// the same as not reaching the server at all.
fn check_status(url: &str, status: StatusCode, query: Option<&MatchQuery>) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }
    match query {
        Some(q) if status == StatusCode::NOT_FOUND => Err(ApiError::NoMatch(q.to_string())),
        _ => Err(ApiError::NetworkFailure(url.to_string(), format!("server responded with {}", status)))
    }
}
