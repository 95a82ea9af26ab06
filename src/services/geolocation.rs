use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use crate::models::{Coordinates, LocateRequest};

/// Ways a position lookup can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unavailable,

    #[error("{0}")]
    Failed(String),

    #[error("superseded by a newer location request")]
    Superseded,
}

/// Asynchronous "get current position" capability
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Outcome of a lookup the browser already performed
#[derive(Debug, Clone, PartialEq)]
pub enum ReportedLocation {
    Position(Coordinates),
    Failed(String),
    Unsupported,
}

impl From<&LocateRequest> for ReportedLocation {
    fn from(req: &LocateRequest) -> Self {
        match (req.latitude, req.longitude, &req.error) {
            (Some(latitude), Some(longitude), _) => {
                ReportedLocation::Position(Coordinates::new(latitude, longitude))
            }
            (_, _, Some(error)) => ReportedLocation::Failed(error.clone()),
            (Some(_), None, None) | (None, Some(_), None) => {
                ReportedLocation::Failed("incomplete position".to_string())
            }
            (None, None, None) => ReportedLocation::Unsupported,
        }
    }
}

#[async_trait]
impl GeolocationProvider for ReportedLocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            ReportedLocation::Position(coords) => Ok(*coords),
            ReportedLocation::Failed(cause) => Err(GeolocationError::Failed(cause.clone())),
            ReportedLocation::Unsupported => Err(GeolocationError::Unavailable),
        }
    }
}

/// Body of an IP geolocation lookup
#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
}

/// Approximate position from an IP geolocation HTTP endpoint
///
/// Expects a JSON body carrying `latitude`/`longitude` (or `lat`/`lon`).
pub struct IpGeolocationClient {
    url: String,
    client: Client,
}

impl IpGeolocationClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl GeolocationProvider for IpGeolocationClient {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Failed(format!("lookup request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeolocationError::Failed(format!("lookup returned {}", status)));
        }

        let body: IpLocationResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Failed(format!("invalid lookup response: {}", e)))?;

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => {
                tracing::trace!("IP lookup resolved to ({}, {})", latitude, longitude);
                Ok(Coordinates::new(latitude, longitude))
            }
            _ => Err(GeolocationError::Failed("lookup response has no position".to_string())),
        }
    }
}
