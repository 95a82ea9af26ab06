use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::models::{CameraSettings, FocusTiming, RegionGranularity, SessionOptions};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub search: SearchSettings,
    pub map: MapSettings,
    pub focus: FocusSettings,
    pub sessions: SessionSettings,
    pub geolocation: GeolocationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub path: String,
    pub granularity: RegionGranularity,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: "data/hotels.json".to_string(),
            granularity: RegionGranularity::State,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub default_radius_km: f64,
    pub min_radius_km: f64,
    pub max_radius_km: f64,
    pub center_on_match: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: 10.0,
            min_radius_km: 1.0,
            max_radius_km: 50.0,
            center_on_match: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub close_zoom: u8,
    pub fly_duration_ms: u64,
    pub padding_px: u32,
    pub region_max_zoom: u8,
    pub results_max_zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        let camera = CameraSettings::default();
        Self {
            close_zoom: camera.close_zoom,
            fly_duration_ms: camera.fly_duration_ms,
            padding_px: camera.padding_px,
            region_max_zoom: camera.region_max_zoom,
            results_max_zoom: camera.results_max_zoom,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    pub clear_after_ms: u64,
    pub callout_after_ms: u64,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            clear_after_ms: 2000,
            callout_after_ms: 1800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub max_sessions: u64,
    pub idle_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle_secs: 1800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeolocationSettings {
    /// IP lookup used when the browser reports no capability; disabled when unset
    pub ip_lookup_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            ip_lookup_url: None,
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HOTEL_SCOUT)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HOTEL_SCOUT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HOTEL_SCOUT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HOTEL_SCOUT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Per-session tunables derived from the search, map and focus sections
    pub fn session_options(&self) -> SessionOptions {
        let (min_radius_km, max_radius_km) = if self.search.min_radius_km <= self.search.max_radius_km {
            (self.search.min_radius_km, self.search.max_radius_km)
        } else {
            tracing::warn!(
                "search.min_radius_km ({}) exceeds max_radius_km ({}), swapping",
                self.search.min_radius_km,
                self.search.max_radius_km
            );
            (self.search.max_radius_km, self.search.min_radius_km)
        };

        SessionOptions {
            default_radius_km: self.search.default_radius_km,
            min_radius_km,
            max_radius_km,
            center_on_match: self.search.center_on_match,
            camera: CameraSettings {
                close_zoom: self.map.close_zoom,
                fly_duration_ms: self.map.fly_duration_ms,
                padding_px: self.map.padding_px,
                region_max_zoom: self.map.region_max_zoom,
                results_max_zoom: self.map.results_max_zoom,
            },
            timing: FocusTiming {
                clear_after: Duration::from_millis(self.focus.clear_after_ms),
                callout_after: Duration::from_millis(self.focus.callout_after_ms),
            },
        }
    }
}
