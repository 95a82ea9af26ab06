use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::core::{
    catalog::Catalog,
    resolver::{camera_for, region_focus, resolve_focus, results_camera},
    search::SearchEngine,
};
use crate::models::{
    CameraCommand, Coordinates, DetailView, FocusTarget, Hotel, HotelWithDistance, Notice,
    SearchParams, SessionOptions,
};
use crate::services::geolocation::{GeolocationError, GeolocationProvider};
use crate::services::notifier::Notifier;

/// Errors raised by UI events that reference unknown catalog entries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("Unknown hotel: {0}")]
    UnknownHotel(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Active map focus: the text that was resolved and what it resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Focus {
    pub location: String,
    pub target: FocusTarget,
}

/// Search inputs of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub selected_region: Option<String>,
    pub user_location: Option<Coordinates>,
    pub radius_km: f64,
    pub focus: Option<Focus>,
    /// Center resolved from the text query, used when no user location is set
    pub search_center: Option<Coordinates>,
}

impl SearchState {
    fn new(radius_km: f64) -> Self {
        Self {
            query: String::new(),
            selected_region: None,
            user_location: None,
            radius_km,
            focus: None,
            search_center: None,
        }
    }

    /// Point distances are measured from, user location first
    pub fn reference_point(&self) -> Option<Coordinates> {
        self.user_location.or(self.search_center)
    }

    fn params(&self) -> SearchParams {
        let reference_point = self.reference_point();
        SearchParams {
            query: self.query.clone(),
            region: self.selected_region.clone(),
            reference_point,
            radius_km: reference_point.map(|_| self.radius_km),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_hotel: Option<String>,
    pub detail: DetailView,
}

/// Pending delayed effects of the current focus request
#[derive(Debug, Default)]
struct FocusTimers {
    clear: Option<JoinHandle<()>>,
    reveal: Option<JoinHandle<()>>,
}

impl FocusTimers {
    fn cancel(&mut self) {
        for handle in [self.clear.take(), self.reveal.take()].into_iter().flatten() {
            handle.abort();
        }
    }
}

impl Drop for FocusTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug)]
struct SessionState {
    search: SearchState,
    selection: SelectionState,
    revealed: Vec<String>,
    focus_generation: u64,
    location_generation: u64,
    timers: FocusTimers,
}

/// Everything the presentation layer needs to render one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub hotels: Vec<HotelWithDistance>,
    pub total_results: usize,
    /// Viewport fitting all result markers
    pub markers_camera: Option<CameraCommand>,
    pub focus: Option<Focus>,
    pub focus_camera: Option<CameraCommand>,
    pub selected_hotel: Option<Hotel>,
    pub detail: DetailView,
    /// Hotel ids whose marker callout is open
    pub revealed_callouts: Vec<String>,
    pub search: SearchState,
}

/// Keeps list, markers, camera, selection and detail view of one session in sync
///
/// Every snapshot re-runs the search engine over the catalog. Focus requests
/// own a pair of timers (focus clear, callout reveal); a newer request aborts
/// the older pair, and a timer only acts if its request is still current.
/// Location requests are cancel-and-replace: only the latest one is applied.
pub struct ViewSynchronizer {
    catalog: Arc<Catalog>,
    engine: SearchEngine,
    options: SessionOptions,
    notifier: Arc<dyn Notifier>,
    state: Arc<Mutex<SessionState>>,
}

impl ViewSynchronizer {
    pub fn new(catalog: Arc<Catalog>, mut options: SessionOptions, notifier: Arc<dyn Notifier>) -> Self {
        if options.min_radius_km > options.max_radius_km {
            std::mem::swap(&mut options.min_radius_km, &mut options.max_radius_km);
        }
        let engine = SearchEngine::new(catalog.index().granularity());
        let radius = options
            .default_radius_km
            .clamp(options.min_radius_km, options.max_radius_km);

        Self {
            catalog,
            engine,
            options,
            notifier,
            state: Arc::new(Mutex::new(SessionState {
                search: SearchState::new(radius),
                selection: SelectionState::default(),
                revealed: Vec::new(),
                focus_generation: 0,
                location_generation: 0,
                timers: FocusTimers::default(),
            })),
        }
    }

    /// Query-text change
    pub async fn set_query(&self, text: &str) {
        let mut state = self.state.lock().await;
        self.apply_query(&mut state, text);
    }

    fn apply_query(&self, state: &mut SessionState, text: &str) {
        state.search.query = text.to_string();
        state.revealed.clear();
        if let Some(reveal) = state.timers.reveal.take() {
            reveal.abort();
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            state.search.user_location = None;
            state.search.selected_region = None;
            state.search.search_center = None;
            return;
        }

        let target = resolve_focus(self.catalog.hotels(), trimmed);
        if !target.is_none() {
            // A resolvable text search takes over from the device position
            state.search.user_location = None;
        }
        state.search.search_center = if self.options.center_on_match {
            target.center()
        } else {
            None
        };

        if let Some(region) = self.catalog.index().find_region(trimmed) {
            state.search.selected_region = Some(region.to_string());
        }

        tracing::debug!("Query set to {:?} (resolved: {})", trimmed, !target.is_none());
    }

    /// Suggestion pick or search submit: set the query, then focus the map on it
    pub async fn submit_search(&self, text: &str) -> FocusTarget {
        self.set_query(text).await;
        self.request_focus(text).await
    }

    /// Focus the map on a location string
    ///
    /// An unresolvable location leaves every piece of state untouched.
    pub async fn request_focus(&self, location: &str) -> FocusTarget {
        let target = resolve_focus(self.catalog.hotels(), location);
        self.apply_focus(location, target).await
    }

    /// Store the focus, replace its timers and notify; `None` changes nothing
    async fn apply_focus(&self, location: &str, target: FocusTarget) -> FocusTarget {
        if target.is_none() {
            tracing::debug!("No focus target for {:?}", location);
            return target;
        }

        let mut state = self.state.lock().await;
        state.focus_generation += 1;
        let generation = state.focus_generation;

        state.timers.cancel();
        state.revealed.clear();

        let callouts = match &target {
            FocusTarget::SingleHotel { hotel_id, .. } => vec![hotel_id.clone()],
            FocusTarget::RegionBounds { bounds } => self
                .engine
                .filter(self.catalog.hotels(), &state.search.params())
                .hotels
                .into_iter()
                .filter(|h| bounds.contains(&h.hotel.coordinates))
                .map(|h| h.hotel.id)
                .collect(),
            FocusTarget::None => Vec::new(),
        };

        state.search.focus = Some(Focus {
            location: location.to_string(),
            target: target.clone(),
        });

        let timing = self.options.timing;
        state.timers.clear = Some(self.schedule(generation, timing.clear_after, |s| {
            s.search.focus = None;
        }));
        state.timers.reveal = Some(self.schedule(generation, timing.callout_after, move |s| {
            s.revealed = callouts;
        }));
        drop(state);

        tracing::info!("Map focused on {:?}", location);
        self.notifier.notify(Notice::info(
            "Location focused",
            format!("Map centered on \"{}\"", location),
        ));

        target
    }

    /// Run `apply` after `delay` if focus request `generation` is still current
    fn schedule<F>(&self, generation: u64, delay: Duration, apply: F) -> JoinHandle<()>
    where
        F: FnOnce(&mut SessionState) + Send + 'static,
    {
        let state = Arc::downgrade(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.lock().await;
            if state.focus_generation == generation {
                apply(&mut state);
            }
        })
    }

    /// Region chip click: select and focus, or deselect when already selected
    pub async fn toggle_region(&self, region: &str) -> Result<(), SyncError> {
        if !self.catalog.index().has_region(region) {
            return Err(SyncError::UnknownRegion(region.to_string()));
        }

        {
            let mut state = self.state.lock().await;
            if state.search.selected_region.as_deref() == Some(region) {
                state.search.selected_region = None;
                return Ok(());
            }
            state.search.selected_region = Some(region.to_string());
        }

        let target = region_focus(self.catalog.hotels(), region, self.catalog.index().granularity());
        self.apply_focus(region, target).await;
        Ok(())
    }

    /// Radius slider change, clamped to the configured bounds
    pub async fn set_radius(&self, radius_km: f64) -> f64 {
        let mut state = self.state.lock().await;
        if radius_km.is_finite() {
            state.search.radius_km = radius_km.clamp(self.options.min_radius_km, self.options.max_radius_km);
        }
        state.search.radius_km
    }

    /// Marker or list item click: select the hotel and open its detail view
    pub async fn select_hotel(&self, hotel_id: &str) -> Result<(), SyncError> {
        if self.catalog.hotel(hotel_id).is_none() {
            return Err(SyncError::UnknownHotel(hotel_id.to_string()));
        }

        let mut state = self.state.lock().await;
        state.selection.selected_hotel = Some(hotel_id.to_string());
        state.selection.detail = DetailView::Open;
        Ok(())
    }

    /// Close the detail view; the selection itself is kept
    pub async fn close_detail(&self) {
        self.state.lock().await.selection.detail = DetailView::Closed;
    }

    /// "Near me": look up the device position and make it the reference point
    ///
    /// Failures are surfaced as notices and change nothing. A response that
    /// arrives after a newer request was issued is dropped.
    pub async fn use_current_location(
        &self,
        provider: &dyn GeolocationProvider,
    ) -> Result<Coordinates, GeolocationError> {
        let generation = {
            let mut state = self.state.lock().await;
            state.location_generation += 1;
            state.location_generation
        };

        let outcome = provider.current_position().await.and_then(|coords| {
            coords
                .validate()
                .map(|_| coords)
                .map_err(|e| GeolocationError::Failed(e.to_string()))
        });

        let mut state = self.state.lock().await;
        if state.location_generation != generation {
            tracing::debug!("Dropping superseded location request {}", generation);
            return Err(GeolocationError::Superseded);
        }

        match outcome {
            Ok(coords) => {
                state.search.user_location = Some(coords);
                state.search.query.clear();
                state.search.search_center = None;
                state.revealed.clear();
                drop(state);

                tracing::info!("User location set to ({}, {})", coords.latitude, coords.longitude);
                self.notifier.notify(Notice::info(
                    "Location detected",
                    "Showing hotels near your current location",
                ));
                Ok(coords)
            }
            Err(GeolocationError::Unavailable) => {
                drop(state);
                tracing::warn!("Geolocation capability unavailable");
                self.notifier.notify(Notice::warning(
                    "Not supported",
                    "Geolocation is not supported by your browser",
                ));
                Err(GeolocationError::Unavailable)
            }
            Err(e) => {
                drop(state);
                tracing::warn!("Geolocation failed: {}", e);
                self.notifier.notify(Notice::warning(
                    "Location error",
                    format!("Unable to get your location ({}). Please check permissions.", e),
                ));
                Err(e)
            }
        }
    }

    /// Drop the user location
    pub async fn clear_location(&self) {
        self.state.lock().await.search.user_location = None;
    }

    pub async fn search_state(&self) -> SearchState {
        self.state.lock().await.search.clone()
    }

    pub async fn selection(&self) -> SelectionState {
        self.state.lock().await.selection.clone()
    }

    /// Recompute results and derive the full view
    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.lock().await;
        let result = self.engine.filter(self.catalog.hotels(), &state.search.params());
        let camera = &self.options.camera;

        ViewSnapshot {
            total_results: result.hotels.len(),
            markers_camera: results_camera(&result.hotels, camera),
            hotels: result.hotels,
            focus_camera: state.search.focus.as_ref().and_then(|f| camera_for(&f.target, camera)),
            focus: state.search.focus.clone(),
            selected_hotel: state
                .selection
                .selected_hotel
                .as_deref()
                .and_then(|id| self.catalog.hotel(id))
                .cloned(),
            detail: state.selection.detail,
            revealed_callouts: state.revealed.clone(),
            search: state.search.clone(),
        }
    }
}
