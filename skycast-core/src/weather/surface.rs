//! Per-surface fetch state machine
//!
//! Each display surface moves through `Empty -> Loading -> {Ready, Failed}`
//! and back to `Loading` on every re-trigger. Two guards make sure at most
//! one fetch result is applied per surface:
//! - every [`SurfaceState::begin`] hands out a fresh [`RequestId`]
//! - [`SurfaceState::complete`] and [`SurfaceState::fail`] drop any result
//!   whose id is not the pending one
//!
//! The task layer additionally cancels the superseded request's token, so
//! a stale result usually never arrives at all.
//!
//! A warm surface (one that has shown data before) keeps its last snapshot
//! under a newer error and refreshes without a loading message. Warmth is
//! tied to the place the snapshot was fetched for: beginning a fetch for a
//! different coordinate drops the old snapshot and shows the loading
//! message again.

use std::fmt;

use crate::error::FetchError;
use crate::location::Coordinate;
use crate::status::Status;

/// Forecast steps (3 hours each) shown per extended-forecast page.
pub const FORECAST_STEPS_PER_PAGE: usize = 8;

/// One of the two independently timed weather displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Current,
    Extended,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Current, Surface::Extended];

    /// Number of carousel pages the surface rotates through.
    pub fn page_count(self) -> usize {
        match self {
            Surface::Current => 4,
            Surface::Extended => 5,
        }
    }

    /// Message shown while a cold surface loads.
    pub fn loading_message(self) -> &'static str {
        match self {
            Surface::Current => "Fetching current weather...",
            Surface::Extended => "Fetching extended forecast...",
        }
    }

    /// Short key used for task and timer names.
    pub fn key(self) -> &'static str {
        match self {
            Surface::Current => "current",
            Surface::Extended => "extended",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Identity of one fetch issued for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a surface is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Empty,
    Loading,
    Ready,
    Failed,
}

/// Fetch bookkeeping and last good value for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState<T> {
    surface: Surface,
    phase: Phase,
    data: Option<T>,
    /// Place that `data` and the pending fetch belong to.
    target: Option<Coordinate>,
    status: Status,
    pending: Option<RequestId>,
    issued: u64,
}

impl<T> SurfaceState<T> {
    /// Create a new empty state for `surface`.
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            phase: Phase::Empty,
            data: None,
            target: None,
            status: Status::new(),
            pending: None,
            issued: 0,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Id of the fetch whose result will be accepted, if any.
    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    /// Last successful value, kept across later errors.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Whether a previous fetch succeeded.
    pub fn is_warm(&self) -> bool {
        self.data.is_some()
    }

    /// Coordinate of the held snapshot or the fetch in flight.
    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    /// Enter `Loading` for `target` and issue the id the eventual result
    /// must carry.
    ///
    /// Any previously pending id is superseded. A snapshot held for another
    /// coordinate is dropped, so the surface goes cold.
    pub fn begin(&mut self, target: Coordinate) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);
        if let Some(previous) = self.pending.replace(id) {
            tracing::debug!(surface = %self.surface, %previous, next = %id, "superseding fetch");
        }
        if self.target.replace(target) != Some(target) && self.data.take().is_some() {
            tracing::debug!(surface = %self.surface, %id, "place changed, dropping snapshot");
        }
        self.phase = Phase::Loading;
        if !self.is_warm() {
            self.status.set_loading(self.surface.loading_message());
        }
        id
    }

    /// Apply a successful result. Returns `false` if `id` is stale.
    pub fn complete(&mut self, id: RequestId, value: T) -> bool {
        if !self.accept(id) {
            return false;
        }
        self.data = Some(value);
        self.phase = Phase::Ready;
        self.status.set_idle("");
        true
    }

    /// Apply a failure. Stale ids and cancellations are dropped.
    pub fn fail(&mut self, id: RequestId, error: &FetchError) -> bool {
        if error.is_cancelled() {
            tracing::debug!(surface = %self.surface, %id, "fetch cancelled");
            if self.pending == Some(id) {
                self.pending = None;
            }
            return false;
        }
        if !self.accept(id) {
            return false;
        }
        self.phase = Phase::Failed;
        self.status.set_error(error.to_string());
        true
    }

    /// Fail without issuing a request, abandoning whatever is pending.
    ///
    /// Used when there is nothing to fetch for. The last snapshot belonged
    /// to a place that is no longer selected, so it is dropped.
    pub fn fail_now(&mut self, error: &FetchError) {
        if let Some(previous) = self.pending.take() {
            tracing::debug!(surface = %self.surface, %previous, "abandoning fetch");
        }
        self.data = None;
        self.target = None;
        self.phase = Phase::Failed;
        self.status.set_error(error.to_string());
    }

    fn accept(&mut self, id: RequestId) -> bool {
        if self.pending != Some(id) {
            tracing::debug!(
                surface = %self.surface,
                %id,
                pending = ?self.pending,
                "discarding stale fetch result"
            );
            return false;
        }
        self.pending = None;
        true
    }
}

/// Group forecast steps into day pages, at most one per carousel page.
pub fn forecast_pages<T>(steps: &[T]) -> Vec<&[T]> {
    steps
        .chunks(FORECAST_STEPS_PER_PAGE)
        .take(Surface::Extended.page_count())
        .collect()
}
