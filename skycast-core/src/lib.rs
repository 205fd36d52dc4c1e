//! Location and weather synchronization core for skycast
//!
//! This crate holds everything the dashboard needs apart from the terminal:
//!
//! - **Status**: tri-state progress value reported by every async operation
//! - **Location**: canonical place records, the persisted [`LocationStore`]
//!   with its merge/dedup rule, and the [`ResolverClient`] that turns
//!   coordinates, postal codes and city names into places
//! - **Weather**: snapshot model, unit normalisation, the cancellable
//!   [`WeatherClient`] and the per-surface [`SurfaceState`] machine
//! - **Carousel**: page rotation and refresh tick bookkeeping
//! - **Persist / Config**: client-local storage and runtime configuration
//!
//! # Data flow
//!
//! ```text
//! user input / geolocation
//!     -> ResolverClient            (suspends on HTTP)
//!     -> LocationStore::merge      (synchronous)
//!     -> current selection changes
//!     -> WeatherClient fetch       (cancels the superseded one)
//!     -> SurfaceState::complete    (stale results discarded)
//!     -> Carousel paginates the snapshot
//! ```

pub mod api;
pub mod carousel;
pub mod config;
pub mod error;
pub mod location;
pub mod persist;
pub mod status;
pub mod weather;

pub use api::ApiClient;
pub use carousel::Carousel;
pub use config::{Cadence, Config};
pub use error::{ConfigError, FetchError, PersistError};
pub use location::{
    Coordinate, LocationQuery, LocationStore, MergeOutcome, ResolvedLocation, ResolverClient,
};
pub use persist::{LocalStore, PersistedState};
pub use status::{Status, StatusState};
pub use weather::{
    MeasureUnits, Phase, RequestId, Surface, SurfaceState, WeatherClient, WeatherRequest,
    WeatherSnapshot,
};
