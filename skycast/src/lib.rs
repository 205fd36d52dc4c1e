//! Terminal dashboard for saved locations and their weather.
//!
//! Flow:
//! 1. Key event -> `Component::handle_event` -> actions
//! 2. Actions go through the effect store and its logging middleware
//! 3. The reducer updates [`AppState`](state::AppState) and returns effects
//! 4. Effects spawn keyed fetch tasks or write saved state
//! 5. Subscriptions emit page and refresh actions on their own schedules

pub mod action;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod state;

use skycast_core::{LocationQuery, MeasureUnits};

pub use action::Action;
pub use effect::{Effect, EffectHandler};
pub use reducer::reducer;
pub use state::AppState;

/// Actions to enqueue before the first frame.
///
/// A unit override that differs from the saved preference goes through
/// [`Action::UnitsSet`], which saves it and fetches; otherwise a plain
/// refresh loads the restored place.
pub fn startup_actions(
    state: &AppState,
    units: Option<MeasureUnits>,
    geolocation: Option<LocationQuery>,
) -> Vec<Action> {
    let mut actions = match units.filter(|units| *units != state.units) {
        Some(units) => vec![Action::UnitsSet(units)],
        None => vec![Action::WeatherRefresh],
    };
    actions.extend(geolocation.map(Action::LocationResolve));
    actions
}
