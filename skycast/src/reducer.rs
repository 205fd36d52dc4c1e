//! Reducer - (state, action) -> effects
//!
//! All state mutations happen here. Network and disk work is returned as
//! [`Effect`]s for the runtime to carry out.

use skycast_core::error::NO_LOCATION;
use skycast_core::{FetchError, LocationQuery, Surface};
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, LocationEditor};

/// Apply one action to the state and return the effects it needs.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location =====
        Action::LocationResolve(query) => resolve(state, query),

        Action::LocationDidResolve(location) => {
            let before = state.locations.current_coord();
            state.locations.merge(location);
            state.location_status.set_idle("Location saved.");
            after_selection_change(state, before)
        }

        Action::LocationDidError(error) => {
            if error.is_cancelled() {
                return DispatchResult::unchanged();
            }
            state.location_status.set_error(error.to_string());
            DispatchResult::changed()
        }

        Action::LocationSelect(index) => select(state, index),

        Action::LocationNext => match state.locations.current_index() {
            Some(current) => select(state, (current + 1) % state.locations.len()),
            None => DispatchResult::unchanged(),
        },

        Action::LocationPrev => match state.locations.current_index() {
            Some(current) => {
                let len = state.locations.len();
                select(state, (current + len - 1) % len)
            }
            None => DispatchResult::unchanged(),
        },

        Action::LocationReorder(from, to) => {
            if from == to || !state.locations.reorder(from, to) {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed_with(Effect::Persist(state.persisted()))
        }

        Action::LocationRemove(index) => {
            let before = state.locations.current_coord();
            let Some(removed) = state.locations.remove(index) else {
                return DispatchResult::unchanged();
            };
            state
                .location_status
                .set_idle(format!("Removed {}.", removed.display_name()));
            if let Some(row) = state.picker.as_mut() {
                *row = (*row).min(state.locations.len().saturating_sub(1));
            }
            after_selection_change(state, before)
        }

        // ===== Location list overlay =====
        Action::PickerOpen => {
            state.picker = Some(state.locations.current_index().unwrap_or(0));
            DispatchResult::changed()
        }

        Action::PickerClose => {
            if state.picker.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PickerHighlight(row) => match state.picker.as_mut() {
            Some(current) if row < state.locations.len() && *current != row => {
                *current = row;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        // ===== Weather =====
        Action::UnitsCycle => {
            state.units = state.units.next();
            let mut result = DispatchResult::changed_with(Effect::Persist(state.persisted()));
            result.effects.extend(fetch_all(state));
            result
        }

        Action::UnitsSet(units) => {
            if units == state.units {
                return DispatchResult::unchanged();
            }
            state.units = units;
            let mut result = DispatchResult::changed_with(Effect::Persist(state.persisted()));
            result.effects.extend(fetch_all(state));
            result
        }

        Action::WeatherRefresh => DispatchResult::changed_with_many(fetch_all(state)),

        Action::CurrentDidFetch(id, result) => DispatchResult {
            changed: match result {
                Ok(snapshot) => state.current.complete(id, snapshot),
                Err(error) => state.current.fail(id, &error),
            },
            effects: vec![],
        },

        Action::ExtendedDidFetch(id, result) => DispatchResult {
            changed: match result {
                Ok(steps) => state.extended.complete(id, steps),
                Err(error) => state.extended.fail(id, &error),
            },
            effects: vec![],
        },

        // ===== Carousel =====
        Action::PageAdvance(surface) => {
            state.carousel_mut(surface).advance();
            DispatchResult::changed()
        }

        Action::PageSelect(surface, page) => {
            if state.carousel_mut(surface).select(page) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RefreshTick(surface) => {
            let tick = state.carousel_mut(surface).bump_tick();
            if state.locations.current_coord().is_none() {
                return DispatchResult::unchanged();
            }
            tracing::debug!(%surface, tick, "refresh tick");
            DispatchResult::changed_with(fetch(state, surface))
        }

        // ===== Add-location editor =====
        Action::EditorOpen => {
            state.editor = Some(LocationEditor::new());
            DispatchResult::changed()
        }

        Action::EditorClose => {
            if state.editor.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::EditorCycleMode => edit(state, |editor| {
            editor.mode = editor.mode.next();
            editor.error = None;
        }),

        Action::EditorInput(c) => edit(state, |editor| {
            editor.input.push(c);
            editor.error = None;
        }),

        Action::EditorBackspace => edit(state, |editor| {
            editor.input.pop();
            editor.error = None;
        }),

        Action::EditorSubmit => {
            let Some(editor) = state.editor.as_mut() else {
                return DispatchResult::unchanged();
            };
            let parsed = editor.parse().and_then(|query| match query.validate() {
                Ok(()) => Ok(query),
                Err(e) => Err(e.to_string()),
            });
            match parsed {
                Ok(query) => {
                    state.editor = None;
                    resolve(state, query)
                }
                Err(message) => {
                    editor.error = Some(message);
                    DispatchResult::changed()
                }
            }
        }

        // ===== Persistence =====
        Action::PersistDidSave => DispatchResult::unchanged(),

        Action::PersistDidError(message) => {
            state.location_status.set_error(message);
            DispatchResult::changed()
        }

        Action::SpinnerTick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            if state.is_busy() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn resolve(state: &mut AppState, query: LocationQuery) -> DispatchResult<Effect> {
    if let Err(error) = query.validate() {
        state.location_status.set_error(error.to_string());
        return DispatchResult::changed();
    }
    state.location_status.set_loading(query.loading_message());
    DispatchResult::changed_with(Effect::Resolve(query))
}

fn select(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    let before = state.locations.current_coord();
    if !state.locations.set_current(index) {
        return DispatchResult::unchanged();
    }
    after_selection_change(state, before)
}

/// Persist, and refetch both surfaces if the selected place moved.
fn after_selection_change(
    state: &mut AppState,
    before: Option<skycast_core::Coordinate>,
) -> DispatchResult<Effect> {
    let mut result = DispatchResult::changed_with(Effect::Persist(state.persisted()));
    if state.locations.current_coord() != before {
        result.effects.extend(fetch_all(state));
    }
    result
}

fn fetch_all(state: &mut AppState) -> Vec<Effect> {
    Surface::ALL
        .into_iter()
        .map(|surface| fetch(state, surface))
        .collect()
}

/// Start a fetch for `surface`, or fail it right away when nothing is selected.
fn fetch(state: &mut AppState, surface: Surface) -> Effect {
    let request = state.weather_request();
    let Some(coord) = request.coord else {
        let error = FetchError::input(NO_LOCATION);
        match surface {
            Surface::Current => state.current.fail_now(&error),
            Surface::Extended => state.extended.fail_now(&error),
        }
        return Effect::CancelFetch(surface);
    };

    let id = match surface {
        Surface::Current => state.current.begin(coord),
        Surface::Extended => state.extended.begin(coord),
    };
    Effect::Fetch {
        surface,
        id,
        request,
    }
}

fn edit(state: &mut AppState, f: impl FnOnce(&mut LocationEditor)) -> DispatchResult<Effect> {
    match state.editor.as_mut() {
        Some(editor) => {
            f(editor);
            DispatchResult::changed()
        }
        None => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorMode;
    use skycast_core::{
        Coordinate, LocationStore, MeasureUnits, Phase, RequestId, ResolvedLocation,
    };

    fn place(name: &str, state: &str, lat: f64) -> ResolvedLocation {
        ResolvedLocation::new(name, state, "US", Coordinate::new(lat, -85.0))
    }

    fn state_with(places: &[ResolvedLocation]) -> AppState {
        let mut store = LocationStore::new();
        for p in places {
            store.merge(p.clone());
        }
        AppState::new(store, MeasureUnits::Metric)
    }

    fn fetch_ids(effects: &[Effect]) -> Vec<(Surface, RequestId)> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch { surface, id, .. } => Some((*surface, *id)),
                _ => None,
            })
            .collect()
    }

    fn persists(effects: &[Effect]) -> bool {
        effects.iter().any(|e| matches!(e, Effect::Persist(_)))
    }

    #[test]
    fn test_resolve_validates_before_effect() {
        let mut state = AppState::default();

        let result = reducer(
            &mut state,
            Action::LocationResolve(LocationQuery::Zip {
                zip: " ".into(),
                country: None,
            }),
        );
        assert!(result.changed);
        assert!(!result.has_effects());
        assert!(state.location_status.is_error());

        let query = LocationQuery::Zip {
            zip: "49503".into(),
            country: None,
        };
        let result = reducer(&mut state, Action::LocationResolve(query.clone()));
        assert_eq!(result.effects, vec![Effect::Resolve(query)]);
        assert_eq!(state.location_status.message(), "Resolving zip code...");
    }

    #[test]
    fn test_resolved_location_is_saved_and_fetched() {
        let mut state = AppState::default();

        let result = reducer(
            &mut state,
            Action::LocationDidResolve(place("Grand Rapids", "", 42.0)),
        );

        assert_eq!(state.locations.len(), 1);
        assert_eq!(state.location_status.message(), "Location saved.");
        assert!(persists(&result.effects));
        assert_eq!(fetch_ids(&result.effects).len(), 2);
        assert_eq!(state.current.phase(), Phase::Loading);
        assert_eq!(state.extended.phase(), Phase::Loading);
    }

    #[test]
    fn test_enriching_current_place_does_not_refetch() {
        let mut state = state_with(&[place("Grand Rapids", "", 42.0)]);

        let result = reducer(
            &mut state,
            Action::LocationDidResolve(place("Grand Rapids", "MI", 42.0)),
        );

        assert_eq!(state.locations.len(), 1);
        assert_eq!(state.locations.locations()[0].state, "MI");
        assert!(persists(&result.effects));
        assert!(fetch_ids(&result.effects).is_empty());
    }

    #[test]
    fn test_cancelled_resolution_is_silent() {
        let mut state = AppState::default();
        state.location_status.set_loading("Resolving zip code...");

        let result = reducer(&mut state, Action::LocationDidError(FetchError::Cancelled));
        assert!(!result.changed);

        let result = reducer(&mut state, Action::LocationDidError(FetchError::NoMatch));
        assert!(result.changed);
        assert_eq!(
            state.location_status.message(),
            "No matching location found."
        );
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut state = state_with(&[place("A", "", 1.0), place("B", "", 2.0)]);

        let result = reducer(&mut state, Action::LocationSelect(7));
        assert!(!result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.locations.current_index(), Some(1));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut state = state_with(&[place("A", "", 1.0), place("B", "", 2.0)]);

        let result = reducer(&mut state, Action::LocationNext);
        assert_eq!(state.locations.current_index(), Some(0));
        assert_eq!(fetch_ids(&result.effects).len(), 2);

        reducer(&mut state, Action::LocationPrev);
        assert_eq!(state.locations.current_index(), Some(1));

        let mut empty = AppState::default();
        assert!(!reducer(&mut empty, Action::LocationNext).changed);
    }

    #[test]
    fn test_removing_last_location_fails_surfaces_without_request() {
        let mut state = state_with(&[place("A", "", 1.0)]);
        let result = reducer(&mut state, Action::WeatherRefresh);
        let (_, current_id) = fetch_ids(&result.effects)[0];

        let result = reducer(&mut state, Action::LocationRemove(0));

        assert!(state.locations.is_empty());
        assert!(persists(&result.effects));
        assert!(fetch_ids(&result.effects).is_empty());
        assert!(result
            .effects
            .contains(&Effect::CancelFetch(Surface::Current)));
        assert!(result
            .effects
            .contains(&Effect::CancelFetch(Surface::Extended)));
        assert_eq!(state.current.status().message(), NO_LOCATION);
        assert_eq!(state.extended.status().message(), NO_LOCATION);

        // The abandoned fetch can no longer land.
        let late = reducer(
            &mut state,
            Action::CurrentDidFetch(current_id, Err(FetchError::Network)),
        );
        assert!(!late.changed);
        assert_eq!(state.current.status().message(), NO_LOCATION);
    }

    fn three() -> AppState {
        state_with(&[
            place("A", "", 1.0),
            place("B", "", 2.0),
            place("C", "", 3.0),
        ])
    }

    #[test]
    fn test_remove_below_current_keeps_place_without_refetch() {
        let mut state = three();
        assert_eq!(state.locations.current_index(), Some(2));

        let result = reducer(&mut state, Action::LocationRemove(0));

        assert_eq!(state.locations.len(), 2);
        assert_eq!(state.locations.current_index(), Some(1));
        assert_eq!(state.locations.current().map(|l| l.name.as_str()), Some("C"));
        assert!(persists(&result.effects));
        assert!(fetch_ids(&result.effects).is_empty());
        assert_eq!(state.location_status.message(), "Removed A, US.");
    }

    #[test]
    fn test_remove_current_selects_neighbor_and_refetches() {
        let mut state = three();
        reducer(&mut state, Action::LocationSelect(1));

        let result = reducer(&mut state, Action::LocationRemove(1));

        assert_eq!(state.locations.len(), 2);
        assert_eq!(state.locations.current().map(|l| l.name.as_str()), Some("A"));
        assert_eq!(fetch_ids(&result.effects).len(), 2);
    }

    #[test]
    fn test_remove_above_current_keeps_index() {
        let mut state = three();
        reducer(&mut state, Action::LocationSelect(0));

        let result = reducer(&mut state, Action::LocationRemove(2));

        assert_eq!(state.locations.current_index(), Some(0));
        assert_eq!(state.locations.current().map(|l| l.name.as_str()), Some("A"));
        assert!(fetch_ids(&result.effects).is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut state = three();

        let result = reducer(&mut state, Action::LocationRemove(3));
        assert!(!result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.locations.len(), 3);
    }

    #[test]
    fn test_picker_open_highlight_and_remove() {
        let mut state = three();
        reducer(&mut state, Action::LocationSelect(1));

        reducer(&mut state, Action::PickerOpen);
        assert_eq!(state.picker, Some(1));

        assert!(reducer(&mut state, Action::PickerHighlight(2)).changed);
        assert!(!reducer(&mut state, Action::PickerHighlight(3)).changed);
        assert_eq!(state.picker, Some(2));

        // Removing the last row pulls the highlight back into range.
        reducer(&mut state, Action::LocationRemove(2));
        assert_eq!(state.picker, Some(1));
        assert_eq!(state.locations.current_index(), Some(1));

        assert!(reducer(&mut state, Action::PickerClose).changed);
        assert_eq!(state.picker, None);
        assert!(!reducer(&mut state, Action::PickerClose).changed);
    }

    #[test]
    fn test_switching_place_drops_previous_snapshot() {
        let mut state = state_with(&[place("Paris", "", 48.85), place("Tokyo", "", 35.68)]);
        reducer(&mut state, Action::LocationSelect(0));
        let ids = fetch_ids(&reducer(&mut state, Action::WeatherRefresh).effects);
        reducer(&mut state, Action::ExtendedDidFetch(ids[1].1, Ok(vec![])));
        assert!(state.extended.is_warm());

        let result = reducer(&mut state, Action::LocationNext);
        assert!(!state.extended.is_warm());
        assert_eq!(
            state.extended.status().message(),
            "Fetching extended forecast..."
        );

        let ids = fetch_ids(&result.effects);
        reducer(
            &mut state,
            Action::ExtendedDidFetch(ids[1].1, Err(FetchError::Network)),
        );
        assert_eq!(state.extended.data(), None);
        assert!(state.extended.status().is_error());
    }

    #[test]
    fn test_reorder_keeps_selection_without_refetch() {
        let mut state = state_with(&[place("A", "", 1.0), place("B", "", 2.0)]);

        let result = reducer(&mut state, Action::LocationReorder(1, 0));

        assert!(persists(&result.effects));
        assert!(fetch_ids(&result.effects).is_empty());
        assert_eq!(state.locations.current_index(), Some(0));
        assert_eq!(state.locations.current().map(|l| l.name.as_str()), Some("B"));

        assert!(!reducer(&mut state, Action::LocationReorder(0, 9)).changed);
    }

    #[test]
    fn test_units_cycle_persists_and_refetches() {
        let mut state = state_with(&[place("A", "", 1.0)]);

        let result = reducer(&mut state, Action::UnitsCycle);

        assert_eq!(state.units, MeasureUnits::Imperial);
        assert!(persists(&result.effects));
        let requests: Vec<_> = result
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch { request, .. } => Some(request.units),
                _ => None,
            })
            .collect();
        assert_eq!(requests, vec![MeasureUnits::Imperial, MeasureUnits::Imperial]);
    }

    #[test]
    fn test_units_set_persists_only_on_change() {
        let mut state = state_with(&[place("A", "", 1.0)]);

        let result = reducer(&mut state, Action::UnitsSet(MeasureUnits::Metric));
        assert!(!result.changed);
        assert!(!result.has_effects());

        let result = reducer(&mut state, Action::UnitsSet(MeasureUnits::Standard));
        assert_eq!(state.units, MeasureUnits::Standard);
        assert!(result.effects.iter().any(|e| matches!(
            e,
            Effect::Persist(saved) if saved.units == MeasureUnits::Standard
        )));
        assert_eq!(fetch_ids(&result.effects).len(), 2);
    }

    #[test]
    fn test_superseded_result_is_ignored() {
        let mut state = state_with(&[place("A", "", 1.0)]);
        let first = fetch_ids(&reducer(&mut state, Action::WeatherRefresh).effects);
        let second = fetch_ids(&reducer(&mut state, Action::WeatherRefresh).effects);

        let stale = reducer(
            &mut state,
            Action::ExtendedDidFetch(first[1].1, Ok(vec![])),
        );
        assert!(!stale.changed);
        assert_eq!(state.extended.phase(), Phase::Loading);

        let fresh = reducer(
            &mut state,
            Action::ExtendedDidFetch(second[1].1, Ok(vec![])),
        );
        assert!(fresh.changed);
        assert_eq!(state.extended.phase(), Phase::Ready);
    }

    #[test]
    fn test_refresh_tick_fetches_one_surface() {
        let mut state = state_with(&[place("A", "", 1.0)]);
        state.current_carousel.select(2);

        let result = reducer(&mut state, Action::RefreshTick(Surface::Current));

        let ids = fetch_ids(&result.effects);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].0, Surface::Current);
        assert_eq!(state.current_carousel.tick(), 1);
        assert_eq!(state.current_carousel.page(), 2);
        assert_eq!(state.extended.phase(), Phase::Empty);
    }

    #[test]
    fn test_refresh_tick_without_location_only_ticks() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::RefreshTick(Surface::Extended));

        assert!(!result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.extended_carousel.tick(), 1);
        assert_eq!(state.extended.phase(), Phase::Empty);
    }

    #[test]
    fn test_page_select_and_advance() {
        let mut state = AppState::default();

        assert!(reducer(&mut state, Action::PageSelect(Surface::Extended, 4)).changed);
        assert!(!reducer(&mut state, Action::PageSelect(Surface::Extended, 5)).changed);
        assert_eq!(state.extended_carousel.page(), 4);

        reducer(&mut state, Action::PageAdvance(Surface::Extended));
        assert_eq!(state.extended_carousel.page(), 0);
        assert_eq!(state.current_carousel.page(), 0);
    }

    #[test]
    fn test_editor_submit() {
        let mut state = AppState::default();
        reducer(&mut state, Action::EditorOpen);
        reducer(&mut state, Action::EditorCycleMode);
        assert_eq!(state.editor.as_ref().map(|e| e.mode), Some(EditorMode::City));

        for c in "Paris".chars() {
            reducer(&mut state, Action::EditorInput(c));
        }
        let result = reducer(&mut state, Action::EditorSubmit);
        assert!(!result.has_effects());
        assert!(state.editor.as_ref().and_then(|e| e.error.as_ref()).is_some());

        for c in ",FR".chars() {
            reducer(&mut state, Action::EditorInput(c));
        }
        let result = reducer(&mut state, Action::EditorSubmit);
        assert!(state.editor.is_none());
        assert_eq!(
            result.effects,
            vec![Effect::Resolve(LocationQuery::City {
                city: "Paris".into(),
                state: None,
                country: "FR".into()
            })]
        );
        assert_eq!(
            state.location_status.message(),
            "Resolving city and state..."
        );
    }

    #[test]
    fn test_editor_rejects_out_of_range_coordinates() {
        let mut state = AppState::default();
        reducer(&mut state, Action::EditorOpen);
        reducer(&mut state, Action::EditorCycleMode);
        reducer(&mut state, Action::EditorCycleMode);
        for c in "95,10".chars() {
            reducer(&mut state, Action::EditorInput(c));
        }

        let result = reducer(&mut state, Action::EditorSubmit);
        assert!(!result.has_effects());
        assert_eq!(
            state.editor.and_then(|e| e.error),
            Some("Latitude must be between -90 and 90.".to_string())
        );
    }

    #[test]
    fn test_spinner_only_rerenders_when_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::SpinnerTick).changed);

        state.location_status.set_loading("Resolving coordinates...");
        assert!(reducer(&mut state, Action::SpinnerTick).changed);
        assert_eq!(state.spinner_frame, 2);
    }
}
