//! Actions
//!
//! Naming follows the intent/result split: `LocationResolve` asks for work,
//! `LocationDidResolve` / `LocationDidError` report back from the task.
//! The prefix before the verb is the action's category.

use skycast_core::{
    FetchError, LocationQuery, MeasureUnits, RequestId, ResolvedLocation, Surface,
    WeatherSnapshot,
};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    // ===== Location =====
    /// Validate and resolve a query, then merge the result
    LocationResolve(LocationQuery),
    LocationDidResolve(ResolvedLocation),
    LocationDidError(FetchError),
    LocationSelect(usize),
    LocationNext,
    LocationPrev,
    /// Move a saved location from one position to another
    LocationReorder(usize, usize),
    /// Delete the saved location at an index
    LocationRemove(usize),

    // ===== Location list overlay =====
    PickerOpen,
    PickerClose,
    /// Move the highlighted row
    PickerHighlight(usize),

    // ===== Weather =====
    UnitsCycle,
    /// Switch to a unit system given from outside the UI
    UnitsSet(MeasureUnits),
    /// Refetch both surfaces now
    WeatherRefresh,
    CurrentDidFetch(RequestId, Result<WeatherSnapshot, FetchError>),
    ExtendedDidFetch(RequestId, Result<Vec<WeatherSnapshot>, FetchError>),

    // ===== Carousel =====
    PageAdvance(Surface),
    PageSelect(Surface, usize),
    RefreshTick(Surface),

    // ===== Add-location editor =====
    EditorOpen,
    EditorClose,
    EditorCycleMode,
    EditorInput(char),
    EditorBackspace,
    EditorSubmit,

    // ===== Persistence =====
    PersistDidSave,
    PersistDidError(String),

    // ===== Uncategorized =====
    SpinnerTick,
    Quit,
}
