//! UI components
//!
//! A component renders from read-only props and turns events into actions.
//! Data mutations always go through the reducer.

pub mod add_location;
pub mod current_panel;
pub mod dashboard;
pub mod forecast_panel;
pub mod help_bar;
pub mod location_bar;
pub mod location_list;
pub mod status_line;

use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub use add_location::{AddLocation, AddLocationProps};
pub use current_panel::{CurrentPanel, CurrentPanelProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use forecast_panel::{ForecastPanel, ForecastPanelProps};
pub use help_bar::{HelpBar, HelpBarProps, HelpMode};
pub use location_bar::{LocationBar, LocationBarProps};
pub use location_list::{LocationList, LocationListProps};
pub use status_line::{StatusLine, StatusLineProps};
pub use tui_dispatch::Component;

pub const LOCATION_ICON: &str = "📍 ";
pub const ERROR_ICON: &str = "⚠ ";
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Page indicator, e.g. `● ○ ○ ○`.
pub fn page_dots(page: usize, page_count: usize) -> Vec<Span<'static>> {
    (0..page_count)
        .map(|i| {
            if i == page {
                Span::styled("● ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect()
}

/// Spinner glyph for an animation frame.
pub fn spinner(frame: usize) -> &'static str {
    SPINNERS[frame % SPINNERS.len()]
}
