//! UI module for rendering the TUI

mod components;
mod forms;
mod landing;
mod layout;
mod rules;
mod splash;
mod submitted;

#[cfg(test)]
mod test_support;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Splash takes the whole screen
    if let View::Splash = app.state.current_view {
        if let Some(ref splash_state) = app.splash_state {
            splash::draw(frame, area, splash_state);
        }
        return;
    }

    let main_area = layout::create_layout(area);

    match app.state.current_view {
        View::Splash => {}
        View::Landing => landing::draw(frame, main_area, app.state.landing_selected),
        View::Rules => rules::draw(frame, main_area, app.state.rules_scroll),
        View::Form(_) => {
            if let Some(ref form) = app.form {
                forms::draw(frame, main_area, form);
            }
        }
        View::Submitted(kind) => {
            submitted::draw(frame, main_area, kind, app.state.last_entry_id.as_deref());
        }
    }

    layout::draw_status_bar(frame, app);

    // Blocking notifications are drawn on top of everything
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
