pub mod header;
pub mod kill_dialog;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::App;

/// Rows above the first process row: status bar, message line, two gauges
/// and the table header.
pub const HEADER_ROWS: u16 = 5;

pub fn draw(frame: &mut Frame, app: &App) {
    #[cfg(feature = "perf-tracing")]
    let _draw_span = tracing::debug_span!(
        "ui.draw",
        processes = app.snapshot.processes.len()
    )
    .entered();

    let [status_area, message_area, cpu_area, mem_area, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let snapshot = &app.snapshot;

    statusbar::render(
        frame,
        status_area,
        app.sort_mode,
        &app.keybinds,
        &app.theme,
    );
    statusbar::render_message(
        frame,
        message_area,
        app.status_message.as_ref(),
        &app.theme,
    );
    header::render_cpu_gauge(frame, cpu_area, snapshot.cpu_usage_percent, &app.theme);
    header::render_memory_gauge(
        frame,
        mem_area,
        snapshot.memory_used_kb(),
        snapshot.memory_total_kb(),
        &app.theme,
    );
    process_table::render(frame, table_area, &snapshot.processes, &app.theme);

    // Dialog goes last so it sits on top
    if app.is_prompting() {
        kill_dialog::render(frame, frame.area(), app.kill_prompt.buffer(), &app.theme);
    }
}
