use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::format::truncate_unicode;
use crate::system::process::ProcessSample;
use crate::ui::theme::Theme;

const PID_WIDTH: usize = 6;
const USER_WIDTH: usize = 10;
const PERCENT_WIDTH: usize = 6;

/// Columns taken before COMMAND: a leading margin, PID, USER, CPU% and MEM%,
/// each followed by one space.
pub const ROW_PREFIX_WIDTH: usize = 1 + PID_WIDTH + 1 + USER_WIDTH + 1 + PERCENT_WIDTH + 1 + PERCENT_WIDTH + 1;

pub fn header_line() -> String {
    format!(
        " {:<PID_WIDTH$} {:<USER_WIDTH$} {:>PERCENT_WIDTH$} {:>PERCENT_WIDTH$} {}",
        "PID", "USER", "CPU%", "MEM%", "COMMAND"
    )
}

/// One table row for a terminal `width` columns wide. The name takes what is
/// left after the fixed columns and is cut with an ellipsis when it overflows.
pub fn format_row(process: &ProcessSample, width: usize) -> String {
    let name = truncate_unicode(&process.name, width.saturating_sub(ROW_PREFIX_WIDTH));
    let user = truncate_unicode(&process.user, USER_WIDTH);
    format!(
        " {:<PID_WIDTH$} {:<USER_WIDTH$} {:>PERCENT_WIDTH$.1} {:>PERCENT_WIDTH$.1} {}",
        process.pid, user, process.cpu_percent, process.mem_percent, name
    )
}

/// Header on the first row of `area`, then as many processes as fit. The
/// rest are not drawn.
pub fn render(frame: &mut Frame, area: Rect, processes: &[ProcessSample], theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let header_area = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(header_line()).style(
            Style::default()
                .fg(theme.table_header_fg)
                .bg(theme.table_header_bg)
                .add_modifier(Modifier::BOLD),
        ),
        header_area,
    );

    let rows_area = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    let width = area.width as usize;
    let lines: Vec<Line> = processes
        .iter()
        .take(rows_area.height as usize)
        .map(|p| Line::from(format_row(p, width)))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(theme.text_primary)),
        rows_area,
    );
}
