use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::theme::Theme;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 5;
const INPUT_WIDTH: usize = 25;

/// Centered pid entry box drawn over the table.
pub fn render(frame: &mut Frame, area: Rect, buffer: &str, theme: &Theme) {
    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Kill process ",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let lines = vec![
        Line::from(" Enter PID to kill (Esc to cancel):"),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{buffer:<INPUT_WIDTH$}"),
                Style::default().fg(theme.input_fg).bg(theme.input_bg),
            ),
        ]),
    ];

    frame.render_widget(block, overlay);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
