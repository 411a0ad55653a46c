use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, key_label};
use crate::sort::SortMode;
use crate::ui::theme::Theme;

/// Top bar: brand, key hints and the active sort.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    sort_mode: SortMode,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg).fg(theme.statusbar_fg);

    let sort_keys = format!(
        "{}/{}/{}",
        key_label(keybinds.sort_cpu),
        key_label(keybinds.sort_memory),
        key_label(keybinds.sort_pid)
    );

    let mut spans = vec![Span::styled(
        " SysMon ",
        Style::default()
            .fg(theme.header_accent_fg)
            .bg(theme.header_accent_bg)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(pill_spans(key_label(keybinds.quit), "Quit", theme));
    spans.extend(pill_spans(sort_keys, "Sort", theme));
    spans.extend(pill_spans(key_label(keybinds.kill), "Kill", theme));
    spans.push(Span::styled(
        format!("  Sort: {}", sort_mode.label()),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

/// Transient message line under the status bar.
pub fn render_message(
    frame: &mut Frame,
    area: Rect,
    status_message: Option<&(String, bool, std::time::Instant)>,
    theme: &Theme,
) {
    let Some((msg, ok, _)) = status_message else {
        return;
    };
    let color = if *ok {
        theme.status_ok
    } else {
        theme.status_err
    };
    let line = Line::from(Span::styled(
        format!(" {msg}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn pill_spans<'a>(key: String, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {desc}")),
    ]
}
