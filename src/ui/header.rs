use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::format_kib;
use crate::ui::theme::Theme;

/// Segments in each gauge bar.
pub const GAUGE_SEGMENTS: usize = 20;

/// A bar of `segments` cells where cell `i` is filled when
/// `round(percent / 100 * segments) > i`. Values over 100 fill the bar,
/// negative or NaN values leave it empty.
pub fn gauge_bar(percent: f64, segments: usize) -> String {
    let filled = (percent / 100.0 * segments as f64).round();
    (0..segments)
        .map(|i| if filled > i as f64 { '|' } else { ' ' })
        .collect()
}

pub fn render_cpu_gauge(frame: &mut Frame, area: Rect, cpu_percent: f64, theme: &Theme) {
    let line = gauge_line("CPU", cpu_percent, String::new(), theme);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn render_memory_gauge(
    frame: &mut Frame,
    area: Rect,
    used_kb: u64,
    total_kb: u64,
    theme: &Theme,
) {
    let percent = crate::system::delta::mem_percent(used_kb, total_kb);
    let detail = format!(" ({}/{})", format_kib(used_kb), format_kib(total_kb));
    let line = gauge_line("Mem", percent, detail, theme);
    frame.render_widget(Paragraph::new(line), area);
}

fn gauge_line(label: &str, percent: f64, detail: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label} ["),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            gauge_bar(percent, GAUGE_SEGMENTS),
            Style::default().fg(theme.gauge_filled),
        ),
        Span::styled("] ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("{percent:5.1}%"),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(detail, Style::default().fg(theme.text_secondary)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(bar: &str) -> usize {
        bar.chars().filter(|&c| c == '|').count()
    }

    #[test]
    fn bar_fills_rounded_share_of_segments() {
        assert_eq!(filled(&gauge_bar(0.0, 20)), 0);
        assert_eq!(filled(&gauge_bar(50.0, 20)), 10);
        assert_eq!(filled(&gauge_bar(12.5, 20)), 3);
        assert_eq!(filled(&gauge_bar(100.0, 20)), 20);
        assert_eq!(gauge_bar(25.0, 8), "||      ");
    }

    #[test]
    fn out_of_range_values_stay_within_bar() {
        assert_eq!(gauge_bar(250.0, 20).len(), 20);
        assert_eq!(filled(&gauge_bar(250.0, 20)), 20);
        assert_eq!(filled(&gauge_bar(-5.0, 20)), 0);
        assert_eq!(filled(&gauge_bar(f64::NAN, 20)), 0);
    }
}
