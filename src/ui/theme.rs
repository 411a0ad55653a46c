use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub statusbar_bg: Color,
    pub statusbar_fg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub table_header_bg: Color,
    pub table_header_fg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub gauge_filled: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub overlay_border: Color,
    pub input_bg: Color,
    pub input_fg: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::Blue,
            statusbar_fg: Color::White,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            table_header_bg: Color::Blue,
            table_header_fg: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            gauge_filled: Color::Rgb(103, 232, 249),
            status_ok: Color::Green,
            status_err: Color::Red,
            overlay_border: Color::Gray,
            input_bg: Color::White,
            input_fg: Color::Black,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            statusbar_bg: Color::Rgb(220, 220, 220),
            statusbar_fg: Color::Black,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            table_header_bg: Color::Rgb(200, 200, 200),
            table_header_fg: Color::Black,
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            gauge_filled: Color::Rgb(70, 130, 180),
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            overlay_border: Color::Rgb(150, 150, 150),
            input_bg: Color::Black,
            input_fg: Color::White,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            statusbar_bg: Color::Reset,
            statusbar_fg: Color::Reset,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            table_header_bg: Color::White,
            table_header_fg: Color::Black,
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
            gauge_filled: Color::Reset,
            status_ok: Color::Reset,
            status_err: Color::Reset,
            overlay_border: Color::Reset,
            input_bg: Color::White,
            input_fg: Color::Black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_config("solarized").name, "dark");
        assert_eq!(Theme::from_config("LIGHT").name, "light");
        assert_eq!(Theme::from_config("monochrome").name, "mono");
    }
}
