use ratatui::prelude::Color;
use reader_core::config::ThemeConfig;

// Tokyonight-inspired palette; tweak these to change header/footer colors.
const TN_BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
const TN_YELLOW: Color = Color::Rgb(224, 175, 104); // #e0af68

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub header_pad_bg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub footer_pad_bg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            header_pad_bg: TN_BG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            footer_pad_bg: TN_BG_ALT,
            highlight_bg: TN_YELLOW,
            highlight_fg: TN_BG,
        }
    }
}

/// Named terminal color or `#rrggbb`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "darkgray" => Some(Color::DarkGray),
        _ => None,
    }
}

impl Theme {
    /// Preset by name, then individual overrides.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = match config.name.as_deref().map(str::to_lowercase).as_deref() {
            Some("gruvbox") => Theme {
                header_bg: Color::Yellow,
                header_fg: Color::Black,
                header_pad_bg: Color::DarkGray,
                footer_bg: Color::Green,
                footer_fg: Color::Black,
                footer_pad_bg: Color::DarkGray,
                highlight_bg: Color::Yellow,
                highlight_fg: Color::Black,
            },
            Some("dracula") => Theme {
                header_bg: Color::Magenta,
                header_fg: Color::White,
                header_pad_bg: Color::DarkGray,
                footer_bg: Color::Blue,
                footer_fg: Color::White,
                footer_pad_bg: Color::DarkGray,
                highlight_bg: Color::Magenta,
                highlight_fg: Color::White,
            },
            _ => Theme::default(),
        };
        let overrides = [
            (&config.header_bg, &mut theme.header_bg),
            (&config.header_fg, &mut theme.header_fg),
            (&config.footer_bg, &mut theme.footer_bg),
            (&config.footer_fg, &mut theme.footer_fg),
            (&config.highlight_bg, &mut theme.highlight_bg),
        ];
        for (value, slot) in overrides {
            if let Some(color) = value.as_deref().and_then(parse_color) {
                *slot = color;
            }
        }
        theme
    }
}
