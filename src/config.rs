use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use xdg::BaseDirectories;

use crate::engine::bars::BoardTheme;
use crate::engine::surface::Rgba;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Milliseconds between frames.
    pub frame_interval_ms: u64,
    /// Settle delay between the start key and the first animation frame.
    pub boot_delay_ms: u64,
    /// Overrides the snapshot's fireworks flag when set.
    pub fireworks: Option<bool>,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub chart_background: Color,
    /// Opacity of the chart background fill.
    pub chart_background_alpha: f32,
    #[serde(deserialize_with = "deserialize_color")]
    pub grid: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub text: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub highlight: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            frame_interval_ms: 16,
            boot_delay_ms: crate::engine::constants::BOOT_DELAY_MS as u64,
            fireworks: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            chart_background: Color::Rgb(32, 28, 40),
            chart_background_alpha: 0.5,
            grid: Color::Rgb(128, 128, 128),
            text: Color::Rgb(179, 89, 0), // Burnt orange
            highlight: Color::Rgb(255, 255, 255),
        }
    }
}

impl ThemeConfig {
    pub fn board_theme(&self) -> BoardTheme {
        BoardTheme {
            chart_background: to_rgba(self.chart_background)
                .with_alpha(self.chart_background_alpha),
            grid: to_rgba(self.grid),
            text: to_rgba(self.text),
            highlight: to_rgba(self.highlight),
        }
    }
}

/// Convert a ratatui color to the engine's RGBA type. Named colors use their
/// conventional ANSI values.
fn to_rgba(color: Color) -> Rgba {
    match color {
        Color::Rgb(r, g, b) => Rgba::rgb(r, g, b),
        Color::Black => Rgba::rgb(0, 0, 0),
        Color::Red => Rgba::rgb(205, 0, 0),
        Color::Green => Rgba::rgb(0, 205, 0),
        Color::Yellow => Rgba::rgb(205, 205, 0),
        Color::Blue => Rgba::rgb(0, 0, 238),
        Color::Magenta => Rgba::rgb(205, 0, 205),
        Color::Cyan => Rgba::rgb(0, 205, 205),
        Color::Gray => Rgba::rgb(229, 229, 229),
        Color::DarkGray => Rgba::rgb(127, 127, 127),
        Color::LightRed => Rgba::rgb(255, 0, 0),
        Color::LightGreen => Rgba::rgb(0, 255, 0),
        Color::LightYellow => Rgba::rgb(255, 255, 0),
        Color::LightBlue => Rgba::rgb(92, 92, 255),
        Color::LightMagenta => Rgba::rgb(255, 0, 255),
        Color::LightCyan => Rgba::rgb(0, 255, 255),
        Color::White => Rgba::rgb(255, 255, 255),
        _ => Rgba::rgb(255, 255, 255),
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    // Named colors
    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "lightred" => return Some(Color::LightRed),
        "lightgreen" => return Some(Color::LightGreen),
        "lightyellow" => return Some(Color::LightYellow),
        "lightblue" => return Some(Color::LightBlue),
        "lightmagenta" => return Some(Color::LightMagenta),
        "lightcyan" => return Some(Color::LightCyan),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    // Hex colors (#FF6600 or #f60)
    if s.starts_with('#') {
        let hex = &s[1..];
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    // RGB tuples "255,165,0"
    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    // Check if file exists
    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };

    toml::from_str(&content).unwrap_or_else(|_| Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("blue"), Some(Color::Blue));
        assert_eq!(parse_color("orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("white"), Some(Color::White));
    }

    #[test]
    fn test_parse_color_case_insensitive() {
        assert_eq!(parse_color("RED"), Some(Color::Red));
        assert_eq!(parse_color("Blue"), Some(Color::Blue));
        assert_eq!(parse_color("ORANGE"), Some(Color::Rgb(255, 165, 0)));
    }

    #[test]
    fn test_parse_color_hex_6_digit() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#ff6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#00FF00"), Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_color_hex_3_digit() {
        assert_eq!(parse_color("#F60"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#0F0"), Some(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255,165,0"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("0,255,0"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0))); // with spaces
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("256,0,0"), None); // RGB values too high
        assert_eq!(parse_color("#GGGGGG"), None);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.frame_interval_ms, 16);
        assert_eq!(config.boot_delay_ms, 250);
        assert_eq!(config.fireworks, None);
        assert_eq!(config.theme.grid, Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_board_theme_from_defaults() {
        let theme = ThemeConfig::default().board_theme();
        assert_eq!(theme.chart_background, Rgba::rgba(32, 28, 40, 0.5));
        assert_eq!(theme.text, Rgba::rgb(179, 89, 0));
        assert_eq!(theme.highlight, Rgba::rgb(255, 255, 255));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r##"
log_level = "debug"
log_file = "/tmp/quizboard.log"
frame_interval_ms = 33
fireworks = true

[theme]
text = "#00FFFF"
highlight = "orange"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.frame_interval_ms, 33);
        assert_eq!(config.fireworks, Some(true));
        assert_eq!(config.theme.text, Color::Rgb(0, 255, 255));
        assert_eq!(config.theme.highlight, Color::Rgb(255, 165, 0));
        // Unset keys keep their defaults.
        assert_eq!(config.theme.grid, Color::Rgb(128, 128, 128));
        assert_eq!(config.boot_delay_ms, 250);
    }

    #[test]
    fn test_config_from_toml_rgb_tuple() {
        let toml_str = r#"
[theme]
grid = "128,0,128"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme.grid, Color::Rgb(128, 0, 128));
    }
}
