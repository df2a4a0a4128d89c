//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the text renderings
//! of loading reports and catalogs.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    // Outcome badges (bold reverse video)
    /// Bold reverse green for accepted actions.
    pub const TAG_OK: &str = "\x1b[1;7;32m";
    /// Bold reverse yellow for hazard notices.
    pub const TAG_WARN: &str = "\x1b[1;7;33m";
    /// Bold reverse red for refused actions.
    pub const TAG_FAIL: &str = "\x1b[1;7;31m";

    /// Bright bold white for emphasis (ship and serial names).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for temperatures.
    pub const CYAN: &str = "\x1b[36m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_ok: &'static str,
    pub tag_warn: &'static str,
    pub tag_fail: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_ok: colors::TAG_OK,
            tag_warn: colors::TAG_WARN,
            tag_fail: colors::TAG_FAIL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_ok: "",
            tag_warn: "",
            tag_fail: "",
            white_bold: "",
            gray: "",
            cyan: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a number with thousand separators (commas).
///
/// # Examples
///
/// ```
/// # use konship_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(1000), "1,000");
/// assert_eq!(format_with_separators(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a weight in kilograms, grouping whole kilograms and keeping up to
/// two decimals when the value is fractional.
#[must_use]
pub fn format_kg(value: f64) -> String {
    if !value.is_finite() || value < 0.0 {
        return format!("{value} kg");
    }
    let rounded = format!("{value:.2}");
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = int_part
        .parse::<u64>()
        .map(format_with_separators)
        .unwrap_or_else(|_| int_part.to_string());
    if frac_part == "00" {
        format!("{grouped} kg")
    } else {
        format!("{grouped}.{frac_part} kg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_separators() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(9999), "9,999");
        assert_eq!(format_with_separators(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(7_530.0), "7,530 kg");
        assert_eq!(format_kg(12.5), "12.50 kg");
        assert_eq!(format_kg(0.0), "0 kg");
    }

    #[test]
    fn test_color_palette_plain() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.tag_fail.is_empty());
    }

    use std::sync::Mutex;

    /// Serializes tests that modify process-global environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var_os(k)))
            .collect();
        for (key, value) in vars {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        let result = f();
        for (key, value) in saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn test_supports_color_env() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
        });
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm"))], || {
            assert!(supports_color());
        });
    }
}
