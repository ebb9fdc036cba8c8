//! # Output Configuration
//!
//! Controls how the `spiff-request` binary decorates its output. Colors and
//! symbols are used only when the terminal supports them and the user has
//! not opted out.
//!
//! In `auto` mode the following are honored:
//! - `NO_COLOR` (any value) disables decoration
//! - `CLICOLOR=0` disables decoration
//! - `CLICOLOR_FORCE=1` forces decoration even without a TTY
//! - `TERM=dumb` disables decoration

use console::style;
use std::env;

/// Output configuration for colors and status symbols.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value: `always`, `never` or `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Marker for a successful step, `✔` or `[OK]`
    pub fn ok(&self) -> String {
        if self.use_color {
            style("✔").green().to_string()
        } else {
            "[OK]".to_string()
        }
    }

    /// Marker for a failed step, `✘` or `[ERR]`
    pub fn err(&self) -> String {
        if self.use_color {
            style("✘").red().to_string()
        } else {
            "[ERR]".to_string()
        }
    }

    /// Emphasize a heading
    pub fn heading(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        assert!(OutputConfig::from_env_and_flag("always").use_color);
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
    }

    #[test]
    fn test_color_never() {
        assert!(!OutputConfig::from_env_and_flag("never").use_color);
    }

    #[test]
    fn test_plain_markers() {
        let out = OutputConfig::without_color();
        assert_eq!(out.ok(), "[OK]");
        assert_eq!(out.err(), "[ERR]");
        assert_eq!(out.heading("Request"), "Request");
    }

    #[test]
    fn test_colored_markers_contain_symbols() {
        let out = OutputConfig::with_color();
        assert!(out.ok().contains('✔'));
        assert!(out.err().contains('✘'));
    }
}
