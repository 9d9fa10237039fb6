//! ANSI color helpers for console output.

use crate::logging::Level;

const RESET: &str = "\x1b[0m";

/// Foreground colors used by the console handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Cyan = 36,
    LightGray = 37,
    DarkGray = 90,
    LightRed = 91,
    LightYellow = 93,
    White = 97,
}

impl Color {
    /// Color used to render a severity label.
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::Debug => Color::DarkGray,
            Level::Info => Color::Cyan,
            Level::Warn => Color::LightYellow,
            Level::Error => Color::LightRed,
        }
    }
}

/// Wrap `text` in the escape sequence for `color`, followed by a reset.
pub fn colorize(color: Color, text: &str) -> String {
    format!("\x1b[{}m{}{}", color as u8, text, RESET)
}

/// Render a severity label in its level color.
pub fn colorize_level(level: Level) -> String {
    colorize(Color::for_level(level), level.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize() {
        assert_eq!(colorize(Color::White, "created"), "\x1b[97mcreated\x1b[0m");
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(colorize_level(Level::Debug), "\x1b[90mDEBUG\x1b[0m");
        assert_eq!(colorize_level(Level::Info), "\x1b[36mINFO\x1b[0m");
        assert_eq!(colorize_level(Level::Warn), "\x1b[93mWARN\x1b[0m");
        assert_eq!(colorize_level(Level::Error), "\x1b[91mERROR\x1b[0m");
    }
}
