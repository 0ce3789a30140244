use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Maze wall color
    pub wall: Color,
    /// Player marker color
    pub player: Color,
    /// Visited-path highlight
    pub visited: Color,
    /// Decision-cell ("split off") highlight
    pub split: Color,
    /// Answer replay cursor
    pub answer: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Finish banner color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            wall: Color::Rgb { r: 130, g: 140, b: 170 },
            player: Color::Rgb { r: 90, g: 255, b: 130 },
            visited: Color::Rgb { r: 255, g: 165, b: 0 },
            split: Color::Rgb { r: 255, g: 90, b: 90 },
            answer: Color::Rgb { r: 80, g: 180, b: 255 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
        }
    }
}
