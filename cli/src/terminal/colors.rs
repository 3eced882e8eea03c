use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const AVAILABLE: Color = Color::BrightGreen;
pub const UNAVAILABLE: Color = Color::BrightRed;
