//! Terminal output: color themes and status rendering.

pub mod status;
pub mod theme;
