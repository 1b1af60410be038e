use std::fmt;

use askama::Template;
use serde::Deserialize;

/// Animation offsets of the three markers, in milliseconds.
pub const MARKER_DELAYS_MS: [u32; 3] = [0, 150, 300];

/// Stylesheet with the size classes and keyframes the markup relies on.
pub const LOADER_CSS: &str = include_str!("../assets/loader.css");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LoaderSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl LoaderSize {
    /// Unknown values fall back to [`LoaderSize::Medium`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => LoaderSize::Small,
            "lg" | "large" => LoaderSize::Large,
            _ => LoaderSize::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderSize::Small => "sm",
            LoaderSize::Medium => "md",
            LoaderSize::Large => "lg",
        }
    }
}

impl From<String> for LoaderSize {
    fn from(value: String) -> Self {
        LoaderSize::parse(&value)
    }
}

impl fmt::Display for LoaderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Template)]
#[template(path = "loader.html")]
struct LoaderTemplate<'a> {
    size: LoaderSize,
    class: Option<&'a str>,
    delays: &'a [u32],
}

/// Renders the three-dot loading indicator.
///
/// `class` is appended to the container's class list (HTML-escaped);
/// blank values are ignored.
pub fn render_loader(size: LoaderSize, class: Option<&str>) -> String {
    LoaderTemplate {
        size,
        class: class.map(str::trim).filter(|c| !c.is_empty()),
        delays: &MARKER_DELAYS_MS,
    }
    .to_string()
}
