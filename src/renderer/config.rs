//! Configuration for diagram output

use crate::stylesheet::Stylesheet;

/// Options for rendering a depicted molecule.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Draw dictionary atom names instead of element labels.
    pub names: bool,

    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Padding between the drawing and the canvas edge, in pixels.
    pub padding: f64,

    /// Color scheme.
    pub stylesheet: Stylesheet,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            names: false,
            width: 500,
            height: 500,
            padding: 40.0,
            stylesheet: Stylesheet::default(),
        }
    }
}

impl RenderOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle atom-name labels.
    pub fn with_names(mut self, names: bool) -> Self {
        self.names = names;
        self
    }

    /// Set the canvas size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the canvas padding in pixels.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the color scheme.
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}
