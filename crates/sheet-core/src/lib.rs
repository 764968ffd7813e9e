//! Sheet Core - answer sheet generator
//!
//! Draws a fixed-layout optical answer sheet and describes it:
//! - Corner anchors for alignment
//! - Student-info and multiple-choice bubble grids
//! - A free-response ("mixed") area
//! - A coordinate record matching every locatable primitive on the canvas

pub mod canvas;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod record;
pub mod renderer;

pub use canvas::Canvas;
pub use font::{FontResolver, SheetFont, Typeface};
pub use geometry::AnchorAlignment;
pub use layout::{Layout, LayoutVariant};
pub use record::{Bubble, Point, Quad, Record};
pub use renderer::LayoutRenderer;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors at the export boundary
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Generator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Which constant tuning to draw with
    pub variant: LayoutVariant,
    /// Font files tried before the built-in search list
    pub font_paths: Vec<PathBuf>,
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self, SheetError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Canvas and record of one run
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    pub canvas: Canvas,
    pub record: Record,
}

impl GeneratedSheet {
    pub fn png_bytes(&self) -> Result<Vec<u8>, SheetError> {
        self.canvas.png_bytes()
    }

    pub fn coordinates_json(&self) -> Result<String, SheetError> {
        self.record.to_json_pretty()
    }

    /// Write the PNG and the coordinate JSON
    pub fn save(&self, image_path: &Path, coordinates_path: &Path) -> Result<(), SheetError> {
        self.canvas.save_png(image_path)?;
        std::fs::write(coordinates_path, self.coordinates_json()?)?;
        log::info!(
            "Saved sheet image to {:?} and coordinates to {:?}",
            image_path,
            coordinates_path
        );
        Ok(())
    }
}

/// Main generator: resolves the font once, then renders fresh sheets
pub struct AnswerSheetGenerator {
    layout: Layout,
    typeface: Typeface,
}

impl Default for AnswerSheetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSheetGenerator {
    /// Refined layout, default font search
    pub fn new() -> Self {
        Self::with_config(&GeneratorConfig::default())
    }

    pub fn with_config(config: &GeneratorConfig) -> Self {
        let resolver = FontResolver::new(config.font_paths.clone());
        Self::with_resolver(config.variant, &resolver)
    }

    pub fn with_resolver(variant: LayoutVariant, resolver: &FontResolver) -> Self {
        Self::with_typeface(variant, resolver.resolve())
    }

    pub fn with_typeface(variant: LayoutVariant, typeface: Typeface) -> Self {
        let layout = variant.layout();
        debug_assert!(layout.check_spacing().is_ok());
        Self { layout, typeface }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Renderer over a blank canvas, for running steps individually
    pub fn renderer(&self) -> LayoutRenderer {
        LayoutRenderer::new(self.layout.clone(), self.typeface.clone())
    }

    /// Full sheet on a fresh canvas
    pub fn generate(&self) -> GeneratedSheet {
        log::info!(
            "Generating answer sheet {}x{} ({:?} font)",
            self.layout.width,
            self.layout.height,
            self.typeface
        );
        let mut renderer = self.renderer();
        renderer.render_all();
        let (canvas, record) = renderer.into_parts();
        log::info!(
            "Sheet complete: {} anchors, {} bubbles",
            record.anchors.len(),
            record.bubbles.len()
        );
        GeneratedSheet { canvas, record }
    }
}
