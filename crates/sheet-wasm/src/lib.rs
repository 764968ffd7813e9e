//! WASM bindings for the answer sheet generator
//!
//! Hands the image and the coordinate file to the page as two separate
//! artifacts; the page decides how to show or download them.

use sheet_core::{AnswerSheetGenerator, FontResolver, GeneratedSheet, LayoutVariant};
use wasm_bindgen::prelude::*;

/// Panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("Answer sheet WASM module initialized");
}

fn parse_variant(name: &str) -> Result<LayoutVariant, JsError> {
    serde_json::from_value(serde_json::json!(name))
        .map_err(|_| JsError::new(&format!("Unknown layout variant: {}", name)))
}

/// JavaScript-facing generator
#[wasm_bindgen]
pub struct WasmSheetGenerator {
    generator: AnswerSheetGenerator,
}

#[wasm_bindgen]
impl WasmSheetGenerator {
    /// Refined layout with the built-in glyphs (no font files in a browser)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            generator: AnswerSheetGenerator::with_resolver(
                LayoutVariant::Refined,
                &FontResolver::only(Vec::new()),
            ),
        }
    }

    /// Generator for a named variant ("original" or "refined") with
    /// optional font bytes fetched by the page
    #[wasm_bindgen(js_name = withVariant)]
    pub fn with_variant(
        variant: &str,
        font_data: Option<Vec<u8>>,
    ) -> Result<WasmSheetGenerator, JsError> {
        let variant = parse_variant(variant)?;
        let resolver = match font_data {
            Some(bytes) => FontResolver::from_bytes(bytes),
            None => FontResolver::only(Vec::new()),
        };
        Ok(Self {
            generator: AnswerSheetGenerator::with_resolver(variant, &resolver),
        })
    }

    /// Render a fresh sheet
    pub fn generate(&self) -> Result<WasmSheet, JsError> {
        WasmSheet::from_sheet(self.generator.generate())
    }
}

impl Default for WasmSheetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rendered sheet: PNG bytes, coordinate JSON, and the record as an object
#[wasm_bindgen]
pub struct WasmSheet {
    png: Vec<u8>,
    json: String,
    sheet: GeneratedSheet,
}

impl WasmSheet {
    fn from_sheet(sheet: GeneratedSheet) -> Result<Self, JsError> {
        let png = sheet.png_bytes().map_err(|e| JsError::new(&e.to_string()))?;
        let json = sheet
            .coordinates_json()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { png, json, sheet })
    }
}

#[wasm_bindgen]
impl WasmSheet {
    /// PNG image as a Uint8Array
    #[wasm_bindgen(getter)]
    pub fn image(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.png.as_slice())
    }

    /// Coordinate file text (UTF-8 JSON)
    #[wasm_bindgen(getter)]
    pub fn coordinates(&self) -> String {
        self.json.clone()
    }

    /// Record as a plain JS object
    #[wasm_bindgen(js_name = coordinatesObject)]
    pub fn coordinates_object(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.sheet.record)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(getter, js_name = bubbleCount)]
    pub fn bubble_count(&self) -> usize {
        self.sheet.record.bubbles.len()
    }
}

/// One-shot generation with the default generator
#[wasm_bindgen(js_name = quickGenerate)]
pub fn quick_generate() -> Result<WasmSheet, JsError> {
    WasmSheetGenerator::new().generate()
}

/// Crate version
#[wasm_bindgen(js_name = version)]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
