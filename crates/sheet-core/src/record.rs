//! Coordinate record
//!
//! Machine-readable description of everything locatable on the sheet. The
//! JSON keys and ordering are what grading tools read back.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::SheetError;

/// Pixel coordinate, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point(pub i32, pub i32);

impl Point {
    pub fn x(self) -> i32 {
        self.0
    }

    pub fn y(self) -> i32 {
        self.1
    }

    /// Squared euclidean distance
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = (self.0 - other.0) as i64;
        let dy = (self.1 - other.1) as i64;
        dx * dx + dy * dy
    }
}

/// Quadrilateral corners [top-left, top-right, bottom-right, bottom-left]
pub type Quad = [Point; 4];

/// Builds the clockwise corner list of an axis-aligned box
pub fn quad_from_box(x0: i32, y0: i32, x1: i32, y1: i32) -> Quad {
    [Point(x0, y0), Point(x1, y0), Point(x1, y1), Point(x0, y1)]
}

/// One markable circle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bubble {
    pub label: String,
    pub center: Point,
    pub radius: i32,
}

/// Everything drawn that a reader has to locate
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Corner anchors: top-left, top-right, bottom-right, bottom-left
    pub anchors: Vec<Quad>,
    /// Bubbles in drawing order
    pub bubbles: Vec<Bubble>,
    /// Free-response area, `null` until drawn
    pub mixed_area: Option<Quad>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbles carrying `label`, in drawing order
    pub fn bubbles_labeled<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a Bubble> + 'a {
        self.bubbles.iter().filter(move |b| b.label == label)
    }

    /// Pretty JSON with a 4-space indent; non-ASCII labels stay unescaped
    pub fn to_json_pretty(&self) -> Result<String, SheetError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SheetError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_json() {
        let json = Record::new().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["anchors"], serde_json::json!([]));
        assert_eq!(value["bubbles"], serde_json::json!([]));
        assert!(value["mixed_area"].is_null());
    }

    #[test]
    fn test_bubble_shape() {
        let bubble = Bubble {
            label: "A".into(),
            center: Point(150, 252),
            radius: 16,
        };
        let value = serde_json::to_value(&bubble).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"label": "A", "center": [150, 252], "radius": 16})
        );
    }

    #[test]
    fn test_indent_is_four_spaces() {
        let mut record = Record::new();
        record.mixed_area = Some(quad_from_box(0, 0, 10, 10));
        let json = record.to_json_pretty().unwrap();
        assert!(json.contains("\n    \"anchors\""));
        assert_eq!(Record::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_quad_is_clockwise() {
        let q = quad_from_box(1, 2, 3, 4);
        assert_eq!(q, [Point(1, 2), Point(3, 2), Point(3, 4), Point(1, 4)]);
    }
}
