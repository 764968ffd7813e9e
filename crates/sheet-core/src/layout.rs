//! Layout presets
//!
//! Every pixel constant of the answer sheet lives here. Two tunings exist:
//! the first script's constants (`Original`) and the refined ones
//! (`Refined`, the default).

use serde::{Deserialize, Serialize};

use crate::SheetError;

/// Selects one of the built-in layout tunings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Original,
    #[default]
    Refined,
}

impl LayoutVariant {
    /// Constants for this variant
    pub fn layout(self) -> Layout {
        match self {
            LayoutVariant::Original => Layout::original(),
            LayoutVariant::Refined => Layout::refined(),
        }
    }
}

/// Box given as inclusive corners `[x0, y0, x1, y1]`
pub type BoxCoords = [i32; 4];

/// Header constants
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub title_pos: (i32, i32),
    /// Identity box around the name/subject fields
    pub identity_box: BoxCoords,
    /// X positions of the vertical rules splitting the identity box
    pub rules_x: [i32; 2],
    pub name_label_pos: (i32, i32),
    pub subject_label_pos: (i32, i32),
}

/// Student-info grid constants
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGridLayout {
    pub start_x: i32,
    pub start_y: i32,
    pub row_h: i32,
    pub col_w: i32,
    /// Horizontal distance from the row label to the first bubble center
    pub bubble_offset: i32,
    /// Vertical distance from the row top to the bubble centers
    pub label_dy: i32,
    pub radius: i32,
}

/// Multiple-choice grid constants
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceGridLayout {
    pub base_x: i32,
    pub base_y: i32,
    pub questions: usize,
    pub per_column: usize,
    pub col_spacing: i32,
    pub row_spacing: i32,
    /// Horizontal distance from the question number to option A
    pub option_offset: i32,
    pub option_step: i32,
    pub label_dy: i32,
    pub radius: i32,
}

/// Free-response area constants
#[derive(Debug, Clone, PartialEq)]
pub struct MixedAreaLayout {
    pub area: BoxCoords,
    pub title_strip_h: i32,
    /// Label position relative to the area's top-left corner
    pub title_offset: (i32, i32),
}

/// All constants of one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub anchor_margin: i32,
    pub anchor_size: i32,
    pub border_width: i32,
    /// Bubble label position relative to the bubble center
    pub bubble_label_offset: (i32, i32),
    pub font_small: f32,
    pub font_medium: f32,
    pub header: HeaderLayout,
    pub student: StudentGridLayout,
    pub choice: ChoiceGridLayout,
    pub mixed: MixedAreaLayout,
}

impl Default for Layout {
    fn default() -> Self {
        Self::refined()
    }
}

impl Layout {
    /// Constants of the first standalone script
    pub fn original() -> Self {
        Self {
            width: 1240,
            height: 1754,
            anchor_margin: 30,
            anchor_size: 40,
            border_width: 2,
            bubble_label_offset: (-6, -10),
            font_small: 20.0,
            font_medium: 24.0,
            header: HeaderLayout::standard(),
            student: StudentGridLayout {
                start_x: 60,
                start_y: 230,
                row_h: 40,
                col_w: 40,
                bubble_offset: 80,
                label_dy: 12,
                radius: 15,
            },
            choice: ChoiceGridLayout {
                base_x: 60,
                base_y: 480,
                questions: 40,
                per_column: 20,
                col_spacing: 260,
                row_spacing: 38,
                option_offset: 60,
                option_step: 45,
                label_dy: 12,
                radius: 15,
            },
            mixed: MixedAreaLayout {
                area: [600, 110, 1100, 1600],
                title_strip_h: 60,
                title_offset: (10, 20),
            },
        }
    }

    /// Refined constants: wider bubble pitch and radius 16
    pub fn refined() -> Self {
        Self {
            student: StudentGridLayout {
                start_x: 60,
                start_y: 240,
                row_h: 42,
                col_w: 42,
                bubble_offset: 90,
                label_dy: 12,
                radius: 16,
            },
            choice: ChoiceGridLayout {
                base_x: 60,
                base_y: 500,
                questions: 40,
                per_column: 20,
                col_spacing: 270,
                row_spacing: 40,
                option_offset: 60,
                option_step: 46,
                label_dy: 12,
                radius: 16,
            },
            mixed: MixedAreaLayout {
                area: [620, 110, 1150, 1620],
                title_strip_h: 60,
                title_offset: (10, 20),
            },
            ..Self::original()
        }
    }

    /// Checks bubble pitch against diameter and that every primitive lies on
    /// the canvas.
    pub fn check_spacing(&self) -> Result<(), SheetError> {
        let s = &self.student;
        let c = &self.choice;

        if s.col_w <= 2 * s.radius || s.row_h <= 2 * s.radius {
            return Err(SheetError::InvalidLayout(format!(
                "student grid pitch {}x{} does not clear radius {}",
                s.col_w, s.row_h, s.radius
            )));
        }
        if c.option_step <= 2 * c.radius || c.row_spacing <= 2 * c.radius {
            return Err(SheetError::InvalidLayout(format!(
                "choice grid pitch {}x{} does not clear radius {}",
                c.option_step, c.row_spacing, c.radius
            )));
        }
        if c.per_column == 0 {
            return Err(SheetError::InvalidLayout("choice grid has no rows".into()));
        }

        let columns = c.questions.div_ceil(c.per_column) as i32;
        let column_span = c.option_offset + 4 * c.option_step + c.radius;
        if columns > 1 && c.col_spacing <= column_span {
            return Err(SheetError::InvalidLayout(format!(
                "choice column spacing {} does not clear column span {}",
                c.col_spacing, column_span
            )));
        }
        let last_option_x =
            c.base_x + (columns - 1) * c.col_spacing + c.option_offset + 4 * c.option_step;
        let last_row_y = c.base_y + (c.per_column as i32 - 1) * c.row_spacing + c.label_dy;

        let extents = [
            (
                s.start_x + s.bubble_offset + 9 * s.col_w + s.radius,
                s.start_y + 4 * s.row_h + s.label_dy + s.radius,
            ),
            (last_option_x + c.radius, last_row_y + c.radius),
            (self.mixed.area[2], self.mixed.area[3]),
            (self.header.identity_box[2], self.header.identity_box[3]),
        ];
        for (x, y) in extents {
            if x >= self.width as i32 || y >= self.height as i32 {
                return Err(SheetError::InvalidLayout(format!(
                    "({x}, {y}) lies outside the {}x{} canvas",
                    self.width, self.height
                )));
            }
        }

        Ok(())
    }
}

impl HeaderLayout {
    fn standard() -> Self {
        Self {
            title_pos: (60, 80),
            identity_box: [60, 110, 550, 200],
            rules_x: [220, 400],
            name_label_pos: (70, 130),
            subject_label_pos: (410, 130),
        }
    }
}
