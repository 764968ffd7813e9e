//! Layout renderer
//!
//! Draws the sheet step by step. Each step paints onto the canvas and, for
//! anything a reader must locate later, appends the same geometry to the
//! record, so the two never drift apart.

use crate::canvas::Canvas;
use crate::font::{SheetFont, Typeface};
use crate::layout::Layout;
use crate::record::{quad_from_box, Bubble, Point, Record};

pub const TITLE: &str = "國立臺南大學附屬高級中學試卷答案卡";
pub const NAME_LABEL: &str = "年   班      號  姓名：";
pub const SUBJECT_LABEL: &str = "科目：";
pub const MIXED_TITLE: &str = "混合題（務必依序標示題號寫答案）";
/// Row captions of the student-info grid: grade, class tens/units, seat tens/units
pub const STUDENT_ROWS: [&str; 5] = ["年級", "班十", "級個", "座十", "號個"];
pub const OPTIONS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Number of student-info bubbles (3 grade values + 4 rows of digits)
pub const STUDENT_BUBBLES: usize = 3 + 4 * 10;

/// Renders one answer sheet
pub struct LayoutRenderer {
    layout: Layout,
    canvas: Canvas,
    record: Record,
    font_sm: SheetFont,
    font_md: SheetFont,
}

impl LayoutRenderer {
    /// Blank canvas and empty record; the typeface is shared by both text sizes
    pub fn new(layout: Layout, typeface: Typeface) -> Self {
        let canvas = Canvas::new(layout.width, layout.height);
        let font_sm = SheetFont {
            typeface: typeface.clone(),
            size: layout.font_small,
        };
        let font_md = SheetFont {
            typeface,
            size: layout.font_medium,
        };
        Self {
            layout,
            canvas,
            record: Record::new(),
            font_sm,
            font_md,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn into_parts(self) -> (Canvas, Record) {
        (self.canvas, self.record)
    }

    /// All five drawing steps in order
    pub fn render_all(&mut self) {
        self.draw_anchors();
        self.draw_header();
        self.draw_student_info_grid();
        self.draw_multiple_choice();
        self.draw_mixed_area();
        log::debug!(
            "Rendered {} anchors, {} bubbles",
            self.record.anchors.len(),
            self.record.bubbles.len()
        );
    }

    /// Filled corner squares, recorded top-left, top-right, bottom-right,
    /// bottom-left
    pub fn draw_anchors(&mut self) {
        let size = self.layout.anchor_size;
        let margin = self.layout.anchor_margin;
        let w = self.layout.width as i32;
        let h = self.layout.height as i32;

        let positions = [
            (margin, margin),
            (w - margin - size, margin),
            (w - margin - size, h - margin - size),
            (margin, h - margin - size),
        ];

        for (x, y) in positions {
            self.canvas.fill_box(x, y, x + size, y + size);
            self.record.anchors.push(quad_from_box(x, y, x + size, y + size));
        }
    }

    /// Title, identity box and its labels; nothing recorded
    pub fn draw_header(&mut self) {
        let header = &self.layout.header;
        let bw = self.layout.border_width;
        let [x0, y0, x1, y1] = header.identity_box;

        self.canvas
            .text(header.title_pos.0, header.title_pos.1, &self.font_md, TITLE);
        self.canvas.outline_box(x0, y0, x1, y1, bw);
        for x in header.rules_x {
            self.canvas.vertical_rule(x, y0, y1, bw);
        }
        self.canvas.text(
            header.name_label_pos.0,
            header.name_label_pos.1,
            &self.font_sm,
            NAME_LABEL,
        );
        self.canvas.text(
            header.subject_label_pos.0,
            header.subject_label_pos.1,
            &self.font_sm,
            SUBJECT_LABEL,
        );
    }

    /// Grade row 1-3, then class and seat digit rows 0-9
    pub fn draw_student_info_grid(&mut self) {
        let grid = self.layout.student.clone();

        for (i, caption) in STUDENT_ROWS.iter().enumerate() {
            let row_y = grid.start_y + i as i32 * grid.row_h;
            self.canvas.text(grid.start_x, row_y, &self.font_sm, caption);

            let values = if i == 0 { 1..=3 } else { 0..=9 };
            for (j, value) in values.enumerate() {
                let cx = grid.start_x + grid.bubble_offset + j as i32 * grid.col_w;
                let cy = row_y + grid.label_dy;
                self.draw_bubble(cx, cy, grid.radius, &value.to_string());
            }
        }
    }

    /// Questions fill column 0 top to bottom, then column 1
    pub fn draw_multiple_choice(&mut self) {
        let grid = self.layout.choice.clone();

        for i in 0..grid.questions {
            let col = (i / grid.per_column) as i32;
            let row = (i % grid.per_column) as i32;
            let x = grid.base_x + col * grid.col_spacing;
            let y = grid.base_y + row * grid.row_spacing;

            self.canvas.text(x, y, &self.font_sm, &format!("{:02}", i + 1));

            for (j, option) in OPTIONS.iter().enumerate() {
                let cx = x + grid.option_offset + j as i32 * grid.option_step;
                let cy = y + grid.label_dy;
                self.draw_bubble(cx, cy, grid.radius, &option.to_string());
            }
        }
    }

    /// Free-response box with a titled strip; replaces any earlier area
    pub fn draw_mixed_area(&mut self) {
        let mixed = &self.layout.mixed;
        let bw = self.layout.border_width;
        let [x0, y0, x1, y1] = mixed.area;

        self.canvas.outline_box(x0, y0, x1, y1, bw);
        self.canvas
            .outline_box(x0, y0, x1, y0 + mixed.title_strip_h, bw);
        self.canvas.text(
            x0 + mixed.title_offset.0,
            y0 + mixed.title_offset.1,
            &self.font_sm,
            MIXED_TITLE,
        );

        self.record.mixed_area = Some(quad_from_box(x0, y0, x1, y1));
    }

    /// Circle plus label, recorded as `{label, center, radius}`
    pub fn draw_bubble(&mut self, cx: i32, cy: i32, radius: i32, label: &str) {
        let (dx, dy) = self.layout.bubble_label_offset;
        self.canvas.circle(cx, cy, radius);
        self.canvas.text(cx + dx, cy + dy, &self.font_sm, label);
        self.record.bubbles.push(Bubble {
            label: label.to_string(),
            center: Point(cx, cy),
            radius,
        });
    }
}
