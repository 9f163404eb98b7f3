// Sheet rendering: draws the answer tables, question numbers, choice
// letters, infobit marks and the student-ID grid onto a DrawingSurface.

use crate::geometry::{best_geometry, CellSize, Geometry, Point};
use crate::{infobits, ExamStructure, SheetError};

// ============================================================================
// Drawing Surface
// ============================================================================

/// One straight stroke from `from` to `to`, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// The four primitive operations the renderer needs from a drawing backend.
/// Coordinates are pixels with y growing downward; text y is the baseline.
/// Any failure is fatal for the current render and propagated unchanged.
pub trait DrawingSurface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Repaints the whole surface white; later strokes, fills and text are
    /// black.
    fn clear(&mut self) -> Result<(), SheetError>;
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), SheetError>;
    fn stroke_segments(&mut self, segments: &[Segment]) -> Result<(), SheetError>;
    fn fill_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        size: f64,
        align: TextAlign,
    ) -> Result<(), SheetError>;
}

// ============================================================================
// Sheet Renderer
// ============================================================================

/// Renders one exam sheet. Holds only derived, immutable layout data;
/// every render recomputes pixel geometry from the surface size.
pub struct SheetRenderer {
    geometry: Geometry,
    id_box_label: String,
    print_model_letter: bool,
}

impl SheetRenderer {
    pub fn new(exam: &ExamStructure) -> Result<Self, SheetError> {
        exam.validate()?;
        Ok(SheetRenderer {
            geometry: best_geometry(exam.num_questions, exam.num_choices, exam.num_id_digits),
            id_box_label: exam.id_box_label.clone(),
            print_model_letter: exam.print_model_letter,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Clears the surface and repaints the full sheet for one model letter.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        model_letter: char,
    ) -> Result<(), SheetError> {
        let geometry = &self.geometry;
        let infobits = infobits::encode(model_letter, geometry.num_columns)?;
        let cell_size = geometry.cell_size(surface.width(), surface.height())?;
        let top_left_corner = geometry.top_left_corner(cell_size, surface.width(), surface.height());
        let num_digits = question_number_digits(geometry.num_questions);

        surface.clear()?;

        let mut first_question_number = 1;
        for i in 0..geometry.num_tables as usize {
            let questions = geometry.questions_per_table[i];
            let table = AnswerTable {
                num_questions: questions,
                num_choices: geometry.num_choices,
                first_question_number,
                num_digits_question_num: num_digits,
                // Shorter tables get one trailing line so every bottom
                // border aligns with the tallest table
                extra_bottom_line: questions < geometry.num_rows,
            };
            let corner = Point {
                x: top_left_corner.x
                    + i as i32 * (geometry.num_choices as i32 + 1) * cell_size.width,
                y: top_left_corner.y,
            };
            let fragment = &infobits
                [i * geometry.num_choices as usize..(i + 1) * geometry.num_choices as usize];
            table.draw(surface, corner, cell_size, fragment)?;
            first_question_number += questions;
        }

        if geometry.num_id_digits > 0 {
            let id_box = IdBox {
                num_id_digits: geometry.num_id_digits,
            };
            let id_cell_size = geometry.id_cell_size(cell_size);
            let id_corner =
                geometry.id_top_left_corner(cell_size, id_cell_size, top_left_corner, surface.width());
            id_box.draw(surface, id_corner, id_cell_size, &self.id_box_label)?;
        }

        if self.print_model_letter {
            surface.fill_text(
                &model_letter.to_string(),
                surface.width() - 10,
                surface.height() - 10,
                10.0,
                TextAlign::Right,
            )?;
        }
        Ok(())
    }
}

fn question_number_digits(num_questions: u32) -> u32 {
    if num_questions < 10 {
        1
    } else if num_questions < 100 {
        2
    } else {
        3
    }
}

// ============================================================================
// Answer Table
// ============================================================================

/// One block of question rows: a header row of choice letters, the answer
/// grid, and two infobit rows underneath.
struct AnswerTable {
    num_questions: u32,
    num_choices: u32,
    first_question_number: u32,
    num_digits_question_num: u32,
    extra_bottom_line: bool,
}

impl AnswerTable {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        top_left_corner: Point,
        cell_size: CellSize,
        infobits_fragment: &str,
    ) -> Result<(), SheetError> {
        let left_x = top_left_corner.x + cell_size.width;
        let right_x = left_x + cell_size.width * self.num_choices as i32;
        let top_y = top_left_corner.y + cell_size.height;
        let bottom_y = top_y + cell_size.height * self.num_questions as i32;
        self.draw_lines(surface, cell_size, left_x, right_x, top_y, bottom_y)?;
        self.draw_question_numbers(surface, cell_size, top_left_corner)?;
        self.draw_choice_letters(surface, cell_size, top_left_corner)?;
        self.draw_infobits(surface, cell_size, top_left_corner, infobits_fragment)
    }

    fn draw_lines(
        &self,
        surface: &mut dyn DrawingSurface,
        cell_size: CellSize,
        left_x: i32,
        right_x: i32,
        top_y: i32,
        bottom_y: i32,
    ) -> Result<(), SheetError> {
        let mut segments = Vec::new();
        for i in 0..=self.num_choices as i32 {
            let x = left_x + i * cell_size.width;
            segments.push(Segment {
                from: Point { x, y: top_y },
                to: Point { x, y: bottom_y },
            });
        }
        let num_lines = if self.extra_bottom_line {
            // Extra line because other tables have one row more
            self.num_questions + 2
        } else {
            self.num_questions + 1
        };
        for i in 0..num_lines as i32 {
            let y = top_y + i * cell_size.height;
            segments.push(Segment {
                from: Point { x: left_x, y },
                to: Point { x: right_x, y },
            });
        }
        surface.stroke_segments(&segments)
    }

    fn draw_question_numbers(
        &self,
        surface: &mut dyn DrawingSurface,
        cell_size: CellSize,
        top_left_corner: Point,
    ) -> Result<(), SheetError> {
        let font_size = self.font_size(cell_size);
        let offset_x = (0.9 * cell_size.width as f64) as i32;
        let offset_y = (0.9 * cell_size.height as f64) as i32;
        for i in 1..=self.num_questions as i32 {
            let question_num = self.first_question_number as i32 + i - 1;
            surface.fill_text(
                &question_num.to_string(),
                top_left_corner.x + offset_x,
                top_left_corner.y + offset_y + cell_size.height * i,
                font_size,
                TextAlign::Right,
            )?;
        }
        Ok(())
    }

    fn draw_choice_letters(
        &self,
        surface: &mut dyn DrawingSurface,
        cell_size: CellSize,
        top_left_corner: Point,
    ) -> Result<(), SheetError> {
        let font_size = self.font_size(cell_size);
        let offset_x = (0.5 * cell_size.width as f64) as i32;
        let offset_y = (0.9 * cell_size.height as f64) as i32;
        for i in 1..=self.num_choices {
            let letter = char::from_u32('A' as u32 + i - 1).unwrap_or('?');
            surface.fill_text(
                &letter.to_string(),
                top_left_corner.x + offset_x + cell_size.width * i as i32,
                top_left_corner.y + offset_y,
                font_size,
                TextAlign::Center,
            )?;
        }
        Ok(())
    }

    fn draw_infobits(
        &self,
        surface: &mut dyn DrawingSurface,
        cell_size: CellSize,
        top_left_corner: Point,
        infobits_fragment: &str,
    ) -> Result<(), SheetError> {
        let y_up = (top_left_corner.y as f64
            + (self.num_questions as i32 + 1) as f64 * cell_size.height as f64
            + 0.2 * cell_size.height as f64) as i32;
        let y_down = y_up + cell_size.height;
        let size = (0.6 * cell_size.height as f64) as i32;
        let x_base = top_left_corner.x + (cell_size.width - size) / 2;
        for (i, bit) in infobits_fragment.chars().enumerate() {
            let x = x_base + (i as i32 + 1) * cell_size.width;
            let y = if bit == 'U' { y_up } else { y_down };
            surface.fill_rect(x, y, size, size)?;
        }
        Ok(())
    }

    /// Question numbers and choice letters share a size that keeps the
    /// widest question number inside its cell.
    fn font_size(&self, cell_size: CellSize) -> f64 {
        let size_for_width = cell_size.width / self.num_digits_question_num as i32;
        size_for_width.min(cell_size.height) as f64
    }
}

// ============================================================================
// ID Box
// ============================================================================

struct IdBox {
    num_id_digits: u32,
}

impl IdBox {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        top_left_corner: Point,
        id_cell_size: CellSize,
        label: &str,
    ) -> Result<(), SheetError> {
        let bottom_right_corner = Point {
            x: top_left_corner.x + self.num_id_digits as i32 * id_cell_size.width,
            y: top_left_corner.y + id_cell_size.height,
        };
        // Top, right and bottom edges; the digit separators below supply
        // the left edge at index 0
        let mut segments = vec![
            Segment {
                from: top_left_corner,
                to: Point {
                    x: bottom_right_corner.x,
                    y: top_left_corner.y,
                },
            },
            Segment {
                from: Point {
                    x: bottom_right_corner.x,
                    y: top_left_corner.y,
                },
                to: bottom_right_corner,
            },
            Segment {
                from: bottom_right_corner,
                to: Point {
                    x: top_left_corner.x,
                    y: bottom_right_corner.y,
                },
            },
        ];
        for i in 0..self.num_id_digits as i32 {
            let x = top_left_corner.x + i * id_cell_size.width;
            segments.push(Segment {
                from: Point {
                    x,
                    y: top_left_corner.y,
                },
                to: Point {
                    x,
                    y: bottom_right_corner.y,
                },
            });
        }
        surface.stroke_segments(&segments)?;
        if !label.is_empty() {
            self.draw_label(surface, top_left_corner, id_cell_size, label)?;
        }
        Ok(())
    }

    fn draw_label(
        &self,
        surface: &mut dyn DrawingSurface,
        top_left_corner: Point,
        id_cell_size: CellSize,
        label: &str,
    ) -> Result<(), SheetError> {
        let font_size = 0.8 * id_cell_size.height as f64;
        let offset_x = -((0.3 * id_cell_size.width as f64) as i32);
        let offset_y = (0.9 * id_cell_size.height as f64) as i32;
        surface.fill_text(
            label,
            top_left_corner.x + offset_x,
            top_left_corner.y + offset_y,
            font_size,
            TextAlign::Right,
        )
    }
}
