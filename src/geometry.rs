// Geometry fitting: split the questions into side-by-side tables so that
// grid cells stay close to the default 1.5 width/height ratio, then derive
// absolute pixel sizes and origins for a concrete surface.

use crate::SheetError;

// ============================================================================
// Layout Constants
// ============================================================================

/// Desired cell aspect ratio (width / height).
pub const DEFAULT_CELL_RATIO: f64 = 1.5;

/// 2% margins on each side.
const USABLE_WIDTH: f64 = 0.96;
const USABLE_HEIGHT: f64 = 0.96;

/// Gap between the ID box bottom line and the top answer table line,
/// in cell heights.
pub const ID_BOTTOM_LINE_DIST: f64 = 0.6;

/// Candidate table counts are 1 through this fixed upper bound.
const MAX_TABLES: u32 = 6;

/// No cell dimension may exceed the other by more than 30%.
const MAX_SKEW: f64 = 1.3;
const MIN_SKEW: f64 = 0.769;

// ============================================================================
// Pixel-Space Values
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

// ============================================================================
// Geometry
// ============================================================================

/// One candidate layout, fully derived from the exam parameters and a table
/// count. Immutable; pixel sizes are recomputed per surface, never cached.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub num_questions: u32,
    pub num_choices: u32,
    pub num_tables: u32,
    pub questions_per_table: Vec<u32>,
    pub num_rows: u32,
    pub num_columns: u32,
    /// Answer rows plus the header line and the two infobit lines.
    pub total_rows: u32,
    /// Answer columns plus one question-number column per table.
    pub total_columns: u32,
    pub cell_ratio: f64,
    pub num_id_digits: u32,
    /// Ratio cell_height / id_cell_height; 0.0 when there is no ID box.
    pub id_cell_ratio: f64,
}

impl Geometry {
    pub fn new(num_questions: u32, num_choices: u32, num_tables: u32, num_id_digits: u32) -> Self {
        let questions_per_table = compute_questions_per_table(num_questions, num_tables);
        let num_rows = *questions_per_table.iter().max().unwrap_or(&0);
        let num_columns = num_tables * num_choices;
        let cell_ratio = compute_cell_ratio(num_rows, num_columns);
        let id_cell_ratio = compute_id_cell_ratio(num_columns, cell_ratio, num_id_digits);
        Geometry {
            num_questions,
            num_choices,
            num_tables,
            questions_per_table,
            num_rows,
            num_columns,
            total_rows: num_rows + 3,
            total_columns: num_columns + num_tables,
            cell_ratio,
            num_id_digits,
            id_cell_ratio,
        }
    }

    /// Derives the answer-cell size for a surface, width-first, then scales
    /// down uniformly if the layout would overflow the usable height.
    /// All pixel values truncate toward zero so adjacent grid lines never
    /// overlap.
    pub fn cell_size(&self, surface_width: i32, surface_height: i32) -> Result<CellSize, SheetError> {
        let usable_width = USABLE_WIDTH * surface_width as f64;
        let usable_height = USABLE_HEIGHT * surface_height as f64;
        let mut cell_width;
        let mut cell_height;
        if self.total_columns as f64 * self.cell_ratio
            >= self.num_id_digits as f64 * self.id_cell_ratio
        {
            // Answer tables are wider than the ID box
            cell_width = (usable_width / self.total_columns as f64) as i32;
            cell_height = (cell_width as f64 / self.cell_ratio) as i32;
        } else {
            // The ID box is wider than the answer tables
            let id_cell_width = (usable_width / self.num_id_digits as f64) as i32;
            cell_height = (self.id_cell_ratio * id_cell_width as f64) as i32;
            cell_width = (cell_height as f64 * self.cell_ratio) as i32;
        }
        let mut total_height = self.total_rows as f64 * cell_height as f64;
        if self.num_id_digits > 0 {
            total_height += ID_BOTTOM_LINE_DIST * cell_height as f64
                + (cell_height as f64 / self.id_cell_ratio).trunc();
        }
        if total_height > usable_height {
            let scale_factor = usable_height / total_height;
            cell_width = (cell_width as f64 * scale_factor) as i32;
            cell_height = (cell_height as f64 * scale_factor) as i32;
        }
        if cell_width < 1 || cell_height < 1 {
            return Err(SheetError::SurfaceTooSmall(surface_width, surface_height));
        }
        Ok(CellSize {
            width: cell_width,
            height: cell_height,
        })
    }

    /// ID digit cells are square, sized from the answer-cell height.
    pub fn id_cell_size(&self, cell_size: CellSize) -> CellSize {
        let side = (cell_size.height as f64 / self.id_cell_ratio) as i32;
        CellSize {
            width: side,
            height: side,
        }
    }

    /// Top-left corner of the answer-table block: horizontally centered,
    /// vertically centered together with the ID box sitting above it.
    pub fn top_left_corner(
        &self,
        cell_size: CellSize,
        surface_width: i32,
        surface_height: i32,
    ) -> Point {
        let tables_height = self.total_rows as i32 * cell_size.height;
        let extra_height = if self.num_id_digits > 0 {
            (ID_BOTTOM_LINE_DIST * cell_size.height as f64
                + cell_size.height as f64 / self.id_cell_ratio) as i32
        } else {
            0
        };
        Point {
            x: (surface_width - cell_size.width * self.total_columns as i32) / 2,
            y: (surface_height - tables_height - extra_height) / 2 + extra_height,
        }
    }

    /// Top-left corner of the ID box, directly above the answer tables.
    pub fn id_top_left_corner(
        &self,
        cell_size: CellSize,
        id_cell_size: CellSize,
        top_left_corner: Point,
        surface_width: i32,
    ) -> Point {
        Point {
            x: (surface_width - id_cell_size.width * self.num_id_digits as i32) / 2,
            y: top_left_corner.y
                - (ID_BOTTOM_LINE_DIST * cell_size.height as f64) as i32
                - id_cell_size.height,
        }
    }
}

fn compute_cell_ratio(num_rows: u32, num_columns: u32) -> f64 {
    let actual_ratio = DEFAULT_CELL_RATIO * num_columns as f64 / num_rows as f64;
    // No dimension should be more than 30% larger than the other
    if actual_ratio > MAX_SKEW {
        // Cells are too wide
        MAX_SKEW * num_rows as f64 / num_columns as f64
    } else if actual_ratio < MIN_SKEW {
        // Cells are too high
        MIN_SKEW * num_rows as f64 / num_columns as f64
    } else {
        DEFAULT_CELL_RATIO
    }
}

fn compute_id_cell_ratio(num_columns: u32, cell_ratio: f64, num_id_digits: u32) -> f64 {
    // Default: square digit cells as high as answer table rows (ratio 1.0)
    if num_id_digits < 1 {
        // No ID box will be printed
        return 0.0;
    }
    let id_cells_width = num_id_digits as f64;
    let horizontal_lines_width = num_columns as f64 * cell_ratio;
    let horizontal_ratio = horizontal_lines_width / id_cells_width;
    if horizontal_ratio > MAX_SKEW {
        MAX_SKEW / horizontal_ratio
    } else if horizontal_ratio < MIN_SKEW {
        MIN_SKEW / horizontal_ratio
    } else {
        1.0
    }
}

fn compute_questions_per_table(num_questions: u32, num_tables: u32) -> Vec<u32> {
    let q = num_questions / num_tables;
    let mut remainder = num_questions % num_tables;
    let mut questions_per_table = Vec::with_capacity(num_tables as usize);
    for _ in 0..num_tables {
        if remainder > 0 {
            questions_per_table.push(q + 1);
            remainder -= 1;
        } else {
            questions_per_table.push(q);
        }
    }
    questions_per_table
}

// ============================================================================
// Geometry Fitting
// ============================================================================

/// Picks the table count whose cell ratio lands closest to the default 1.5.
///
/// Candidates are visited in increasing table order and iteration stops at
/// the first candidate that is farther from the default than the previous
/// one. The distance is not monotone in general, but in practice it
/// decreases and then increases, so the first local minimum is kept.
pub fn best_geometry(num_questions: u32, num_choices: u32, num_id_digits: u32) -> Geometry {
    let mut best_dist = f64::INFINITY;
    let mut best: Option<Geometry> = None;
    for num_tables in 1..=MAX_TABLES {
        let candidate = Geometry::new(num_questions, num_choices, num_tables, num_id_digits);
        let dist = (candidate.cell_ratio - DEFAULT_CELL_RATIO).abs();
        if dist < best_dist {
            best_dist = dist;
            best = Some(candidate);
        } else {
            // Once a candidate is farther from the default than the
            // previous one, iteration can stop.
            break;
        }
    }
    // The first candidate always improves on infinity
    best.expect("at least one candidate geometry")
}
