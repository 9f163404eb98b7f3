// answer-sheet: layout and rendering of multiple-choice bubble answer sheets
//
// The geometry module picks the best table arrangement for an exam and
// derives absolute pixel positions for a concrete surface size; the render
// module draws the tables, student-ID grid and infobit marks through the
// DrawingSurface trait; the pdf module provides a printpdf-backed surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod geometry;
pub mod infobits;
pub mod pdf;
pub mod render;

pub use geometry::{best_geometry, CellSize, Geometry, Point};
pub use pdf::PdfSurface;
pub use render::{DrawingSurface, Segment, SheetRenderer, TextAlign};

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid number of questions: {0} (must be 1 or more)")]
    BadQuestionCount(u32),
    #[error("Invalid number of choices: {0} (must be 1 or more)")]
    BadChoiceCount(u32),
    #[error("Unsupported model letter: {0} (supported models are A through H)")]
    BadModelLetter(char),
    #[error("Surface {0}x{1} px is too small for the requested layout")]
    SurfaceTooSmall(i32, i32),
    #[error("Failed to draw on surface: {0}")]
    DrawError(String),
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read exam file: {0}")]
    ExamFileError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// ============================================================================
// Exam Description
// ============================================================================

/// User-supplied description of one exam sheet. Immutable once built;
/// geometry is derived from it on every render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamStructure {
    pub num_questions: u32,
    pub num_choices: u32,
    #[serde(default)]
    pub num_id_digits: u32,
    #[serde(default)]
    pub id_box_label: String,
    #[serde(default)]
    pub print_model_letter: bool,
}

impl ExamStructure {
    /// Rejects values that would silently mislead about the printed layout.
    /// Nothing is ever clamped.
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.num_questions < 1 {
            return Err(SheetError::BadQuestionCount(self.num_questions));
        }
        if self.num_choices < 1 {
            return Err(SheetError::BadChoiceCount(self.num_choices));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(num_questions: u32, num_choices: u32) -> ExamStructure {
        ExamStructure {
            num_questions,
            num_choices,
            num_id_digits: 0,
            id_box_label: String::new(),
            print_model_letter: false,
        }
    }

    #[test]
    fn validate_accepts_minimal_exam() {
        assert!(exam(1, 1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_questions() {
        let err = exam(0, 4).validate().unwrap_err();
        assert!(matches!(err, SheetError::BadQuestionCount(0)));
    }

    #[test]
    fn validate_rejects_zero_choices() {
        let err = exam(10, 0).validate().unwrap_err();
        assert!(matches!(err, SheetError::BadChoiceCount(0)));
    }

    #[test]
    fn exam_structure_deserializes_with_defaults() {
        let exam: ExamStructure =
            serde_json::from_str(r#"{"num_questions": 20, "num_choices": 4}"#).unwrap();
        assert_eq!(exam.num_questions, 20);
        assert_eq!(exam.num_id_digits, 0);
        assert_eq!(exam.id_box_label, "");
        assert!(!exam.print_model_letter);
    }
}
