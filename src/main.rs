// answer-sheet: generate printable bubble answer sheets as PDF files

use clap::Parser;
use std::path::Path;

use answer_sheet::{infobits, ExamStructure, PdfSurface, SheetError, SheetRenderer};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate multiple-choice bubble answer sheets")]
struct Args {
    /// Number of questions
    #[arg(short = 'q', long, required_unless_present = "exam")]
    questions: Option<u32>,

    /// Number of choices per question
    #[arg(short = 'c', long, default_value = "4")]
    choices: u32,

    /// Number of student ID digits (0 disables the ID box)
    #[arg(long, default_value = "0")]
    id_digits: u32,

    /// Label printed left of the ID box
    #[arg(long, default_value = "")]
    id_label: String,

    /// Print the model letter in the bottom-right corner of each sheet
    #[arg(long)]
    print_model_letter: bool,

    /// Exam description file (JSON, overrides the exam flags above)
    #[arg(long)]
    exam: Option<String>,

    /// Model letters to generate, one sheet per letter (A through H)
    #[arg(short, long, default_value = "A")]
    models: String,

    /// Surface width in pixels
    #[arg(long, default_value = "1000")]
    width: i32,

    /// Surface height in pixels
    #[arg(long, default_value = "1400")]
    height: i32,

    /// Output filename (single model only; defaults to answer-box-{model}.pdf)
    #[arg(short, long)]
    output: Option<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SheetError> {
    let args = Args::parse();

    let exam = match &args.exam {
        Some(path) => load_exam(path)?,
        None => ExamStructure {
            num_questions: args.questions.unwrap_or(0),
            num_choices: args.choices,
            num_id_digits: args.id_digits,
            id_box_label: args.id_label.clone(),
            print_model_letter: args.print_model_letter,
        },
    };

    let models: Vec<char> = args.models.chars().collect();
    if models.is_empty() {
        return Err(SheetError::BadModelLetter(' '));
    }
    // Reject bad letters before any file is written
    for &letter in &models {
        infobits::encode(letter, 1)?;
    }

    let renderer = SheetRenderer::new(&exam)?;

    for &letter in &models {
        let mut surface = PdfSurface::new(args.width, args.height)?;
        renderer.render(&mut surface, letter)?;
        let filename = match (&args.output, models.len()) {
            (Some(output), 1) => output.clone(),
            _ => format!("answer-box-{}.pdf", letter),
        };
        surface.save(Path::new(&filename))?;
        println!("✓ Generated: {}", filename);
    }

    let geometry = renderer.geometry();
    println!(
        "  Questions: {} ({} choices each)",
        exam.num_questions, exam.num_choices
    );
    println!(
        "  Tables: {} ({:?} questions per table)",
        geometry.num_tables, geometry.questions_per_table
    );
    if exam.num_id_digits > 0 {
        println!("  ID digits: {}", exam.num_id_digits);
    }

    Ok(())
}

fn load_exam(path: &str) -> Result<ExamStructure, SheetError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SheetError::ExamFileError(format!("{}: {}", path, e)))?;
    serde_json::from_str(&content)
        .map_err(|e| SheetError::ExamFileError(format!("Invalid JSON: {}", e)))
}
