use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_answer-sheet"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_basic_sheet() {
    setup();
    let output_file = "test-basic.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-q", "20",
            "-c", "3",
            "--id-digits", "8",
            "--id-label", "Id:",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 500, "PDF file is too small, likely empty or corrupt");
}

#[test]
fn test_no_id_box() {
    setup();
    let output_file = "test-no-id.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-q", "100",
            "-c", "4",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_multiple_models() {
    setup();
    for letter in ["A", "B", "C"] {
        cleanup_file(&format!("answer-box-{}.pdf", letter));
    }

    let output = cargo_bin()
        .current_dir(output_dir())
        .args(["-q", "30", "--models", "ABC", "--print-model-letter"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    for letter in ["A", "B", "C"] {
        let path = output_dir().join(format!("answer-box-{}.pdf", letter));
        assert!(path.exists(), "PDF for model {} was not created", letter);
        let metadata = fs::metadata(&path).expect("Failed to get file metadata");
        assert!(metadata.len() > 500, "PDF for model {} is too small", letter);
    }
}

#[test]
fn test_exam_from_json_file() {
    setup();
    let output_file = "test-from-json.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "--exam", "tests/fixtures/exam.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_custom_surface_size() {
    setup();
    let output_file = "test-surface-size.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-q", "50",
            "--width", "800",
            "--height", "1100",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_dir().join(output_file).exists(), "PDF file was not created");
}

#[test]
fn test_unsupported_model_letter() {
    let output = cargo_bin()
        .args([
            "-q", "10",
            "--models", "I",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for model I");
    assert!(!Path::new("tests/output/should-not-exist.pdf").exists());
}

#[test]
fn test_zero_questions_rejected() {
    let output = cargo_bin()
        .args([
            "-q", "0",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for 0 questions");
}

#[test]
fn test_missing_exam_file() {
    let output = cargo_bin()
        .args([
            "--exam", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing exam file");
}

#[test]
fn test_surface_too_small() {
    let output = cargo_bin()
        .args([
            "-q", "1",
            "-c", "1",
            "--id-digits", "1000",
            "--width", "100",
            "--height", "100",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for a degenerate layout");
}
