// Infobits: a machine-readable row of marks under the answer tables that
// encodes the exam model letter for later optical disambiguation.

use crate::SheetError;

/// Base 4-bit patterns, indexed by model letter A through H. Each character
/// places a mark in the upper (`U`) or lower (`D`) infobit row.
const INFOBITS_TABLE: [&str; 8] = [
    "DDDU", // A
    "UDDD", // B
    "DUDD", // C
    "UUDU", // D
    "DDUD", // E
    "UDUU", // F
    "DUUU", // G
    "UUUD", // H
];

/// Tiles the model's base pattern across all answer columns, truncated to
/// exactly `num_columns` characters. Only the eight 4-bit patterns exist,
/// so letters past H are rejected.
pub fn encode(model_letter: char, num_columns: u32) -> Result<String, SheetError> {
    let index = (model_letter as u32).wrapping_sub('A' as u32) as usize;
    let base_code = *INFOBITS_TABLE
        .get(index)
        .ok_or(SheetError::BadModelLetter(model_letter))?;
    let mut code = String::with_capacity(num_columns as usize + base_code.len());
    while code.len() < num_columns as usize {
        code.push_str(base_code);
    }
    code.truncate(num_columns as usize);
    Ok(code)
}
