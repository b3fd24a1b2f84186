/// Glyphs for zero-run counts `0..=17`.
pub const SUBSCRIPT_TABLE: [&str; 18] = [
    "₀", "₁", "₂", "₃", "₄", "₅", "₆", "₇", "₈", "₉", "₁₀", "₁₁", "₁₂", "₁₃", "₁₄", "₁₅", "₁₆",
    "₁₇",
];

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// Subscript rendering of `count`. Counts past the table are composed digit by digit.
pub fn subscript_digits(count: usize) -> String {
    if let Some(glyph) = SUBSCRIPT_TABLE.get(count) {
        return (*glyph).to_string();
    }
    count
        .to_string()
        .chars()
        .map(|c| {
            c.to_digit(10)
                .map(|d| SUBSCRIPT_DIGITS[d as usize])
                .unwrap_or(c)
        })
        .collect()
}
