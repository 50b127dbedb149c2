/// The review panel never shows more than this many outs, whatever the real count.
pub const OUTS_DISPLAY_CEILING: usize = 15;

/// Render an integer with a comma every three digits.
pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Percentage of undrawn cards that are outs, rounded down.
pub fn outs_percentage(outs: usize, draws: u32) -> u32 {
    if draws == 0 {
        return 0;
    }
    (outs as u64 * 100 / draws as u64) as u32
}

/// How many out cards the review panel draws.
pub fn displayed_outs(outs: usize) -> usize {
    outs.min(OUTS_DISPLAY_CEILING)
}
