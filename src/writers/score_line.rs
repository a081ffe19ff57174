
use itertools::Itertools;

/// Formats scores as one tab-separated line.
/// Values always carry a decimal point (e.g. `1.0`, `0.2`) and otherwise use the shortest exact representation.
/// This is not byte-identical to the old script, which rounded to 12 significant digits (`0.166666666667`).
pub fn format_score_line(scores: &[f64]) -> String {
    scores.iter()
        .map(|score| format!("{score:?}"))
        .join("\t")
}
