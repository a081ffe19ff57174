
/// Formats scores for the compare sub-command output line
pub mod score_line;
/// Summary table for batch comparisons
pub mod summary;
