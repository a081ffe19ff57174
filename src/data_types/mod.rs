
/// Shared error type for partitions and similarity scores
pub mod errors;
/// Contains the (a, b, c, d) pair counts and the coefficients derived from them
pub mod pair_counts;
/// Partitions, label vectors, and conversions between the two
pub mod partition;
