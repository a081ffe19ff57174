
/// Failures from partition construction, pair counting, and metric evaluation
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("partitions do not share a universe: {reason}")]
    PartitionMismatch { reason: String },
    #[error("{measure} has not been implemented; choose from {valid}")]
    UnsupportedMeasure { measure: String, valid: String },
    #[error("{metric} is undefined when its denominator is 0")]
    DivisionUndefined { metric: String },
    #[error("cluster #{index} is empty")]
    EmptyCluster { index: usize },
    #[error("element {element} appears in more than one cluster")]
    DuplicateElement { element: String },
}
