/*!
# Similarity
Entry points for scoring the agreement between two partitions of the same elements.
The pair counts are computed once per call and shared by every requested measure.
There are controls via the `ScoreConfig` struct for the counting strategy and for how undefined recall/precision are reported.

## Example usage
```rust
use clustsim::data_types::partition::Partition;
use clustsim::similarity::{cluster_similarity_scores, recall_and_precision, ScoreConfig, ScoreConfigBuilder, RecallPrecisionPolicy};

let x = Partition::new(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
let y = Partition::new(vec![vec![0], vec![1], vec![2], vec![3, 4, 5]]).unwrap();

// named measures come back in the requested order
let scores = cluster_similarity_scores(&x, &y, &["ji", "ri"], ScoreConfig::default()).unwrap();
assert_eq!(scores[0], 0.2);
assert!((scores[1] - 11.0 / 15.0).abs() < 1e-12);

// unknown names are rejected before anything is computed
let error = cluster_similarity_scores(&x, &y, &["ji", "bogus"], ScoreConfig::default()).unwrap_err();
assert_eq!(error.to_string(), "bogus has not been implemented; choose from ari, f1, fmi, ji, ri");

// all singletons have no co-clustered pairs, so recall is undefined unless we opt in to a vacuous value
let singletons = Partition::new(vec![vec![0], vec![1], vec![2]]).unwrap();
assert!(recall_and_precision(&singletons, &singletons, ScoreConfig::default()).is_err());
let config = ScoreConfigBuilder::default()
    .recall_precision_policy(RecallPrecisionPolicy::VacuousAgreement)
    .build().unwrap();
assert_eq!(recall_and_precision(&singletons, &singletons, config).unwrap(), (1.0, 1.0));
```
*/
use derive_builder::Builder;
use itertools::Itertools;
use log::debug;
use serde::Serialize;
use std::str::FromStr;
use strum::IntoEnumIterator;

use crate::data_types::errors::SimilarityError;
use crate::data_types::pair_counts::PairCount;
use crate::data_types::partition::{Element, Partition};
use crate::pair_counter::{count_partition_pairs, CountStrategy};

/// The closed set of named measures accepted by `cluster_similarity_scores`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter, Serialize)]
pub enum Measure {
    /// Jaccard index
    #[strum(serialize = "ji")]
    Ji,
    /// Rand index
    #[strum(serialize = "ri")]
    Ri,
    /// Adjusted Rand index
    #[strum(serialize = "ari")]
    Ari,
    /// Fowlkes-Mallows index
    #[strum(serialize = "fmi")]
    Fmi,
    /// F1 score over pairs
    #[strum(serialize = "f1")]
    F1
}

impl Measure {
    /// All accepted names, sorted and comma-joined
    pub fn valid_names() -> String {
        Measure::iter()
            .map(|m| m.to_string())
            .sorted()
            .join(", ")
    }

    /// Validates every name before returning any measure.
    /// # Arguments
    /// * `names` - the requested measure names, in output order
    /// # Errors
    /// * `UnsupportedMeasure` for the first name that is not in the registry
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Measure>, SimilarityError> {
        names.iter()
            .map(|name| {
                Measure::from_str(name.as_ref())
                    .map_err(|_e| SimilarityError::UnsupportedMeasure {
                        measure: name.as_ref().to_string(),
                        valid: Measure::valid_names()
                    })
            })
            .collect()
    }

    /// Evaluates this measure on a set of pair counts
    pub fn score(&self, counts: &PairCount) -> f64 {
        match self {
            Measure::Ji => counts.jaccard_index(),
            Measure::Ri => counts.rand_index(),
            Measure::Ari => counts.adjusted_rand_index(),
            Measure::Fmi => counts.fowlkes_mallows_index(),
            Measure::F1 => counts.f1_score()
        }
    }
}

/// How recall and precision are reported when their denominator is 0
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, strum_macros::Display, Serialize)]
pub enum RecallPrecisionPolicy {
    /// Report `DivisionUndefined`
    #[default]
    #[strum(serialize = "strict")]
    Strict,
    /// Report 1.0, the same convention the guarded indices use
    #[strum(serialize = "vacuous")]
    VacuousAgreement
}

impl RecallPrecisionPolicy {
    fn resolve(&self, value: Result<f64, SimilarityError>) -> Result<f64, SimilarityError> {
        match self {
            RecallPrecisionPolicy::Strict => value,
            RecallPrecisionPolicy::VacuousAgreement => Ok(value.unwrap_or(1.0))
        }
    }
}

/// Controls how partitions get scored
#[derive(Builder, Clone, Copy, Debug, Default, Serialize)]
#[builder(default)]
pub struct ScoreConfig {
    /// the algorithm used for the pair counts
    count_strategy: CountStrategy,
    /// what to do with an undefined recall or precision
    recall_precision_policy: RecallPrecisionPolicy
}

impl ScoreConfig {
    // mostly getters
    pub fn count_strategy(&self) -> CountStrategy {
        self.count_strategy
    }

    pub fn recall_precision_policy(&self) -> RecallPrecisionPolicy {
        self.recall_precision_policy
    }
}

/// Computes several named similarity scores from one pair-count pass.
/// # Arguments
/// * `x` - the first partition
/// * `y` - the second partition
/// * `measures` - names from `ji`, `ri`, `ari`, `fmi`, `f1`; output follows this order
/// * `config` - scoring controls
/// # Errors
/// * `UnsupportedMeasure` if any name is unknown, before any counting happens
/// * `PartitionMismatch` if the partitions cover different elements
pub fn cluster_similarity_scores<T: Element, S: AsRef<str>>(
    x: &Partition<T>, y: &Partition<T>, measures: &[S], config: ScoreConfig
) -> Result<Vec<f64>, SimilarityError> {
    let measures = Measure::parse_all(measures)?;
    let counts = count_partition_pairs(x, y, config.count_strategy())?;
    debug!("Pair counts: {counts:?}");
    Ok(score_measures(&counts, &measures))
}

/// Evaluates already-validated measures on a set of pair counts, preserving order
pub fn score_measures(counts: &PairCount, measures: &[Measure]) -> Vec<f64> {
    measures.iter()
        .map(|m| m.score(counts))
        .collect()
}

/// Computes recall and precision from one pair-count pass.
/// These are not symmetric, so the argument order matters.
/// # Arguments
/// * `inferred` - the inferred partition
/// * `truth` - the true partition
/// * `config` - scoring controls
/// # Errors
/// * `PartitionMismatch` if the partitions cover different elements
/// * `DivisionUndefined` under the strict policy if either has no co-clustered pairs
pub fn recall_and_precision<T: Element>(inferred: &Partition<T>, truth: &Partition<T>, config: ScoreConfig) -> Result<(f64, f64), SimilarityError> {
    let counts = count_partition_pairs(inferred, truth, config.count_strategy())?;
    debug!("Pair counts: {counts:?}");
    let policy = config.recall_precision_policy();
    let recall = policy.resolve(counts.recall())?;
    let precision = policy.resolve(counts.precision())?;
    Ok((recall, precision))
}

/// Every score for a truth/inferred pair, computed from a single pair count
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PartitionComparison {
    /// Size of the shared universe
    num_elements: usize,
    /// Number of clusters in the true partition
    truth_clusters: usize,
    /// Number of clusters in the inferred partition
    inferred_clusters: usize,
    /// Pair counts with the inferred partition first; `b` is inferred-only, `c` is truth-only
    pair_counts: PairCount,
    rand_index: f64,
    adjusted_rand_index: f64,
    jaccard_index: f64,
    fowlkes_mallows_index: f64,
    f1_score: f64,
    /// None if undefined under the configured policy
    recall: Option<f64>,
    /// None if undefined under the configured policy
    precision: Option<f64>
}

impl PartitionComparison {
    /// Scores an inferred partition against the truth.
    /// # Arguments
    /// * `truth` - the true partition
    /// * `inferred` - the inferred partition
    /// * `config` - scoring controls
    /// # Errors
    /// * `PartitionMismatch` if the partitions cover different elements
    pub fn compare<T: Element>(truth: &Partition<T>, inferred: &Partition<T>, config: ScoreConfig) -> Result<Self, SimilarityError> {
        let pair_counts = count_partition_pairs(inferred, truth, config.count_strategy())?;
        let policy = config.recall_precision_policy();
        Ok(Self {
            num_elements: truth.num_elements(),
            truth_clusters: truth.num_clusters(),
            inferred_clusters: inferred.num_clusters(),
            pair_counts,
            rand_index: pair_counts.rand_index(),
            adjusted_rand_index: pair_counts.adjusted_rand_index(),
            jaccard_index: pair_counts.jaccard_index(),
            fowlkes_mallows_index: pair_counts.fowlkes_mallows_index(),
            f1_score: pair_counts.f1_score(),
            recall: policy.resolve(pair_counts.recall()).ok(),
            precision: policy.resolve(pair_counts.precision()).ok()
        })
    }

    /// Looks up one of the named measures
    pub fn score(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Ji => self.jaccard_index,
            Measure::Ri => self.rand_index,
            Measure::Ari => self.adjusted_rand_index,
            Measure::Fmi => self.fowlkes_mallows_index,
            Measure::F1 => self.f1_score
        }
    }

    // getters
    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn truth_clusters(&self) -> usize {
        self.truth_clusters
    }

    pub fn inferred_clusters(&self) -> usize {
        self.inferred_clusters
    }

    pub fn pair_counts(&self) -> PairCount {
        self.pair_counts
    }

    pub fn recall(&self) -> Option<f64> {
        self.recall
    }

    pub fn precision(&self) -> Option<f64> {
        self.precision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    fn example_pair() -> (Partition<u32>, Partition<u32>) {
        (
            Partition::new(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap(),
            Partition::new(vec![vec![0], vec![1], vec![2], vec![3, 4, 5]]).unwrap()
        )
    }

    fn all_configs() -> Vec<ScoreConfig> {
        [CountStrategy::Naive, CountStrategy::Indexed].into_iter()
            .map(|strategy| ScoreConfigBuilder::default().count_strategy(strategy).build().unwrap())
            .collect()
    }

    #[test]
    fn test_example_scores() {
        let (x, y) = example_pair();
        for config in all_configs() {
            let scores = cluster_similarity_scores(&x, &y, &["ri", "ari", "ji", "f1", "fmi"], config).unwrap();
            assert_eq!(scores.len(), 5);
            assert_approx_eq!(scores[0], 0.7333333333333333);
            assert_approx_eq!(scores[1], 0.16666666666666666);
            assert_approx_eq!(scores[2], 0.2);
            assert_approx_eq!(scores[3], 0.3333333333333333);
            assert_approx_eq!(scores[4], 0.3333333333333333);
        }
    }

    #[test]
    fn test_order_and_repeats() {
        let (x, y) = example_pair();
        let scores = cluster_similarity_scores(&x, &y, &["ji", "ri", "ji"], ScoreConfig::default()).unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], scores[2]);
        assert_approx_eq!(scores[1], 11.0 / 15.0);

        let owned: Vec<String> = vec!["ari".to_string()];
        let scores = cluster_similarity_scores(&x, &y, &owned, ScoreConfig::default()).unwrap();
        assert_approx_eq!(scores[0], 1.0 / 6.0);

        let empty: [&str; 0] = [];
        assert!(cluster_similarity_scores(&x, &y, &empty, ScoreConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_measure() {
        let (x, y) = example_pair();
        let result = cluster_similarity_scores(&x, &y, &["ji", "bogus"], ScoreConfig::default());
        assert_eq!(result, Err(SimilarityError::UnsupportedMeasure {
            measure: "bogus".to_string(),
            valid: "ari, f1, fmi, ji, ri".to_string()
        }));

        // names are case sensitive
        assert!(Measure::parse_all(&["ARI"]).is_err());

        // measure validation happens before the universe check
        let mismatched = Partition::new(vec![vec![0, 1]]).unwrap();
        assert!(matches!(
            cluster_similarity_scores(&x, &mismatched, &["nope"], ScoreConfig::default()),
            Err(SimilarityError::UnsupportedMeasure { .. })
        ));
        assert!(matches!(
            cluster_similarity_scores(&x, &mismatched, &["ri"], ScoreConfig::default()),
            Err(SimilarityError::PartitionMismatch { .. })
        ));
    }

    #[test]
    fn test_measure_registry() {
        assert_eq!(Measure::valid_names(), "ari, f1, fmi, ji, ri");
        assert_eq!(
            Measure::parse_all(&["ji", "ri", "ari", "fmi", "f1"]).unwrap(),
            vec![Measure::Ji, Measure::Ri, Measure::Ari, Measure::Fmi, Measure::F1]
        );
        assert_eq!(Measure::Fmi.to_string(), "fmi");
    }

    #[test]
    fn test_identity() {
        let partitions = vec![
            Partition::new(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap(),
            Partition::new(vec![vec![0, 1, 2, 3]]).unwrap(),
            Partition::new(vec![vec![0], vec![1], vec![2], vec![3]]).unwrap(),
            Partition::new(vec![vec![9, 2], vec![7]]).unwrap(),
        ];
        for x in partitions.iter() {
            for config in all_configs() {
                let scores = cluster_similarity_scores(x, x, &["ri", "ari", "ji", "f1", "fmi"], config).unwrap();
                assert_eq!(scores, vec![1.0; 5]);
            }
        }
    }

    #[test]
    fn test_symmetry() {
        let x = Partition::new(vec![vec![0, 1, 2], vec![3, 4], vec![5, 6, 7, 8]]).unwrap();
        let y = Partition::new(vec![vec![0, 3], vec![1, 2, 4, 5], vec![6], vec![7, 8]]).unwrap();
        let names = ["ri", "ari", "ji", "f1", "fmi"];
        for config in all_configs() {
            let forward = cluster_similarity_scores(&x, &y, &names, config).unwrap();
            let backward = cluster_similarity_scores(&y, &x, &names, config).unwrap();
            for (lhs, rhs) in forward.iter().zip(backward.iter()) {
                assert_approx_eq!(*lhs, *rhs);
            }

            let (recall_xy, precision_xy) = recall_and_precision(&x, &y, config).unwrap();
            let (recall_yx, precision_yx) = recall_and_precision(&y, &x, config).unwrap();
            assert_approx_eq!(recall_xy, precision_yx);
            assert_approx_eq!(precision_xy, recall_yx);
        }
    }

    #[test]
    fn test_recall_and_precision() {
        // inferred merges two true clusters
        let inferred = Partition::new(vec![vec![0, 1, 2, 3], vec![4, 5]]).unwrap();
        let truth = Partition::new(vec![vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
        let (recall, precision) = recall_and_precision(&inferred, &truth, ScoreConfig::default()).unwrap();
        // 3 true pairs all recovered, 7 inferred pairs of which 3 are real
        assert_eq!(recall, 1.0);
        assert_approx_eq!(precision, 3.0 / 7.0);
    }

    #[test]
    fn test_undefined_recall() {
        let singletons = Partition::new((0..5).map(|i| vec![i]).collect()).unwrap();
        let scores = cluster_similarity_scores(&singletons, &singletons, &["ri", "ari"], ScoreConfig::default()).unwrap();
        assert_eq!(scores, vec![1.0, 1.0]);
        assert_eq!(
            recall_and_precision(&singletons, &singletons, ScoreConfig::default()),
            Err(SimilarityError::DivisionUndefined { metric: "recall".to_string() })
        );

        // only precision is undefined here
        let merged = Partition::new(vec![(0..5).collect()]).unwrap();
        assert_eq!(
            recall_and_precision(&singletons, &merged, ScoreConfig::default()),
            Err(SimilarityError::DivisionUndefined { metric: "precision".to_string() })
        );

        let config = ScoreConfigBuilder::default()
            .recall_precision_policy(RecallPrecisionPolicy::VacuousAgreement)
            .build().unwrap();
        assert_eq!(recall_and_precision(&singletons, &merged, config), Ok((0.0, 1.0)));
    }

    #[test]
    fn test_tiny_universes() {
        let empty: Partition<u32> = Partition::new(vec![]).unwrap();
        let single = Partition::new(vec![vec![3u32]]).unwrap();
        for p in [&empty, &single] {
            let scores = cluster_similarity_scores(p, p, &["ri", "ari", "ji", "f1", "fmi"], ScoreConfig::default()).unwrap();
            assert_eq!(scores, vec![1.0; 5]);
            assert!(matches!(
                recall_and_precision(p, p, ScoreConfig::default()),
                Err(SimilarityError::DivisionUndefined { .. })
            ));
        }
    }

    #[test]
    fn test_partition_comparison() {
        let (truth, inferred) = example_pair();
        let comparison = PartitionComparison::compare(&truth, &inferred, ScoreConfig::default()).unwrap();
        assert_eq!(comparison.num_elements(), 6);
        assert_eq!(comparison.truth_clusters(), 3);
        assert_eq!(comparison.inferred_clusters(), 4);
        assert_eq!(comparison.pair_counts(), PairCount::new(1, 2, 2, 10));
        assert_approx_eq!(comparison.score(Measure::Ari), 1.0 / 6.0);
        assert_approx_eq!(comparison.score(Measure::Ri), 11.0 / 15.0);
        assert_approx_eq!(comparison.score(Measure::Ji), 0.2);
        assert_approx_eq!(comparison.recall().unwrap(), 1.0 / 3.0);
        assert_approx_eq!(comparison.precision().unwrap(), 1.0 / 3.0);

        let singletons = Partition::new(vec![vec![0], vec![1]]).unwrap();
        let comparison = PartitionComparison::compare(&singletons, &singletons, ScoreConfig::default()).unwrap();
        assert_eq!(comparison.recall(), None);
        assert_eq!(comparison.precision(), None);
        assert_eq!(comparison.score(Measure::Ari), 1.0);
    }
}
