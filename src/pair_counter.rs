/*!
# Pair Counter
Counts how the unordered pairs of a shared element universe are co-clustered by two partitions.
The result is a `PairCount` with `a` (together in both), `b` (together in the first only), `c` (together in the second only), and `d` (together in neither).

Two counting strategies are available and always produce identical counts:
* `CountStrategy::Naive` - intersects every pair of non-singleton clusters, O(|X| * |Y|) intersections of sorted clusters
* `CountStrategy::Indexed` - maps each element to its first-partition cluster and tallies a joint histogram, O(n)
*/
use itertools::{EitherOrBoth, Itertools};
use log::trace;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use strum_macros::EnumString;

use crate::data_types::errors::SimilarityError;
use crate::data_types::pair_counts::{choose2, PairCount};
use crate::data_types::partition::{Element, Partition};

/// Algorithm used to find the pairs shared by both partitions
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, strum_macros::Display, EnumString, Serialize, clap::ValueEnum)]
pub enum CountStrategy {
    /// Intersect every pair of clusters
    #[strum(ascii_case_insensitive, serialize = "naive")]
    #[clap(name = "naive")]
    Naive,
    /// Single pass over the elements with a joint cluster histogram
    #[default]
    #[strum(ascii_case_insensitive, serialize = "indexed")]
    #[clap(name = "indexed")]
    Indexed,
}

/// Counts the pairs co-clustered in each partition.
/// # Arguments
/// * `x` - the first partition
/// * `y` - the second partition
/// * `n` - the size of the shared universe
/// * `strategy` - the counting algorithm
/// # Errors
/// * `PartitionMismatch` if either partition does not contain exactly `n` elements, or if they contain different elements
pub fn count_pairs<T: Element>(x: &Partition<T>, y: &Partition<T>, n: usize, strategy: CountStrategy) -> Result<PairCount, SimilarityError> {
    check_universe_sizes(x, y, n)?;

    // only non-singleton clusters can hold a pair
    let p: u64 = x.clusters().iter().map(|c| choose2(c.len() as u64)).sum();
    let q: u64 = y.clusters().iter().map(|c| choose2(c.len() as u64)).sum();
    let r: u64 = match strategy {
        CountStrategy::Naive => naive_shared_pairs(x, y)?,
        CountStrategy::Indexed => indexed_shared_pairs(x, y)?
    };
    trace!("count_pairs({strategy}): n={n}, p={p}, q={q}, r={r}");

    let a = r;
    let b = p - a;
    let c = q - a;
    let d = choose2(n as u64) - a - b - c;
    Ok(PairCount::new(a, b, c, d))
}

/// Same as `count_pairs`, but the universe size is taken from the first partition.
pub fn count_partition_pairs<T: Element>(x: &Partition<T>, y: &Partition<T>, strategy: CountStrategy) -> Result<PairCount, SimilarityError> {
    count_pairs(x, y, x.num_elements(), strategy)
}

fn check_universe_sizes<T: Element>(x: &Partition<T>, y: &Partition<T>, n: usize) -> Result<(), SimilarityError> {
    for (label, partition) in [("first", x), ("second", y)] {
        if partition.num_elements() != n {
            return Err(SimilarityError::PartitionMismatch {
                reason: format!("{label} partition has {} elements, expected {n}", partition.num_elements())
            });
        }
    }
    Ok(())
}

/// Number of elements present in both sorted clusters
fn intersection_size<T: Ord>(lhs: &[T], rhs: &[T]) -> u64 {
    lhs.iter()
        .merge_join_by(rhs.iter(), |l, r| l.cmp(r))
        .filter(|joined| matches!(joined, EitherOrBoth::Both(_, _)))
        .count() as u64
}

fn naive_shared_pairs<T: Element>(x: &Partition<T>, y: &Partition<T>) -> Result<u64, SimilarityError> {
    // sizes already match, so the element sets must too
    if x.sorted_elements() != y.sorted_elements() {
        return Err(SimilarityError::PartitionMismatch {
            reason: "partitions contain different elements".to_string()
        });
    }

    let x_clusters: Vec<&Vec<T>> = x.clusters().iter().filter(|c| c.len() > 1).collect();
    let y_clusters: Vec<&Vec<T>> = y.clusters().iter().filter(|c| c.len() > 1).collect();
    let shared = x_clusters.iter()
        .cartesian_product(y_clusters.iter())
        .map(|(u, v)| choose2(intersection_size(u.as_slice(), v.as_slice())))
        .sum();
    Ok(shared)
}

fn indexed_shared_pairs<T: Element>(x: &Partition<T>, y: &Partition<T>) -> Result<u64, SimilarityError> {
    let mut cluster_lookup: HashMap<&T, usize> = HashMap::default();
    cluster_lookup.reserve(x.num_elements());
    for (x_index, cluster) in x.clusters().iter().enumerate() {
        for element in cluster.iter() {
            cluster_lookup.insert(element, x_index);
        }
    }

    // joint histogram of (x cluster, y cluster) memberships
    let mut joint_counts: HashMap<(usize, usize), u64> = HashMap::default();
    for (y_index, cluster) in y.clusters().iter().enumerate() {
        for element in cluster.iter() {
            let x_index = *cluster_lookup.get(element)
                .ok_or_else(|| SimilarityError::PartitionMismatch {
                    reason: format!("element {element:?} is missing from the first partition")
                })?;
            *joint_counts.entry((x_index, y_index)).or_default() += 1;
        }
    }

    Ok(joint_counts.values().map(|&count| choose2(count)).sum())
}
