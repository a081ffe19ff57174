
use indexmap::IndexMap;
use itertools::Itertools;
use rustc_hash::FxHashSet as HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::data_types::errors::SimilarityError;

/// Anything we can cluster: needs hashing for lookups and a total order for reproducible positions
pub trait Element: Clone + Debug + Eq + Hash + Ord {}
impl<T: Clone + Debug + Eq + Hash + Ord> Element for T {}

/// A division of a finite set of elements into disjoint, non-empty clusters.
/// Cluster order is preserved from construction; elements inside a cluster are stored in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition<T: Element> {
    /// The clusters, each sorted ascending
    clusters: Vec<Vec<T>>,
    /// Total number of elements across all clusters
    num_elements: usize
}

impl<T: Element> Partition<T> {
    /// Creates a new partition from a list of clusters.
    /// # Arguments
    /// * `clusters` - the clusters, in the order they should be reported
    /// # Errors
    /// * if any cluster is empty
    /// * if any element is present in more than one cluster (or twice in one cluster)
    pub fn new(clusters: Vec<Vec<T>>) -> Result<Self, SimilarityError> {
        let mut seen: HashSet<T> = Default::default();
        let mut sorted_clusters = Vec::with_capacity(clusters.len());
        for (index, mut cluster) in clusters.into_iter().enumerate() {
            if cluster.is_empty() {
                return Err(SimilarityError::EmptyCluster { index });
            }
            for element in cluster.iter() {
                if !seen.insert(element.clone()) {
                    return Err(SimilarityError::DuplicateElement { element: format!("{element:?}") });
                }
            }
            cluster.sort_unstable();
            sorted_clusters.push(cluster);
        }

        Ok(Self {
            clusters: sorted_clusters,
            num_elements: seen.len()
        })
    }

    /// Internal constructor for clusters we built ourselves; must already be non-empty, sorted, and disjoint.
    fn from_sorted_disjoint(clusters: Vec<Vec<T>>) -> Self {
        debug_assert!(clusters.iter().all(|c| !c.is_empty()));
        let num_elements = clusters.iter().map(|c| c.len()).sum();
        Self {
            clusters,
            num_elements
        }
    }

    // getters
    pub fn clusters(&self) -> &[Vec<T>] {
        &self.clusters
    }

    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements == 0
    }

    /// Returns every element in ascending order.
    /// This is the position ordering used by `lists_to_labels`.
    pub fn sorted_elements(&self) -> Vec<T> {
        self.clusters.iter()
            .map(|c| c.iter())
            .kmerge()
            .cloned()
            .collect()
    }

    /// Returns true if both partitions group the elements identically, ignoring cluster order.
    pub fn same_grouping(&self, other: &Self) -> bool {
        if self.num_elements != other.num_elements || self.clusters.len() != other.clusters.len() {
            return false;
        }

        // clusters are sorted internally, so sorting the cluster lists gives a canonical form
        let lhs: Vec<&Vec<T>> = self.clusters.iter().sorted_unstable().collect();
        let rhs: Vec<&Vec<T>> = other.clusters.iter().sorted_unstable().collect();
        lhs == rhs
    }
}

/// Cluster labels for a fixed element ordering; position `i` holds the label of element `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelVector<L> {
    labels: Vec<L>
}

impl<L> From<Vec<L>> for LabelVector<L> {
    fn from(labels: Vec<L>) -> Self {
        Self { labels }
    }
}

impl<L: Eq + Hash> LabelVector<L> {
    /// Constructor
    pub fn new(labels: Vec<L>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns true if both label vectors group the positions identically, regardless of the label values.
    pub fn same_grouping<M: Eq + Hash>(&self, other: &LabelVector<M>) -> bool {
        // first-occurrence ordering makes the list form canonical
        self.len() == other.len() && labels_to_lists(self) == labels_to_lists(other)
    }
}

/// Groups positions by equal label.
/// Clusters are ordered by the first occurrence of their label scanning left-to-right, and positions inside a cluster are ascending.
/// # Arguments
/// * `labels` - the label assigned to each position
/// # Examples
/// ```rust
/// use clustsim::data_types::partition::{labels_to_lists, LabelVector};
/// let partition = labels_to_lists(&LabelVector::new(vec![3, 1, 4, 1, 5]));
/// assert_eq!(partition.clusters(), &[vec![0], vec![1, 3], vec![2], vec![4]]);
/// ```
pub fn labels_to_lists<L: Eq + Hash>(labels: &LabelVector<L>) -> Partition<usize> {
    let mut groups: IndexMap<&L, Vec<usize>> = IndexMap::new();
    for (position, label) in labels.labels.iter().enumerate() {
        groups.entry(label).or_default().push(position);
    }
    Partition::from_sorted_disjoint(groups.into_values().collect())
}

/// Assigns each element the index of the cluster containing it.
/// Positions follow the ascending element order (see `Partition::sorted_elements`).
/// # Arguments
/// * `partition` - the clusters to convert
/// # Examples
/// ```rust
/// use clustsim::data_types::partition::{lists_to_labels, Partition};
/// let partition = Partition::new(vec![vec![1, 5], vec![3], vec![2, 0, 4]]).unwrap();
/// assert_eq!(lists_to_labels(&partition).labels(), &[2, 0, 2, 1, 2, 0]);
/// ```
pub fn lists_to_labels<T: Element>(partition: &Partition<T>) -> LabelVector<usize> {
    let labels = partition.clusters.iter()
        .enumerate()
        .flat_map(|(cluster_index, cluster)| cluster.iter().map(move |element| (element, cluster_index)))
        .sorted_unstable_by(|(e1, _), (e2, _)| e1.cmp(e2))
        .map(|(_element, cluster_index)| cluster_index)
        .collect();
    LabelVector { labels }
}
