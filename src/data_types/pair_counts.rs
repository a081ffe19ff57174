
use serde::Serialize;

use crate::data_types::errors::SimilarityError;

/// Number of unordered pairs that can be drawn from `k` items
pub fn choose2(k: u64) -> u64 {
    k * k.saturating_sub(1) / 2
}

/// The 2x2 contingency summary over all unordered pairs of distinct elements.
/// The first partition plays the role of "inferred" and the second "truth" for recall and precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PairCount {
    /// Pairs clustered together in both partitions
    pub a: u64,
    /// Pairs clustered together in the first partition only
    pub b: u64,
    /// Pairs clustered together in the second partition only
    pub c: u64,
    /// Pairs clustered together in neither partition
    pub d: u64
}

impl PairCount {
    /// Constructor
    pub fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self {
            a, b, c, d
        }
    }

    /// Total number of pairs, C(n, 2)
    pub fn total(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }

    /// Returns the same counts with the roles of the two partitions swapped
    pub fn swapped(&self) -> Self {
        Self::new(self.a, self.c, self.b, self.d)
    }

    /// Rand index, (a+d) / (a+b+c+d); 1.0 when there are no pairs
    pub fn rand_index(&self) -> f64 {
        let denom = self.total();
        if denom != 0 {
            (self.a + self.d) as f64 / denom as f64
        } else {
            1.0
        }
    }

    /// Adjusted Rand index, 2(ad-bc) / [a(b+c+2d) + b(b+d) + c(c+d)]; 1.0 when the denominator is 0
    pub fn adjusted_rand_index(&self) -> f64 {
        // products can exceed u64 for large n, so do the exact arithmetic in i128
        let (a, b, c, d) = (self.a as i128, self.b as i128, self.c as i128, self.d as i128);
        let denom = a * (b + c + 2 * d) + b * (b + d) + c * (c + d);
        if denom != 0 {
            (2 * (a * d - b * c)) as f64 / denom as f64
        } else {
            1.0
        }
    }

    /// Jaccard index, a / (a+b+c); 1.0 when the denominator is 0
    pub fn jaccard_index(&self) -> f64 {
        let denom = self.a + self.b + self.c;
        if denom != 0 {
            self.a as f64 / denom as f64
        } else {
            1.0
        }
    }

    /// Fowlkes-Mallows index, a / sqrt((a+b)(a+c)).
    /// If either factor is 0, this is 1.0 when both are 0 and 0.0 otherwise.
    pub fn fowlkes_mallows_index(&self) -> f64 {
        let first = self.a + self.b;
        let second = self.a + self.c;
        if first != 0 && second != 0 {
            self.a as f64 / (first as f64 * second as f64).sqrt()
        } else if first == 0 && second == 0 {
            1.0
        } else {
            0.0
        }
    }

    /// F1 score, 2a / (2a+b+c); 1.0 when the denominator is 0
    pub fn f1_score(&self) -> f64 {
        let denom = 2 * self.a + self.b + self.c;
        if denom != 0 {
            (2 * self.a) as f64 / denom as f64
        } else {
            1.0
        }
    }

    /// Recall, a / (a+c).
    /// # Errors
    /// * `DivisionUndefined` if a+c = 0; unlike the indices above, there is no vacuous value here
    pub fn recall(&self) -> Result<f64, SimilarityError> {
        let denom = self.a + self.c;
        if denom != 0 {
            Ok(self.a as f64 / denom as f64)
        } else {
            Err(SimilarityError::DivisionUndefined { metric: "recall".to_string() })
        }
    }

    /// Precision, a / (a+b).
    /// # Errors
    /// * `DivisionUndefined` if a+b = 0
    pub fn precision(&self) -> Result<f64, SimilarityError> {
        let denom = self.a + self.b;
        if denom != 0 {
            Ok(self.a as f64 / denom as f64)
        } else {
            Err(SimilarityError::DivisionUndefined { metric: "precision".to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_choose2() {
        assert_eq!(choose2(0), 0);
        assert_eq!(choose2(1), 0);
        assert_eq!(choose2(2), 1);
        assert_eq!(choose2(6), 15);
        assert_eq!(choose2(100_000), 4_999_950_000);
    }

    #[test]
    fn test_scores() {
        let counts = PairCount::new(1, 2, 2, 10);
        assert_eq!(counts.total(), 15);
        assert_approx_eq!(counts.rand_index(), 11.0 / 15.0);
        assert_approx_eq!(counts.adjusted_rand_index(), 1.0 / 6.0);
        assert_approx_eq!(counts.jaccard_index(), 0.2);
        assert_approx_eq!(counts.fowlkes_mallows_index(), 1.0 / 3.0);
        assert_approx_eq!(counts.f1_score(), 1.0 / 3.0);
        assert_approx_eq!(counts.recall().unwrap(), 1.0 / 3.0);
        assert_approx_eq!(counts.precision().unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn test_asymmetric_scores() {
        // 3 shared pairs, 1 only in the first, 5 only in the second
        let counts = PairCount::new(3, 1, 5, 6);
        assert_approx_eq!(counts.recall().unwrap(), 3.0 / 8.0);
        assert_approx_eq!(counts.precision().unwrap(), 3.0 / 4.0);
        assert_approx_eq!(counts.fowlkes_mallows_index(), 3.0 / (4.0_f64 * 8.0).sqrt());
        assert_approx_eq!(counts.f1_score(), 6.0 / 12.0);

        // swapping turns recall into precision and leaves the rest alone
        let swapped = counts.swapped();
        assert_eq!(swapped, PairCount::new(3, 5, 1, 6));
        assert_approx_eq!(swapped.recall().unwrap(), counts.precision().unwrap());
        assert_approx_eq!(swapped.precision().unwrap(), counts.recall().unwrap());
        assert_approx_eq!(swapped.adjusted_rand_index(), counts.adjusted_rand_index());
        assert_approx_eq!(swapped.rand_index(), counts.rand_index());
        assert_approx_eq!(swapped.jaccard_index(), counts.jaccard_index());
    }

    #[test]
    fn test_all_singletons() {
        // five singletons compared with themselves
        let counts = PairCount::new(0, 0, 0, 10);
        assert_eq!(counts.rand_index(), 1.0);
        assert_eq!(counts.adjusted_rand_index(), 1.0);
        assert_eq!(counts.jaccard_index(), 1.0);
        assert_eq!(counts.fowlkes_mallows_index(), 1.0);
        assert_eq!(counts.f1_score(), 1.0);
        assert_eq!(counts.recall(), Err(SimilarityError::DivisionUndefined { metric: "recall".to_string() }));
        assert_eq!(counts.precision(), Err(SimilarityError::DivisionUndefined { metric: "precision".to_string() }));
    }

    #[test]
    fn test_no_pairs() {
        // n = 0 or n = 1
        let counts = PairCount::default();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.rand_index(), 1.0);
        assert_eq!(counts.adjusted_rand_index(), 1.0);
        assert_eq!(counts.jaccard_index(), 1.0);
        assert_eq!(counts.fowlkes_mallows_index(), 1.0);
        assert_eq!(counts.f1_score(), 1.0);
        assert!(counts.recall().is_err());
        assert!(counts.precision().is_err());
    }

    #[test]
    fn test_one_sided_fmi() {
        // pairs only in the first partition
        let counts = PairCount::new(0, 3, 0, 7);
        assert_eq!(counts.fowlkes_mallows_index(), 0.0);
        assert_eq!(counts.jaccard_index(), 0.0);
        assert_eq!(counts.f1_score(), 0.0);
        assert_eq!(counts.precision(), Ok(0.0));
        assert!(counts.recall().is_err());
    }

    #[test]
    fn test_large_ari() {
        // n = 200_000, which overflows u64 in the ARI products
        let n: u64 = 200_000;
        let total = choose2(n);
        let a = choose2(n / 2) * 2;
        let counts = PairCount::new(a, 0, 0, total - a);
        assert_approx_eq!(counts.adjusted_rand_index(), 1.0);
        assert_approx_eq!(counts.rand_index(), 1.0);
    }
}
