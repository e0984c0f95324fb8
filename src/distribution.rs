use std::iter::FromIterator;

/// Running totals of per-face weights, where the entry at a given index is
/// the sum of the weights of all faces up to and including that face.
///
/// Weights and totals are `f64`, so faces weighted anywhere in the `f32`
/// range add up without overflowing, and `uniform * total` with a uniform
/// value below one stays below the total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CumulativeDistribution {
    totals: Vec<f64>,
}

impl CumulativeDistribution {
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let weights = weights.into_iter();
        let mut totals = Vec::with_capacity(weights.size_hint().0);

        let mut cumulative_total = 0.0_f64;
        for weight in weights {
            cumulative_total += weight;
            totals.push(cumulative_total);
        }

        CumulativeDistribution { totals }
    }

    /// Sum of all weights, zero if there are no faces.
    pub fn total(&self) -> f64 {
        self.totals.last().cloned().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.totals
    }

    /// Finds the face `i` with `totals[i - 1] <= x < totals[i]`, treating the
    /// total before the first face as zero.
    ///
    /// Runs of zero-weight faces never satisfy this, so they are skipped in
    /// favour of the first face whose total exceeds `x`. The midpoint is
    /// rounded up so the search settles on index 0 instead of looping, and
    /// index 0 is always accepted once reached. Returns `None` if `x` lies
    /// outside `[0, total)`.
    pub fn search(&self, x: f64) -> Option<usize> {
        let dist = &self.totals;
        if dist.is_empty() {
            return None;
        }

        let mut start = 0_isize;
        let mut end = dist.len() as isize - 1;

        while start <= end {
            // ceil((start + end) / 2), both are non-negative here
            let mid = ((start + end + 1) / 2) as usize;

            if mid == 0 || (dist[mid - 1] <= x && dist[mid] > x) {
                return Some(mid);
            } else if x < dist[mid] {
                end = mid as isize - 1;
            } else {
                start = mid as isize + 1;
            }
        }

        None
    }
}

impl FromIterator<f64> for CumulativeDistribution {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        CumulativeDistribution::from_weights(iter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_running_totals() {
        let dist: CumulativeDistribution = vec![2.0, 6.0].into_iter().collect();

        assert_eq!(&[2.0, 8.0], dist.as_slice());
        assert_eq!(8.0, dist.total());
        assert_eq!(2, dist.len());
    }

    #[test]
    fn test_monotonic() {
        let weights = vec![0.5, 0.0, 3.0, 0.0, 0.0, 1.25, 7.0];
        let dist = CumulativeDistribution::from_weights(weights);

        for pair in dist.as_slice().windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(11.75, dist.total());
    }

    #[test]
    fn test_search_boundaries() {
        let dist = CumulativeDistribution::from_weights(vec![2.0, 6.0]);

        assert_eq!(Some(0), dist.search(0.0));
        assert_eq!(Some(0), dist.search(1.99));
        assert_eq!(Some(1), dist.search(2.0));
        assert_eq!(Some(1), dist.search(7.99));
    }

    #[test]
    fn test_search_single_face() {
        let dist = CumulativeDistribution::from_weights(vec![3.5]);

        for x in &[0.0, 0.001, 1.0, 3.0, 3.4999] {
            assert_eq!(Some(0), dist.search(*x));
        }
    }

    #[test]
    fn test_search_skips_zero_weight_runs() {
        let dist = CumulativeDistribution::from_weights(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);

        assert_eq!(Some(2), dist.search(0.0));
        assert_eq!(Some(2), dist.search(0.5));
        assert_eq!(Some(5), dist.search(1.0));
        assert_eq!(Some(5), dist.search(1.999));
    }

    #[test]
    fn test_search_every_face_of_long_table() {
        let dist = CumulativeDistribution::from_weights((0..1000).map(|_| 1.0));

        for face in 0..1000 {
            assert_eq!(Some(face), dist.search(face as f64 + 0.5));
            assert_eq!(Some(face), dist.search(face as f64));
        }
    }

    #[test]
    fn test_totals_beyond_f32_range() {
        let heavy = 3.0 * f64::from(f32::MAX);
        let dist = CumulativeDistribution::from_weights(vec![heavy, heavy]);

        assert!(dist.total().is_finite());
        assert_eq!(Some(0), dist.search(0.5 * heavy));
        assert_eq!(Some(1), dist.search(1.5 * heavy));
    }

    #[test]
    fn test_search_out_of_range() {
        let dist = CumulativeDistribution::from_weights(vec![2.0, 6.0]);

        assert_eq!(None, dist.search(8.0));
        assert_eq!(None, dist.search(100.0));
        assert_eq!(None, CumulativeDistribution::default().search(0.0));
    }
}
