/*! Streaming descriptive statistics.

[`RunningStats`] keeps the count, mean, minimum, maximum and the sum of
squared deviations from the mean of every value it has seen, without storing
the values themselves.

```
# use running_stats::*;
let stats = vec![10., 20., 30.].into_iter().collect::<RunningStats>();
let msg = format!(
    "n={} mean={:.2} sd={:.2} range={}..{}",
    stats.count(),
    stats.mean(),
    stats.std_dev(),
    stats.min(),
    stats.max(),
);
assert_eq!(msg, "n=3 mean=20.00 sd=10.00 range=10..30");
```

Two accumulators built from disjoint parts of a sequence can be combined
with [`RunningStats::merge`]:

```
# use running_stats::*;
let mut xs = vec![1., 2., 3.].into_iter().collect::<RunningStats>();
let ys = vec![4., 5., 6.].into_iter().collect::<RunningStats>();
xs.merge(&ys);
assert_eq!(xs.count(), 6);
assert_eq!(xs.mean(), 3.5);
```
*/

use std::iter::FromIterator;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunningStats {
    /// the number of samples seen so far
    count: u64,
    /// the mean of the entire dataset
    mean: f64,
    /// the squared distance from the mean
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> RunningStats {
        RunningStats::new()
    }
}

impl RunningStats {
    pub fn new() -> RunningStats {
        RunningStats {
            count: 0,
            mean: 0.,
            m2: 0.,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// `x` must be finite.
    pub fn update(&mut self, x: f64) {
        self.count += 1;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
        // Welford's online algorithm
        let delta1 = x - self.mean; // diff from the old mean
        self.mean += delta1 / self.count as f64;
        let delta2 = x - self.mean; // diff from the new mean
        self.m2 += delta1 * delta2;
    }

    /// Fold `other` into `self`, as if every value `other` has seen had been
    /// passed to `update`.
    ///
    /// This is the pairwise combination step of Chan, Golub & LeVeque: with
    /// δ the difference between the two means, the combined sum of squares
    /// is `m2_a + m2_b + δ²·n_a·n_b/n`.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let count = self.count + other.count;
        let n = count as f64;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count = count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Zero when nothing has been seen.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// `+∞` when nothing has been seen.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// `-∞` when nothing has been seen.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The sample variance (ie. with Bessel's correction).  Zero for fewer
    /// than two samples.
    pub fn sample_var(&self) -> f64 {
        if self.count <= 1 {
            0.
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// The sample standard deviation.  Zero for fewer than two samples.
    pub fn std_dev(&self) -> f64 {
        self.sample_var().sqrt()
    }
}

impl Extend<f64> for RunningStats {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for x in iter {
            self.update(x);
        }
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> RunningStats {
        let mut stats = RunningStats::new();
        stats.extend(iter);
        stats
    }
}
