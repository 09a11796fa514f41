//! Window reductions.
//!
//! Minute samples reduce raw price observations. Every coarser level reduces
//! the samples of the level below it: average of averages, max of maxes and
//! min of mins. The coarser average is therefore a mean of means, not a mean
//! over the raw prices, and must stay that way for existing logs to line up.

use tickroll_types::{Granularity, Sample};

/// Streaming average/max/min accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowStats {
    sum: f64,
    max: f64,
    min: f64,
    count: usize,
}

impl WindowStats {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            max: 0.0,
            min: 0.0,
            count: 0,
        }
    }

    /// Adds one contribution.
    ///
    /// `average` is summed; `max` and `min` extend the running extremes.
    pub fn update(&mut self, average: f64, max: f64, min: f64) {
        if self.count == 0 {
            self.max = max;
            self.min = min;
        } else {
            self.max = self.max.max(max);
            self.min = self.min.min(min);
        }
        self.sum += average;
        self.count += 1;
    }

    /// Adds one raw price observation.
    pub fn observe(&mut self, price: f64) {
        self.update(price, price, price);
    }

    /// Returns the number of contributions so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Finishes the window.
    ///
    /// An empty window yields [`Sample::zero`].
    #[must_use]
    pub fn finish(self, granularity: Granularity) -> Sample {
        if self.count == 0 {
            return Sample::zero(granularity);
        }
        Sample::new(
            granularity,
            self.sum / self.count as f64,
            self.max,
            self.min,
        )
    }
}

/// Summarizes raw price observations into a sample of `granularity`.
pub fn summarize<'a, I>(granularity: Granularity, prices: I) -> Sample
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut stats = WindowStats::new();
    for &price in prices {
        stats.observe(price);
    }
    stats.finish(granularity)
}

/// Reduces finer samples into one sample of `granularity`.
#[must_use]
pub fn roll_up(granularity: Granularity, samples: &[Sample]) -> Sample {
    let mut stats = WindowStats::new();
    for sample in samples {
        stats.update(sample.average, sample.max, sample.min);
    }
    stats.finish(granularity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarize_prices() {
        let sample = summarize(Granularity::Minute, &[10.0, 12.0, 8.0, 14.0]);
        assert_eq!(sample.granularity, Granularity::Minute);
        assert_relative_eq!(sample.average, 11.0);
        assert_relative_eq!(sample.max, 14.0);
        assert_relative_eq!(sample.min, 8.0);
    }

    #[test]
    fn test_summarize_negative_prices() {
        let sample = summarize(Granularity::Minute, &[-1.0, -3.0]);
        assert_relative_eq!(sample.average, -2.0);
        assert_relative_eq!(sample.max, -1.0);
        assert_relative_eq!(sample.min, -3.0);
    }

    #[test]
    fn test_empty_window_is_zero() {
        let none: [f64; 0] = [];
        assert!(summarize(Granularity::Minute, &none).is_zero());
        let rolled = roll_up(Granularity::Hour, &[]);
        assert_eq!(rolled.granularity, Granularity::Hour);
        assert!(rolled.is_zero());
    }

    #[test]
    fn test_roll_up_is_mean_of_means() {
        let samples = [
            Sample::new(Granularity::Minute, 10.0, 11.0, 9.0),
            Sample::new(Granularity::Minute, 20.0, 25.0, 19.0),
            Sample::new(Granularity::Minute, 30.0, 31.0, 2.0),
        ];
        let sample = roll_up(Granularity::FifteenMinutes, &samples);
        assert_eq!(sample.granularity, Granularity::FifteenMinutes);
        assert_relative_eq!(sample.average, 20.0);
        assert_relative_eq!(sample.max, 31.0);
        assert_relative_eq!(sample.min, 2.0);
    }

    #[test]
    fn test_roll_up_differs_from_raw_mean() {
        // 1 raw price in the first window, 3 in the second.
        let first = summarize(Granularity::Minute, &[10.0]);
        let second = summarize(Granularity::Minute, &[20.0, 20.0, 20.0]);
        let rolled = roll_up(Granularity::FifteenMinutes, &[first, second]);

        assert_relative_eq!(rolled.average, 15.0);
        assert!((rolled.average - 17.5).abs() > 1.0);
    }

    #[test]
    fn test_stats_count() {
        let mut stats = WindowStats::new();
        assert_eq!(stats.count(), 0);
        stats.observe(1.0);
        stats.observe(2.0);
        assert_eq!(stats.count(), 2);
    }
}
