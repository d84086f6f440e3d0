//! Aggregate color statistics collected during a pipeline pass.

use crate::core::error::{FilterError, FilterResult};
use crate::core::types::{Color, Rgb};

/// Running sums of the post-filter channel bytes written to the output.
///
/// Created empty at the start of a pass, merged across rows, finalized into
/// the border color once every pixel is processed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateStats {
    /// Sum of stored red bytes.
    pub sum_r: f64,
    /// Sum of stored green bytes.
    pub sum_g: f64,
    /// Sum of stored blue bytes.
    pub sum_b: f64,
    /// Number of pixels accounted for.
    pub count: u64,
}

impl AggregateStats {
    /// Empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one processed pixel, as stored.
    #[inline]
    pub fn add(&mut self, [r, g, b]: [u8; 3]) {
        self.sum_r += r as f64;
        self.sum_g += g as f64;
        self.sum_b += b as f64;
        self.count += 1;
    }

    /// Combine two partial results.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sum_r: self.sum_r + other.sum_r,
            sum_g: self.sum_g + other.sum_g,
            sum_b: self.sum_b + other.sum_b,
            count: self.count + other.count,
        }
    }

    /// Mean post-filter color.
    pub fn mean(&self) -> FilterResult<Rgb> {
        if self.count == 0 {
            return Err(FilterError::DivisionByZero {
                what: "the average color of an empty pass".to_string(),
            });
        }
        let n = self.count as f64;
        Ok(Rgb::new(self.sum_r / n, self.sum_g / n, self.sum_b / n))
    }

    /// Channel-wise complement of the mean: `255 - floor(mean)`.
    pub fn border_color(&self) -> FilterResult<Color> {
        let mean = self.mean()?;
        let complement = |channel: f64| (255.0 - channel.floor()).clamp(0.0, 255.0) as u8;
        Ok(Color::rgb(
            complement(mean.r),
            complement(mean.g),
            complement(mean.b),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_fail() {
        let stats = AggregateStats::new();
        assert!(matches!(stats.mean(), Err(FilterError::DivisionByZero { .. })));
        assert!(stats.border_color().is_err());
    }

    #[test]
    fn test_border_color_floors_mean() {
        let mut stats = AggregateStats::new();
        stats.add([100, 0, 250]);
        stats.add([101, 0, 255]);
        // Means are 100.5, 0 and 252.5.
        assert_eq!(stats.border_color().unwrap(), Color::rgb(155, 255, 3));
        assert_eq!(stats.border_color().unwrap().to_hex(), "#9bff03");
    }

    #[test]
    fn test_merge() {
        let mut a = AggregateStats::new();
        a.add([10, 20, 30]);
        let mut b = AggregateStats::new();
        b.add([30, 40, 50]);
        b.add([50, 60, 70]);

        let merged = a.merge(b);
        assert_eq!(merged.count, 3);
        assert_eq!(merged.mean().unwrap(), Rgb::new(30.0, 40.0, 50.0));
        assert_eq!(merged, b.merge(a));
    }
}
