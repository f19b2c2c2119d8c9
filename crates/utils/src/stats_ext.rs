use crate::error::{Error, Result};

/// Summary statistics for a collection of values
///
/// These are the values stored in volume headers (minimum, maximum, mean, and
/// the root mean square deviation from the mean).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// RMS deviation from the mean
    pub rms: f64,
}

/// Extends collections of values with summary statistics
pub trait StatsExt {
    /// Summarise a collection of values in a single pass
    ///
    /// Any NAN values, infinite values, or empty collections will return an
    /// error.
    ///
    /// ```rust
    /// # use tomokit_utils::{StatsExt, Error};
    /// let summary = [1.0, 2.0, 3.0, 4.0].try_summary().unwrap();
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 4.0);
    /// assert_eq!(summary.mean, 2.5);
    ///
    /// assert_eq!([1.0, f64::NAN].try_summary(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_summary(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_summary(&self) -> Result<Summary>;
}

impl<T> StatsExt for [T]
where
    T: Into<f64> + Copy,
{
    fn try_summary(&self) -> Result<Summary> {
        if self.is_empty() {
            return Err(Error::SliceContainsNoValues);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for value in self.iter().map(|v| (*v).into()) {
            if !value.is_finite() {
                return Err(Error::SliceContainsUndefinedValues);
            }
            min = min.min(value);
            max = max.max(value);
            sum += value;
            sum_sq += value * value;
        }

        let n = self.len() as f64;
        let mean = sum / n;
        // clamp tiny negative values from rounding
        let rms = (sum_sq / n - mean * mean).max(0.0).sqrt();

        Ok(Summary {
            min,
            max,
            mean,
            rms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_integers() {
        let summary = [2_i16, 4, 4, 4, 5, 5, 7, 9].try_summary().unwrap();
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.rms, 2.0);
    }

    #[test]
    fn summary_of_constant() {
        let summary = vec![5.0_f32; 27].try_summary().unwrap();
        assert_eq!(summary.min, 5.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.rms, 0.0);
    }

    #[test]
    fn summary_rejects_infinity() {
        assert_eq!(
            [1.0, f64::INFINITY].try_summary(),
            Err(Error::SliceContainsUndefinedValues)
        );
    }
}
