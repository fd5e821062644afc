//! Aggregate statistics over trial samples.

/// Raised when an aggregate is requested over an empty sample; the
/// alternative would be a silent NaN poisoning every downstream figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("cannot aggregate an empty sample")]
    EmptySample,
}

/// Arithmetic mean of a homogeneous numeric sample.
pub fn mean<T>(sample: &[T]) -> Result<f64, StatsError>
where
    T: Copy + Into<f64>,
{
    if sample.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let sum: f64 = sample.iter().map(|&v| v.into()).sum();
    Ok(sum / sample.len() as f64)
}

/// Population standard deviation of a homogeneous numeric sample.
pub fn std_dev<T>(sample: &[T]) -> Result<f64, StatsError>
where
    T: Copy + Into<f64>,
{
    let m = mean(sample)?;
    let variance = sample
        .iter()
        .map(|&v| {
            let d = v.into() - m;
            d * d
        })
        .sum::<f64>()
        / sample.len() as f64;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_known_sample() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]).unwrap(), 4.0);
        assert_eq!(mean(&[7u32]).unwrap(), 7.0);
    }

    #[test]
    fn std_dev_of_known_sample() {
        // Population stdev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((std_dev(&sample).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singleton_std_dev_is_zero() {
        assert_eq!(std_dev(&[42.0]).unwrap(), 0.0);
    }

    #[test]
    fn empty_sample_is_an_error() {
        let empty: [f64; 0] = [];
        assert_eq!(mean(&empty), Err(StatsError::EmptySample));
        assert_eq!(std_dev(&empty), Err(StatsError::EmptySample));
    }
}
