/// Small statistics helpers shared by the recognition pipeline.
///
/// The stability machinery scores confidence streams by how much they
/// wobble, so everything here runs over short probability slices. Variance
/// is the population form: the slices are the whole window of interest,
/// not a sample drawn from one.

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute population variance. Returns 0.0 for fewer than 2 values.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64
}

/// Clamp a probability into [0, 1]. Non-finite values collapse to 0.0.
pub fn clamp01(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[0.4]), 0.4);
        let m = mean(&[0.50, 0.52, 0.49]);
        assert!((m - 0.503333).abs() < 1e-6);
    }

    #[test]
    fn test_variance_needs_two_values() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[0.9]), 0.0);
    }

    #[test]
    fn test_variance_is_population_form() {
        // mean 0.3, squared deviations 0.01 + 0.0 + 0.01, divided by n=3
        let v = variance(&[0.2, 0.3, 0.4]);
        assert!((v - 0.02 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_of_constant_stream_is_zero() {
        assert_eq!(variance(&[0.6, 0.6, 0.6, 0.6]), 0.0);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(1.3), 1.0);
        assert_eq!(clamp01(-0.1), 0.0);
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(f64::INFINITY), 0.0);
    }
}
