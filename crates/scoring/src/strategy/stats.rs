//! Descriptive statistics over metric batches.

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (no Bessel correction); 0.0 for empty and
/// constant batches. Callers treat a zero divisor as a defined-zero ratio,
/// so no epsilon floor is applied here.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn std_dev_is_population_not_sample() {
        // Population: sqrt(((1-2)^2 + (3-2)^2) / 2) = 1.0.
        // Bessel-corrected would be sqrt(2) ≈ 1.414.
        assert!((std_dev(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn std_dev_of_constant_batch_is_zero() {
        assert_eq!(std_dev(&[5.0, 5.0, 5.0, 5.0]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }
}
