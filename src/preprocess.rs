//! Feature scaling before clustering.
//!
//! ε is an absolute distance, so features on very different scales should be
//! standardized first or the widest feature dominates every neighborhood.

use crate::error::Result;
use crate::spatial::validate_points;

/// Rescale each column to zero mean and unit (population) variance.
///
/// Columns with zero variance are only centered.
pub fn standardize(data: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
    let dim = validate_points(data)?;
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let n = data.len() as f64;
    let mut mean = vec![0.0f64; dim];
    for point in data {
        for (m, &x) in mean.iter_mut().zip(point) {
            *m += f64::from(x);
        }
    }
    mean.iter_mut().for_each(|m| *m /= n);

    let mut var = vec![0.0f64; dim];
    for point in data {
        for ((v, &m), &x) in var.iter_mut().zip(&mean).zip(point) {
            let d = f64::from(x) - m;
            *v += d * d;
        }
    }
    let scale: Vec<f64> = var
        .iter()
        .map(|v| {
            let sd = (v / n).sqrt();
            if sd > 0.0 { sd } else { 1.0 }
        })
        .collect();

    Ok(data
        .iter()
        .map(|point| {
            point
                .iter()
                .zip(mean.iter().zip(&scale))
                .map(|(&x, (&m, &s))| ((f64::from(x) - m) / s) as f32)
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize() {
        let data = vec![vec![1.0, 10.0, 5.0], vec![3.0, 30.0, 5.0]];
        let out = standardize(&data).unwrap();
        assert_eq!(out, vec![vec![-1.0, -1.0, 0.0], vec![1.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_standardize_validates() {
        assert!(standardize(&[]).unwrap().is_empty());
        assert!(standardize(&[vec![1.0], vec![1.0, 2.0]]).is_err());
        assert!(standardize(&[vec![f32::NAN]]).is_err());
    }
}
