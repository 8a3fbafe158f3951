//! Power Spectrum
//!
//! One-sided |DFT|² of a real signal. Used to contrast spectral and
//! topological views of periodicity: a spectrum needs the period to align
//! with the sampling grid to give a sharp peak, a sliding-window loop does not.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// |X[k]|² for k = 0..=N/2
pub fn power_spectrum(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer[..=n / 2]
        .iter()
        .map(|c| c.re * c.re + c.im * c.im)
        .collect()
}

/// Period N / k* of the strongest non-DC bin, in samples
pub fn dominant_period(signal: &[f64]) -> Option<f64> {
    let spectrum = power_spectrum(signal);
    let total: f64 = spectrum.iter().sum();
    let (k, power) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

    // FFT round-off leaves residue in the bins of a constant signal
    if *power > 1e-12 * total {
        Some(signal.len() as f64 / k as f64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_tone_peaks_at_its_bin() {
        let n = 160;
        let signal: Vec<f64> = (0..n).map(|k| (2.0 * PI * k as f64 / 40.0).cos()).collect();
        let spectrum = power_spectrum(&signal);

        assert_eq!(spectrum.len(), n / 2 + 1);
        // 4 periods in 160 samples -> bin 4, power (N/2)²
        assert!((spectrum[4] - 6400.0).abs() < 1e-6);
        assert!(spectrum[5] < 1e-6);
        assert!((dominant_period(&signal).unwrap() - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_signal_has_no_period() {
        assert!(dominant_period(&[1.0; 16]).is_none());
        assert!(dominant_period(&[]).is_none());
        assert!(dominant_period(&[3.0]).is_none());
        assert_eq!(power_spectrum(&[2.0, 2.0]), vec![16.0, 0.0]);
    }
}
