//! Optional pointer smoothing
//!
//! The base pipeline passes landmark noise through unfiltered; an
//! exponential moving average can be layered on top for integrators who
//! prefer a steadier cursor over responsiveness.

/// Which smoothing algorithm to apply to the pointer coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingMode {
    Ema,
    None,
}

impl SmoothingMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ema" | "exponential" => Self::Ema,
            "none" | "off" | "disabled" => Self::None,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ema => "ema",
            Self::None => "none",
        }
    }
}

/// Single-channel exponential moving average.
///
/// `alpha` in [0, 1]: 1.0 follows the raw signal exactly, smaller values
/// smooth harder. The first sample passes through unchanged.
#[derive(Debug, Clone)]
pub struct EmaFilter {
    alpha: f32,
    value: Option<f32>,
}

impl EmaFilter {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            value: None,
        }
    }

    /// Feed a raw sample and return the smoothed value
    pub fn filter(&mut self, raw: f32) -> f32 {
        let smoothed = match self.value {
            Some(prev) => self.alpha * raw + (1.0 - self.alpha) * prev,
            None => raw,
        };
        self.value = Some(smoothed);
        smoothed
    }

    /// Clear filter history so the next sample passes through unchanged
    pub fn reset(&mut self) {
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!(SmoothingMode::from_str("ema"), SmoothingMode::Ema);
        assert_eq!(SmoothingMode::from_str("EMA"), SmoothingMode::Ema);
        assert_eq!(SmoothingMode::from_str("none"), SmoothingMode::None);
        assert_eq!(SmoothingMode::from_str("garbage"), SmoothingMode::None);
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = EmaFilter::new(0.4);
        assert_eq!(filter.filter(0.7), 0.7);
    }

    #[test]
    fn test_ema_converges() {
        let mut filter = EmaFilter::new(0.5);
        filter.filter(0.0);

        let mut value = 0.0;
        for _ in 0..32 {
            value = filter.filter(1.0);
        }
        assert!((value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ema_lags_behind_step() {
        let mut filter = EmaFilter::new(0.4);
        filter.filter(0.0);
        let stepped = filter.filter(1.0);
        assert!((stepped - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut filter = EmaFilter::new(0.4);
        filter.filter(0.0);
        filter.filter(1.0);
        filter.reset();
        assert_eq!(filter.filter(0.5), 0.5);
    }
}
