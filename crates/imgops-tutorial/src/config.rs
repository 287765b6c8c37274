//! Tutorial configuration

use serde::{Deserialize, Serialize};

/// Parameters of a tutorial run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialConfig {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Starting value of the scalar sample
    pub value: f64,
    /// Constant added by the resolved add op
    pub constant: f64,
    /// Loop iterations
    pub iterations: usize,
    /// Calls per side of the lookup-versus-cached timing
    pub repetitions: usize,
    /// Log image summaries where a viewer would open a window
    pub show: bool,
    /// Print the timing report as JSON when done
    pub json: bool,
}

impl TutorialConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With image dimensions
    #[inline]
    #[must_use]
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// With starting sample value
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// With add constant
    #[inline]
    #[must_use]
    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// With loop iterations
    #[inline]
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// With timing repetitions
    #[inline]
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// With image summaries logged
    #[inline]
    #[must_use]
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// With JSON timing output
    #[inline]
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Value the loop section should end with
    #[must_use]
    pub fn expected_loop_result(&self) -> f64 {
        // Lossless for any iteration count the CLI can sensibly take.
        #[allow(clippy::cast_precision_loss)]
        let iterations = self.iterations as f64;
        self.value + self.constant * iterations
    }
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            value: 10.0,
            constant: 5.0,
            iterations: 4,
            repetitions: 1000,
            show: false,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_walkthrough() {
        let config = TutorialConfig::new();
        assert_eq!((config.width, config.height), (256, 256));
        assert_eq!(config.value, 10.0);
        assert_eq!(config.constant, 5.0);
        assert_eq!(config.iterations, 4);
        assert_eq!(config.repetitions, 1000);
        assert!(!config.show);
        assert!(!config.json);
    }

    #[test]
    fn builder_overrides() {
        let config = TutorialConfig::new()
            .with_dimensions(8, 4)
            .with_value(1.0)
            .with_constant(2.0)
            .with_iterations(3)
            .with_repetitions(10)
            .with_show(true)
            .with_json(true);
        assert_eq!((config.width, config.height), (8, 4));
        assert_eq!(config.expected_loop_result(), 7.0);
        assert_eq!(config.repetitions, 10);
        assert!(config.show && config.json);
    }

    #[test]
    fn default_loop_result() {
        assert_eq!(TutorialConfig::default().expected_loop_result(), 30.0);
    }

    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(TutorialConfig::default()).unwrap();
        assert_eq!(json["iterations"], 4);
        assert_eq!(json["constant"], 5.0);
    }
}
