use crate::error::OperationError;

/// How a recoverable problem is surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    /// Skip silently.
    Ignore,
    /// Record a diagnostic and keep going.
    #[default]
    Warn,
    /// Abort the pass with an error.
    Fail,
}

/// Options for [`Straighten`](super::Straighten).
#[derive(Debug, Clone, PartialEq)]
pub struct StraightenOptions {
    /// Respace interior vertices at equal intervals after straightening.
    pub uniform_distribution: bool,

    /// Blend between the original and the edited positions.
    pub morph_enabled: bool,

    /// Blend amount as a percentage in `[0, 100]`.
    /// `0` keeps the original positions, `100` keeps the full edit.
    pub morph_power: f64,

    /// Policy for islands that are not a simple open path.
    pub island_error_severity: Severity,

    /// Policy for an empty edge selection.
    pub group_missing_severity: Severity,

    /// Log a summary of every discovered island at `info` level.
    pub report_islands: bool,
}

impl Default for StraightenOptions {
    fn default() -> Self {
        Self {
            uniform_distribution: false,
            morph_enabled: false,
            morph_power: 100.0,
            island_error_severity: Severity::Warn,
            group_missing_severity: Severity::Warn,
            report_islands: false,
        }
    }
}

impl StraightenOptions {
    /// Enables or disables uniform point distribution.
    #[must_use]
    pub fn with_uniform_distribution(mut self, enabled: bool) -> Self {
        self.uniform_distribution = enabled;
        self
    }

    /// Enables blending with the given percentage.
    #[must_use]
    pub fn with_morph(mut self, power: f64) -> Self {
        self.morph_enabled = true;
        self.morph_power = power;
        self
    }

    /// Sets the invalid-island policy.
    #[must_use]
    pub fn with_island_error_severity(mut self, severity: Severity) -> Self {
        self.island_error_severity = severity;
        self
    }

    /// Sets the empty-selection policy.
    #[must_use]
    pub fn with_group_missing_severity(mut self, severity: Severity) -> Self {
        self.group_missing_severity = severity;
        self
    }

    /// Enables per-island reporting.
    #[must_use]
    pub fn with_island_report(mut self, enabled: bool) -> Self {
        self.report_islands = enabled;
        self
    }

    /// Effective blend factor in `[0, 1]`.
    ///
    /// Returns `1.0` when blending is disabled.
    #[must_use]
    pub fn morph_factor(&self) -> f64 {
        if self.morph_enabled {
            (self.morph_power * 0.01).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Checks that the options are usable.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] if blending is enabled and
    /// `morph_power` is not a finite percentage in `[0, 100]`. The power is
    /// not read while blending is off.
    pub fn validate(&self) -> Result<(), OperationError> {
        if !self.morph_enabled {
            return Ok(());
        }
        if !self.morph_power.is_finite() || !(0.0..=100.0).contains(&self.morph_power) {
            return Err(OperationError::invalid_param(
                "morph_power",
                self.morph_power,
                "must be a percentage in [0, 100]",
            ));
        }
        Ok(())
    }
}
