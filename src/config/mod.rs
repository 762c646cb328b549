//! Lab configuration with YAML loading and validation.
//!
//! Parameter ranges come from [`crate::scenarios::limits`], the same table
//! the TUI sliders use. They apply when a configuration is loaded; the
//! scenario API itself accepts any value.
//!
//! ```yaml
//! schema_version: "1.0"
//! pendulum: { mass: 1.0, length: 2.0, initial_angle: 1.047 }
//! incline: { mass: 1.0, initial_height: 5.0, slope_angle: 0.524 }
//! bounce: { mass: 1.0, initial_height: 10.0, restitution: 0.8 }
//! buffers: { pendulum: 100, incline: 100, bounce: 150 }
//! scheduling: active_only
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::engine::jidoka::JidokaConfig;
use crate::error::{LabError, LabResult};
use crate::lab::SchedulingPolicy;
use crate::scenarios::{
    Bounce, BounceParams, Incline, InclineParams, Model, Pendulum, PendulumParams, ScenarioKind,
};

/// Top-level lab configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    pub schema_version: String,

    /// Pendulum parameters applied on reset.
    #[validate(nested)]
    pub pendulum: PendulumParams,

    /// Incline parameters applied on reset.
    #[validate(nested)]
    pub incline: InclineParams,

    /// Bounce parameters applied on reset.
    #[validate(nested)]
    pub bounce: BounceParams,

    /// Sample buffer capacities.
    #[validate(nested)]
    pub buffers: BufferConfig,

    /// Which scenarios get ticked per frame.
    pub scheduling: SchedulingPolicy,

    /// Stop-on-anomaly guard.
    pub jidoka: JidokaConfig,

    /// Log filter.
    #[validate(nested)]
    pub logging: LoggingConfig,

    /// Terminal renderer settings.
    #[validate(nested)]
    pub tui: TuiConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            pendulum: PendulumParams::default(),
            incline: InclineParams::default(),
            bounce: BounceParams::default(),
            buffers: BufferConfig::default(),
            scheduling: SchedulingPolicy::default(),
            jidoka: JidokaConfig::default(),
            logging: LoggingConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl LabConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> LabResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> LabResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> LabResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn check(&self) -> LabResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> LabConfigBuilder {
        LabConfigBuilder::default()
    }

    /// Constraints the derive cannot express.
    fn validate_semantic(&self) -> LabResult<()> {
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(LabError::config(format!(
                "logging.level '{}' is not a filter directive: {e}",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Buffer capacity for a scenario.
    #[must_use]
    pub const fn capacity(&self, kind: ScenarioKind) -> usize {
        match kind {
            ScenarioKind::Pendulum => self.buffers.pendulum,
            ScenarioKind::Incline => self.buffers.incline,
            ScenarioKind::Bounce => self.buffers.bounce,
        }
    }
}

/// Sample buffer capacities per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    /// Pendulum samples retained.
    #[validate(range(min = 1, max = 100_000))]
    pub pendulum: usize,
    /// Incline samples retained.
    #[validate(range(min = 1, max = 100_000))]
    pub incline: usize,
    /// Bounce samples retained.
    #[validate(range(min = 1, max = 100_000))]
    pub bounce: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            pendulum: Pendulum::DEFAULT_CAPACITY,
            incline: Incline::DEFAULT_CAPACITY,
            bounce: Bounce::DEFAULT_CAPACITY,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[validate(length(min = 1))]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Terminal renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    /// Frame period in milliseconds.
    #[validate(range(min = 1, max = 1000))]
    pub frame_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { frame_ms: 16 }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct LabConfigBuilder {
    pendulum: Option<PendulumParams>,
    incline: Option<InclineParams>,
    bounce: Option<BounceParams>,
    buffers: Option<BufferConfig>,
    scheduling: Option<SchedulingPolicy>,
    jidoka: Option<JidokaConfig>,
}

impl LabConfigBuilder {
    /// Set pendulum parameters.
    #[must_use]
    pub fn pendulum(mut self, params: PendulumParams) -> Self {
        self.pendulum = Some(params);
        self
    }

    /// Set incline parameters.
    #[must_use]
    pub fn incline(mut self, params: InclineParams) -> Self {
        self.incline = Some(params);
        self
    }

    /// Set bounce parameters.
    #[must_use]
    pub fn bounce(mut self, params: BounceParams) -> Self {
        self.bounce = Some(params);
        self
    }

    /// Set buffer capacities.
    #[must_use]
    pub const fn buffers(mut self, buffers: BufferConfig) -> Self {
        self.buffers = Some(buffers);
        self
    }

    /// Set the scheduling policy.
    #[must_use]
    pub const fn scheduling(mut self, policy: SchedulingPolicy) -> Self {
        self.scheduling = Some(policy);
        self
    }

    /// Set Jidoka configuration.
    #[must_use]
    pub const fn jidoka(mut self, config: JidokaConfig) -> Self {
        self.jidoka = Some(config);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> LabConfig {
        let mut config = LabConfig::default();

        if let Some(p) = self.pendulum {
            config.pendulum = p;
        }
        if let Some(p) = self.incline {
            config.incline = p;
        }
        if let Some(p) = self.bounce {
            config.bounce = p;
        }
        if let Some(b) = self.buffers {
            config.buffers = b;
        }
        if let Some(s) = self.scheduling {
            config.scheduling = s;
        }
        if let Some(j) = self.jidoka {
            config.jidoka = j;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LabConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.capacity(ScenarioKind::Pendulum), 100);
        assert_eq!(config.capacity(ScenarioKind::Incline), 100);
        assert_eq!(config.capacity(ScenarioKind::Bounce), 150);
        assert_eq!(config.scheduling, SchedulingPolicy::ActiveOnly);
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = LabConfig::from_yaml("{}").expect("parse");
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r"
pendulum:
  length: 1.5
bounce:
  restitution: 0.6
scheduling: all_running
";
        let config = LabConfig::from_yaml(yaml).expect("parse");
        assert!((config.pendulum.length - 1.5).abs() < f64::EPSILON);
        assert!((config.pendulum.mass - 1.0).abs() < f64::EPSILON);
        assert!((config.bounce.restitution - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.scheduling, SchedulingPolicy::AllRunning);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = LabConfig::from_yaml("pendulum:\n  damping: 0.1\n").expect_err("unknown");
        assert!(matches!(err, LabError::YamlParse(_)));
    }

    #[test]
    fn test_out_of_range_restitution_rejected() {
        let err = LabConfig::from_yaml("bounce:\n  restitution: 1.5\n").expect_err("range");
        assert!(matches!(err, LabError::Validation(_)));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let err = LabConfig::from_yaml("buffers:\n  bounce: 0\n").expect_err("range");
        assert!(matches!(err, LabError::Validation(_)));
    }

    #[test]
    fn test_flat_slope_rejected() {
        let err = LabConfig::from_yaml("incline:\n  slope_angle: 0.0\n").expect_err("flat");
        assert!(matches!(err, LabError::Validation(_)));
    }

    #[test]
    fn test_ranges_match_slider_limits() {
        use crate::scenarios::limits;

        for (yaml, ok) in [
            ("pendulum:\n  mass: 0.1\n", true),
            ("pendulum:\n  mass: 10.0\n", true),
            ("pendulum:\n  mass: 0.05\n", false),
            ("pendulum:\n  mass: 10.5\n", false),
            ("pendulum:\n  length: 0.5\n", true),
            ("pendulum:\n  length: 6.0\n", false),
            ("bounce:\n  initial_height: 20.0\n", true),
            ("bounce:\n  initial_height: 25.0\n", false),
            ("pendulum:\n  initial_angle: 3.1\n", false),
        ] {
            assert_eq!(LabConfig::from_yaml(yaml).is_ok(), ok, "{yaml}");
        }

        let at_max = format!("incline:\n  slope_angle: {}\n", limits::SLOPE_ANGLE.max);
        assert!(LabConfig::from_yaml(&at_max).is_ok());
        let past_max = format!("incline:\n  slope_angle: {}\n", limits::SLOPE_ANGLE.max + 0.01);
        assert!(LabConfig::from_yaml(&past_max).is_err());
    }

    #[test]
    fn test_bad_log_directive_rejected() {
        let err = LabConfig::from_yaml("logging:\n  level: \"mechlab=loud\"\n").expect_err("level");
        assert!(matches!(err, LabError::Config { .. }));
        assert!(LabConfig::from_yaml("logging:\n  level: \"mechlab=debug\"\n").is_ok());
    }

    #[test]
    fn test_yaml_roundtrip_of_default() {
        let config = LabConfig::default();
        let yaml = config.to_yaml().expect("serialize");
        assert!(yaml.contains("restitution"));
        let back = LabConfig::from_yaml(&yaml).expect("parse");
        assert_eq!(back, config);
    }

    #[test]
    fn test_builder() {
        let config = LabConfig::builder()
            .pendulum(PendulumParams {
                length: 3.0,
                ..Default::default()
            })
            .scheduling(SchedulingPolicy::AllRunning)
            .jidoka(JidokaConfig {
                check_finite: false,
            })
            .build();
        assert!((config.pendulum.length - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.scheduling, SchedulingPolicy::AllRunning);
        assert!(!config.jidoka.check_finite);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabConfig::load("/nonexistent/mechlab.yaml").expect_err("missing");
        assert!(matches!(err, LabError::Io(_)));
    }
}
