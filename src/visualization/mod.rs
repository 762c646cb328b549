//! Sample export and chart series.
//!
//! Provides:
//! - Export pipeline: CSV, JSON Lines and an aligned text table, written to
//!   any [`std::io::Write`]
//! - [`EnergySeries`]: per-curve point lists and axis bounds for chart
//!   renderers
//!
//! # Example
//!
//! ```rust
//! use mechlab::engine::EnergySample;
//! use mechlab::visualization::{ExportFormat, Exporter};
//!
//! let samples = [EnergySample::new(0.016, 9.8, 0.0)];
//! let mut out = Vec::new();
//! Exporter::new(ExportFormat::Csv).write(samples.iter(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("0.02,9.80,0.00,9.80"));
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::EnergySample;
use crate::error::{LabError, LabResult};

/// CSV header, one column per [`EnergySample`] field.
pub const CSV_HEADER: &str = "time,potential_energy,kinetic_energy,total_energy";

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Aligned columns for a terminal.
    #[default]
    Table,
    /// Comma-separated values with a header row.
    Csv,
    /// One JSON object per line.
    JsonLines,
}

impl FromStr for ExportFormat {
    type Err = LabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "jsonl" | "json-lines" | "jsonlines" | "ndjson" => Ok(Self::JsonLines),
            other => Err(LabError::invalid_argument(format!(
                "unknown format '{other}' (expected table, csv or jsonl)"
            ))),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// Decimal places for CSV and table output.
    pub decimals: usize,
    /// Decimation factor (1 = every sample, 2 = every other, etc.).
    pub decimation: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Table,
            decimals: 2,
            decimation: 1,
        }
    }
}

/// Writes energy samples in one of the [`ExportFormat`]s.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Exporter for `format` with default precision.
    #[must_use]
    pub fn new(format: ExportFormat) -> Self {
        Self {
            config: ExportConfig {
                format,
                ..ExportConfig::default()
            },
        }
    }

    /// Create with custom config.
    #[must_use]
    pub const fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Write `samples` in the configured format.
    ///
    /// # Errors
    ///
    /// Returns error if writing or JSON serialization fails.
    pub fn write<'a, I, W>(&self, samples: I, writer: &mut W) -> LabResult<()>
    where
        I: IntoIterator<Item = &'a EnergySample>,
        W: Write,
    {
        let step = self.config.decimation.max(1);
        let samples = samples.into_iter().step_by(step);
        match self.config.format {
            ExportFormat::Csv => self.write_csv(samples, writer),
            ExportFormat::JsonLines => Self::write_json_lines(samples, writer),
            ExportFormat::Table => self.write_table(samples, writer),
        }
    }

    /// Write `samples` to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn write_to_path<'a, I>(&self, samples: I, path: &Path) -> LabResult<()>
    where
        I: IntoIterator<Item = &'a EnergySample>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(samples, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_csv<'a, W: Write>(
        &self,
        samples: impl Iterator<Item = &'a EnergySample>,
        writer: &mut W,
    ) -> LabResult<()> {
        let p = self.config.decimals;
        writeln!(writer, "{CSV_HEADER}")?;
        for s in samples {
            writeln!(
                writer,
                "{:.p$},{:.p$},{:.p$},{:.p$}",
                s.time, s.potential_energy, s.kinetic_energy, s.total_energy
            )?;
        }
        Ok(())
    }

    fn write_json_lines<'a, W: Write>(
        samples: impl Iterator<Item = &'a EnergySample>,
        writer: &mut W,
    ) -> LabResult<()> {
        for s in samples {
            let json = serde_json::to_string(s)
                .map_err(|e| LabError::serialization(format!("JSON serialization failed: {e}")))?;
            writeln!(writer, "{json}")?;
        }
        Ok(())
    }

    fn write_table<'a, W: Write>(
        &self,
        samples: impl Iterator<Item = &'a EnergySample>,
        writer: &mut W,
    ) -> LabResult<()> {
        let p = self.config.decimals;
        writeln!(
            writer,
            "{:>10}  {:>12}  {:>12}  {:>12}",
            "time (s)", "PE (J)", "KE (J)", "total (J)"
        )?;
        for s in samples {
            writeln!(
                writer,
                "{:>10.p$}  {:>12.p$}  {:>12.p$}  {:>12.p$}",
                s.time, s.potential_energy, s.kinetic_energy, s.total_energy
            )?;
        }
        Ok(())
    }
}

/// The three energy curves as `(time, value)` points, ready for a chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergySeries {
    /// Potential energy.
    pub potential: Vec<(f64, f64)>,
    /// Kinetic energy.
    pub kinetic: Vec<(f64, f64)>,
    /// Total energy.
    pub total: Vec<(f64, f64)>,
}

impl EnergySeries {
    /// Split samples into curves, skipping non-finite samples.
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a EnergySample>) -> Self {
        let mut series = Self::default();
        for s in samples {
            if !(s.time.is_finite() && s.total_energy.is_finite()) {
                continue;
            }
            series.potential.push((s.time, s.potential_energy));
            series.kinetic.push((s.time, s.kinetic_energy));
            series.total.push((s.time, s.total_energy));
        }
        series
    }

    /// Number of points per curve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.total.len()
    }

    /// True when there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Time axis bounds. A single point gets a one-step window.
    #[must_use]
    pub fn time_bounds(&self) -> Option<[f64; 2]> {
        let first = self.total.first()?.0;
        let last = self.total.last()?.0;
        if last > first {
            Some([first, last])
        } else {
            Some([first, first + crate::engine::TIMESTEP])
        }
    }

    /// Energy axis bounds over all curves, starting at zero or below.
    #[must_use]
    pub fn energy_bounds(&self) -> Option<[f64; 2]> {
        if self.is_empty() {
            return None;
        }
        let (lo, hi) = self
            .potential
            .iter()
            .chain(&self.kinetic)
            .chain(&self.total)
            .fold((0.0_f64, f64::MIN), |(lo, hi), &(_, v)| (lo.min(v), hi.max(v)));
        Some(if hi > lo { [lo, hi] } else { [lo, lo + 1.0] })
    }
}
