//! # Metric Subcommand
//!
//! Evaluates named scalar metrics. With no names, every metric defined for
//! the tensor's dimension is reported.
//!
//! ```bash
//! dyad metric "1,0,0;0,5,0;0,0,2" linear_certainty planar_certainty
//! dyad metric "[1 2 3 4]"
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dyad_core::{DyadicTensor, ScalarMetric, TensorError};

use crate::input::TensorArg;
use crate::output::{emit, OutputFormat, Report};

/// Arguments for `dyad metric`.
#[derive(Args, Debug)]
pub struct MetricArgs {
    /// Tensor to evaluate.
    #[arg(allow_hyphen_values = true)]
    pub tensor: TensorArg,

    /// Metric names (e.g. `trace`, `linear-certainty`). Defaults to all
    /// metrics defined for the tensor's dimension.
    #[arg(value_name = "METRIC")]
    pub names: Vec<ScalarMetric>,
}

/// One evaluated metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    /// Metric evaluated.
    pub metric: ScalarMetric,
    /// Its value; `null` in JSON when undefined.
    pub value: f64,
}

/// What `dyad metric` reports.
#[derive(Debug, Serialize)]
pub struct MetricReport {
    /// Tensor text form.
    pub tensor: String,
    /// Values in request order.
    pub metrics: Vec<MetricValue>,
}

impl Report for MetricReport {
    fn text_lines(&self) -> Vec<String> {
        let width = self
            .metrics
            .iter()
            .map(|m| m.metric.as_str().len())
            .max()
            .unwrap_or(0);
        self.metrics
            .iter()
            .map(|m| format!("{:<width$}  {}", m.metric.as_str(), m.value))
            .collect()
    }
}

/// Evaluate `names` on `tensor`, or every applicable metric if `names` is
/// empty. Fails on the first 3-D metric requested for a non-3-D tensor.
pub fn evaluate(
    tensor: &DyadicTensor,
    names: &[ScalarMetric],
) -> Result<Vec<MetricValue>, TensorError> {
    let selected: Vec<ScalarMetric> = if names.is_empty() {
        ScalarMetric::applicable_to(tensor.dimension()).collect()
    } else {
        names.to_vec()
    };
    selected
        .into_iter()
        .map(|metric| {
            let value = metric.evaluate(tensor)?;
            if value.is_nan() {
                tracing::warn!(metric = %metric, "metric is undefined for this tensor");
            }
            Ok(MetricValue { metric, value })
        })
        .collect()
}

/// Execute `dyad metric`.
pub fn run_metric(args: &MetricArgs, format: OutputFormat) -> Result<u8> {
    let tensor = args.tensor.tensor();
    let metrics = evaluate(tensor, &args.names)
        .with_context(|| format!("cannot evaluate metrics on a {}-D tensor", tensor.dimension()))?;
    tracing::debug!(count = metrics.len(), "evaluated metrics");
    emit(
        &MetricReport {
            tensor: tensor.to_string(),
            metrics,
        },
        format,
    )?;
    Ok(0)
}
