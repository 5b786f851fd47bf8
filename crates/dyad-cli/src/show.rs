//! # Show Subcommand
//!
//! Prints a tensor's text form and components, and on request its eigen
//! pairs in descending eigenvalue order.
//!
//! ```bash
//! dyad show "[2 8 5 3]"
//! dyad show 1,2,3,4,5,6 --eigen
//! ```

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use dyad_core::DyadicTensor;

use crate::input::TensorArg;
use crate::output::{emit, format_vector, OutputFormat, Report};

/// Arguments for `dyad show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Tensor to display (`[..]` text, `;`-separated vectors, or symmetric elements).
    #[arg(allow_hyphen_values = true)]
    pub tensor: TensorArg,

    /// Also print the eigenvalues and eigenvectors.
    #[arg(long)]
    pub eigen: bool,
}

/// One eigen pair.
#[derive(Debug, Serialize)]
pub struct EigenPair {
    /// Eigenvalue.
    pub value: f64,
    /// Matching eigenvector.
    pub vector: Vec<f64>,
}

/// What `dyad show` reports.
#[derive(Debug, Serialize)]
pub struct ShowReport {
    /// `[v0 v1 ...]` text form.
    pub text: String,
    /// Dimension `N`.
    pub dimension: usize,
    /// Whether the components are symmetric.
    pub symmetric: bool,
    /// Components in text-form order.
    pub components: Vec<f64>,
    /// Eigen pairs, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eigens: Option<Vec<EigenPair>>,
}

impl ShowReport {
    /// Describe `tensor`, optionally including its eigens.
    pub fn new(tensor: &DyadicTensor, eigen: bool) -> Self {
        let eigens = eigen.then(|| {
            let decomposition = tensor.eigen_decomposition();
            decomposition
                .values()
                .iter()
                .zip(decomposition.vectors())
                .map(|(&value, vector)| EigenPair {
                    value,
                    vector: vector.iter().copied().collect(),
                })
                .collect()
        });
        Self {
            text: tensor.to_string(),
            dimension: tensor.dimension(),
            symmetric: tensor.is_symmetric(),
            components: tensor.to_flat_vec(),
            eigens,
        }
    }
}

impl Report for ShowReport {
    fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.text.clone(),
            format!("  dimension: {}", self.dimension),
            format!("  symmetric: {}", self.symmetric),
        ];
        if let Some(eigens) = &self.eigens {
            for (i, pair) in eigens.iter().enumerate() {
                lines.push(format!(
                    "  λ{i} = {:<12} v{i} = {}",
                    pair.value,
                    format_vector(&pair.vector)
                ));
            }
        }
        lines
    }
}

/// Execute `dyad show`.
pub fn run_show(args: &ShowArgs, format: OutputFormat) -> Result<u8> {
    let tensor = args.tensor.tensor();
    if args.eigen && !tensor.is_symmetric() {
        tracing::warn!(
            tensor = %tensor,
            "eigens of a non-symmetric tensor are read from its lower triangle"
        );
    }
    emit(&ShowReport::new(tensor, args.eigen), format)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_tensor;

    #[test]
    fn report_without_eigens() {
        let t = parse_tensor("[2 8 5 3]").unwrap();
        let report = ShowReport::new(&t, false);
        assert_eq!(report.text, "[2 8 5 3]");
        assert_eq!(report.dimension, 2);
        assert!(!report.symmetric);
        assert_eq!(report.components, vec![2.0, 8.0, 5.0, 3.0]);
        assert!(report.eigens.is_none());
    }

    #[test]
    fn eigens_are_descending() {
        let t = parse_tensor("1,0,0,5,0,2").unwrap();
        let report = ShowReport::new(&t, true);
        let eigens = report.eigens.as_ref().unwrap();
        let values: Vec<f64> = eigens.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 2.0, 1.0]);
        assert_eq!(eigens[0].vector, vec![0.0, 1.0, 0.0]);
        assert_eq!(report.text_lines().len(), 6);
    }

    #[test]
    fn json_omits_missing_eigens() {
        let t = parse_tensor("[1 0 0 1]").unwrap();
        let json = serde_json::to_value(ShowReport::new(&t, false)).unwrap();
        assert!(json.get("eigens").is_none());
        assert_eq!(json["dimension"], 2);
    }
}
