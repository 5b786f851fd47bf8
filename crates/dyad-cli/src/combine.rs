//! # Combine and Scale Subcommands
//!
//! Binary tensor arithmetic and scalar scaling.
//!
//! ```bash
//! dyad combine add "[2 8 5 3]" "[6 3 4 6]"
//! dyad combine contract "[2 8 5 3]" "[6 3 4 6]"
//! dyad scale 1,2,3,4,5,6 -- -0.5
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use dyad_core::{DyadicTensor, TensorError};

use crate::input::TensorArg;
use crate::output::{emit, OutputFormat, Report};

/// Binary operation applied by `dyad combine`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// Entry-wise sum.
    Add,
    /// Entry-wise difference.
    Sub,
    /// Entry-wise (Hadamard) product.
    Mul,
    /// Matrix product of the component matrices.
    Contract,
}

impl CombineOp {
    /// Apply the operation; operands must share a dimension.
    pub fn apply(
        self,
        left: &DyadicTensor,
        right: &DyadicTensor,
    ) -> Result<DyadicTensor, TensorError> {
        match self {
            Self::Add => left.try_add(right),
            Self::Sub => left.try_sub(right),
            Self::Mul => left.try_hadamard(right),
            Self::Contract => left.contract(right),
        }
    }
}

/// Arguments for `dyad combine`.
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Operation to apply.
    #[arg(value_enum)]
    pub op: CombineOp,

    /// Left operand.
    #[arg(allow_hyphen_values = true)]
    pub left: TensorArg,

    /// Right operand.
    #[arg(allow_hyphen_values = true)]
    pub right: TensorArg,
}

/// Arguments for `dyad scale`.
#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Tensor to scale.
    #[arg(allow_hyphen_values = true)]
    pub tensor: TensorArg,

    /// Scalar factor.
    #[arg(allow_negative_numbers = true)]
    pub factor: f64,
}

/// Result of an arithmetic subcommand.
#[derive(Debug, Serialize)]
pub struct ArithmeticReport {
    /// Description of the operation, e.g. `contract` or `scale 2.5`.
    pub operation: String,
    /// `[v0 v1 ...]` text form of the result.
    pub text: String,
    /// Dimension of the result.
    pub dimension: usize,
    /// Result components in text-form order.
    pub components: Vec<f64>,
}

impl ArithmeticReport {
    fn new(operation: String, tensor: &DyadicTensor) -> Self {
        Self {
            operation,
            text: tensor.to_string(),
            dimension: tensor.dimension(),
            components: tensor.to_flat_vec(),
        }
    }
}

impl Report for ArithmeticReport {
    fn text_lines(&self) -> Vec<String> {
        vec![self.text.clone()]
    }
}

/// Execute `dyad combine`.
pub fn run_combine(args: &CombineArgs, format: OutputFormat) -> Result<u8> {
    let (left, right) = (args.left.tensor(), args.right.tensor());
    tracing::info!(
        op = ?args.op,
        left = %left,
        right = %right,
        "combining tensors"
    );
    let operation = args
        .op
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default();
    let result = args
        .op
        .apply(left, right)
        .with_context(|| format!("cannot {operation} these tensors"))?;
    emit(&ArithmeticReport::new(operation, &result), format)?;
    Ok(0)
}

/// Execute `dyad scale`.
pub fn run_scale(args: &ScaleArgs, format: OutputFormat) -> Result<u8> {
    let result = args.tensor.tensor().scaled(args.factor);
    tracing::info!(factor = args.factor, "scaled tensor");
    emit(
        &ArithmeticReport::new(format!("scale {}", args.factor), &result),
        format,
    )?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_tensor;

    fn operands() -> (DyadicTensor, DyadicTensor) {
        (
            parse_tensor("2,8;5,3").unwrap(),
            parse_tensor("6,3;4,6").unwrap(),
        )
    }

    #[test]
    fn entrywise_operations() {
        let (l, r) = operands();
        assert_eq!(CombineOp::Add.apply(&l, &r).unwrap().to_string(), "[8 11 9 9]");
        assert_eq!(CombineOp::Sub.apply(&l, &r).unwrap().to_string(), "[-4 5 1 -3]");
        assert_eq!(CombineOp::Mul.apply(&l, &r).unwrap().to_string(), "[12 24 20 18]");
    }

    #[test]
    fn contraction() {
        let (l, r) = operands();
        assert_eq!(CombineOp::Contract.apply(&l, &r).unwrap().to_string(), "[27 57 38 50]");
    }

    #[test]
    fn mismatched_dimensions_are_errors() {
        let (l, _) = operands();
        let three = DyadicTensor::identity(3).unwrap();
        for op in [CombineOp::Add, CombineOp::Sub, CombineOp::Mul, CombineOp::Contract] {
            assert_eq!(
                op.apply(&l, &three),
                Err(TensorError::DimensionMismatch { left: 2, right: 3 })
            );
        }
    }

    #[test]
    fn scale_report() {
        let (l, _) = operands();
        let report = ArithmeticReport::new("scale 2.5".into(), &l.scaled(2.5));
        assert_eq!(report.text, "[5 20 12.5 7.5]");
        assert_eq!(report.components, vec![5.0, 20.0, 12.5, 7.5]);
    }
}
