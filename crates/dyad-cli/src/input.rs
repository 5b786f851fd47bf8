//! # Tensor Arguments
//!
//! Turns a single command-line argument into a [`DyadicTensor`]. Three
//! spellings are accepted:
//!
//! - `"[a b c d]"`: the text form printed by `dyad show`; the count must be
//!   a perfect square.
//! - `"1,0,0;0,1,0;0,0,1"`: one `;`-separated vector per column; `N`
//!   vectors of length `N`.
//! - `"xx,xy,xz,yy,yz,zz"`: symmetric elements. Six or nine values build a
//!   3-D tensor, any other triangular count `N(N+1)/2` builds an `N`-D one.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use dyad_core::nalgebra::DVector;
use dyad_core::{Dyadic3DTensor, DyadicTensor};

/// A tensor supplied on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorArg(pub DyadicTensor);

impl TensorArg {
    /// The parsed tensor.
    pub fn tensor(&self) -> &DyadicTensor {
        &self.0
    }

    /// The 3-D view, when the tensor has three dimensions.
    pub fn as_3d(&self) -> Option<Dyadic3DTensor> {
        Dyadic3DTensor::try_from(self.0.clone()).ok()
    }
}

impl FromStr for TensorArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tensor(s).map(TensorArg)
    }
}

/// Parse one of the accepted argument spellings.
pub fn parse_tensor(arg: &str) -> Result<DyadicTensor> {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        bail!("empty tensor argument");
    }

    if trimmed.starts_with('[') {
        let tensor = trimmed
            .parse::<DyadicTensor>()
            .with_context(|| format!("invalid tensor text {trimmed:?}"))?;
        tracing::debug!(dimension = tensor.dimension(), "parsed bracketed tensor");
        return Ok(tensor);
    }

    if trimmed.contains(';') {
        let vectors = trimmed
            .split(';')
            .map(|chunk| parse_numbers(chunk).map(DVector::from_vec))
            .collect::<Result<Vec<_>>>()?;
        let tensor = DyadicTensor::from_eigenvectors(&vectors)
            .with_context(|| format!("invalid vector list {trimmed:?}"))?;
        tracing::debug!(dimension = tensor.dimension(), "parsed vector list");
        return Ok(tensor);
    }

    let elements = parse_numbers(trimmed)?;
    let tensor = match elements.len() {
        6 | 9 => Dyadic3DTensor::from_elements(&elements)?.into_inner(),
        _ => DyadicTensor::from_symmetric_elements(&elements)
            .with_context(|| format!("cannot build a tensor from {} elements", elements.len()))?,
    };
    tracing::debug!(
        dimension = tensor.dimension(),
        elements = elements.len(),
        "parsed element list"
    );
    Ok(tensor)
}

fn parse_numbers(chunk: &str) -> Result<Vec<f64>> {
    chunk
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("invalid number {token:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_text_round_trips() {
        let t = parse_tensor("[2 8 5 3]").unwrap();
        assert_eq!(t.dimension(), 2);
        assert_eq!(t.to_string(), "[2 8 5 3]");
    }

    #[test]
    fn vector_list_places_columns() {
        let t = parse_tensor("1,2,3;4,5,6;7,8,9").unwrap();
        assert_eq!(t.dimension(), 3);
        assert_eq!(t.to_string(), "[1 2 3 4 5 6 7 8 9]");
    }

    #[test]
    fn six_elements_build_symmetric_3d() {
        let t = parse_tensor("1, 2, 3, 4, 5, 6").unwrap();
        assert_eq!(t.dimension(), 3);
        assert_eq!(t.to_string(), "[1 2 3 2 4 5 3 5 6]");
        assert!(t.is_symmetric());
    }

    #[test]
    fn nine_elements_build_3d() {
        let t = parse_tensor("1,2,3,4,5,6,7,8,9").unwrap();
        assert_eq!(t.dimension(), 3);
    }

    #[test]
    fn triangular_counts_build_generic() {
        assert_eq!(parse_tensor("1,2,3").unwrap().dimension(), 2);
        assert_eq!(parse_tensor("1,2,3,4,5,6,7,8,9,10").unwrap().dimension(), 4);
        assert_eq!(parse_tensor("7").unwrap().dimension(), 1);
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(parse_tensor("").is_err());
        assert!(parse_tensor("1,2,3,4").is_err());
        assert!(parse_tensor("1,x,3").is_err());
        assert!(parse_tensor("[1 2 3]").is_err());
        assert!(parse_tensor("1,0;0,1,0").is_err());
    }

    #[test]
    fn three_dimensional_view() {
        let arg: TensorArg = "1,0,0;0,5,0;0,0,2".parse().unwrap();
        assert!(arg.as_3d().is_some());
        let arg: TensorArg = "[1 0 0 1]".parse().unwrap();
        assert!(arg.as_3d().is_none());
    }
}
