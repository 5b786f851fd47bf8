//! # dyad-cli: Command-Line Shell for Dyadic Tensors
//!
//! Provides the `dyad` binary, a thin layer over `dyad-core` that covers what
//! an application shell needs from the tensor core: build a tensor from
//! supplied components, read back its text and components, run arithmetic,
//! and query named scalar metrics.
//!
//! ## Subcommands
//!
//! - `dyad show`: text form, components and (optionally) eigens.
//! - `dyad combine`: `add`, `sub`, `mul` (coefficient-wise), `contract`.
//! - `dyad scale`: multiply every component by a scalar.
//! - `dyad metric`: evaluate named metrics.
//!
//! ```bash
//! dyad show 1,2,3,4,5,6 --eigen
//! dyad combine contract "[2 8 5 3]" "[6 3 4 6]"
//! dyad metric "1,0,0;0,5,0;0,0,2" linear_certainty planar_certainty
//! dyad --format json metric 4,1,0,3,0,2
//! ```

pub mod combine;
pub mod input;
pub mod metrics;
pub mod output;
pub mod show;

pub use input::TensorArg;
pub use output::OutputFormat;
