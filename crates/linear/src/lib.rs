//! Backend-agnostic linear-system storage for finite-element assembly and solving.
//!
//! A [`LinearSystem`] of fixed order N owns independently addressable matrix, vector and solution
//! slots. Concrete backends ([`DenseSystem`], [`SparseSystem`]) provide storage access; scaling,
//! accumulation, products, storage compaction and a dense LU solve are default operations built on
//! that contract alone.

mod config;
mod dense;
mod error;
mod lu;
pub mod slots;
mod sparse;
mod traits;

pub use config::SystemConfig;
pub use dense::DenseSystem;
pub use error::{check_index, check_position, Context, Error, ErrorKind};
pub use lu::LuSolver;
pub use sparse::{RowListMatrix, SparseSystem};
pub use traits::{ColumnArray, LinearSystem};

#[cfg(test)]
mod tests;
