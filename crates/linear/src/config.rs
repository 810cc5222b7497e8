#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// Shape of a linear system: its order and how many matrix, vector and solution slots it holds.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemConfig {
    /// Row/column count N. Every matrix slot is N x N, every vector and solution slot has length N.
    pub order: usize,
    pub number_of_matrices: usize,
    pub number_of_vectors: usize,
    pub number_of_solutions: usize,
}

impl SystemConfig {
    /// A system of the given order with a single slot of each kind.
    pub fn new(order: usize) -> Self {
        SystemConfig {
            order,
            number_of_matrices: 1,
            number_of_vectors: 1,
            number_of_solutions: 1,
        }
    }

    pub fn with_matrices(mut self, count: usize) -> Self {
        self.number_of_matrices = count;
        self
    }

    pub fn with_vectors(mut self, count: usize) -> Self {
        self.number_of_vectors = count;
        self
    }

    pub fn with_solutions(mut self, count: usize) -> Self {
        self.number_of_solutions = count;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.order == 0 {
            return Err(Error::linear_system(
                "SystemConfig::validate",
                "system order must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_builder() {
        let config = SystemConfig::new(10)
            .with_matrices(3)
            .with_vectors(2)
            .with_solutions(4);
        assert_eq!(config.order, 10);
        assert_eq!(config.number_of_matrices, 3);
        assert_eq!(config.number_of_vectors, 2);
        assert_eq!(config.number_of_solutions, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_order_rejected() {
        let err = SystemConfig::new(0).validate().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::LinearSystem { .. }));
    }
}
