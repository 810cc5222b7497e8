//! Error taxonomy shared by every linear-system backend and by the algorithms layered on them.
//!
//! Every error carries an [`ErrorKind`] describing what went wrong and a [`Context`] recording
//! where it was raised.

use std::fmt;

use thiserror::Error;

/// Where an error was raised.
///
/// `file` and `line` are captured from the caller through `#[track_caller]`, `location` is the
/// logical operation name supplied by the raising code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    pub file: &'static str,
    pub line: u32,
    pub location: String,
}

impl Context {
    #[track_caller]
    pub fn new(location: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Context {
            file: caller.file(),
            line: caller.line(),
            location: location.into(),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.location, self.file, self.line)
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    #[error("Unhandled exception in FEM class!")]
    Unhandled,

    /// Failure reading or writing FEM data, raised by I/O collaborators.
    #[error("IO error in FEM class: {description}")]
    Io { description: String },

    /// An object was not of the expected type during a cast or lookup.
    #[error("Object was of wrong class!")]
    WrongClass,

    /// A search for an object of a given base class and generation number failed.
    #[error("Object not found ({base_class_name}, GN={generation})!")]
    ObjectNotFound {
        base_class_name: String,
        generation: i32,
    },

    /// Failure while solving, e.g. a singular system.
    #[error("Error when solving FEM problem: {description}")]
    Solution { description: String },

    /// Catch-all for internal linear-system failures.
    #[error("Error in linear system: {description}")]
    LinearSystem { description: String },

    /// A single index was outside `[0, N)`.
    #[error("Index of {field} out of bounds ({index})")]
    LinearSystemBounds { field: String, index: usize },

    /// An index pair was outside `[0, N)`.
    #[error("Index of {field} out of bounds ({row},{column})")]
    LinearSystemBounds2 {
        field: String,
        row: usize,
        column: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{kind} [{context}]")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: Context,
}

impl Error {
    #[track_caller]
    pub fn new(kind: ErrorKind, location: impl Into<String>) -> Self {
        Error {
            kind,
            context: Context::new(location),
        }
    }

    #[track_caller]
    pub fn io(location: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Io {
                description: description.into(),
            },
            location,
        )
    }

    #[track_caller]
    pub fn wrong_class(location: impl Into<String>) -> Self {
        Self::new(ErrorKind::WrongClass, location)
    }

    #[track_caller]
    pub fn object_not_found(
        location: impl Into<String>,
        base_class_name: impl Into<String>,
        generation: i32,
    ) -> Self {
        Self::new(
            ErrorKind::ObjectNotFound {
                base_class_name: base_class_name.into(),
                generation,
            },
            location,
        )
    }

    #[track_caller]
    pub fn solution(location: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Solution {
                description: description.into(),
            },
            location,
        )
    }

    #[track_caller]
    pub fn linear_system(location: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::LinearSystem {
                description: description.into(),
            },
            location,
        )
    }

    #[track_caller]
    pub fn bounds(location: impl Into<String>, field: impl Into<String>, index: usize) -> Self {
        Self::new(
            ErrorKind::LinearSystemBounds {
                field: field.into(),
                index,
            },
            location,
        )
    }

    #[track_caller]
    pub fn bounds2(
        location: impl Into<String>,
        field: impl Into<String>,
        row: usize,
        column: usize,
    ) -> Self {
        Self::new(
            ErrorKind::LinearSystemBounds2 {
                field: field.into(),
                row,
                column,
            },
            location,
        )
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

/// Checks that `index` lies in `[0, order)`.
#[track_caller]
pub fn check_index(index: usize, order: usize, field: &str, location: &str) -> Result<(), Error> {
    if index < order {
        Ok(())
    } else {
        Err(Error::bounds(location, field, index))
    }
}

/// Checks an `(i, j)` matrix position. A single bad index is reported alone, two bad indices are
/// reported together.
#[track_caller]
pub fn check_position(i: usize, j: usize, order: usize, location: &str) -> Result<(), Error> {
    match (i < order, j < order) {
        (true, true) => Ok(()),
        (false, true) => Err(Error::bounds(location, "matrix row", i)),
        (true, false) => Err(Error::bounds(location, "matrix column", j)),
        (false, false) => Err(Error::bounds2(location, "matrix element", i, j)),
    }
}
