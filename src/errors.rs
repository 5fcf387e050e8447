use std::fmt;
use std::error::Error;

/// Represents errors that can occur while storing bodies, building the tree or configuring a run.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeCodeError {
    /// The point set already holds its maximum number of bodies.
    CapacityExceeded { capacity: usize },
    /// The node arena of the spatial tree is exhausted.
    NodeCapacityExceeded { capacity: usize },
    /// A body index was not smaller than the number of stored bodies.
    IndexOutOfBounds { index: usize, count: usize },
    /// A body carried a non-finite position, mass or velocity.
    InvalidBody(String),
    /// A configuration value is outside of its valid range.
    InvalidConfiguration(String),
}

impl fmt::Display for TreeCodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeCodeError::CapacityExceeded { capacity } => write!(f, "Point set is full ({} bodies)", capacity),
            TreeCodeError::NodeCapacityExceeded { capacity } => write!(f, "Tree node arena is full ({} nodes)", capacity),
            TreeCodeError::IndexOutOfBounds { index, count } => write!(f, "Body index {} out of bounds (count {})", index, count),
            TreeCodeError::InvalidBody(msg) => write!(f, "Invalid body: {}", msg),
            TreeCodeError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl Error for TreeCodeError {}
