mod vector_2d;
mod body;

pub use vector_2d::*;
pub use body::*;
