mod quad;
mod node;
mod spatial_tree;

pub use quad::*;
pub use node::*;
pub use spatial_tree::*;

#[cfg(test)]
mod quad_tests;
#[cfg(test)]
mod spatial_tree_tests;
