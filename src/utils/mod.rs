pub mod constants;
pub mod constants_config;
pub mod math_helpers;

pub use constants::*;
pub use constants_config::*;
pub use math_helpers::*;
pub use crate::errors::TreeCodeError;
