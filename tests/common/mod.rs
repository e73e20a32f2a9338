#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::{assert_spatial_valid, assert_trim_result_valid};
pub use fixtures::*;
