//! Individual grid checks, run in order: shape first, then cell values.

mod domain;
mod shape;

pub(crate) use domain::{coerce_binary, coerce_byte};
pub(crate) use shape::check_shape;
