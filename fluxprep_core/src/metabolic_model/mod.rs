//! Module providing the Model struct for representing a metabolic model and its growth medium.

pub mod compound;
pub mod medium;
pub mod model;
pub mod reaction;
