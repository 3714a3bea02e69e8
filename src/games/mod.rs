//! Game implementations.

pub mod grid;
