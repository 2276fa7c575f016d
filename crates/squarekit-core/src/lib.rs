//! # SquareKit Core
//!
//! Core types and utilities shared by the SquareKit crates:
//! - Planar points in millimetres
//! - Parameter errors built on `thiserror`
//! - G-code number formatting

pub mod error;
pub mod point;
pub mod units;

pub use error::ParameterError;
pub use point::Point;
pub use units::{format_number, NumberFormat};
