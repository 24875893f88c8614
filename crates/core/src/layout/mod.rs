//! Layout reconstruction for whiteboard tokens.
//!
//! This module contains:
//! - The positioned `Token` and the left-to-right `Line`
//! - Layout parameters (`LayoutParams`)
//! - The equation (anchor) and reading-order (chain) clustering strategies

pub mod clustering;
pub mod line;
pub mod params;
pub mod token;

pub use clustering::*;
pub use line::Line;
pub use params::*;
pub use token::Token;
