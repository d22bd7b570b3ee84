//! Input parsing: decoding raw keyboard-layout grids.

pub mod kle;

pub use kle::{decode, DecodeError};
