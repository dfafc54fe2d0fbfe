//! Programmer traits and abstractions
//!
//! This module defines the trait that programmers implement to give the
//! chip drivers access to the SPI bus.

mod traits;

pub use traits::*;
