//! bandcut-morph - Binary morphology
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary morphology on 1 bpp images: erosion, dilation, closing
//! - Separable brick variants, and a border-safe brick closing used to
//!   clean up binarized artwork without eating ink at the image edges

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{close, close_brick, close_safe_brick, dilate, dilate_brick, erode, erode_brick};
