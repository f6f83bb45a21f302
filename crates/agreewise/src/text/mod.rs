//! Text post-processing applied to every extraction branch.

pub mod normalize;

pub use normalize::normalize_text;
