//! Quality check implementations.
//!
//! Each module implements the `QualityCheck` trait for one analyzer.

mod blur;
mod brightness;
pub mod framing;
mod size;
mod working;

pub use blur::{laplacian_variance, BlurCheck};
pub use brightness::{BrightnessCheck, Histogram};
pub use framing::FramingCheck;
pub use size::{classify_size_tier, SizeTierCheck};
pub use working::{bounded_copy, fit_inside};
