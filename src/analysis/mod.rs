//! Numeric reduction of sampled curves.

pub mod features;
pub mod integrate;
pub mod regression;
pub mod resample;

pub use features::{find_inflections, find_peaks, find_troughs, gradient, positions, sign_changes};
pub use integrate::trapezoid;
pub use regression::{linear_fit, range_mask, LinearFit};
pub use resample::{downsample, moving_average};
