pub mod cdf;
pub mod dpi;
pub mod image;
pub mod path;
pub mod pbar;
pub mod plot;
pub mod stats;
pub mod style;
