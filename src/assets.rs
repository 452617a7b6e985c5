mod catalog;
mod decode;

pub use catalog::{Catalog, DEFAULT_COMMON};
pub use decode::{FALLBACK_DURATION_MS, gif_duration_ms};
