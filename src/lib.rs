#![forbid(unsafe_code)]

//! Playback scheduling and duration probing for looping GIF animations.
//!
//! The crate has two halves: [`assets`] computes an animation's total playback
//! duration from its raw container bytes (no pixel decoding) and partitions the
//! discovered files into common/rare pools, and [`scheduler`] picks the next
//! animation to play under anti-repetition and forced-variety rules.

pub mod assets;
pub mod error;
pub mod scheduler;
pub mod uri;

pub use assets::{Catalog, DEFAULT_COMMON, FALLBACK_DURATION_MS, gif_duration_ms};
pub use error::{LoopreelError, LoopreelResult};
pub use scheduler::{RandomSource, Scheduler, SchedulerState, Selection};
pub use uri::{FileUriResolver, UriResolver};
