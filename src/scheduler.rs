//! Weighted selection of the next animation to play.
//!
//! Three rules, in strict priority order: a rare pick is never followed by
//! another rare pick, ten consecutive common picks force a rare one when any
//! exists, and otherwise the draw is biased 70/30 toward the common pool.

use serde::Serialize;

use crate::assets::Catalog;

/// Probability mass given to the common pool in the weighted branch.
pub const COMMON_BIAS: f64 = 0.7;

/// Consecutive common picks after which a rare pick is forced.
pub const FORCED_RARE_STREAK: u32 = 10;

/// Source of uniform randomness for the scheduler.
///
/// Injected rather than ambient so tests can script the exact draws.
/// Implementations are provided for [`rand::rngs::ThreadRng`] and the
/// seedable [`rand::rngs::StdRng`].
pub trait RandomSource {
    /// Uniform fraction in `[0, 1)`.
    fn fraction(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for rand::rngs::ThreadRng {
    fn fraction(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }

    fn index(&mut self, len: usize) -> usize {
        rand::Rng::random_range(self, 0..len)
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn fraction(&mut self) -> f64 {
        rand::Rng::random::<f64>(self)
    }

    fn index(&mut self, len: usize) -> usize {
        rand::Rng::random_range(self, 0..len)
    }
}

/// Selection counters carried between calls.
///
/// Owned by the scheduler instance, not ambient, so tests construct fresh
/// state per case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerState {
    /// Whether the previous selection came from the rare pool.
    pub last_was_rare: bool,
    /// Consecutive common selections since the last rare one.
    pub common_streak: u32,
}

/// One scheduling outcome, handed to the display collaborator.
///
/// `duration_ms` is advisory; it is `None` only in the degenerate empty-catalog
/// case, where the display side applies its own fallback timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub name: String,
    pub is_rare: bool,
    pub duration_ms: Option<u32>,
}

/// Picks the next animation, one call per playback cycle.
pub struct Scheduler<R = rand::rngs::ThreadRng> {
    catalog: Catalog,
    state: SchedulerState,
    random: R,
}

impl Scheduler {
    /// Scheduler over `catalog` drawing from the thread-local generator.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_random(catalog, rand::rng())
    }
}

impl<R: RandomSource> Scheduler<R> {
    /// Scheduler with an explicit randomness source.
    pub fn with_random(catalog: Catalog, random: R) -> Self {
        Self {
            catalog,
            state: SchedulerState::default(),
            random,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Pick the next animation and update the selection counters.
    ///
    /// With an empty catalog this returns the default name, marked common,
    /// with no duration, and leaves the counters untouched.
    pub fn select_next(&mut self) -> Selection {
        let common = self.catalog.common();
        let rare = self.catalog.rare();

        if common.is_empty() && rare.is_empty() {
            return Selection {
                name: self.catalog.default_name().to_string(),
                is_rare: false,
                duration_ms: None,
            };
        }

        let (name, is_rare) = if self.state.last_was_rare || common.is_empty() {
            (self.pick_common(), false)
        } else if self.state.common_streak >= FORCED_RARE_STREAK && !rare.is_empty() {
            (self.pick_rare(), true)
        } else if self.random.fraction() < COMMON_BIAS || rare.is_empty() {
            (self.pick_common(), false)
        } else {
            (self.pick_rare(), true)
        };

        self.state.last_was_rare = is_rare;
        if is_rare {
            self.state.common_streak = 0;
        } else {
            self.state.common_streak += 1;
        }

        let duration_ms = Some(self.catalog.duration_ms(&name));
        Selection {
            name,
            is_rare,
            duration_ms,
        }
    }

    fn pick_common(&mut self) -> String {
        let common = self.catalog.common();
        if common.is_empty() {
            return self.catalog.default_name().to_string();
        }
        common[self.random.index(common.len())].clone()
    }

    fn pick_rare(&mut self) -> String {
        let rare = self.catalog.rare();
        rare[self.random.index(rare.len())].clone()
    }
}
