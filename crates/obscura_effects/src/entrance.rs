//! Page entrance: loader, hero title, staggered grid and reveal flags

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use obscura_animation::{Easing, FixedAnimation, SchedulerHandle};
use parking_lot::Mutex;

use crate::error::Result;

/// Full-screen loader shown until a fixed time after page load
pub struct Loader {
    loader_ms: f64,
    hidden: Arc<AtomicBool>,
    timer: FixedAnimation,
}

impl Loader {
    pub fn new(handle: SchedulerHandle, loader_ms: f64) -> Self {
        Self {
            loader_ms,
            hidden: Arc::new(AtomicBool::new(false)),
            timer: FixedAnimation::new(handle),
        }
    }

    /// The page finished loading; schedule the loader to hide
    pub fn page_loaded(&mut self) -> Result<()> {
        if self.is_hidden() || self.timer.is_running() {
            return Ok(());
        }
        let hidden = Arc::clone(&self.hidden);
        self.timer.delay(self.loader_ms, move || {
            hidden.store(true, Ordering::Release);
            tracing::debug!("loader hidden");
        })?;
        Ok(())
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::Acquire)
    }

    /// Scrolling stays locked while the loader covers the page
    pub fn locks_scroll(&self) -> bool {
        !self.is_hidden()
    }
}

/// Animation delay (seconds) of each hero title word
pub fn title_word_delays(count: usize, base_s: f32, step_s: f32) -> Vec<f32> {
    (0..count).map(|i| base_s + i as f32 * step_s).collect()
}

/// Hero title words, revealed once the loader is gone
#[derive(Clone, Debug, Default)]
pub struct HeroTitle {
    delays: Vec<f32>,
    revealed: bool,
}

impl HeroTitle {
    pub fn new(word_count: usize, base_s: f32, step_s: f32) -> Self {
        Self {
            delays: title_word_delays(word_count, base_s, step_s),
            revealed: false,
        }
    }

    pub fn reveal(&mut self) {
        if !self.revealed {
            self.revealed = true;
            tracing::debug!(words = self.delays.len(), "hero title revealed");
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn delays(&self) -> &[f32] {
        &self.delays
    }
}

/// Visual state of one grid item during the entrance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridItemVisual {
    pub opacity: f32,
    pub translate_y: f32,
}

impl GridItemVisual {
    /// Distance an item rises while revealing
    pub const RISE: f32 = 50.0;

    pub const HIDDEN: GridItemVisual = GridItemVisual {
        opacity: 0.0,
        translate_y: Self::RISE,
    };

    pub const SHOWN: GridItemVisual = GridItemVisual {
        opacity: 1.0,
        translate_y: 0.0,
    };

    fn at(eased: f32) -> Self {
        Self {
            opacity: eased,
            translate_y: Self::RISE * (1.0 - eased),
        }
    }
}

/// Staggered fade-up of the portfolio grid
pub struct GridReveal {
    stagger_ms: f64,
    reveal_ms: f64,
    visuals: Arc<Mutex<Vec<GridItemVisual>>>,
    anims: Vec<FixedAnimation>,
}

impl GridReveal {
    pub fn new(handle: SchedulerHandle, item_count: usize, stagger_ms: f64, reveal_ms: f64) -> Self {
        Self {
            stagger_ms,
            reveal_ms,
            visuals: Arc::new(Mutex::new(vec![GridItemVisual::HIDDEN; item_count])),
            anims: (0..item_count)
                .map(|_| FixedAnimation::new(handle.clone()))
                .collect(),
        }
    }

    /// Reveal items that became visible together
    ///
    /// The n-th item of the batch waits `n * stagger` before fading up.
    pub fn reveal(&mut self, batch: &[usize]) -> Result<()> {
        for (position, &index) in batch.iter().enumerate() {
            let Some(anim) = self.anims.get_mut(index) else {
                tracing::warn!(index, "grid item out of range");
                continue;
            };
            let delay = position as f64 * self.stagger_ms;
            let reveal = self.reveal_ms;
            let total = delay + reveal;

            let sink = Arc::clone(&self.visuals);
            let done = Arc::clone(&self.visuals);
            anim.start(
                total,
                Easing::Linear,
                move |progress| {
                    let elapsed = progress as f64 * total;
                    let local = if reveal <= 0.0 {
                        if elapsed >= delay {
                            1.0
                        } else {
                            0.0
                        }
                    } else {
                        ((elapsed - delay) / reveal).clamp(0.0, 1.0) as f32
                    };
                    sink.lock()[index] = GridItemVisual::at(Easing::EaseInOutCubic.apply(local));
                },
                move || done.lock()[index] = GridItemVisual::SHOWN,
            )?;
        }
        Ok(())
    }

    pub fn visual(&self, index: usize) -> Option<GridItemVisual> {
        self.visuals.lock().get(index).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.visuals
            .lock()
            .iter()
            .all(|visual| *visual == GridItemVisual::SHOWN)
    }
}

/// `visible` flags for `[data-reveal]` elements
#[derive(Clone, Debug, Default)]
pub struct RevealSet {
    visible: Vec<bool>,
}

impl RevealSet {
    pub fn new(count: usize) -> Self {
        Self {
            visible: vec![false; count],
        }
    }

    pub fn mark_visible(&mut self, index: usize) {
        if let Some(flag) = self.visible.get_mut(index) {
            *flag = true;
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}
