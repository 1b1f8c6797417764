use crate::corpus::Corpus;
use crate::metrics::{self, CharState};
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Tunables for the typing session engine
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// pause between completing a paragraph and loading the next one
    pub advance_delay: Duration,
    /// every n-th consecutive correct character emits a milestone
    pub streak_milestone: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_delay: Duration::from_millis(300),
            streak_milestone: 5,
        }
    }
}

/// Something worth reacting to that happened while handling input or a tick
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StreakMilestone {
        streak: u32,
    },
    Mistake {
        position: usize,
        expected: Option<char>,
        typed: char,
    },
    Completed {
        completed_count: u32,
    },
    /// a new paragraph was loaded after a completion
    Advanced,
}

/// A consistent copy of the derived numbers, taken at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u8,
    pub elapsed_secs: u64,
    pub streak: u32,
    pub errors: u32,
    pub completed_count: u32,
}

/// State of one practice attempt: target, entered text, timing and metrics
#[derive(Debug)]
pub struct Session {
    corpus: Corpus,
    config: SessionConfig,
    rng: StdRng,
    target: String,
    target_len: usize,
    entered: String,
    entered_len: usize,
    started_at: Option<Instant>,
    active: bool,
    streak: u32,
    errors: u32,
    completed_count: u32,
    wpm: u32,
    accuracy: u8,
    elapsed_secs: u64,
    advance_at: Option<Instant>,
}

impl Session {
    pub fn new(corpus: Corpus, config: SessionConfig) -> Self {
        Self::with_rng(corpus, config, StdRng::from_entropy())
    }

    /// Reproducible paragraph order
    pub fn with_seed(corpus: Corpus, config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(corpus, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(corpus: Corpus, config: SessionConfig, rng: StdRng) -> Self {
        let mut session = Self {
            corpus,
            config,
            rng,
            target: String::new(),
            target_len: 0,
            entered: String::new(),
            entered_len: 0,
            started_at: None,
            active: false,
            streak: 0,
            errors: 0,
            completed_count: 0,
            wpm: 0,
            accuracy: 100,
            elapsed_secs: 0,
            advance_at: None,
        };
        session.load_paragraph();
        session
    }

    /// Draw a fresh paragraph and clear the per-paragraph state.
    ///
    /// The completed count and the correctness streak carry over.
    pub fn load_paragraph(&mut self) {
        let target = self.corpus.pick(&mut self.rng).to_string();
        self.target_len = target.chars().count();
        self.target = target;
        self.entered.clear();
        self.entered_len = 0;
        self.errors = 0;
        self.started_at = None;
        self.active = false;
        self.wpm = 0;
        self.accuracy = 100;
        self.elapsed_secs = 0;
        self.advance_at = None;
        debug!(len = self.target_len, "loaded paragraph");
    }

    /// Skip to another paragraph without touching the running totals
    pub fn next(&mut self) {
        self.load_paragraph();
    }

    /// Zero every counter and start over with a new paragraph
    pub fn reset(&mut self) {
        self.active = false;
        self.started_at = None;
        self.wpm = 0;
        self.accuracy = 100;
        self.completed_count = 0;
        self.errors = 0;
        self.elapsed_secs = 0;
        self.streak = 0;
        self.advance_at = None;
        self.load_paragraph();
        info!("session reset");
    }

    pub fn on_input_changed(&mut self, new_text: &str) -> Vec<SessionEvent> {
        self.on_input_changed_at(new_text, Instant::now())
    }

    /// Feed the full current input string.
    ///
    /// Input is ignored while a completed paragraph waits to be replaced, and
    /// when it is longer than the target.
    pub fn on_input_changed_at(&mut self, new_text: &str, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.advance_at.is_some() {
            debug!("input ignored, paragraph already completed");
            return events;
        }

        let new_len = new_text.chars().count();
        if new_len > self.target_len {
            debug!(new_len, target_len = self.target_len, "input ignored, longer than target");
            return events;
        }

        if !self.active && new_len > 0 {
            self.active = true;
            self.started_at = Some(now);
            debug!("session started");
        }

        if new_len > self.entered_len {
            let position = new_len - 1;
            let typed = new_text.chars().last();
            let expected = self.target.chars().nth(position);

            match typed {
                Some(c) if Some(c) == expected => {
                    self.streak += 1;
                    if self.config.streak_milestone > 0
                        && self.streak % self.config.streak_milestone == 0
                    {
                        events.push(SessionEvent::StreakMilestone {
                            streak: self.streak,
                        });
                    }
                }
                Some(c) => {
                    self.streak = 0;
                    self.errors += 1;
                    events.push(SessionEvent::Mistake {
                        position,
                        expected,
                        typed: c,
                    });
                }
                None => {}
            }
        }

        self.entered.clear();
        self.entered.push_str(new_text);
        self.entered_len = new_len;
        self.accuracy = metrics::accuracy(&self.entered, &self.target);
        self.refresh_timing(now);

        if self.entered == self.target {
            self.completed_count += 1;
            self.advance_at = Some(now + self.config.advance_delay);
            info!(completed = self.completed_count, "paragraph completed");
            events.push(SessionEvent::Completed {
                completed_count: self.completed_count,
            });
        }

        events
    }

    pub fn tick(&mut self) -> Option<SessionEvent> {
        self.tick_at(Instant::now())
    }

    /// Periodic update: performs a due auto-advance, then refreshes timing.
    pub fn tick_at(&mut self, now: Instant) -> Option<SessionEvent> {
        let mut event = None;

        if self.advance_at.is_some_and(|at| now >= at) {
            self.load_paragraph();
            // the clock keeps running across paragraphs
            self.active = true;
            self.started_at = Some(now);
            event = Some(SessionEvent::Advanced);
        }

        if self.active {
            self.refresh_timing(now);
        }

        event
    }

    fn refresh_timing(&mut self, now: Instant) {
        match self.started_at {
            Some(started) => {
                let elapsed = now.saturating_duration_since(started);
                self.elapsed_secs = elapsed.as_secs();
                self.wpm = metrics::wpm(&self.entered, elapsed);
            }
            None => {
                self.elapsed_secs = 0;
                self.wpm = 0;
            }
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn entered(&self) -> &str {
        &self.entered
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// A completed paragraph is on screen and the next one is queued
    pub fn is_advance_pending(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn cursor_pos(&self) -> usize {
        self.entered_len
    }

    pub fn classify(&self) -> Vec<(char, CharState)> {
        metrics::classify(&self.entered, &self.target)
    }

    pub fn progress(&self) -> f64 {
        metrics::progress(&self.entered, &self.target)
    }

    pub fn snapshot(&self) -> Metrics {
        Metrics {
            wpm: self.wpm,
            accuracy: self.accuracy,
            elapsed_secs: self.elapsed_secs,
            streak: self.streak,
            errors: self.errors,
            completed_count: self.completed_count,
        }
    }
}
