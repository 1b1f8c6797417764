use crate::celebration::ParticleField;
use crate::config::{Preferences, PreferencesStore, Theme, UiStyle};
use crate::session::{Session, SessionEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::{debug, warn};

/// Particles spawned when a paragraph is completed
pub const COMPLETION_BURST: usize = 3;
/// Particles spawned on each streak milestone
pub const MILESTONE_BURST: usize = 1;

/// Owns everything the practice screen shows. Only the event loop mutates it.
pub struct App {
    pub session: Session,
    pub particles: ParticleField,
    prefs: Preferences,
    store: Box<dyn PreferencesStore>,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, particles: ParticleField, store: Box<dyn PreferencesStore>) -> Self {
        let prefs = store.load();
        debug!(theme = %prefs.theme, ui_style = %prefs.ui_style, "loaded preferences");
        Self {
            session,
            particles,
            prefs,
            store,
            should_quit: false,
        }
    }

    /// Apply command line overrides; anything that changes is persisted
    pub fn override_preferences(&mut self, theme: Option<Theme>, ui_style: Option<UiStyle>) {
        let mut prefs = self.prefs;
        if let Some(theme) = theme {
            prefs.theme = theme;
        }
        if let Some(ui_style) = ui_style {
            prefs.ui_style = ui_style;
        }
        self.set_preferences(prefs);
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        // AltGr arrives as Ctrl+Alt on Windows
        let command = ctrl && !alt;

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if command => self.quit(),
            KeyCode::Char('r') if command => self.reset(),
            KeyCode::Char('n') if command => self.next(),
            KeyCode::Tab => self.next(),
            KeyCode::Char('t') if command => self.toggle_theme(),
            KeyCode::Char('s') if command => self.toggle_ui_style(),
            KeyCode::Char('w') if command => self.delete_word(now),
            KeyCode::Backspace => self.delete_char(now),
            KeyCode::Char(c) if ctrl == alt => self.type_char(c, now),
            _ => {}
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(SessionEvent::Advanced) = self.session.tick_at(now) {
            debug!("advanced to next paragraph");
        }
        self.particles.expire(now);
    }

    pub fn type_char(&mut self, c: char, now: Instant) {
        let mut text = self.session.entered().to_string();
        text.push(c);
        self.input(&text, now);
    }

    pub fn delete_char(&mut self, now: Instant) {
        let mut text = self.session.entered().to_string();
        if text.pop().is_some() {
            self.input(&text, now);
        }
    }

    pub fn delete_word(&mut self, now: Instant) {
        let text = without_last_word(self.session.entered()).to_string();
        if text.len() != self.session.entered().len() {
            self.input(&text, now);
        }
    }

    /// Hand the whole input string to the session and react to what it reports
    pub fn input(&mut self, text: &str, now: Instant) {
        let events = self.session.on_input_changed_at(text, now);
        for event in events {
            match event {
                SessionEvent::StreakMilestone { streak } => {
                    debug!(streak, "streak milestone");
                    self.particles.burst(MILESTONE_BURST, now);
                }
                SessionEvent::Completed { .. } => {
                    self.particles.burst(COMPLETION_BURST, now);
                }
                SessionEvent::Mistake { .. } | SessionEvent::Advanced => {}
            }
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.particles.clear();
    }

    pub fn next(&mut self) {
        self.session.next();
        self.particles.clear();
    }

    pub fn toggle_theme(&mut self) {
        let mut prefs = self.prefs;
        prefs.theme = prefs.theme.toggled();
        self.set_preferences(prefs);
    }

    pub fn toggle_ui_style(&mut self) {
        let mut prefs = self.prefs;
        prefs.ui_style = prefs.ui_style.toggled();
        self.set_preferences(prefs);
    }

    fn set_preferences(&mut self, prefs: Preferences) {
        if prefs == self.prefs {
            return;
        }
        self.prefs = prefs;
        if let Err(e) = self.store.save(&self.prefs) {
            warn!("failed to save preferences: {}", e);
        }
    }
}

/// `text` with its final word (and any whitespace after it) removed
fn without_last_word(text: &str) -> &str {
    text.trim_end()
        .trim_end_matches(|c: char| !c.is_whitespace())
}
