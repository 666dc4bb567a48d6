//! Debug player: steps through a wireframe's components one at a time.
//!
//! Keyboard: `ArrowRight`/`ArrowLeft` step and pause, space toggles
//! autoplay, `i` toggles the inspector panel. Autoplay advances one
//! component per interval and wraps around.

use tracing::debug;
use wirevana_core::ast::WireframeDefinition;
use wirevana_render::VisualNode;

use crate::inspector::Diagnostic;
use crate::interpreter::Interpreter;
use crate::timers::{TimerId, TimerQueue};

/// A key the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKey {
    Next,
    Previous,
    TogglePlay,
    ToggleInspector,
}

impl PlayerKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(PlayerKey::Next),
            "ArrowLeft" => Some(PlayerKey::Previous),
            " " | "Spacebar" => Some(PlayerKey::TogglePlay),
            "i" | "I" => Some(PlayerKey::ToggleInspector),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tick;

/// Cycles through component ids in declaration order.
#[derive(Debug, Clone)]
pub struct DebugPlayer {
    ids: Vec<String>,
    index: usize,
    playing: bool,
    show_inspector: bool,
    interval_ms: u64,
    timers: TimerQueue<Tick>,
    pending: Option<TimerId>,
}

impl DebugPlayer {
    /// A player over every declared component, starting at the first one.
    pub fn new(definition: &WireframeDefinition, interval_ms: u64, autoplay: bool) -> Self {
        let mut player = Self {
            ids: definition.components.keys().cloned().collect(),
            index: 0,
            playing: false,
            show_inspector: false,
            interval_ms,
            timers: TimerQueue::new(),
            pending: None,
        };
        player.set_playing(autoplay);
        player
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Id of the component on screen.
    pub fn current(&self) -> Option<&str> {
        self.ids.get(self.index).map(String::as_str)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn inspector_visible(&self) -> bool {
        self.show_inspector
    }

    pub fn next(&mut self) {
        if !self.ids.is_empty() {
            self.index = (self.index + 1) % self.ids.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.ids.is_empty() {
            self.index = (self.index + self.ids.len() - 1) % self.ids.len();
        }
    }

    /// Start or stop autoplay. A player with nothing to show never plays.
    pub fn set_playing(&mut self, playing: bool) {
        let playing = playing && !self.ids.is_empty();
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(pending);
        }
        self.playing = playing;
        if playing {
            self.pending = Some(self.timers.schedule(Tick, self.interval_ms));
        }
    }

    /// Apply a key press. Returns whether anything changed.
    pub fn handle_key(&mut self, key: PlayerKey) -> bool {
        match key {
            PlayerKey::Next | PlayerKey::Previous if self.ids.is_empty() => return false,
            PlayerKey::Next => {
                self.set_playing(false);
                self.next();
            }
            PlayerKey::Previous => {
                self.set_playing(false);
                self.previous();
            }
            PlayerKey::TogglePlay => self.set_playing(!self.playing),
            PlayerKey::ToggleInspector => self.show_inspector = !self.show_inspector,
        }
        debug!(index = self.index, playing = self.playing, ?key, "player key");
        true
    }

    /// Drive autoplay from the host clock. Returns how many steps were taken.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        let mut steps = 0;
        // A long gap can owe several steps. Each one is anchored at the due
        // time of the step before it, not at `now_ms`.
        loop {
            let fired = self.timers.advance(now_ms);
            if fired.is_empty() {
                break;
            }
            for tick in fired {
                if self.pending != Some(tick.id) || !self.playing {
                    continue;
                }
                self.next();
                steps += 1;
                let due = tick.due_ms.saturating_add(self.interval_ms.max(1));
                self.pending = Some(self.timers.schedule_at(Tick, due));
            }
        }
        steps
    }

    /// Stop autoplay and drop pending timers.
    pub fn stop(&mut self) {
        self.playing = false;
        self.pending = None;
        self.timers.clear();
    }

    /// Render the current component on its own.
    pub fn frame(&self, interpreter: &Interpreter<'_>) -> Option<VisualNode> {
        self.current().map(|id| interpreter.render_component(id))
    }

    /// Diagnostics that belong to the current component.
    pub fn diagnostics<'d>(&self, all: &'d [Diagnostic]) -> Vec<&'d Diagnostic> {
        let Some(id) = self.current() else {
            return Vec::new();
        };
        let exact = format!("components.{id}");
        let nested = format!("{exact}/");
        all.iter()
            .filter(|d| d.component == exact || d.component.starts_with(&nested))
            .collect()
    }
}
