/// Floating "+50" / "-10" indicators.  Purely visual: nothing here feeds
/// back into the simulation.

use std::time::{Duration, Instant};

use crate::entities::GameEvent;

/// How long an indicator stays on screen.
pub const POPUP_LIFETIME: Duration = Duration::from_millis(900);

/// World units an indicator rises over its lifetime.
const POPUP_RISE: f32 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub amount: i64,
    pub x: f32,
    pub y: f32,
    pub created: Instant,
}

impl Popup {
    pub fn is_positive(&self) -> bool {
        self.amount >= 0
    }

    /// `+50` or `-10`.
    pub fn label(&self) -> String {
        format!("{:+}", self.amount)
    }

    /// Where to draw the popup at `now`; it drifts upward as it ages.
    pub fn position_at(&self, now: Instant) -> (f32, f32) {
        let age = now.saturating_duration_since(self.created);
        let t = (age.as_secs_f32() / POPUP_LIFETIME.as_secs_f32()).min(1.0);
        (self.x, self.y - POPUP_RISE * t)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= POPUP_LIFETIME
    }
}

#[derive(Clone, Debug, Default)]
pub struct PopupBoard {
    popups: Vec<Popup>,
}

impl PopupBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up score deltas from a batch of events; other events are ignored.
    pub fn absorb(&mut self, events: &[GameEvent], now: Instant) {
        for event in events {
            if let GameEvent::ScoreDelta { amount, x, y } = *event {
                self.popups.push(Popup { amount, x, y, created: now });
            }
        }
    }

    pub fn prune(&mut self, now: Instant) {
        self.popups.retain(|p| !p.is_expired(now));
    }

    pub fn clear(&mut self) {
        self.popups.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Popup> {
        self.popups.iter()
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }
}
