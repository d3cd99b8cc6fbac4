//! Supersedable timed effects
//!
//! Each pending visual effect (crossfade, confirmation label) owns a slot.
//! Starting a new effect invalidates the previous token, so a callback that
//! fires late can tell it has been superseded.

/// Handle for one pending effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectToken(u64);

#[derive(Debug, Clone, Default)]
pub struct EffectSlot {
    issued: u64,
    live: Option<u64>,
}

impl EffectSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issued: 0,
            live: None,
        }
    }

    /// Start a new effect, superseding whatever was pending.
    pub fn begin(&mut self) -> EffectToken {
        self.issued += 1;
        self.live = Some(self.issued);
        EffectToken(self.issued)
    }

    #[must_use]
    pub fn is_live(&self, token: EffectToken) -> bool {
        self.live == Some(token.0)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.live.is_some()
    }

    /// Complete the effect. Returns `false` for a superseded or cancelled token.
    pub fn finish(&mut self, token: EffectToken) -> bool {
        if self.is_live(token) {
            self.live = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.live = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_effect_supersedes_older() {
        let mut slot = EffectSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.is_live(first));
        assert!(!slot.finish(first));
        assert!(slot.is_pending());
        assert!(slot.finish(second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn finish_is_single_shot() {
        let mut slot = EffectSlot::new();
        let token = slot.begin();
        assert!(slot.finish(token));
        assert!(!slot.finish(token));
    }

    #[test]
    fn cancel_invalidates_pending_token() {
        let mut slot = EffectSlot::new();
        let token = slot.begin();
        slot.cancel();
        assert!(!slot.finish(token));
    }
}
