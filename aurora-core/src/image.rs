//! Product image selection and crossfade planning
use crate::catalog::Catalog;
use crate::effects::{EffectSlot, EffectToken};

/// One planned image swap. The host fades out, waits `fade_ms`, swaps to `to`
/// and fades back in, provided the token is still live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossfade {
    pub from: Option<String>,
    pub to: String,
    pub fade_ms: u32,
    pub token: EffectToken,
}

#[derive(Debug, Clone)]
pub struct ImageSelector {
    current: Option<String>,
    fade: EffectSlot,
    fade_ms: u32,
}

impl ImageSelector {
    #[must_use]
    pub const fn new(fade_ms: u32) -> Self {
        Self {
            current: None,
            fade: EffectSlot::new(),
            fade_ms,
        }
    }

    /// Start with an image already on screen (no fade on first paint).
    #[must_use]
    pub fn showing(image: impl Into<String>, fade_ms: u32) -> Self {
        Self {
            current: Some(image.into()),
            ..Self::new(fade_ms)
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Plan a crossfade to the image mapped for `color_key`.
    ///
    /// Unknown keys and the already-displayed image yield `None`.
    pub fn set_image(&mut self, color_key: &str, catalog: &Catalog) -> Option<Crossfade> {
        let Some(path) = catalog.image_for(color_key) else {
            log::debug!("no image mapped for colour {color_key}");
            return None;
        };
        if self.current.as_deref() == Some(path) {
            return None;
        }
        let from = self.current.replace(path.to_string());
        Some(Crossfade {
            from,
            to: path.to_string(),
            fade_ms: self.fade_ms,
            token: self.fade.begin(),
        })
    }

    /// Mark the fade finished. Returns `false` if a newer crossfade superseded it.
    pub fn complete(&mut self, fade: &Crossfade) -> bool {
        self.fade.finish(fade.token)
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_pending()
    }
}
