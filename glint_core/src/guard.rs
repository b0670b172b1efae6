// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterrents against casual media saving.
//!
//! These only decide whether a `contextmenu` or `dragstart` event should be
//! prevented. The DOM layer classifies the event target with `closest()` and
//! hands the result here.

/// Where a context-menu event landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextTarget {
    /// The lightbox overlay is open.
    pub lightbox_open: bool,
    /// The target sits inside the lightbox.
    pub in_lightbox: bool,
    /// The target sits inside a protected zone.
    pub in_protect_zone: bool,
    /// The target is, or sits inside, an image.
    pub on_image: bool,
}

impl ContextTarget {
    /// Returns `true` if the context menu should be suppressed.
    #[must_use]
    pub const fn should_block(&self) -> bool {
        (self.lightbox_open && self.in_lightbox) || self.in_protect_zone || self.on_image
    }
}

/// Returns `true` if a drag starting on a target should be suppressed.
///
/// `on_media` is whether the target is, or sits inside, an image or video.
#[must_use]
pub const fn should_block_drag(on_media: bool) -> bool {
    on_media
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_keeps_context_menu() {
        assert!(!ContextTarget::default().should_block());
    }

    #[test]
    fn closed_lightbox_does_not_block() {
        let t = ContextTarget {
            in_lightbox: true,
            ..ContextTarget::default()
        };
        assert!(!t.should_block(), "a closed lightbox is ordinary content");
        let open = ContextTarget {
            lightbox_open: true,
            ..t
        };
        assert!(open.should_block());
    }

    #[test]
    fn zones_and_images_block() {
        let zone = ContextTarget {
            in_protect_zone: true,
            ..ContextTarget::default()
        };
        let image = ContextTarget {
            on_image: true,
            ..ContextTarget::default()
        };
        assert!(zone.should_block());
        assert!(image.should_block());
        assert!(should_block_drag(true));
        assert!(!should_block_drag(false));
    }
}
