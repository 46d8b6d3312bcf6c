//! Viewer lifecycle: which image is open, its viewport, and the scroll lock it holds.

use crate::config::ViewerConfig;
use crate::gesture::Viewport;

/// Host-wide flag that suppresses background scrolling while a viewer is open.
#[derive(Debug, Default)]
pub struct ScrollLock {
    locked: bool,
}

/// Proof that the lock was acquired, carrying the state to restore on release.
#[derive(Debug)]
#[must_use = "a scroll lock token must be released"]
pub struct ScrollLockToken {
    previous: bool,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn acquire(&mut self) -> ScrollLockToken {
        let token = ScrollLockToken {
            previous: self.locked,
        };
        self.locked = true;
        token
    }

    /// Restores whatever state was in effect when `token` was acquired.
    pub fn release(&mut self, token: ScrollLockToken) {
        self.locked = token.previous;
    }
}

/// An open viewer showing one image.
///
/// `K` identifies the image (a path, an upload id, ...). Showing a different
/// image resets the viewport. A session must be ended with [`Self::close`];
/// dropping it leaves the scroll lock held.
#[derive(Debug)]
pub struct ViewerSession<K> {
    image: K,
    viewport: Viewport,
    scroll_token: ScrollLockToken,
}

impl<K: PartialEq> ViewerSession<K> {
    /// Opens a viewer on `image` and takes the scroll lock.
    #[must_use = "the session holds the scroll lock until it is closed"]
    pub fn open(image: K, config: ViewerConfig, scroll_lock: &mut ScrollLock) -> Self {
        Self {
            image,
            viewport: Viewport::new(config),
            scroll_token: scroll_lock.acquire(),
        }
    }

    pub fn image(&self) -> &K {
        &self.image
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Switches to `image`. Returns true if it differs from the current one.
    pub fn show(&mut self, image: K) -> bool {
        if self.image == image {
            return false;
        }
        self.image = image;
        self.viewport.reset();
        true
    }

    /// Marks the current image as changed (e.g. reloaded from disk).
    pub fn image_changed(&mut self) {
        self.viewport.reset();
    }

    /// Closes the viewer and releases the scroll lock.
    pub fn close(self, scroll_lock: &mut ScrollLock) -> K {
        scroll_lock.release(self.scroll_token);
        self.image
    }
}
