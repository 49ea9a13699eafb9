//! Drag ownership state

use crate::math::Vec2;

/// Who owns the current gesture and where it was grabbed
///
/// `offset` is the pointer position minus the owner's origin at the moment of
/// the press, so `pointer - offset` is where the owner's origin should follow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState<K> {
    /// Grab offset from the owner's origin to the pointer
    pub offset: Vec2,
    owner: Option<K>,
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            owner: None,
        }
    }
}

impl<K: Copy + PartialEq> DragState<K> {
    /// Record a new gesture owner
    pub fn start_drag(&mut self, offset: Vec2, owner: K) {
        self.offset = offset;
        self.owner = Some(owner);
    }

    /// Clear the gesture owner
    pub fn stop_drag(&mut self) {
        self.offset = Vec2::ZERO;
        self.owner = None;
    }

    /// Current owner, if any
    #[inline]
    pub fn owner(&self) -> Option<K> {
        self.owner
    }

    /// Check whether `key` owns the gesture
    #[inline]
    pub fn is_owned_by(&self, key: K) -> bool {
        self.owner == Some(key)
    }

    /// Check whether any gesture is owned
    #[inline]
    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    /// Where the owner's origin should be for the given pointer position
    #[inline]
    pub fn follow(&self, pointer: Vec2) -> Vec2 {
        pointer - self.offset
    }
}
