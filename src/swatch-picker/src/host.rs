//! The environment the picker is embedded in.
//!
//! The picker never walks a UI tree or registers callbacks itself. A [`Host`]
//! exposes geometry, subtree containment and listener registration; the
//! picker decides *when* to subscribe and the host routes events back by
//! calling the picker's handlers.

use crate::surface::{Surface, SurfaceChannel};
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use swatch_core::{Rect, Size};
use tracing::{debug, warn};

// ============================================================================
// Identifiers
// ============================================================================

/// Identifies a node in the host's UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new unique node ID.
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Creates a `NodeId` from a raw value chosen by the host.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Stable identity of one registered handler.
///
/// Allocated once when its owner is built and reused for every
/// add/remove pair, so the host can match removals to registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocates a fresh listener identity.
    #[must_use]
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({})", self.0)
    }
}

// ============================================================================
// Listener targets
// ============================================================================

/// Document-wide event classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    /// A pointer press anywhere in the document.
    PointerDown,
    /// A scroll anywhere in the document.
    Scroll,
}

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The whole document.
    Document(DocumentEvent),
    /// One channel of one picker surface.
    Surface(Surface, SurfaceChannel),
}

impl fmt::Display for ListenerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerTarget::Document(DocumentEvent::PointerDown) => {
                f.write_str("document:pointerdown")
            }
            ListenerTarget::Document(DocumentEvent::Scroll) => f.write_str("document:scroll"),
            ListenerTarget::Surface(surface, SurfaceChannel::Pointer) => {
                write!(f, "{surface}:pointer")
            }
            ListenerTarget::Surface(surface, SurfaceChannel::Keys) => write!(f, "{surface}:keys"),
        }
    }
}

// ============================================================================
// Host
// ============================================================================

/// Capabilities the embedding environment provides.
pub trait Host {
    /// Starts delivering events for `target` to the handler `id`.
    fn add_listener(&mut self, target: ListenerTarget, id: ListenerId);

    /// Stops delivering events for `target` to the handler `id`.
    ///
    /// Must tolerate removal of a listener that was never added.
    fn remove_listener(&mut self, target: ListenerTarget, id: ListenerId);

    /// Whether `node` is `root` or one of its descendants.
    fn contains(&self, root: NodeId, node: NodeId) -> bool;

    /// The swatch's bounding rectangle in viewport coordinates.
    fn anchor_rect(&self) -> Rect;

    /// The viewport size.
    fn viewport(&self) -> Size;

    /// A surface's bounding rectangle.
    fn surface_rect(&self, surface: Surface) -> Rect;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn add_listener(&mut self, target: ListenerTarget, id: ListenerId) {
        (**self).add_listener(target, id);
    }

    fn remove_listener(&mut self, target: ListenerTarget, id: ListenerId) {
        (**self).remove_listener(target, id);
    }

    fn contains(&self, root: NodeId, node: NodeId) -> bool {
        (**self).contains(root, node)
    }

    fn anchor_rect(&self) -> Rect {
        (**self).anchor_rect()
    }

    fn viewport(&self) -> Size {
        (**self).viewport()
    }

    fn surface_rect(&self, surface: Surface) -> Rect {
        (**self).surface_rect(surface)
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// A set of listener registrations acquired and released together.
///
/// Both operations are idempotent: acquiring twice registers once, and
/// releasing is safe whether or not anything is registered. Owners release
/// on every exit path, including `Drop`.
#[derive(Debug)]
pub struct Subscription {
    bindings: SmallVec<[(ListenerTarget, ListenerId); 6]>,
    active: bool,
}

impl Subscription {
    /// Creates an inactive subscription, allocating one identity per target.
    #[must_use]
    pub fn new(targets: impl IntoIterator<Item = ListenerTarget>) -> Self {
        Self {
            bindings: targets
                .into_iter()
                .map(|target| (target, ListenerId::next()))
                .collect(),
            active: false,
        }
    }

    /// Registers every binding with `host`. Returns false if already active.
    pub fn acquire<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.active {
            return false;
        }
        for &(target, id) in &self.bindings {
            host.add_listener(target, id);
        }
        self.active = true;
        debug!(listeners = self.bindings.len(), "subscription acquired");
        true
    }

    /// Removes every binding from `host`. Returns false if nothing was active.
    pub fn release<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.active {
            return false;
        }
        for &(target, id) in &self.bindings {
            host.remove_listener(target, id);
        }
        self.active = false;
        debug!(listeners = self.bindings.len(), "subscription released");
        true
    }

    /// Whether the bindings are currently registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The listener identity bound to `target`.
    #[must_use]
    pub fn listener_id(&self, target: ListenerTarget) -> Option<ListenerId> {
        self.bindings
            .iter()
            .find(|(t, _)| *t == target)
            .map(|&(_, id)| id)
    }

    /// All bindings, in registration order.
    #[must_use]
    pub fn bindings(&self) -> &[(ListenerTarget, ListenerId)] {
        &self.bindings
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.active {
            warn!(
                listeners = self.bindings.len(),
                "subscription dropped while still registered"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingHost {
        live: HashSet<(ListenerTarget, ListenerId)>,
        adds: usize,
        removes: usize,
    }

    impl Host for RecordingHost {
        fn add_listener(&mut self, target: ListenerTarget, id: ListenerId) {
            self.adds += 1;
            self.live.insert((target, id));
        }

        fn remove_listener(&mut self, target: ListenerTarget, id: ListenerId) {
            self.removes += 1;
            self.live.remove(&(target, id));
        }

        fn contains(&self, root: NodeId, node: NodeId) -> bool {
            root == node
        }

        fn anchor_rect(&self) -> Rect {
            Rect::default()
        }

        fn viewport(&self) -> Size {
            Size::ZERO
        }

        fn surface_rect(&self, _surface: Surface) -> Rect {
            Rect::default()
        }
    }

    fn document_subscription() -> Subscription {
        Subscription::new([
            ListenerTarget::Document(DocumentEvent::PointerDown),
            ListenerTarget::Document(DocumentEvent::Scroll),
        ])
    }

    #[test]
    fn test_unique_ids() {
        assert_ne!(NodeId::new(), NodeId::new());
        assert_ne!(ListenerId::next(), ListenerId::next());
        assert_eq!(NodeId::from_raw(42).as_u64(), 42);
    }

    #[test]
    fn test_acquire_and_release_are_idempotent() {
        let mut host = RecordingHost::default();
        let mut sub = document_subscription();

        assert!(sub.acquire(&mut host));
        assert!(!sub.acquire(&mut host));
        assert_eq!(host.adds, 2);
        assert_eq!(host.live.len(), 2);

        assert!(sub.release(&mut host));
        assert!(!sub.release(&mut host));
        assert_eq!(host.removes, 2);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_release_without_acquire_is_noop() {
        let mut host = RecordingHost::default();
        let mut sub = document_subscription();
        assert!(!sub.release(&mut host));
        assert_eq!(host.removes, 0);
    }

    #[test]
    fn test_identities_are_stable_across_cycles() {
        let mut host = RecordingHost::default();
        let mut sub = document_subscription();
        let scroll = ListenerTarget::Document(DocumentEvent::Scroll);
        let id = sub.listener_id(scroll);
        assert!(id.is_some());

        sub.acquire(&mut host);
        sub.release(&mut host);
        sub.acquire(&mut host);
        assert_eq!(sub.listener_id(scroll), id);
        assert!(host.live.contains(&(scroll, id.unwrap())));
        sub.release(&mut host);
    }

    #[test]
    fn test_target_display() {
        let target = ListenerTarget::Surface(Surface::Hue, SurfaceChannel::Keys);
        assert_eq!(target.to_string(), "hue:keys");
        assert_eq!(
            ListenerTarget::Document(DocumentEvent::Scroll).to_string(),
            "document:scroll"
        );
    }
}
