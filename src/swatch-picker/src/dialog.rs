//! Open/closed state of the dialog and the rules that dismiss or move it.
//!
//! While open, the controller holds document-wide pointer-down and scroll
//! listeners. A pointer-down outside the picker's subtree closes the dialog;
//! scrolls are debounced into a single placement recomputation.

use crate::debounce::Debouncer;
use crate::host::{DocumentEvent, Host, ListenerTarget, NodeId, Subscription};
use crate::placement::{compute_placement, DialogPlacement};
use serde::Serialize;
use std::time::{Duration, Instant};
use swatch_core::Size;
use tracing::{debug, info, trace};

/// Whether the dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Hidden; no document listeners registered.
    #[default]
    Closed,
    /// Showing; document listeners registered.
    Open,
}

/// Dialog visibility, placement and document listener lifecycle.
///
/// Host-facing methods take the host explicitly so the owner decides where it
/// lives. The owner must call [`teardown`](Self::teardown) before dropping.
#[derive(Debug)]
pub struct DialogController {
    root: NodeId,
    dialog_size: Size,
    visibility: Visibility,
    placement: DialogPlacement,
    listeners: Subscription,
    reposition: Debouncer,
    recomputations: u64,
}

impl DialogController {
    /// Creates a closed controller for the picker rooted at `root`.
    #[must_use]
    pub fn new(root: NodeId, dialog_size: Size, scroll_wait: Duration) -> Self {
        Self {
            root,
            dialog_size,
            visibility: Visibility::Closed,
            placement: DialogPlacement::default(),
            listeners: Subscription::new([
                ListenerTarget::Document(DocumentEvent::PointerDown),
                ListenerTarget::Document(DocumentEvent::Scroll),
            ]),
            reposition: Debouncer::new(scroll_wait),
            recomputations: 0,
        }
    }

    /// Current visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the dialog is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// The most recently computed placement.
    #[must_use]
    pub fn placement(&self) -> DialogPlacement {
        self.placement
    }

    /// The configured dialog size.
    #[must_use]
    pub fn dialog_size(&self) -> Size {
        self.dialog_size
    }

    /// The root node used for containment checks.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// How many times placement has been computed.
    #[must_use]
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// The document listeners owned by this controller.
    #[must_use]
    pub fn listeners(&self) -> &Subscription {
        &self.listeners
    }

    /// Opens the dialog: computes placement and subscribes to document events.
    ///
    /// Calling it while open recomputes placement; listeners stay registered once.
    pub fn show<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.update_placement(host);
        self.listeners.acquire(host);
        if self.visibility != Visibility::Open {
            self.visibility = Visibility::Open;
            info!(placement = %self.placement, "dialog opened");
        }
    }

    /// Closes the dialog and unsubscribes. Any pending reposition is dropped.
    pub fn hide<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.listeners.release(host);
        self.reposition.cancel();
        if self.visibility != Visibility::Closed {
            self.visibility = Visibility::Closed;
            info!("dialog closed");
        }
    }

    /// Shows when closed, hides when open.
    pub fn toggle<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.is_open() {
            self.hide(host);
        } else {
            self.show(host);
        }
    }

    /// Handles a document-wide pointer-down on `target`.
    ///
    /// Closes the dialog unless `target` is inside the picker's subtree.
    /// Returns true if the dialog was closed.
    pub fn handle_pointer_down<H: Host + ?Sized>(&mut self, host: &mut H, target: NodeId) -> bool {
        if !self.is_open() {
            trace!(%target, "pointer-down while closed");
            return false;
        }
        if host.contains(self.root, target) {
            trace!(%target, "pointer-down within picker");
            return false;
        }
        debug!(%target, "pointer-down outside picker");
        self.hide(host);
        true
    }

    /// Handles a document-wide scroll at `now` by scheduling a reposition.
    pub fn handle_scroll(&mut self, now: Instant) {
        if !self.is_open() {
            trace!("scroll while closed");
            return;
        }
        if self.reposition.schedule(now) {
            trace!("reposition rescheduled");
        }
    }

    /// Runs a due reposition. Returns true if placement was recomputed.
    pub fn poll<H: Host + ?Sized>(&mut self, host: &mut H, now: Instant) -> bool {
        if self.reposition.poll(now) {
            self.update_placement(host);
            true
        } else {
            false
        }
    }

    /// When the pending reposition is due, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.reposition.deadline()
    }

    /// Recomputes placement from the host's current geometry.
    pub fn update_placement<H: Host + ?Sized>(&mut self, host: &mut H) -> DialogPlacement {
        let placement = compute_placement(host.anchor_rect(), self.dialog_size, host.viewport());
        self.recomputations += 1;
        if placement != self.placement {
            debug!(from = %self.placement, to = %placement, "placement changed");
        }
        self.placement = placement;
        placement
    }

    /// Releases document listeners regardless of state.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.hide(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ListenerId;
    use crate::surface::Surface;
    use std::collections::HashSet;
    use swatch_core::Rect;

    const WAIT: Duration = Duration::from_millis(50);

    struct TestHost {
        root: NodeId,
        children: Vec<NodeId>,
        anchor: Rect,
        viewport: Size,
        live: HashSet<(ListenerTarget, ListenerId)>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                root: NodeId::new(),
                children: vec![NodeId::new(), NodeId::new()],
                anchor: Rect::new(10.0, 480.0, 24.0, 20.0),
                viewport: Size::new(1024.0, 800.0),
                live: HashSet::new(),
            }
        }
    }

    impl Host for TestHost {
        fn add_listener(&mut self, target: ListenerTarget, id: ListenerId) {
            self.live.insert((target, id));
        }

        fn remove_listener(&mut self, target: ListenerTarget, id: ListenerId) {
            self.live.remove(&(target, id));
        }

        fn contains(&self, root: NodeId, node: NodeId) -> bool {
            root == self.root && (node == self.root || self.children.contains(&node))
        }

        fn anchor_rect(&self) -> Rect {
            self.anchor
        }

        fn viewport(&self) -> Size {
            self.viewport
        }

        fn surface_rect(&self, _surface: Surface) -> Rect {
            Rect::default()
        }
    }

    fn controller(host: &TestHost) -> DialogController {
        DialogController::new(host.root, Size::new(200.0, 190.0), WAIT)
    }

    #[test]
    fn test_starts_closed_bottom_right() {
        let host = TestHost::new();
        let dialog = controller(&host);
        assert_eq!(dialog.visibility(), Visibility::Closed);
        assert_eq!(dialog.placement().class_name(), "bottom right");
        assert!(!dialog.listeners().is_active());
    }

    #[test]
    fn test_show_places_and_subscribes() {
        let mut host = TestHost::new();
        host.anchor = Rect::new(10.0, 730.0, 24.0, 20.0);
        let mut dialog = controller(&host);

        dialog.show(&mut host);
        assert!(dialog.is_open());
        assert_eq!(dialog.placement().class_name(), "top right");
        assert_eq!(host.live.len(), 2);
    }

    #[test]
    fn test_pointer_down_inside_keeps_open() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        dialog.show(&mut host);

        let (root, child) = (host.root, host.children[1]);
        assert!(!dialog.handle_pointer_down(&mut host, child));
        assert!(!dialog.handle_pointer_down(&mut host, root));
        assert!(dialog.is_open());
        assert_eq!(host.live.len(), 2);
    }

    #[test]
    fn test_pointer_down_outside_closes() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        dialog.show(&mut host);

        assert!(dialog.handle_pointer_down(&mut host, NodeId::new()));
        assert!(!dialog.is_open());
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_scroll_burst_recomputes_once() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        dialog.show(&mut host);
        let base = dialog.recomputations();

        let start = Instant::now();
        for i in 0..8_u64 {
            let now = start + Duration::from_millis(i * 10);
            dialog.handle_scroll(now);
            assert!(!dialog.poll(&mut host, now));
        }
        let last = start + Duration::from_millis(70);

        host.anchor = Rect::new(10.0, 700.0, 24.0, 20.0);
        assert!(!dialog.poll(&mut host, last + WAIT - Duration::from_millis(1)));
        assert!(dialog.poll(&mut host, last + WAIT));
        assert!(!dialog.poll(&mut host, last + WAIT * 4));

        assert_eq!(dialog.recomputations(), base + 1);
        assert_eq!(dialog.placement().class_name(), "top right");
    }

    #[test]
    fn test_scroll_while_closed_is_ignored() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        let now = Instant::now();
        dialog.handle_scroll(now);
        assert!(dialog.next_deadline().is_none());
        assert!(!dialog.poll(&mut host, now + WAIT));
    }

    #[test]
    fn test_hide_cancels_pending_reposition() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        dialog.show(&mut host);

        let now = Instant::now();
        dialog.handle_scroll(now);
        dialog.hide(&mut host);
        assert!(!dialog.poll(&mut host, now + WAIT));
    }

    #[test]
    fn test_toggle_and_repeated_show() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);

        dialog.toggle(&mut host);
        dialog.show(&mut host);
        assert!(dialog.is_open());
        assert_eq!(host.live.len(), 2);

        dialog.toggle(&mut host);
        assert!(!dialog.is_open());
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_teardown_is_safe_in_any_state() {
        let mut host = TestHost::new();
        let mut dialog = controller(&host);
        dialog.teardown(&mut host);
        assert!(host.live.is_empty());

        dialog.show(&mut host);
        dialog.teardown(&mut host);
        dialog.teardown(&mut host);
        assert!(host.live.is_empty());
        assert!(!dialog.is_open());
    }
}
