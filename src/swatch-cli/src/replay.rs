//! Drives a `ColorPicker` from a script on a virtual clock.

use crate::script::{Layout, MouseAction, Script, Step};
use anyhow::Result;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};
use swatch_core::{Point, Rect, Rgba, Size};
use swatch_input::{
    InputAdapter, InputEvent, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind, SurfaceInput,
};
use swatch_picker::{
    ColorPicker, DialogPlacement, Host, ListenerId, ListenerTarget, NodeId, PickerConfig,
    PickerView, Surface,
};
use tracing::{debug, trace, warn};

const ROOT: NodeId = NodeId::from_raw(1);
const INSIDE: NodeId = NodeId::from_raw(2);
const OUTSIDE: NodeId = NodeId::from_raw(3);

// ============================================================================
// Host
// ============================================================================

/// A host whose page is a fixed [`Layout`].
///
/// The swatch and the three surfaces are the picker's subtree; everything
/// else on the page is a single outside node.
#[derive(Debug)]
pub struct ScriptHost {
    layout: Layout,
    listeners: HashSet<(ListenerTarget, ListenerId)>,
}

impl ScriptHost {
    /// Creates a host for `layout`.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            listeners: HashSet::new(),
        }
    }

    /// Number of live listener registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn node_at(&self, point: Point) -> NodeId {
        let inside = self.layout.swatch.contains_point(point)
            || Surface::ALL
                .iter()
                .any(|s| self.layout.surface(*s).contains_point(point));
        if inside { INSIDE } else { OUTSIDE }
    }
}

impl Host for ScriptHost {
    fn add_listener(&mut self, target: ListenerTarget, id: ListenerId) {
        debug!(%target, %id, "add listener");
        self.listeners.insert((target, id));
    }

    fn remove_listener(&mut self, target: ListenerTarget, id: ListenerId) {
        debug!(%target, %id, "remove listener");
        self.listeners.remove(&(target, id));
    }

    fn contains(&self, root: NodeId, node: NodeId) -> bool {
        root == ROOT && (node == ROOT || node == INSIDE)
    }

    fn anchor_rect(&self) -> Rect {
        self.layout.swatch
    }

    fn viewport(&self) -> Size {
        self.layout.viewport
    }

    fn surface_rect(&self, surface: Surface) -> Rect {
        self.layout.surface(surface)
    }
}

// ============================================================================
// Output
// ============================================================================

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// `on_change` fired.
    Change {
        /// The emitted color.
        color: Rgba,
        /// The same color as CSS.
        css: String,
    },
    /// The dialog opened.
    Opened {
        /// Where it opened.
        placement: DialogPlacement,
    },
    /// The dialog closed.
    Closed,
    /// A debounced reposition ran.
    Reposition {
        /// The recomputed placement.
        placement: DialogPlacement,
    },
    /// A snapshot requested by a `view` step.
    View {
        /// What the shell would render.
        view: Box<PickerView>,
    },
}

// ============================================================================
// Replayer
// ============================================================================

/// Runs scripts against one picker.
pub struct Replayer {
    picker: ColorPicker<ScriptHost>,
    adapter: InputAdapter,
    changes: Rc<RefCell<Vec<Rgba>>>,
    captured: Option<Surface>,
    start: Instant,
    elapsed: Duration,
}

impl Replayer {
    /// Builds and mounts a picker for `layout`.
    pub fn new(config: &PickerConfig, layout: Layout) -> Result<Self> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let mut picker = ColorPicker::new(ScriptHost::new(layout), ROOT, config)?
            .with_on_change(move |color| sink.borrow_mut().push(color));
        picker.mount();

        Ok(Self {
            picker,
            adapter: InputAdapter::new(),
            changes,
            captured: None,
            start: Instant::now(),
            elapsed: Duration::ZERO,
        })
    }

    /// The picker being driven.
    pub fn picker(&self) -> &ColorPicker<ScriptHost> {
        &self.picker
    }

    /// Runs every step of `script`, returning the events in order.
    pub fn run(&mut self, script: &Script) -> Vec<ReplayEvent> {
        let mut events = Vec::new();
        for (index, step) in script.steps.iter().enumerate() {
            debug!(index, ?step, "step");
            self.step(step, &mut events);
        }
        events
    }

    /// Applies one step and appends what it produced.
    pub fn step(&mut self, step: &Step, events: &mut Vec<ReplayEvent>) {
        let was_open = self.picker.is_open();

        match step {
            Step::Mouse {
                action,
                x,
                y,
                button,
            } => {
                let kind = match action {
                    MouseAction::Down => MouseEventKind::Down(*button),
                    MouseAction::Up => MouseEventKind::Up(*button),
                    MouseAction::Move => MouseEventKind::Moved,
                };
                self.mouse(MouseEvent::new(kind, Point::new(*x, *y), KeyModifiers::NONE));
            }
            Step::Key {
                surface,
                key,
                release,
            } => {
                let event = if *release {
                    KeyEvent::release(*key)
                } else {
                    KeyEvent::press(*key)
                };
                // Surfaces live inside the dialog, so keys only reach them while it is open.
                match self.adapter.feed(&InputEvent::Key(event), Point::ZERO) {
                    Some(input) if self.picker.is_open() => {
                        self.picker.handle_input(*surface, input);
                    }
                    Some(_) => trace!(%surface, key = %key, "dialog closed, key ignored"),
                    None => {}
                }
            }
            Step::Scroll { dy } => {
                let now = self.now();
                self.picker.host_mut().layout.scroll_by(*dy);
                self.picker.handle_document_scroll(now);
            }
            Step::Resize { width, height } => {
                self.picker.host_mut().layout.viewport = Size::new(*width, *height);
            }
            Step::Wait { ms } => {
                self.elapsed += Duration::from_millis(*ms);
            }
            Step::SetColor { color } => match color.resolve() {
                Ok(color) => self.picker.set_color(color),
                Err(e) => warn!(error = %e, "ignoring invalid set_color"),
            },
            Step::Hide => self.picker.hide_dialog(),
            Step::View => events.push(ReplayEvent::View {
                view: Box::new(self.picker.view()),
            }),
        }

        events.extend(self.changes.borrow_mut().drain(..).map(|color| {
            ReplayEvent::Change {
                css: color.to_css(),
                color,
            }
        }));

        match (was_open, self.picker.is_open()) {
            (false, true) => events.push(ReplayEvent::Opened {
                placement: self.picker.placement(),
            }),
            (true, false) => events.push(ReplayEvent::Closed),
            _ => {}
        }

        let now = self.now();
        if self.picker.poll(now) {
            events.push(ReplayEvent::Reposition {
                placement: self.picker.placement(),
            });
        }
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn mouse(&mut self, event: MouseEvent) {
        let layout = self.picker.host().layout;

        if let MouseEventKind::Down(_) = event.kind {
            let target = self.picker.host().node_at(event.position);
            self.picker.handle_document_pointer_down(target);

            if layout.swatch.contains_point(event.position) {
                self.picker.activate_swatch();
            } else if self.picker.is_open() {
                self.captured = Surface::ALL
                    .into_iter()
                    .find(|s| layout.surface(*s).contains_point(event.position));
            }
        }

        let surface = self.captured;
        if let MouseEventKind::Up(_) = event.kind {
            self.captured = None;
        }

        let origin = surface.map_or(Point::ZERO, |s| layout.surface(s).origin());
        let input = self.adapter.feed(&InputEvent::Mouse(event), origin);
        if let (Some(surface), Some(input @ SurfaceInput::Pointer(_))) = (surface, input) {
            self.picker.handle_input(surface, input);
        }
    }
}
