//! The embeddable picker: engine, dialog and listeners behind one owner.

use crate::color_state::{ColorEngine, ColorState};
use crate::config::PickerConfig;
use crate::dialog::DialogController;
use crate::error::ConfigResult;
use crate::host::{Host, ListenerTarget, NodeId, Subscription};
use crate::placement::DialogPlacement;
use crate::surface::{Surface, SurfaceChannel};
use crate::view::{Decorations, PickerView};
use std::fmt;
use std::time::Instant;
use swatch_core::Rgba;
use swatch_input::{KeyQuery, PointerEvent, SurfaceInput};
use tracing::{debug, trace};

/// A color picker embedded in a host.
///
/// Owns the host handle, so listener registrations are released on every
/// exit path: [`unmount`](Self::unmount) releases them explicitly and `Drop`
/// releases whatever is still registered.
///
/// Surface events are only handled while mounted.
pub struct ColorPicker<H: Host> {
    host: H,
    engine: ColorEngine,
    dialog: DialogController,
    surface_listeners: Subscription,
    decorations: Decorations,
    mounted: bool,
}

impl<H: Host> ColorPicker<H> {
    /// Builds an unmounted picker rooted at `root`.
    pub fn new(host: H, root: NodeId, config: &PickerConfig) -> ConfigResult<Self> {
        config.validate()?;
        let initial = config.initial_color()?;
        debug!(%root, color = %initial, "creating color picker");

        let surface_targets = Surface::ALL.into_iter().flat_map(|surface| {
            [
                ListenerTarget::Surface(surface, SurfaceChannel::Pointer),
                ListenerTarget::Surface(surface, SurfaceChannel::Keys),
            ]
        });

        Ok(Self {
            host,
            engine: ColorEngine::new(initial),
            dialog: DialogController::new(root, config.dialog_size(), config.scroll_debounce()),
            surface_listeners: Subscription::new(surface_targets),
            decorations: Decorations {
                class_name: config.class_name.clone(),
                style: config.style.clone(),
                palette_class_name: config.palette_class_name.clone(),
                palette_style: config.palette_style.clone(),
            },
            mounted: false,
        })
    }

    /// Sets the callback invoked on every user-driven change.
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(Rgba) + 'static) -> Self {
        self.engine.set_on_change(callback);
        self
    }

    /// Replaces the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(Rgba) + 'static) {
        self.engine.set_on_change(callback);
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Registers surface listeners. Idempotent.
    pub fn mount(&mut self) {
        if self.surface_listeners.acquire(&mut self.host) {
            debug!("color picker mounted");
        }
        self.mounted = true;
    }

    /// Closes the dialog and releases every listener. Idempotent.
    pub fn unmount(&mut self) {
        self.dialog.teardown(&mut self.host);
        if self.surface_listeners.release(&mut self.host) {
            debug!("color picker unmounted");
        }
        self.mounted = false;
    }

    /// Whether surface listeners are registered.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // ========================================================================
    // Surface input
    // ========================================================================

    /// Routes normalized input from a surface. Returns true if it was handled.
    pub fn handle_input(&mut self, surface: Surface, input: SurfaceInput<'_>) -> bool {
        if !self.mounted {
            trace!(%surface, "input while unmounted");
            return false;
        }
        let size = self.host.surface_rect(surface).size();
        self.engine.handle(surface, input, size)
    }

    /// Pointer press or drag on `surface`.
    pub fn handle_pointer(&mut self, surface: Surface, event: &PointerEvent) -> bool {
        self.handle_input(surface, SurfaceInput::Pointer(*event))
    }

    /// Key-down on `surface`.
    pub fn handle_key_down(&mut self, surface: Surface, keys: &(impl KeyQuery + ?Sized)) -> bool {
        if !self.mounted {
            trace!(%surface, "key-down while unmounted");
            return false;
        }
        match surface {
            Surface::Board => self.engine.board_key_down(keys),
            Surface::Hue => self.engine.hue_key_down(keys),
            Surface::Alpha => self.engine.alpha_key_down(keys),
        }
        true
    }

    // ========================================================================
    // Dialog
    // ========================================================================

    /// Swatch activation: opens a closed dialog, closes an open one.
    pub fn activate_swatch(&mut self) {
        self.dialog.toggle(&mut self.host);
    }

    /// Opens the dialog.
    pub fn show_dialog(&mut self) {
        self.dialog.show(&mut self.host);
    }

    /// Closes the dialog.
    pub fn hide_dialog(&mut self) {
        self.dialog.hide(&mut self.host);
    }

    /// Document-wide pointer-down on `target`. Returns true if it closed the dialog.
    pub fn handle_document_pointer_down(&mut self, target: NodeId) -> bool {
        self.dialog.handle_pointer_down(&mut self.host, target)
    }

    /// Document-wide scroll.
    pub fn handle_document_scroll(&mut self, now: Instant) {
        self.dialog.handle_scroll(now);
    }

    /// Runs deferred work that is due. Returns true if placement was recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.dialog.poll(&mut self.host, now)
    }

    /// When [`poll`](Self::poll) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dialog.next_deadline()
    }

    /// Whether the dialog is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// The current dialog placement.
    #[must_use]
    pub fn placement(&self) -> DialogPlacement {
        self.dialog.placement()
    }

    /// The dialog controller.
    #[must_use]
    pub fn dialog(&self) -> &DialogController {
        &self.dialog
    }

    // ========================================================================
    // Color
    // ========================================================================

    /// Replaces the color without calling `on_change`.
    pub fn set_color(&mut self, color: Rgba) {
        self.engine.set_color(color);
    }

    /// The current color.
    #[must_use]
    pub fn color(&self) -> Rgba {
        self.engine.rgba()
    }

    /// The normalized state.
    #[must_use]
    pub fn state(&self) -> ColorState {
        self.engine.state()
    }

    /// What the shell should render now.
    #[must_use]
    pub fn view(&self) -> PickerView {
        PickerView::build(
            &self.engine.state(),
            &self.decorations,
            self.dialog.is_open(),
            self.dialog.placement(),
            self.dialog.dialog_size(),
        )
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably (e.g. to move the anchor or resize the viewport).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host> Drop for ColorPicker<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<H: Host> fmt::Debug for ColorPicker<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPicker")
            .field("engine", &self.engine)
            .field("dialog", &self.dialog)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
