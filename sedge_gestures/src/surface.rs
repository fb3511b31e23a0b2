// Copyright 2025 the Sedge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface adapter bundle.

use kurbo::Point;

use crate::adapters::{DragPan, PinchZoom, WheelZoom};
use crate::bus::GestureBus;
use crate::GestureSource;

/// Which platform adapter set a surface runs.
///
/// The sets are mutually exclusive: a touch-capable surface pans by drag and
/// zooms by pinch; a mouse-only surface pans by drag and zooms by wheel.
/// Within one profile, Pin/Pan/Zoom are always combined into the same
/// stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerProfile {
    /// Mouse input only: drag pan + wheel zoom. Pinch samples are ignored.
    #[default]
    MouseOnly,
    /// Touch-capable surface: drag pan + pinch zoom. Wheel samples are
    /// ignored.
    TouchCapable,
}

/// All gesture adapters of one plotting surface, merged into one bus.
///
/// Feed raw input samples into the `pointer_*`, [`wheel`](Self::wheel), and
/// `pinch_*` methods; subscribers on the [`GestureBus`] observe the
/// normalized stream in arrival order.
#[derive(Debug, Default)]
pub struct PointerGestures {
    profile: PointerProfile,
    drag: DragPan,
    pinch: PinchZoom,
    wheel: WheelZoom,
    bus: GestureBus,
}

impl PointerGestures {
    /// Creates the adapter bundle for the given platform profile.
    #[must_use]
    pub fn new(profile: PointerProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// The active platform profile.
    #[must_use]
    pub fn profile(&self) -> PointerProfile {
        self.profile
    }

    /// The merge point; subscribe here.
    #[must_use]
    pub fn bus_mut(&mut self) -> &mut GestureBus {
        &mut self.bus
    }

    /// Pointer pressed at `pos` (screen coordinates). Publishes a `Pin`.
    pub fn pointer_down(&mut self, pos: Point) {
        self.pointer_down_from(pos, self.default_source());
    }

    /// Pointer pressed, with an explicit source modality.
    pub fn pointer_down_from(&mut self, pos: Point, source: GestureSource) {
        let pin = self.drag.begin(pos, source);
        self.bus.publish(pin);
    }

    /// Pointer moved. Publishes a `Pan` while a drag is active.
    pub fn pointer_move(&mut self, pos: Point) {
        if let Some(pan) = self.drag.update(pos) {
            self.bus.publish(pan);
        }
    }

    /// Pointer released; ends the drag.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Pointer input was cancelled by the platform; ends the drag.
    pub fn pointer_cancel(&mut self) {
        self.drag.end();
    }

    /// Wheel notch sample at `origin`. Ignored on touch-capable surfaces.
    pub fn wheel(&mut self, origin: Point, notches: f64) {
        if self.profile != PointerProfile::MouseOnly {
            return;
        }
        if let Some(zoom) = self.wheel.gesture(origin, notches) {
            self.bus.publish(zoom);
        }
    }

    /// Pinch started with the platform's first scale sample. Publishes a
    /// `Pin`. Ignored on mouse-only surfaces.
    pub fn pinch_begin(&mut self, scale: f64) {
        if self.profile != PointerProfile::TouchCapable {
            return;
        }
        let pin = self.pinch.begin(scale);
        self.bus.publish(pin);
    }

    /// Pinch scale sample around `origin`. Ignored on mouse-only surfaces.
    pub fn pinch_update(&mut self, origin: Point, scale: f64) {
        if self.profile != PointerProfile::TouchCapable {
            return;
        }
        if let Some(zoom) = self.pinch.update(origin, scale) {
            self.bus.publish(zoom);
        }
    }

    /// Pinch ended.
    pub fn pinch_end(&mut self) {
        self.pinch.end();
    }

    fn default_source(&self) -> GestureSource {
        match self.profile {
            PointerProfile::MouseOnly => GestureSource::Mouse,
            PointerProfile::TouchCapable => GestureSource::Touch,
        }
    }
}
