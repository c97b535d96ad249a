use super::geometry::{Point, Rect, Size};

pub const RESIZE_GAIN: f32 = 2.0;
pub const DEFAULT_RELATIVE_FRACTION: f32 = 0.05;

/// Bounds for handle-driven resizing, in the front end's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconLimits {
    pub min: f32,
    pub max: f32,
    /// Side of the square resize handle at the icon's bottom-right corner.
    pub handle: f32,
    pub default_size: f32,
    /// Smallest side a relative icon may shrink to.
    pub relative_floor: f32,
}

impl IconLimits {
    pub const PIXELS: IconLimits = IconLimits {
        min: 30.0,
        max: 100.0,
        handle: 16.0,
        default_size: 50.0,
        relative_floor: 0.0,
    };

    pub const CELLS: IconLimits = IconLimits {
        min: 3.0,
        max: 10.0,
        handle: 1.0,
        default_size: 6.0,
        // A bordered box needs three rows to show its glyph.
        relative_floor: 3.0,
    };

    fn clamp(&self, value: f32) -> f32 {
        value.min(self.max).max(self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconSizing {
    /// User-resizable via the corner handle. Panel resizes keep the size.
    Fixed(Size),
    /// Fraction of the panel on each axis, recomputed on every panel resize.
    Relative(f32),
}

impl IconSizing {
    pub fn has_handle(&self) -> bool {
        matches!(self, IconSizing::Fixed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconHit {
    Outside,
    Body,
    Handle,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    panel: Size,
    icon: Rect,
    sizing: IconSizing,
    limits: IconLimits,
    drag: DragState,
}

impl Viewport {
    pub fn new(sizing: IconSizing, limits: IconLimits) -> Self {
        let size = match sizing {
            IconSizing::Fixed(size) => size,
            IconSizing::Relative(_) => Size::default(),
        };
        Self {
            panel: Size::default(),
            icon: Rect::new(Point::default(), size),
            sizing,
            limits,
            drag: DragState::Idle,
        }
    }

    pub fn panel(&self) -> Size {
        self.panel
    }

    pub fn icon(&self) -> Rect {
        self.icon
    }

    pub fn sizing(&self) -> IconSizing {
        self.sizing
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn handle(&self) -> Option<Rect> {
        if !self.sizing.has_handle() {
            return None;
        }
        let side = self.limits.handle;
        Some(Rect::new(
            Point::new(self.icon.right() - side, self.icon.bottom() - side),
            Size::new(side, side),
        ))
    }

    pub fn hit(&self, p: Point) -> IconHit {
        if self.handle().is_some_and(|h| h.contains(p)) {
            IconHit::Handle
        } else if self.icon.contains(p) {
            IconHit::Body
        } else {
            IconHit::Outside
        }
    }

    /// Mount and every surface resize. Always re-anchors bottom-right,
    /// wherever the icon was dragged to.
    pub fn resize_panel(&mut self, panel: Size) -> bool {
        let before = (self.panel, self.icon);
        self.panel = panel;
        if let IconSizing::Relative(fraction) = self.sizing {
            let size = panel.scaled(fraction);
            let floor = self.limits.relative_floor;
            self.icon.size = Size::new(size.width.max(floor), size.height.max(floor));
        }
        self.anchor_bottom_right();
        before != (self.panel, self.icon)
    }

    pub fn pointer_down(&mut self, p: Point) -> bool {
        if self.hit(p) != IconHit::Body || self.is_dragging() {
            return false;
        }
        self.drag = DragState::Dragging;
        true
    }

    /// Pointer motion anywhere over the panel. Motion over the handle resizes
    /// and is not seen by the drag logic.
    pub fn pointer_moved(&mut self, p: Point, delta: Point) -> bool {
        if self.hit(p) == IconHit::Handle {
            return self.resize_icon(delta);
        }
        if !self.is_dragging() {
            return false;
        }
        let before = self.icon.origin;
        let max = self.max_origin();
        self.icon.origin = Point::new(
            clamp_axis(p.x - self.icon.size.width / 2.0, max.x),
            clamp_axis(p.y - self.icon.size.height / 2.0, max.y),
        );
        before != self.icon.origin
    }

    /// Pointer-up and pointer-leave both end a drag.
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = DragState::Idle;
        was_dragging
    }

    fn resize_icon(&mut self, delta: Point) -> bool {
        let IconSizing::Fixed(_) = self.sizing else {
            return false;
        };
        let size = Size::new(
            self.limits.clamp(self.icon.size.width + delta.x * RESIZE_GAIN),
            self.limits.clamp(self.icon.size.height + delta.y * RESIZE_GAIN),
        );
        if size == self.icon.size {
            return false;
        }
        self.sizing = IconSizing::Fixed(size);
        self.icon.size = size;
        // A size change re-runs the anchor, same as a surface resize.
        self.anchor_bottom_right();
        true
    }

    fn anchor_bottom_right(&mut self) {
        self.icon.origin = Point::new(
            self.panel.width - self.icon.size.width,
            self.panel.height - self.icon.size.height,
        );
    }

    fn max_origin(&self) -> Point {
        Point::new(
            self.panel.width - self.icon.size.width,
            self.panel.height - self.icon.size.height,
        )
    }
}

/// `max(0, min(v, max))`. Unlike `f32::clamp` this tolerates `max < 0`
/// when the panel is smaller than the icon.
fn clamp_axis(v: f32, max: f32) -> f32 {
    v.min(max).max(0.0)
}

/// Last observed surface size, for front ends that poll the surface each frame.
#[derive(Debug, Clone, Default)]
pub struct PanelWatch {
    last: Option<Size>,
}

impl PanelWatch {
    /// `Some` on the first observation (mount) and whenever the size changes.
    pub fn observe(&mut self, size: Size) -> Option<Size> {
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        Some(size)
    }
}
