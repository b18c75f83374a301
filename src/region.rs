//! The wallpaper region behind a home-screen widget, and the single
//! color-change subscription scoped to it.

/// A rectangle in integer pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect { left, top, right, bottom }
    }

    /// Translate by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Rect { left: self.left + dx, top: self.top + dy,
               right: self.right + dx, bottom: self.bottom + dy }
    }
}

/// A rectangle in wallpaper coordinates: \[0, 1\] spans the whole
/// scrollable width and the screen height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    /// Whether the rectangle lies within the unit square.
    pub fn is_normalized(&self) -> bool {
        self.left >= 0. && self.right <= 1. && self.top >= 0. && self.bottom <= 1.
    }
}

/// Where a widget sits on the home screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorkspaceGeometry {
    /// Widget bounds, relative to the host surface.
    pub bounds: Rect,
    /// Position of the host surface on screen.
    pub surface_offset: (i32, i32),
    pub screen_width: u32,
    pub screen_height: u32,
    /// Number of pages the wallpaper scrolls across.
    pub num_pages: u32,
    /// Page the widget is on.
    pub page_index: i32,
}

/// The wallpaper rectangle behind `g`, or `None` if it falls outside
/// the wallpaper or is degenerate.  Out-of-range rectangles are
/// rejected, not clamped.
pub fn normalized_region(g: &WorkspaceGeometry) -> Option<RectF> {
    if g.num_pages == 0 || g.screen_width == 0 || g.screen_height == 0 {
        return None
    }
    let screen = g.bounds.offset(g.surface_offset.0, g.surface_offset.1);
    let width = g.screen_width as f32;
    let height = g.screen_height as f32;
    // A widget flush with the last page's right edge must end at
    // exactly 1, hence the division.
    let pages = g.num_pages as f32;
    let page = g.page_index as f32;
    let rect = RectF {
        left: (screen.left as f32 / width + page) / pages,
        right: (screen.right as f32 / width + page) / pages,
        top: screen.top as f32 / height,
        bottom: screen.bottom as f32 / height,
    };
    (rect.is_normalized() && !rect.is_empty()).then_some(rect)
}

/// Delivers wallpaper color changes for subscribed regions.
///
/// Adding a listener replaces nothing by itself; callers remove the
/// previous subscription first.
pub trait ColorEventSource {
    fn add_colors_listener(&mut self, regions: &[RectF]);
    fn remove_colors_listener(&mut self);
}

/// Owns the at most one subscribed region.
///
/// Every update unsubscribes the previous region, then subscribes the
/// new one if it is valid.  An invalid update leaves nothing
/// subscribed until the next valid one.
#[derive(Debug)]
pub struct RegionSubscriber<E> {
    source: E,
    current: Option<RectF>,
}

impl<E: ColorEventSource> RegionSubscriber<E> {
    pub fn new(source: E) -> Self {
        RegionSubscriber { source, current: None }
    }

    /// The subscribed region, if any.
    pub fn region(&self) -> Option<RectF> { self.current }

    pub fn source(&self) -> &E { &self.source }

    /// Recompute the region from `geometry` and resubscribe.  `None`
    /// means the caller could not supply geometry (e.g. not on the home
    /// screen) and is treated like an invalid rectangle.
    pub fn set_workspace_location(&mut self, geometry: Option<&WorkspaceGeometry>)
                                  -> Option<RectF> {
        let rect = geometry.and_then(normalized_region);
        if rect.is_none() {
            tracing::debug!(?geometry, "no valid wallpaper region");
        }
        self.replace(rect);
        rect
    }

    /// Drop the subscription.
    pub fn clear(&mut self) { self.replace(None) }

    fn replace(&mut self, rect: Option<RectF>) {
        if let Some(old) = self.current.take() {
            tracing::trace!(?old, "unsubscribing wallpaper region");
            self.source.remove_colors_listener();
        }
        if let Some(new) = rect {
            tracing::trace!(?new, "subscribing wallpaper region");
            self.source.add_colors_listener(&[new]);
            self.current = Some(new);
        }
    }
}
