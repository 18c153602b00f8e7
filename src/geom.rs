//! Geometry predicates and bounding-box helpers.
//!
//! Everything here operates on axis-aligned boxes in design-space pixels.
//! The transform passes depend on these predicates for containment tests,
//! row clustering, and responsive pin handling.

use crate::model::{Screen, Widget};

/// Bottom-anchoring tolerance: a fixed element whose bottom edge lies within
/// this many design units of the screen bottom is treated as a bottom bar.
pub const BOTTOM_PIN_THRESHOLD: i32 = 10;

/// An axis-aligned box in design-space pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// The smallest box containing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }
}

/// Anything with a design-space bounding box
pub trait HasBounds {
    fn bounds(&self) -> Bounds;
}

impl HasBounds for Widget {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

impl HasBounds for Screen {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.w, self.h)
    }
}

impl HasBounds for Bounds {
    fn bounds(&self) -> Bounds {
        *self
    }
}

/// Union bounding box of a collection, or `None` when it is empty
pub fn bounding_box<'a, T, I>(items: I) -> Option<Bounds>
where
    T: HasBounds + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut iter = items.into_iter();
    let first = iter.next()?.bounds();
    Some(iter.fold(first, |acc, item| acc.union(&item.bounds())))
}

/// Whether the Y-intervals of two boxes overlap (touching edges do not count)
pub fn is_overlapping_y(a: &impl HasBounds, b: &impl HasBounds) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    a.y < b.bottom() && a.bottom() > b.y
}

/// Whether `parent`'s box fully contains `child`'s box (edges inclusive)
pub fn is_contained_in_box(child: &impl HasBounds, parent: &impl HasBounds) -> bool {
    let c = child.bounds();
    let p = parent.bounds();
    c.x >= p.x && c.right() <= p.right() && c.y >= p.y && c.bottom() <= p.bottom()
}

/// Widgets in render order (stable sort by z)
pub fn ordered_widgets(mut widgets: Vec<&Widget>) -> Vec<&Widget> {
    widgets.sort_by_key(|w| w.z);
    widgets
}

/// Partition elements into visual rows: elements are sorted by y and an
/// element joins the current row while it Y-overlaps the row's last member.
pub fn partition_rows<T: HasBounds>(items: &[T]) -> Vec<Vec<&T>> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| item.bounds().y);

    let mut rows: Vec<Vec<&T>> = Vec::new();
    for item in sorted {
        match rows.last_mut() {
            Some(row) if row.last().is_some_and(|last| is_overlapping_y(*last, item)) => {
                row.push(item);
            }
            _ => rows.push(vec![item]),
        }
    }
    rows
}

/// Distance between an element's bottom edge and the screen bottom,
/// for elements already in screen-relative coordinates.
pub fn distance_from_screen_bottom(e: &impl HasBounds, screen_h: i32) -> i32 {
    screen_h - e.bounds().bottom()
}

/// Whether a screen-relative element sits at the screen bottom
pub fn is_at_bottom(e: &impl HasBounds, screen_h: i32) -> bool {
    distance_from_screen_bottom(e, screen_h) <= BOTTOM_PIN_THRESHOLD
}
