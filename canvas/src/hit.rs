#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Presentation, SlideId};
use crate::geometry::ResizeHandle;

/// Which part of a slide was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeHandle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub slide_id: SlideId,
    pub part: HitPart,
}

/// Test which slide (if any) is under `canvas_pt`.
///
/// Resize handles are checked first and only on the current slide. Bodies are tested
/// topmost first, where later slides in the array draw above earlier ones. Rotation is
/// ignored; slides hit-test as their axis-aligned rectangle.
#[must_use]
pub fn hit_test(canvas_pt: Point, doc: &Presentation, camera: &Camera) -> Option<Hit> {
    if let Some(current) = doc.current_slide() {
        let radius = camera.screen_dist_to_canvas(HANDLE_RADIUS_PX);
        let rect = current.rect();
        for handle in ResizeHandle::ALL {
            let p = handle.position(&rect);
            if (p.x - canvas_pt.x).abs() <= radius && (p.y - canvas_pt.y).abs() <= radius {
                return Some(Hit { slide_id: current.id, part: HitPart::ResizeHandle(handle) });
            }
        }
    }

    doc.slides
        .iter()
        .rev()
        .find(|s| s.rect().contains(canvas_pt))
        .map(|s| Hit { slide_id: s.id, part: HitPart::Body })
}
