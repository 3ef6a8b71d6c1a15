//! Angular geometry of the wheel: sector computation, the pixel layout that
//! maps values to radii, and polar hit-testing of pointer positions.
//!
//! Angles are integer degrees in [0, 360], measured clockwise from the
//! positive x axis — the convention shared by the renderer's arc calls and
//! the hit test below.

use crate::wheel::MIN_ITEMS;

/// Concentric value rings spanning the shorter edge of the widget bounds.
/// Ring 10 is the outer boundary of the value scale; the rings beyond it
/// only carry the rim decoration and the item labels.
pub const TOTAL_RINGS: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One item's angular slice, `start` exclusive and `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sector {
    pub start: i32,
    pub end: i32,
}

impl Sector {
    pub fn sweep(&self) -> i32 {
        self.end - self.start
    }
}

/// Splits 360 degrees into `item_count` equal sectors.
///
/// Boundaries accumulate in f32 and truncate to whole degrees, exactly like
/// the value scale the renderer draws against; the final sector is forced to
/// end at 360 so rounding drift never leaves a gap at the seam.
///
/// # Panics
///
/// Panics when `item_count` is below [`MIN_ITEMS`]. Wheel construction
/// already rejects such counts, so hitting this is a programming error.
pub fn compute_sectors(item_count: usize) -> Vec<Sector> {
    assert!(
        item_count >= MIN_ITEMS,
        "sector computation needs at least {MIN_ITEMS} items, got {item_count}"
    );

    let step = 360.0f32 / item_count as f32;
    let mut sectors = Vec::with_capacity(item_count);
    let mut current = 0i32;
    for _ in 0..item_count {
        let end = (current as f32 + step) as i32;
        sectors.push(Sector {
            start: current,
            end,
        });
        current = end;
    }
    sectors
        .last_mut()
        .expect("item_count is at least MIN_ITEMS")
        .end = 360;
    sectors
}

/// Pixel-space placement of the wheel: its center and the radius of one
/// value unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub center: Point,
    pub unit_width: f64,
}

impl WheelLayout {
    /// Layout for a widget of the given size: centered, with the unit ring
    /// width derived from the shorter edge. Only sector angles depend on the
    /// item count; the radius scale never does.
    pub fn from_bounds(width: f64, height: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            unit_width: width.min(height) / f64::from(TOTAL_RINGS),
        }
    }

    /// Radius of the filled wedge for a given item value.
    pub fn value_radius(&self, value: u8) -> f64 {
        f64::from(value) * self.unit_width
    }

    /// The continuous value a pointer position corresponds to: its distance
    /// from the center in units.
    pub fn pointer_value(&self, pointer: Point) -> f64 {
        let dx = pointer.x - self.center.x;
        let dy = pointer.y - self.center.y;
        dx.hypot(dy) / self.unit_width
    }
}

/// Clockwise angle in degrees of the line from `center` to `pointer`,
/// measured from the positive x axis.
///
/// Screen coordinates grow downward, so y is inverted before the `atan2`
/// and positions above the axis reflect into the (180, 360] range.
pub fn pointer_angle(pointer: Point, center: Point) -> f64 {
    let x = pointer.x - center.x;
    let y = center.y - pointer.y;
    let angle = y.abs().atan2(x).to_degrees();
    if y > 0.0 { 360.0 - angle } else { angle }
}

/// Maps a pointer position to the index of the sector it falls in.
///
/// A sector matches when `start < angle <= end`, so a click exactly on a
/// boundary resolves to the sector ending there — one sector, never both.
/// Returns `None` when no sector matches (empty slice, or an angle of
/// exactly zero).
pub fn locate(pointer: Point, center: Point, sectors: &[Sector]) -> Option<usize> {
    let angle = pointer_angle(pointer, center);
    sectors
        .iter()
        .position(|s| f64::from(s.start) < angle && angle <= f64::from(s.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::MAX_ITEMS;

    #[test]
    fn sectors_are_contiguous_and_close_at_360() {
        for n in MIN_ITEMS..=MAX_ITEMS {
            let sectors = compute_sectors(n);
            assert_eq!(sectors.len(), n);
            assert_eq!(sectors[0].start, 0);
            assert_eq!(sectors[n - 1].end, 360);
            for pair in sectors.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert!(pair[0].start < pair[0].end);
            }
        }
    }

    #[test]
    #[should_panic(expected = "at least")]
    fn sector_computation_rejects_degenerate_counts() {
        compute_sectors(1);
    }

    #[test]
    fn every_angle_hits_exactly_one_sector() {
        for n in MIN_ITEMS..=MAX_ITEMS {
            let sectors = compute_sectors(n);
            for tenth in 1..=3600 {
                let angle = f64::from(tenth) / 10.0;
                let matches = sectors
                    .iter()
                    .filter(|s| f64::from(s.start) < angle && angle <= f64::from(s.end))
                    .count();
                assert_eq!(matches, 1, "angle {angle} with {n} sectors");
            }
        }
    }

    #[test]
    fn locate_resolves_quadrants() {
        let center = Point::new(100.0, 100.0);
        let sectors = compute_sectors(4); // 0-90, 90-180, 180-270, 270-360

        // below-right of center: screen-down y means a clockwise angle in (0, 90)
        assert_eq!(locate(Point::new(150.0, 150.0), center, &sectors), Some(0));
        // below-left
        assert_eq!(locate(Point::new(50.0, 150.0), center, &sectors), Some(1));
        // above-left
        assert_eq!(locate(Point::new(50.0, 50.0), center, &sectors), Some(2));
        // above-right
        assert_eq!(locate(Point::new(150.0, 50.0), center, &sectors), Some(3));
    }

    #[test]
    fn locate_boundary_goes_to_the_ending_sector() {
        let center = Point::default();
        let sectors = compute_sectors(4);
        // straight down: angle is exactly 90
        assert_eq!(locate(Point::new(0.0, 10.0), center, &sectors), Some(0));
        // straight up: angle is exactly 270
        assert_eq!(locate(Point::new(0.0, -10.0), center, &sectors), Some(2));
    }

    #[test]
    fn locate_misses_on_empty_sectors() {
        assert_eq!(locate(Point::new(5.0, 5.0), Point::default(), &[]), None);
    }

    #[test]
    fn layout_scale_is_independent_of_item_count() {
        let layout = WheelLayout::from_bounds(440.0, 600.0);
        assert!((layout.unit_width - 20.0).abs() < 1e-9);
        assert!((layout.value_radius(10) - 200.0).abs() < 1e-9);
        assert_eq!(layout.center, Point::new(220.0, 300.0));
    }

    #[test]
    fn pointer_value_is_distance_in_units() {
        let layout = WheelLayout::from_bounds(220.0, 220.0); // unit = 10
        let v = layout.pointer_value(Point::new(110.0, 40.0)); // 70 px above center
        assert!((v - 7.0).abs() < 1e-9);
    }
}
