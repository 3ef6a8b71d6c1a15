pub mod view;

pub use view::draw;

/// Alpha of a value wedge at rest.
pub const SECTOR_ALPHA: f64 = 200.0 / 255.0;
/// Alpha of the wedge currently held by the pointer.
pub const SECTOR_ALPHA_SELECTED: f64 = 120.0 / 255.0;

/// Ring index of the heavy circle closing the value scale.
pub const SCALE_RING: u32 = 10;
/// Ring index of the outermost decorated circle.
pub const RIM_RING: u32 = 32;
/// Regular guide rings inside the value scale.
pub const GUIDE_RINGS: [u32; 4] = [2, 4, 6, 8];
/// Faint decorative rings beyond the value scale.
pub const FAINT_RINGS: [u32; 5] = [12, 15, 19, 25, 32];

/// Radius of the curved value digits, in ring units.
pub const VALUE_TEXT_RADIUS: f64 = 4.5;
/// Fraction into the sector sweep where the value digits start.
pub const VALUE_TEXT_SWEEP_OFFSET: f64 = 0.3;
/// Radius of the curved item names on the rim, in ring units.
pub const NAME_TEXT_RADIUS: f64 = 10.2;
/// Degrees the item name is inset from its sector's start boundary.
pub const NAME_START_INSET_DEG: f64 = 2.0;
/// Degrees of arc kept clear between neighbouring item names.
pub const NAME_ARC_GAP_DEG: f64 = 4.0;

pub const FONT_SIZE: f64 = 19.0;
pub const SECTOR_BORDER_WIDTH: f64 = 6.0;
