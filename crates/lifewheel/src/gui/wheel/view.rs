use super::{
    FAINT_RINGS, FONT_SIZE, GUIDE_RINGS, NAME_ARC_GAP_DEG, NAME_START_INSET_DEG, NAME_TEXT_RADIUS,
    RIM_RING, SCALE_RING, SECTOR_ALPHA, SECTOR_ALPHA_SELECTED, SECTOR_BORDER_WIDTH,
    VALUE_TEXT_RADIUS, VALUE_TEXT_SWEEP_OFFSET,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;
use wheelkit::geometry::Sector;
use wheelkit::{Wheel, WheelItem, WheelLayout};

struct SectorRenderer<'a> {
    item: &'a WheelItem,
    sector: Sector,
    layout: &'a WheelLayout,
    selected: bool,
}

impl<'a> SectorRenderer<'a> {
    fn new(item: &'a WheelItem, sector: Sector, layout: &'a WheelLayout, selected: bool) -> Self {
        Self {
            item,
            sector,
            layout,
            selected,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_wedge(cr)?;
        self.draw_border(cr, colors)?;
        self.draw_value(cr, colors)
    }

    /// The filled pie wedge whose radius encodes the item's value.
    fn draw_wedge(&self, cr: &Context) -> Result<(), cairo::Error> {
        let alpha = if self.selected {
            SECTOR_ALPHA_SELECTED
        } else {
            SECTOR_ALPHA
        };
        let (r, g, b, _) = self.item.color().into_components();
        cr.set_source_rgba(r, g, b, alpha);

        let radius = self.layout.value_radius(self.item.value());
        let center = self.layout.center;
        cr.move_to(center.x, center.y);
        cr.arc(
            center.x,
            center.y,
            radius,
            f64::from(self.sector.start).to_radians(),
            f64::from(self.sector.end).to_radians(),
        );
        cr.close_path();
        cr.fill()
    }

    /// The contrasting arc stroke along the wedge's outer edge.
    fn draw_border(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.sector_border.into_components();
        cr.set_source_rgba(r, g, b, a);
        cr.set_line_width(SECTOR_BORDER_WIDTH);
        cr.new_path();
        cr.arc(
            self.layout.center.x,
            self.layout.center.y,
            self.layout.value_radius(self.item.value()),
            f64::from(self.sector.start).to_radians(),
            f64::from(self.sector.end).to_radians(),
        );
        cr.stroke()
    }

    /// The value digits, curved along an arc inside the sector.
    fn draw_value(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b, a) = colors.label_text.into_components();
        cr.set_source_rgba(r, g, b, a);
        let sweep = f64::from(self.sector.sweep());
        let start = f64::from(self.sector.start) + VALUE_TEXT_SWEEP_OFFSET * sweep;
        draw_text_on_arc(
            cr,
            &self.item.value().to_string(),
            self.layout,
            VALUE_TEXT_RADIUS * self.layout.unit_width,
            start,
            f64::INFINITY,
        )
    }
}

/// Draws the whole wheel: background discs and guide rings, rim labels, then
/// each item's wedge, border and value. `selected` dims the wedge currently
/// held by the pointer.
pub fn draw(
    cr: &Context,
    wheel: &Wheel,
    layout: &WheelLayout,
    selected: Option<usize>,
    show_labels: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(FONT_SIZE);

    draw_background(cr, wheel, layout, show_labels, colors)?;

    for (i, (item, &sector)) in zip(wheel.items(), wheel.sectors()).enumerate() {
        SectorRenderer::new(item, sector, layout, selected == Some(i)).draw(cr, colors)?;
    }
    Ok(())
}

fn draw_background(
    cr: &Context,
    wheel: &Wheel,
    layout: &WheelLayout,
    show_labels: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let unit = layout.unit_width;

    // rim disc first, value disc on top of it
    fill_circle(cr, layout, f64::from(RIM_RING) * unit, colors.outer_fill)?;
    fill_circle(cr, layout, f64::from(SCALE_RING) * unit, colors.inner_fill)?;

    cr.set_line_width(1.0);
    set_source(cr, colors.guide);
    for ring in GUIDE_RINGS {
        stroke_circle(cr, layout, f64::from(ring) * unit)?;
    }

    // the value-10 boundary gets a heavy stroke
    cr.set_line_width(3.0);
    set_source(cr, colors.scale_ring);
    stroke_circle(cr, layout, f64::from(SCALE_RING) * unit)?;

    cr.set_line_width(0.5);
    set_source(cr, colors.guide_faint);
    for ring in FAINT_RINGS {
        stroke_circle(cr, layout, f64::from(ring) * unit)?;
    }

    for (item, &sector) in zip(wheel.items(), wheel.sectors()) {
        draw_sector_divider(cr, layout, sector, colors)?;
        if show_labels {
            draw_item_name(cr, item, sector, wheel.len(), layout, colors)?;
        }
    }
    Ok(())
}

/// Faint radial boundary of one sector, out to the rim.
fn draw_sector_divider(
    cr: &Context,
    layout: &WheelLayout,
    sector: Sector,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.guide_faint);
    cr.set_line_width(0.5);
    let center = layout.center;
    cr.move_to(center.x, center.y);
    cr.arc(
        center.x,
        center.y,
        f64::from(RIM_RING) * layout.unit_width,
        f64::from(sector.start).to_radians(),
        f64::from(sector.end).to_radians(),
    );
    cr.close_path();
    cr.stroke()
}

/// The item name, curved along the rim just outside the value scale and
/// hard-truncated to its share of the circle.
fn draw_item_name(
    cr: &Context,
    item: &WheelItem,
    sector: Sector,
    item_count: usize,
    layout: &WheelLayout,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.label_text);
    let radius = NAME_TEXT_RADIUS * layout.unit_width;
    let perimeter = 2.0 * PI * radius;
    let max_width = perimeter / item_count as f64 - perimeter * NAME_ARC_GAP_DEG / 360.0;
    draw_text_on_arc(
        cr,
        item.name(),
        layout,
        radius,
        f64::from(sector.start) + NAME_START_INSET_DEG,
        max_width,
    )
}

/// Renders `text` glyph by glyph along a circular arc starting at
/// `start_deg`, dropping everything past `max_width` pixels of arc length.
/// Each glyph is placed on the arc and rotated tangent to it.
fn draw_text_on_arc(
    cr: &Context,
    text: &str,
    layout: &WheelLayout,
    radius: f64,
    start_deg: f64,
    max_width: f64,
) -> Result<(), cairo::Error> {
    let mut angle = start_deg.to_radians();
    let mut used = 0.0;
    let mut glyph = [0u8; 4];

    for ch in text.chars() {
        let s: &str = ch.encode_utf8(&mut glyph);
        let advance = cr.text_extents(s)?.x_advance();
        if used + advance > max_width {
            break;
        }

        // angle at the middle of the glyph, so it sits centered on the arc
        let theta = angle + (advance / 2.0) / radius;
        cr.save()?;
        cr.translate(
            layout.center.x + radius * theta.cos(),
            layout.center.y + radius * theta.sin(),
        );
        cr.rotate(theta + PI / 2.0);
        cr.move_to(-advance / 2.0, 0.0);
        cr.show_text(s)?;
        cr.restore()?;

        angle += advance / radius;
        used += advance;
    }
    Ok(())
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_circle(
    cr: &Context,
    layout: &WheelLayout,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_source(cr, color);
    cr.arc(layout.center.x, layout.center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn stroke_circle(cr: &Context, layout: &WheelLayout, radius: f64) -> Result<(), cairo::Error> {
    cr.arc(layout.center.x, layout.center.y, radius, 0.0, 2.0 * PI);
    cr.stroke()
}
