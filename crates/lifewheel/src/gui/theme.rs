use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    /// Regular value-ring strokes (rings 2 through 8).
    pub guide: Srgba<f64>,
    /// The heavy ring marking value 10.
    pub scale_ring: Srgba<f64>,
    /// Decorative rings beyond the value scale and the sector dividers.
    pub guide_faint: Srgba<f64>,
    /// Fill of the value disc (inside ring 10).
    pub inner_fill: Srgba<f64>,
    /// Fill of the rim disc carrying the item names.
    pub outer_fill: Srgba<f64>,
    /// Stroke around each item's value wedge.
    pub sector_border: Srgba<f64>,
    /// Curved value digits and rim labels.
    pub label_text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            guide: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.25, 0.25, 0.25, 1.0),
                Some(0.8),
            ),
            scale_ring: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
            guide_faint: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.75, 0.75, 0.75, 1.0),
                Some(0.7),
            ),
            inner_fill: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.98, 0.96, 0.90, 1.0),
                Some(0.35),
            ),
            outer_fill: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.92, 0.92, 0.95, 1.0),
                Some(0.2),
            ),
            sector_border: Srgba::new(0.25, 0.0, 0.5, 1.0),
            label_text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.05, 0.05, 0.05, 1.0),
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.lifewheel-title {
    font-size: 20px;
    font-weight: bold;
    color: rgb(64, 0, 128);
}
.lifewheel-item {
    font-size: 20px;
    color: rgb(64, 0, 128);
}
.lifewheel-status {
    font-size: 13px;
    opacity: 0.8;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
