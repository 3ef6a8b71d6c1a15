use lifewheel::config;
use lifewheel::gui::app::AppModel;
use lifewheel::sys::runtime;
use relm4::prelude::*;
use wheelkit::WidgetOptions;

fn main() {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::info!("Using config at {}", path.display()),
        Err(e) => log::warn!("Could not write the default config: {}", e),
    }
    let wheel = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.lifewheel.app");

    let options = WidgetOptions {
        draggable: true,
        editable: true,
        show_labels: true,
    };
    app.run::<AppModel>((wheel, options, rx));
}
