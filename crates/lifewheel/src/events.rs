/// Events delivered to the GUI from the background services.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
