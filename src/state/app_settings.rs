use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // CFTUI_LOG takes the usual level names (error, warn, info, debug, trace).
        let log_level = std::env::var("CFTUI_LOG")
            .ok()
            .and_then(|level| level.parse::<LevelFilter>().ok());
        Self { full_screen: false, log_level }
    }
}
