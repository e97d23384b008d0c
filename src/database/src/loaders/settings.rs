use scheduler::SchedulerSettings;

const STATIC_SETTINGS_JSON: &str = include_str!("../data/settings.json");

pub struct SettingsLoader;

impl SettingsLoader {
    pub fn load() -> Result<SchedulerSettings, serde_json::Error> {
        serde_json::from_str(STATIC_SETTINGS_JSON)
    }
}
