//! crates/inventory_core/src/settings.rs
//!
//! Session Settings: theme and notification preferences, persisted as two
//! independent `"true"`/`"false"` flags.

use crate::domain::SessionSettings;
use crate::ports::{KeyValueStore, PortResult};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const NOTIFICATIONS_KEY: &str = "notificationsEnabled";

pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
    settings: SessionSettings,
}

impl SettingsStore {
    /// Reads both flags once at start-up. Dark mode is on only for a literal
    /// `"true"`; notifications are off only for a literal `"false"`.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let defaults = SessionSettings::default();
        let dark_mode = read_flag(kv.as_ref(), DARK_MODE_KEY)
            .map_or(defaults.dark_mode, |value| value == "true");
        let notifications_enabled = read_flag(kv.as_ref(), NOTIFICATIONS_KEY)
            .map_or(defaults.notifications_enabled, |value| value != "false");

        Self {
            kv,
            settings: SessionSettings {
                dark_mode,
                notifications_enabled,
            },
        }
    }

    pub fn current(&self) -> SessionSettings {
        self.settings
    }

    /// Flips dark mode, persists it and returns the new value.
    pub fn toggle_theme(&mut self) -> PortResult<bool> {
        let enabled = !self.settings.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> PortResult<()> {
        self.kv.set(DARK_MODE_KEY, flag(enabled))?;
        self.settings.dark_mode = enabled;
        debug!("Dark mode set to {}", enabled);
        Ok(())
    }

    pub fn set_notifications(&mut self, enabled: bool) -> PortResult<()> {
        self.kv.set(NOTIFICATIONS_KEY, flag(enabled))?;
        self.settings.notifications_enabled = enabled;
        debug!("Notifications set to {}", enabled);
        Ok(())
    }
}

fn read_flag(kv: &dyn KeyValueStore, key: &str) -> Option<String> {
    kv.get(key).unwrap_or_else(|e| {
        warn!("Could not read setting {}: {}", key, e);
        None
    })
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}
