use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const DEFAULT_MAX_ITEMS: usize = 1000;
pub const DEFAULT_AUTO_DELETE_DAYS: u32 = 30;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// User-facing history settings, stored under the `settings` key.
///
/// Every field defaults on its own, so objects written by older versions
/// load without migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_items: usize,
    pub auto_delete: bool,
    pub auto_delete_days: u32,
    pub items_per_page: usize,
    pub show_relative_time: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            auto_delete: false,
            auto_delete_days: DEFAULT_AUTO_DELETE_DAYS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            show_relative_time: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_items == 0 {
            return Err(ValidationError::InvalidSetting("maxItems"));
        }
        if self.items_per_page == 0 {
            return Err(ValidationError::InvalidSetting("itemsPerPage"));
        }
        if self.auto_delete_days == 0 {
            return Err(ValidationError::InvalidSetting("autoDeleteDays"));
        }
        Ok(())
    }
}
