//! Singleton user preferences row.

use super::{bool_to_int, int_to_bool, parse_enum, DbResult, Store};
use crate::model::preferences::UserPreferences;
use rusqlite::{params, OptionalExtension, Row};

const PREFERENCES_ROW_ID: i64 = 1;

impl Store {
    /// Returns the stored preferences, or `None` before the first write.
    pub fn get_preferences(&self) -> DbResult<Option<UserPreferences>> {
        let mut stmt = self.conn().prepare(
            "SELECT theme, fontSize, defaultView, enableNotifications, defaultPriority
             FROM user_preferences
             WHERE id = ?1;",
        )?;
        let row = stmt
            .query_row([PREFERENCES_ROW_ID], |row| Ok(read_preferences_row(row)))
            .optional()?;
        row.transpose()
    }

    /// Returns the stored preferences or in-code defaults.
    pub fn load_preferences(&self) -> DbResult<UserPreferences> {
        Ok(self.get_preferences()?.unwrap_or_default())
    }

    /// Upserts the singleton row.
    pub fn save_preferences(&self, prefs: &UserPreferences) -> DbResult<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO user_preferences (
                id,
                theme,
                fontSize,
                defaultView,
                enableNotifications,
                defaultPriority
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                PREFERENCES_ROW_ID,
                prefs.theme.as_str(),
                prefs.font_size,
                prefs.default_view.as_str(),
                bool_to_int(prefs.enable_notifications),
                prefs.default_priority.as_str(),
            ],
        )?;
        Ok(())
    }
}

fn read_preferences_row(row: &Row<'_>) -> DbResult<UserPreferences> {
    let theme: String = row.get("theme")?;
    let default_view: String = row.get("defaultView")?;
    let default_priority: String = row.get("defaultPriority")?;
    Ok(UserPreferences {
        theme: parse_enum(&theme, "user_preferences.theme")?,
        font_size: row.get("fontSize")?,
        default_view: parse_enum(&default_view, "user_preferences.defaultView")?,
        enable_notifications: int_to_bool(
            row.get("enableNotifications")?,
            "user_preferences.enableNotifications",
        )?,
        default_priority: parse_enum(&default_priority, "user_preferences.defaultPriority")?,
    })
}
