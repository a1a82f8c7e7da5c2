//! Reminder queries. Rows cascade with their parent task.

use super::{
    bool_to_int, int_to_bool, optional_text_value, parse_enum, row_exists, DbResult, SetClause,
    Store,
};
use crate::model::reminder::{RecurringRule, Reminder, ReminderPatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const REMINDER_SELECT_SQL: &str =
    "SELECT id, taskId, reminderTime, recurringRule, isActive FROM reminders";

impl Store {
    pub fn create_reminder(&self, reminder: &Reminder) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO reminders (id, taskId, reminderTime, recurringRule, isActive)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reminder.id.as_str(),
                reminder.task_id.as_str(),
                reminder.reminder_time,
                reminder.recurring_rule.map(RecurringRule::as_str),
                bool_to_int(reminder.is_active),
            ],
        )?;
        Ok(())
    }

    pub fn get_reminder(&self, id: &str) -> DbResult<Option<Reminder>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(read_reminder_row(row)))
            .optional()?;
        row.transpose()
    }

    pub fn list_reminders(&self) -> DbResult<Vec<Reminder>> {
        self.query_reminders(
            &format!("{REMINDER_SELECT_SQL} ORDER BY reminderTime ASC, id ASC;"),
            None,
        )
    }

    pub fn list_reminders_by_task(&self, task_id: &str) -> DbResult<Vec<Reminder>> {
        self.query_reminders(
            &format!(
                "{REMINDER_SELECT_SQL} WHERE taskId = ?1 ORDER BY reminderTime ASC, id ASC;"
            ),
            Some(task_id),
        )
    }

    /// Active reminders across all tasks, soonest first.
    pub fn list_active_reminders(&self) -> DbResult<Vec<Reminder>> {
        self.query_reminders(
            &format!(
                "{REMINDER_SELECT_SQL} WHERE isActive = 1 ORDER BY reminderTime ASC, id ASC;"
            ),
            None,
        )
    }

    /// Returns `false` when no reminder has this id.
    pub fn update_reminder(&self, id: &str, patch: &ReminderPatch) -> DbResult<bool> {
        let mut clause = SetClause::default();
        if let Some(reminder_time) = patch.reminder_time {
            clause.set("reminderTime", Value::Integer(reminder_time));
        }
        if let Some(recurring_rule) = patch.recurring_rule {
            clause.set(
                "recurringRule",
                optional_text_value(recurring_rule.map(RecurringRule::as_str)),
            );
        }
        if let Some(is_active) = patch.is_active {
            clause.set("isActive", Value::Integer(bool_to_int(is_active)));
        }
        if clause.is_empty() {
            return row_exists(self.conn(), "reminders", id);
        }

        let (sql, values) = clause.into_update("reminders", id);
        let changed = self.conn().execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    pub fn delete_reminder(&self, id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        Ok(())
    }

    pub fn delete_reminders_by_task(&self, task_id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM reminders WHERE taskId = ?1;", [task_id])?;
        Ok(())
    }

    fn query_reminders(&self, sql: &str, task_id: Option<&str>) -> DbResult<Vec<Reminder>> {
        let mut stmt = self.conn().prepare(sql)?;
        let mut rows = match task_id {
            Some(task_id) => stmt.query([task_id])?,
            None => stmt.query([])?,
        };
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(read_reminder_row(row)?);
        }
        Ok(reminders)
    }
}

fn read_reminder_row(row: &Row<'_>) -> DbResult<Reminder> {
    let recurring_rule = match row.get::<_, Option<String>>("recurringRule")? {
        Some(value) => Some(parse_enum(&value, "reminders.recurringRule")?),
        None => None,
    };
    Ok(Reminder {
        id: row.get("id")?,
        task_id: row.get("taskId")?,
        reminder_time: row.get("reminderTime")?,
        recurring_rule,
        is_active: int_to_bool(row.get("isActive")?, "reminders.isActive")?,
    })
}
