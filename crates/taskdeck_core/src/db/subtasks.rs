//! Subtask queries. Rows cascade with their parent task.

use super::{bool_to_int, int_to_bool, row_exists, text_value, DbResult, SetClause, Store};
use crate::model::subtask::{Subtask, SubtaskPatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const SUBTASK_SELECT_SQL: &str = "SELECT id, taskId, title, completed, taskOrder FROM subtasks";

impl Store {
    pub fn create_subtask(&self, subtask: &Subtask) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO subtasks (id, taskId, title, completed, taskOrder)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                subtask.id.as_str(),
                subtask.task_id.as_str(),
                subtask.title.as_str(),
                bool_to_int(subtask.completed),
                subtask.task_order,
            ],
        )?;
        Ok(())
    }

    pub fn get_subtask(&self, id: &str) -> DbResult<Option<Subtask>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{SUBTASK_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(read_subtask_row(row)))
            .optional()?;
        row.transpose()
    }

    /// All subtasks, grouped by parent task and ordered within it.
    pub fn list_subtasks(&self) -> DbResult<Vec<Subtask>> {
        self.query_subtasks(
            &format!("{SUBTASK_SELECT_SQL} ORDER BY taskId ASC, taskOrder ASC, id ASC;"),
            None,
        )
    }

    pub fn list_subtasks_by_task(&self, task_id: &str) -> DbResult<Vec<Subtask>> {
        self.query_subtasks(
            &format!("{SUBTASK_SELECT_SQL} WHERE taskId = ?1 ORDER BY taskOrder ASC, id ASC;"),
            Some(task_id),
        )
    }

    /// Returns `false` when no subtask has this id.
    pub fn update_subtask(&self, id: &str, patch: &SubtaskPatch) -> DbResult<bool> {
        let mut clause = SetClause::default();
        if let Some(title) = patch.title.as_deref() {
            clause.set("title", text_value(title));
        }
        if let Some(completed) = patch.completed {
            clause.set("completed", Value::Integer(bool_to_int(completed)));
        }
        if let Some(task_order) = patch.task_order {
            clause.set("taskOrder", Value::Integer(task_order));
        }
        if clause.is_empty() {
            return row_exists(self.conn(), "subtasks", id);
        }

        let (sql, values) = clause.into_update("subtasks", id);
        let changed = self.conn().execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    /// Flips `completed` in place. Returns `false` when the id is unknown.
    pub fn toggle_subtask(&self, id: &str) -> DbResult<bool> {
        let changed = self.conn().execute(
            "UPDATE subtasks SET completed = 1 - completed WHERE id = ?1;",
            [id],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_subtask(&self, id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM subtasks WHERE id = ?1;", [id])?;
        Ok(())
    }

    pub fn delete_subtasks_by_task(&self, task_id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM subtasks WHERE taskId = ?1;", [task_id])?;
        Ok(())
    }

    fn query_subtasks(&self, sql: &str, task_id: Option<&str>) -> DbResult<Vec<Subtask>> {
        let mut stmt = self.conn().prepare(sql)?;
        let mut rows = match task_id {
            Some(task_id) => stmt.query([task_id])?,
            None => stmt.query([])?,
        };
        let mut subtasks = Vec::new();
        while let Some(row) = rows.next()? {
            subtasks.push(read_subtask_row(row)?);
        }
        Ok(subtasks)
    }
}

fn read_subtask_row(row: &Row<'_>) -> DbResult<Subtask> {
    Ok(Subtask {
        id: row.get("id")?,
        task_id: row.get("taskId")?,
        title: row.get("title")?,
        completed: int_to_bool(row.get("completed")?, "subtasks.completed")?,
        task_order: row.get("taskOrder")?,
    })
}
