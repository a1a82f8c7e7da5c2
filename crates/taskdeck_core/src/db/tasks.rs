//! Task queries: CRUD, substring search and conjunctive filters.
//!
//! # Invariants
//! - List queries order by `"order" ASC, createdAt DESC, id ASC`.
//! - Updates always refresh `updatedAt` to `max(createdAt, now)`; a
//!   caller-provided value is never written on update.

use super::{
    optional_int_value, optional_text_value, parse_enum, text_value, DbResult, SetClause, Store,
};
use crate::model::now_epoch_ms;
use crate::model::task::{Task, TaskFilter, TaskPatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    priority,
    dueDate,
    categoryId,
    \"order\",
    createdAt,
    updatedAt
FROM tasks";

const TASK_ORDER_SQL: &str = " ORDER BY \"order\" ASC, createdAt DESC, id ASC";

impl Store {
    /// Inserts a task. `updatedAt` is raised to `createdAt` when older.
    pub fn create_task(&self, task: &Task) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                priority,
                dueDate,
                categoryId,
                \"order\",
                createdAt,
                updatedAt
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                task.id.as_str(),
                task.title.as_str(),
                task.description.as_deref(),
                task.status.as_str(),
                task.priority.as_str(),
                task.due_date,
                task.category_id.as_deref(),
                task.order,
                task.created_at,
                task.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> DbResult<Option<Task>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(read_task_row(row)))
            .optional()?;
        row.transpose()
    }

    pub fn list_tasks(&self) -> DbResult<Vec<Task>> {
        self.query_tasks(&format!("{TASK_SELECT_SQL}{TASK_ORDER_SQL};"), Vec::new())
    }

    /// Applies present patch fields and refreshes `updatedAt`.
    ///
    /// Returns `false` when no task has this id.
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> DbResult<bool> {
        let mut clause = SetClause::default();
        if let Some(title) = patch.title.as_deref() {
            clause.set("title", text_value(title));
        }
        if let Some(description) = patch.description.as_ref() {
            clause.set("description", optional_text_value(description.as_deref()));
        }
        if let Some(status) = patch.status {
            clause.set("status", text_value(status.as_str()));
        }
        if let Some(priority) = patch.priority {
            clause.set("priority", text_value(priority.as_str()));
        }
        if let Some(due_date) = patch.due_date {
            clause.set("dueDate", optional_int_value(due_date));
        }
        if let Some(category_id) = patch.category_id.as_ref() {
            clause.set("categoryId", optional_text_value(category_id.as_deref()));
        }
        if let Some(order) = patch.order {
            clause.set("\"order\"", Value::Integer(order));
        }
        // Clamped against the stored createdAt so the row CHECK always holds.
        clause.set_expr(
            "updatedAt",
            "MAX(createdAt, ?)",
            Value::Integer(now_epoch_ms()),
        );

        let (sql, values) = clause.into_update("tasks", id);
        let changed = self.conn().execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    /// Deletes a task; subtasks, attachments and reminders cascade.
    pub fn delete_task(&self, id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        Ok(())
    }

    /// Case-insensitive substring match over title or description.
    ///
    /// The query is matched verbatim; an empty query matches every task.
    pub fn search_tasks(&self, query: &str) -> DbResult<Vec<Task>> {
        let pattern = like_pattern(query);
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE title LIKE ?1 ESCAPE '\\'
                    OR description LIKE ?1 ESCAPE '\\'{TASK_ORDER_SQL};"
            ),
            vec![Value::Text(pattern)],
        )
    }

    /// Returns tasks matching every set criterion of `filter`.
    pub fn filter_tasks(&self, filter: &TaskFilter) -> DbResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(text_value(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            sql.push_str(" AND priority = ?");
            bind_values.push(text_value(priority.as_str()));
        }
        if let Some(category_id) = filter.category_id.as_deref() {
            sql.push_str(" AND categoryId = ?");
            bind_values.push(text_value(category_id));
        }
        if let Some(from) = filter.due_date_from {
            sql.push_str(" AND dueDate >= ?");
            bind_values.push(Value::Integer(from));
        }
        if let Some(to) = filter.due_date_to {
            sql.push_str(" AND dueDate <= ?");
            bind_values.push(Value::Integer(to));
        }
        if let Some(query) = filter
            .search_query
            .as_deref()
            .filter(|query| !query.is_empty())
        {
            sql.push_str(" AND (title LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')");
            let pattern = like_pattern(query);
            bind_values.push(Value::Text(pattern.clone()));
            bind_values.push(Value::Text(pattern));
        }

        sql.push_str(TASK_ORDER_SQL);
        self.query_tasks(&sql, bind_values)
    }

    fn query_tasks(&self, sql: &str, bind_values: Vec<Value>) -> DbResult<Vec<Task>> {
        let mut stmt = self.conn().prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(read_task_row(row)?);
        }
        Ok(tasks)
    }
}

fn read_task_row(row: &Row<'_>) -> DbResult<Task> {
    let status: String = row.get("status")?;
    let priority: String = row.get("priority")?;
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: parse_enum(&status, "tasks.status")?,
        priority: parse_enum(&priority, "tasks.priority")?,
        due_date: row.get("dueDate")?,
        category_id: row.get("categoryId")?,
        order: row.get("order")?,
        created_at: row.get("createdAt")?,
        updated_at: row.get("updatedAt")?,
    })
}

/// Wraps `query` in `%...%`, escaping LIKE wildcards with `\`.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("groceries"), "%groceries%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
