//! Attachment metadata queries. Rows cascade with their parent task.

use super::{row_exists, text_value, DbResult, SetClause, Store};
use crate::model::attachment::{Attachment, AttachmentPatch};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const ATTACHMENT_SELECT_SQL: &str = "SELECT
    id,
    taskId,
    fileName,
    fileSize,
    fileType,
    filePath,
    createdAt
FROM attachments";

impl Store {
    pub fn create_attachment(&self, attachment: &Attachment) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO attachments (
                id,
                taskId,
                fileName,
                fileSize,
                fileType,
                filePath,
                createdAt
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                attachment.id.as_str(),
                attachment.task_id.as_str(),
                attachment.file_name.as_str(),
                attachment.file_size,
                attachment.file_type.as_str(),
                attachment.file_path.as_str(),
                attachment.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_attachment(&self, id: &str) -> DbResult<Option<Attachment>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{ATTACHMENT_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(read_attachment_row(row)))
            .optional()?;
        row.transpose()
    }

    pub fn list_attachments(&self) -> DbResult<Vec<Attachment>> {
        self.query_attachments(
            &format!("{ATTACHMENT_SELECT_SQL} ORDER BY taskId ASC, createdAt ASC, id ASC;"),
            None,
        )
    }

    pub fn list_attachments_by_task(&self, task_id: &str) -> DbResult<Vec<Attachment>> {
        self.query_attachments(
            &format!("{ATTACHMENT_SELECT_SQL} WHERE taskId = ?1 ORDER BY createdAt ASC, id ASC;"),
            Some(task_id),
        )
    }

    /// Returns `false` when no attachment has this id.
    pub fn update_attachment(&self, id: &str, patch: &AttachmentPatch) -> DbResult<bool> {
        let mut clause = SetClause::default();
        if let Some(file_name) = patch.file_name.as_deref() {
            clause.set("fileName", text_value(file_name));
        }
        if let Some(file_size) = patch.file_size {
            clause.set("fileSize", Value::Integer(file_size));
        }
        if let Some(file_type) = patch.file_type.as_deref() {
            clause.set("fileType", text_value(file_type));
        }
        if let Some(file_path) = patch.file_path.as_deref() {
            clause.set("filePath", text_value(file_path));
        }
        if clause.is_empty() {
            return row_exists(self.conn(), "attachments", id);
        }

        let (sql, values) = clause.into_update("attachments", id);
        let changed = self.conn().execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    pub fn delete_attachment(&self, id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM attachments WHERE id = ?1;", [id])?;
        Ok(())
    }

    pub fn delete_attachments_by_task(&self, task_id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM attachments WHERE taskId = ?1;", [task_id])?;
        Ok(())
    }

    fn query_attachments(&self, sql: &str, task_id: Option<&str>) -> DbResult<Vec<Attachment>> {
        let mut stmt = self.conn().prepare(sql)?;
        let mut rows = match task_id {
            Some(task_id) => stmt.query([task_id])?,
            None => stmt.query([])?,
        };
        let mut attachments = Vec::new();
        while let Some(row) = rows.next()? {
            attachments.push(read_attachment_row(row)?);
        }
        Ok(attachments)
    }
}

fn read_attachment_row(row: &Row<'_>) -> DbResult<Attachment> {
    Ok(Attachment {
        id: row.get("id")?,
        task_id: row.get("taskId")?,
        file_name: row.get("fileName")?,
        file_size: row.get("fileSize")?,
        file_type: row.get("fileType")?,
        file_path: row.get("filePath")?,
        created_at: row.get("createdAt")?,
    })
}
