//! Category queries.
//!
//! Deleting a category relies on `ON DELETE SET NULL` to detach its tasks.

use super::{optional_text_value, row_exists, text_value, DbResult, SetClause, Store};
use crate::model::category::{Category, CategoryPatch};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name, color, icon, createdAt FROM categories";

impl Store {
    pub fn create_category(&self, category: &Category) -> DbResult<()> {
        self.conn().execute(
            "INSERT INTO categories (id, name, color, icon, createdAt)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                category.id.as_str(),
                category.name.as_str(),
                category.color.as_str(),
                category.icon.as_deref(),
                category.created_at,
            ],
        )?;
        Ok(())
    }

    pub fn get_category(&self, id: &str) -> DbResult<Option<Category>> {
        self.query_one_category(&format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"), id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn get_category_by_name(&self, name: &str) -> DbResult<Option<Category>> {
        self.query_one_category(&format!("{CATEGORY_SELECT_SQL} WHERE name = ?1;"), name)
    }

    /// Lists categories sorted by name.
    pub fn list_categories(&self) -> DbResult<Vec<Category>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(read_category_row(row)?);
        }
        Ok(categories)
    }

    /// Returns `false` when no category has this id.
    pub fn update_category(&self, id: &str, patch: &CategoryPatch) -> DbResult<bool> {
        let mut clause = SetClause::default();
        if let Some(name) = patch.name.as_deref() {
            clause.set("name", text_value(name));
        }
        if let Some(color) = patch.color.as_deref() {
            clause.set("color", text_value(color));
        }
        if let Some(icon) = patch.icon.as_ref() {
            clause.set("icon", optional_text_value(icon.as_deref()));
        }
        if clause.is_empty() {
            return row_exists(self.conn(), "categories", id);
        }

        let (sql, values) = clause.into_update("categories", id);
        let changed = self.conn().execute(&sql, params_from_iter(values))?;
        Ok(changed > 0)
    }

    /// Deletes a category; referencing tasks keep existing with no category.
    pub fn delete_category(&self, id: &str) -> DbResult<()> {
        self.conn()
            .execute("DELETE FROM categories WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn query_one_category(&self, sql: &str, key: &str) -> DbResult<Option<Category>> {
        let mut stmt = self.conn().prepare(sql)?;
        let row = stmt
            .query_row([key], |row| Ok(read_category_row(row)))
            .optional()?;
        row.transpose()
    }
}

fn read_category_row(row: &Row<'_>) -> DbResult<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        color: row.get("color")?,
        icon: row.get("icon")?,
        created_at: row.get("createdAt")?,
    })
}
