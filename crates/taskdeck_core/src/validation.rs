//! Field-level validation rules per entity.
//!
//! # Responsibility
//! - Check record and patch payloads before they reach storage.
//! - Report every violated rule as a human-readable message.
//!
//! # Invariants
//! - Pure functions: no storage access, no logging, never panic.
//! - Each field is checked on its own; violations accumulate in field order.
//! - Patch validators skip absent fields. `validate_new_*` validators treat
//!   the fields required on create (title, task id, file name, ...) as
//!   required.
//! - Enum membership is guaranteed by the enum types; textual input goes
//!   through `FromStr`, whose error carries the matching message.

use crate::model::attachment::{Attachment, AttachmentPatch, MAX_ATTACHMENT_SIZE_BYTES};
use crate::model::category::{Category, CategoryPatch};
use crate::model::preferences::{PreferencesPatch, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::model::reminder::{Reminder, ReminderPatch};
use crate::model::subtask::{Subtask, SubtaskPatch};
use crate::model::task::{Task, TaskPatch};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_TITLE_MAX_CHARS: usize = 200;
const TASK_DESCRIPTION_MAX_CHARS: usize = 2000;
const CATEGORY_NAME_MAX_CHARS: usize = 50;
const CATEGORY_ICON_MAX_CHARS: usize = 50;
const SUBTASK_TITLE_MAX_CHARS: usize = 200;
const FILE_NAME_MAX_CHARS: usize = 255;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Outcome of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    /// Ordered messages, one per violated rule.
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts an invalid report into an error carrying every message.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Non-empty list of validation messages that blocked a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {}", self.0.join(", "))
    }
}

impl Error for ValidationErrors {}

/// Validates a task patch. Absent fields are not checked.
pub fn validate_task(task: &TaskPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(title) = task.title.as_deref() {
        check_task_title(title, &mut errors);
    }
    if let Some(Some(description)) = task.description.as_ref() {
        check_task_description(description, &mut errors);
    }
    if let Some(Some(due_date)) = task.due_date {
        check_timestamp(due_date, "Due date must be a valid timestamp", &mut errors);
    }
    if let Some(order) = task.order {
        check_non_negative(order, "Task order must be a non-negative number", &mut errors);
    }
    ValidationReport::from_errors(errors)
}

/// Validates a full task before insert.
pub fn validate_new_task(task: &Task) -> ValidationReport {
    let mut errors = Vec::new();
    check_task_title(&task.title, &mut errors);
    if let Some(description) = task.description.as_deref() {
        check_task_description(description, &mut errors);
    }
    if let Some(due_date) = task.due_date {
        check_timestamp(due_date, "Due date must be a valid timestamp", &mut errors);
    }
    check_non_negative(
        task.order,
        "Task order must be a non-negative number",
        &mut errors,
    );
    check_timestamp(
        task.created_at,
        "Created at must be a valid timestamp",
        &mut errors,
    );
    check_timestamp(
        task.updated_at,
        "Updated at must be a valid timestamp",
        &mut errors,
    );
    ValidationReport::from_errors(errors)
}

pub fn validate_category(category: &CategoryPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(name) = category.name.as_deref() {
        check_category_name(name, &mut errors);
    }
    if let Some(color) = category.color.as_deref() {
        check_category_color(color, &mut errors);
    }
    if let Some(Some(icon)) = category.icon.as_ref() {
        check_category_icon(icon, &mut errors);
    }
    ValidationReport::from_errors(errors)
}

pub fn validate_new_category(category: &Category) -> ValidationReport {
    let mut errors = Vec::new();
    check_category_name(&category.name, &mut errors);
    check_category_color(&category.color, &mut errors);
    if let Some(icon) = category.icon.as_deref() {
        check_category_icon(icon, &mut errors);
    }
    check_timestamp(
        category.created_at,
        "Created at must be a valid timestamp",
        &mut errors,
    );
    ValidationReport::from_errors(errors)
}

pub fn validate_subtask(subtask: &SubtaskPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(title) = subtask.title.as_deref() {
        check_subtask_title(title, &mut errors);
    }
    if let Some(task_order) = subtask.task_order {
        check_non_negative(
            task_order,
            "Subtask order must be a non-negative number",
            &mut errors,
        );
    }
    ValidationReport::from_errors(errors)
}

pub fn validate_new_subtask(subtask: &Subtask) -> ValidationReport {
    let mut errors = Vec::new();
    check_subtask_title(&subtask.title, &mut errors);
    check_required(&subtask.task_id, "Task ID is required", &mut errors);
    check_non_negative(
        subtask.task_order,
        "Subtask order must be a non-negative number",
        &mut errors,
    );
    ValidationReport::from_errors(errors)
}

pub fn validate_attachment(attachment: &AttachmentPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(file_name) = attachment.file_name.as_deref() {
        check_file_name(file_name, &mut errors);
    }
    if let Some(file_size) = attachment.file_size {
        check_file_size(file_size, &mut errors);
    }
    if let Some(file_type) = attachment.file_type.as_deref() {
        check_required(file_type, "File type is required", &mut errors);
    }
    if let Some(file_path) = attachment.file_path.as_deref() {
        check_required(file_path, "File path is required", &mut errors);
    }
    ValidationReport::from_errors(errors)
}

pub fn validate_new_attachment(attachment: &Attachment) -> ValidationReport {
    let mut errors = Vec::new();
    check_file_name(&attachment.file_name, &mut errors);
    check_file_size(attachment.file_size, &mut errors);
    check_required(&attachment.file_type, "File type is required", &mut errors);
    check_required(&attachment.file_path, "File path is required", &mut errors);
    check_required(&attachment.task_id, "Task ID is required", &mut errors);
    check_timestamp(
        attachment.created_at,
        "Created at must be a valid timestamp",
        &mut errors,
    );
    ValidationReport::from_errors(errors)
}

pub fn validate_reminder(reminder: &ReminderPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(reminder_time) = reminder.reminder_time {
        check_reminder_time(reminder_time, &mut errors);
    }
    ValidationReport::from_errors(errors)
}

pub fn validate_new_reminder(reminder: &Reminder) -> ValidationReport {
    let mut errors = Vec::new();
    check_reminder_time(reminder.reminder_time, &mut errors);
    check_required(&reminder.task_id, "Task ID is required", &mut errors);
    ValidationReport::from_errors(errors)
}

pub fn validate_preferences(prefs: &PreferencesPatch) -> ValidationReport {
    let mut errors = Vec::new();
    if let Some(font_size) = prefs.font_size {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font_size) {
            errors.push(format!(
                "Font size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}"
            ));
        }
    }
    ValidationReport::from_errors(errors)
}

fn check_task_title(title: &str, errors: &mut Vec<String>) {
    check_bounded_text(
        title,
        TASK_TITLE_MAX_CHARS,
        "Task title is required",
        "Task title must be 200 characters or less",
        errors,
    );
}

fn check_task_description(description: &str, errors: &mut Vec<String>) {
    if description.chars().count() > TASK_DESCRIPTION_MAX_CHARS {
        errors.push("Task description must be 2000 characters or less".to_string());
    }
}

fn check_category_name(name: &str, errors: &mut Vec<String>) {
    check_bounded_text(
        name,
        CATEGORY_NAME_MAX_CHARS,
        "Category name is required",
        "Category name must be 50 characters or less",
        errors,
    );
}

fn check_category_color(color: &str, errors: &mut Vec<String>) {
    if color.trim().is_empty() {
        errors.push("Category color is required".to_string());
    } else if !HEX_COLOR_RE.is_match(color) {
        errors.push("Category color must be a valid hex color (e.g., #FF5733)".to_string());
    }
}

fn check_category_icon(icon: &str, errors: &mut Vec<String>) {
    if icon.chars().count() > CATEGORY_ICON_MAX_CHARS {
        errors.push("Category icon must be 50 characters or less".to_string());
    }
}

fn check_subtask_title(title: &str, errors: &mut Vec<String>) {
    check_bounded_text(
        title,
        SUBTASK_TITLE_MAX_CHARS,
        "Subtask title is required",
        "Subtask title must be 200 characters or less",
        errors,
    );
}

fn check_file_name(file_name: &str, errors: &mut Vec<String>) {
    if file_name.trim().is_empty() {
        errors.push("File name is required".to_string());
    } else if file_name.chars().count() > FILE_NAME_MAX_CHARS {
        errors.push("File name must be 255 characters or less".to_string());
    }
}

fn check_file_size(file_size: i64, errors: &mut Vec<String>) {
    if file_size <= 0 {
        errors.push("File size must be a positive number".to_string());
    } else if file_size > MAX_ATTACHMENT_SIZE_BYTES {
        errors.push("File size cannot exceed 100MB".to_string());
    }
}

fn check_reminder_time(reminder_time: i64, errors: &mut Vec<String>) {
    if reminder_time <= 0 {
        errors.push("Reminder time is required and must be in the future".to_string());
    }
}

/// Length is measured on the trimmed value, in characters.
fn check_bounded_text(
    value: &str,
    max_chars: usize,
    required_message: &str,
    too_long_message: &str,
    errors: &mut Vec<String>,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(required_message.to_string());
    } else if trimmed.chars().count() > max_chars {
        errors.push(too_long_message.to_string());
    }
}

fn check_required(value: &str, message: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
}

fn check_timestamp(value: i64, message: &str, errors: &mut Vec<String>) {
    if value < 0 {
        errors.push(message.to_string());
    }
}

fn check_non_negative(value: i64, message: &str, errors: &mut Vec<String>) {
    if value < 0 {
        errors.push(message.to_string());
    }
}
