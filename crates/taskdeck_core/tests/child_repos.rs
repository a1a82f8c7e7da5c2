use taskdeck_core::{
    Attachment, AttachmentPatch, AttachmentRepository, ChildRepository, ErrorCode, RecurringRule,
    RepoError, Reminder, ReminderPatch, ReminderRepository, Repository, Store, Subtask,
    SubtaskPatch, SubtaskRepository, Task, TaskRepository,
};

fn store_with_tasks(ids: &[&str]) -> Store {
    let store = Store::open_in_memory().unwrap();
    let tasks = TaskRepository::new(&store);
    for id in ids {
        tasks.create(Task::new(*id, format!("task {id}"))).unwrap();
    }
    store
}

#[test]
fn subtasks_are_ordered_within_their_task_and_toggle_in_place() {
    let store = store_with_tasks(&["t-1", "t-2"]);
    let repo = SubtaskRepository::new(&store);

    repo.create(Subtask::new("s-b", "t-1", "second", 1)).unwrap();
    repo.create(Subtask::new("s-a", "t-1", "first", 0)).unwrap();
    repo.create(Subtask::new("s-c", "t-2", "other", 0)).unwrap();

    let ids: Vec<String> = repo
        .get_by_task_id("t-1")
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, ["s-a", "s-b"]);
    assert_eq!(repo.get_all().unwrap().len(), 3);

    assert!(repo.toggle_complete("s-a").unwrap().completed);
    assert!(!repo.toggle_complete("s-a").unwrap().completed);
    assert!(matches!(
        repo.toggle_complete("s-missing"),
        Err(RepoError::NotFound { entity: "subtask", .. })
    ));

    repo.update(
        "s-b",
        &SubtaskPatch {
            title: Some("renamed".to_string()),
            ..SubtaskPatch::default()
        },
    )
    .unwrap();
    assert_eq!(repo.get_by_id("s-b").unwrap().unwrap().title, "renamed");
}

#[test]
fn subtask_for_unknown_task_is_rejected() {
    let store = store_with_tasks(&[]);
    let repo = SubtaskRepository::new(&store);

    let err = repo
        .create(Subtask::new("s-1", "ghost", "step", 0))
        .unwrap_err();
    assert!(err.code().is_some());
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn attachments_validate_size_and_delete_by_task() {
    let store = store_with_tasks(&["t-1", "t-2"]);
    let repo = AttachmentRepository::new(&store);

    let err = repo
        .create(Attachment::new("a-0", "t-1", "empty.txt", 0, "text/plain", "/f/empty.txt"))
        .unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().to_vec(),
        vec!["File size must be a positive number"]
    );

    repo.create(Attachment::new("a-1", "t-1", "a.pdf", 10, "application/pdf", "/f/a.pdf"))
        .unwrap();
    repo.create(Attachment::new("a-2", "t-1", "b.png", 20, "image/png", "/f/b.png"))
        .unwrap();
    repo.create(Attachment::new("a-3", "t-2", "c.png", 30, "image/png", "/f/c.png"))
        .unwrap();

    repo.update(
        "a-2",
        &AttachmentPatch {
            file_name: Some("cover.png".to_string()),
            ..AttachmentPatch::default()
        },
    )
    .unwrap();
    assert_eq!(
        repo.get_by_id("a-2").unwrap().unwrap().file_name,
        "cover.png"
    );

    repo.delete_by_task_id("t-1").unwrap();
    assert!(repo.get_by_task_id("t-1").unwrap().is_empty());
    assert_eq!(repo.get_all().unwrap().len(), 1);
}

#[test]
fn reminders_report_active_ones_soonest_first() {
    let store = store_with_tasks(&["t-1", "t-2"]);
    let repo = ReminderRepository::new(&store);

    repo.create(Reminder::new("r-late", "t-1", 9_000)).unwrap();
    let mut weekly = Reminder::new("r-early", "t-2", 1_000);
    weekly.recurring_rule = Some(RecurringRule::Weekly);
    repo.create(weekly).unwrap();
    repo.create(Reminder::new("r-mid", "t-1", 5_000)).unwrap();

    repo.update(
        "r-mid",
        &ReminderPatch {
            is_active: Some(false),
            ..ReminderPatch::default()
        },
    )
    .unwrap();

    let active: Vec<String> = repo.get_active().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(active, ["r-early", "r-late"]);

    let by_task: Vec<String> = repo
        .get_by_task_id("t-1")
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(by_task, ["r-mid", "r-late"]);

    let loaded = repo.get_by_id("r-early").unwrap().unwrap();
    assert_eq!(loaded.recurring_rule, Some(RecurringRule::Weekly));

    let err = repo.create(Reminder::new("r-zero", "t-1", 0)).unwrap_err();
    assert!(err.validation_errors().is_some());
}

#[test]
fn deleting_a_task_cascades_to_every_child_table() {
    let store = store_with_tasks(&["t-1", "t-2"]);
    let tasks = TaskRepository::new(&store);
    let subtasks = SubtaskRepository::new(&store);
    let attachments = AttachmentRepository::new(&store);
    let reminders = ReminderRepository::new(&store);

    subtasks.create(Subtask::new("s-1", "t-1", "step", 0)).unwrap();
    subtasks.create(Subtask::new("s-2", "t-2", "keep", 0)).unwrap();
    attachments
        .create(Attachment::new("a-1", "t-1", "a.pdf", 1, "application/pdf", "/f/a.pdf"))
        .unwrap();
    reminders.create(Reminder::new("r-1", "t-1", 1_000)).unwrap();

    tasks.delete("t-1").unwrap();

    assert!(subtasks.get_by_task_id("t-1").unwrap().is_empty());
    assert!(attachments.get_by_task_id("t-1").unwrap().is_empty());
    assert!(reminders.get_by_task_id("t-1").unwrap().is_empty());
    assert_eq!(subtasks.get_all().unwrap().len(), 1);
}

#[test]
fn delete_all_wipes_the_whole_store_from_any_repository() {
    let store = store_with_tasks(&["t-1"]);
    let subtasks = SubtaskRepository::new(&store);
    subtasks.create(Subtask::new("s-1", "t-1", "step", 0)).unwrap();

    subtasks.delete_all().unwrap();

    assert!(TaskRepository::new(&store).get_all().unwrap().is_empty());
    assert!(subtasks.get_all().unwrap().is_empty());
}

#[test]
fn empty_patches_are_rejected_before_storage_on_child_repositories() {
    let store = store_with_tasks(&["t-1"]);
    let subtasks = SubtaskRepository::new(&store);
    let attachments = AttachmentRepository::new(&store);
    let reminders = ReminderRepository::new(&store);

    // Unknown ids would be NotFound if storage had been consulted.
    let errors = [
        subtasks.update("s-404", &SubtaskPatch::default()).unwrap_err(),
        attachments
            .update("a-404", &AttachmentPatch::default())
            .unwrap_err(),
        reminders
            .update("r-404", &ReminderPatch::default())
            .unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.code(), Some(ErrorCode::RepoError));
        assert_eq!(err.to_string(), "No updates provided");
    }

    subtasks.create(Subtask::new("s-1", "t-1", "step", 0)).unwrap();
    let err = subtasks.update("s-1", &SubtaskPatch::default()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));
    assert_eq!(subtasks.get_by_id("s-1").unwrap().unwrap().title, "step");
}
