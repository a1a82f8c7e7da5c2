use taskdeck_core::{
    ErrorCode, RepoError, Repository, Store, Task, TaskChanges, TaskFilter, TaskPatch,
    TaskPriority, TaskRepository, TaskStatus,
};

fn task_at(id: &str, title: &str, created_at: i64) -> Task {
    let mut task = Task::new(id, title);
    task.created_at = created_at;
    task.updated_at = created_at;
    task
}

#[test]
fn create_then_get_by_id_returns_the_same_record() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let mut task = task_at("t-1", "Write report", 1_000);
    task.description = Some("quarterly numbers".to_string());
    task.priority = TaskPriority::High;
    task.due_date = Some(5_000);
    task.order = 3;

    let created = repo.create(task.clone()).unwrap();
    assert_eq!(created, task);
    assert_eq!(repo.get_by_id("t-1").unwrap(), Some(task));
    assert_eq!(repo.get_by_id("missing").unwrap(), None);
}

#[test]
fn create_raises_stale_updated_at_to_created_at() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let mut task = task_at("t-1", "Backdated", 2_000);
    task.updated_at = 1_500;
    let created = repo.create(task).unwrap();
    assert_eq!(created.updated_at, 2_000);
    assert_eq!(repo.get_by_id("t-1").unwrap().unwrap().updated_at, 2_000);
}

#[test]
fn invalid_create_reports_every_violation_and_writes_nothing() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let mut task = task_at("t-1", "  ", 1_000);
    task.description = Some("d".repeat(2001));

    let err = repo.create(task).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().to_vec(),
        vec![
            "Task title is required",
            "Task description must be 2000 characters or less",
        ]
    );
    assert!(err.to_string().starts_with("Validation failed: "));
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn empty_update_fails_before_touching_storage() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    // An unknown id would be NotFound if storage had been consulted.
    let err = repo.update("missing", &TaskPatch::default()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));
    assert_eq!(err.to_string(), "No updates provided");

    repo.create(task_at("t-1", "Stable", 1_000)).unwrap();
    repo.update("t-1", &TaskPatch::default()).unwrap_err();
    assert_eq!(repo.get_by_id("t-1").unwrap().unwrap().updated_at, 1_000);
}

#[test]
fn update_rewrites_only_present_fields_and_refreshes_updated_at() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let mut task = task_at("t-1", "Draft", 1_000);
    task.description = Some("keep me".to_string());
    task.due_date = Some(9_000);
    repo.create(task).unwrap();

    repo.update(
        "t-1",
        &TaskPatch {
            title: Some("Final".to_string()),
            due_date: Some(None),
            ..TaskPatch::default()
        },
    )
    .unwrap();

    let loaded = repo.get_by_id("t-1").unwrap().unwrap();
    assert_eq!(loaded.title, "Final");
    assert_eq!(loaded.description.as_deref(), Some("keep me"));
    assert_eq!(loaded.due_date, None);
    assert_eq!(loaded.created_at, 1_000);
    assert!(loaded.updated_at > 1_000);
}

#[test]
fn update_of_unknown_task_is_not_found_and_delete_is_idempotent() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let err = repo
        .update("ghost", &TaskPatch::status(TaskStatus::Completed))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "task", ref id } if id == "ghost"));
    assert_eq!(err.code(), None);

    repo.create(task_at("t-1", "Short lived", 1_000)).unwrap();
    repo.delete("t-1").unwrap();
    repo.delete("t-1").unwrap();
    assert!(repo.get_by_id("t-1").unwrap().is_none());
}

#[test]
fn lists_are_ordered_by_order_then_newest_first() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let mut pinned = task_at("pinned", "Pinned", 1_000);
    pinned.order = 0;
    let mut old = task_at("old", "Old", 1_000);
    old.order = 1;
    let mut new = task_at("new", "New", 2_000);
    new.order = 1;
    let mut last = task_at("last", "Last", 3_000);
    last.order = 5;

    for task in [last, old, pinned, new] {
        repo.create(task).unwrap();
    }

    let ids: Vec<String> = repo.get_all().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["pinned", "new", "old", "last"]);
}

#[test]
fn filter_is_a_conjunction_in_display_order() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    let fixtures = [
        ("a", TaskStatus::Completed, TaskPriority::High, 1_000),
        ("b", TaskStatus::Completed, TaskPriority::Low, 2_000),
        ("c", TaskStatus::Incomplete, TaskPriority::High, 3_000),
        ("d", TaskStatus::Completed, TaskPriority::High, 4_000),
    ];
    for (id, status, priority, created_at) in fixtures {
        let mut task = task_at(id, id, created_at);
        task.status = status;
        task.priority = priority;
        task.due_date = Some(created_at * 10);
        repo.create(task).unwrap();
    }

    let filter = TaskFilter {
        status: Some(TaskStatus::Completed),
        priority: Some(TaskPriority::High),
        ..TaskFilter::default()
    };
    let ids: Vec<String> = repo
        .filter(&filter)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["d", "a"]);

    let ranged = TaskFilter {
        due_date_from: Some(20_000),
        due_date_to: Some(30_000),
        ..TaskFilter::default()
    };
    let ids: Vec<String> = repo
        .filter(&ranged)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["c", "b"]);

    assert_eq!(repo.filter(&TaskFilter::default()).unwrap().len(), 4);
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    repo.create(task_at("t-1", "Buy Groceries", 1_000)).unwrap();
    let mut described = task_at("t-2", "Errands", 2_000);
    described.description = Some("groceries and post office".to_string());
    repo.create(described).unwrap();
    repo.create(task_at("t-3", "Gym", 3_000)).unwrap();

    let ids: Vec<String> = repo
        .search("GROCERIES")
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["t-2", "t-1"]);

    assert_eq!(repo.search("groceries").unwrap().len(), 2);
    assert!(repo.search("   ").unwrap().is_empty());
    assert!(repo.search("100%").unwrap().is_empty());
}

#[test]
fn search_matches_the_query_verbatim() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);

    repo.create(task_at("t-1", "Buy Groceries", 1_000)).unwrap();
    repo.create(task_at("t-2", "Gym", 2_000)).unwrap();

    assert!(repo.search("groceries ").unwrap().is_empty());
    assert_eq!(repo.search("").unwrap().len(), 2);
    assert_eq!(repo.search("buy g").unwrap().len(), 1);

    let trailing_space = TaskFilter {
        search_query: Some("gym ".to_string()),
        ..TaskFilter::default()
    };
    assert!(repo.filter(&trailing_space).unwrap().is_empty());
    let exact = TaskFilter {
        search_query: Some("GYM".to_string()),
        ..TaskFilter::default()
    };
    assert_eq!(repo.filter(&exact).unwrap().len(), 1);
}

#[test]
fn toggle_twice_returns_to_incomplete() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);
    repo.create(task_at("t-1", "Flip", 1_000)).unwrap();

    let once = repo.toggle_status("t-1").unwrap();
    assert_eq!(once.status, TaskStatus::Completed);
    let twice = repo.toggle_status("t-1").unwrap();
    assert_eq!(twice.status, TaskStatus::Incomplete);
}

#[test]
fn toggle_leaves_in_progress_and_archived_untouched() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);
    repo.create(task_at("t-1", "Busy", 1_000)).unwrap();

    let archived = repo.set_status("t-1", TaskStatus::Archived).unwrap();
    assert_eq!(archived.status, TaskStatus::Archived);
    assert_eq!(
        repo.toggle_status("t-1").unwrap().status,
        TaskStatus::Archived
    );

    // Any status may move to any other directly.
    let reopened = repo.set_status("t-1", TaskStatus::InProgress).unwrap();
    assert_eq!(reopened.status, TaskStatus::InProgress);
    assert_eq!(
        repo.toggle_status("t-1").unwrap().status,
        TaskStatus::InProgress
    );

    assert!(matches!(
        repo.toggle_status("missing"),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn batch_update_stops_at_first_failure_keeping_earlier_items() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);
    repo.create(task_at("t-1", "One", 1_000)).unwrap();
    repo.create(task_at("t-3", "Three", 3_000)).unwrap();

    let done = TaskPatch::status(TaskStatus::Completed);
    let err = repo
        .batch_update(&[
            TaskChanges::new("t-1", done.clone()),
            TaskChanges::new("t-2", done.clone()),
            TaskChanges::new("t-3", done),
        ])
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { ref id, .. } if id == "t-2"));

    let status_of = |id: &str| repo.get_by_id(id).unwrap().unwrap().status;
    assert_eq!(status_of("t-1"), TaskStatus::Completed);
    assert_eq!(status_of("t-3"), TaskStatus::Incomplete);
}

#[test]
fn batch_delete_removes_every_listed_task() {
    let store = Store::open_in_memory().unwrap();
    let repo = TaskRepository::new(&store);
    for (id, created_at) in [("t-1", 1_000), ("t-2", 2_000), ("t-3", 3_000)] {
        repo.create(task_at(id, id, created_at)).unwrap();
    }

    repo.batch_delete(&["t-1", "t-3", "never-existed"]).unwrap();
    let ids: Vec<String> = repo.get_all().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["t-2"]);
}

#[test]
fn task_wire_shape_uses_camel_case_and_snake_case_enums() {
    let mut task = task_at("t-1", "Wire", 1_000);
    task.status = TaskStatus::InProgress;
    task.category_id = Some("c-1".to_string());

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["categoryId"], "c-1");
    assert_eq!(json["createdAt"], 1_000);
    assert!(json.get("description").is_none());

    let back: Task = serde_json::from_value(json).unwrap();
    assert_eq!(back, task);
}
