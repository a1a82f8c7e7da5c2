use taskdeck_core::{
    Category, CategoryPatch, CategoryRepository, ErrorCode, RepoError, Repository, Store, Task,
    TaskFilter, TaskRepository,
};

#[test]
fn categories_list_by_name_and_resolve_by_exact_name() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    repo.create(Category::new("c-2", "Work", "#4CAF50")).unwrap();
    repo.create(Category::new("c-1", "Home", "#2196F3")).unwrap();

    let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Home", "Work"]);

    assert_eq!(repo.get_by_name("Work").unwrap().unwrap().id, "c-2");
    assert!(repo.get_by_name("work").unwrap().is_none());
}

#[test]
fn invalid_color_is_rejected_without_writing() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    let err = repo
        .create(Category::new("c-1", "Work", "green"))
        .unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap().to_vec(),
        vec!["Category color must be a valid hex color (e.g., #FF5733)"]
    );
    assert!(repo.get_by_id("c-1").unwrap().is_none());
}

#[test]
fn duplicate_names_surface_as_repo_error() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    repo.create(Category::new("c-1", "Work", "#4CAF50")).unwrap();
    let err = repo
        .create(Category::new("c-2", "Work", "#000000"))
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));
    match err {
        RepoError::Repository(inner) => assert_eq!(inner.context, "CategoryRepository.create"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn update_can_clear_icon_and_rejects_unknown_ids() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    let mut category = Category::new("c-1", "Work", "#4CAF50");
    category.icon = Some("briefcase".to_string());
    repo.create(category).unwrap();

    repo.update(
        "c-1",
        &CategoryPatch {
            color: Some("#FF5733".to_string()),
            icon: Some(None),
            ..CategoryPatch::default()
        },
    )
    .unwrap();
    let loaded = repo.get_by_id("c-1").unwrap().unwrap();
    assert_eq!(loaded.color, "#FF5733");
    assert_eq!(loaded.icon, None);
    assert_eq!(loaded.name, "Work");

    let err = repo
        .update(
            "c-404",
            &CategoryPatch {
                name: Some("Nope".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "category", .. }));
}

#[test]
fn deleting_a_category_detaches_its_tasks() {
    let store = Store::open_in_memory().unwrap();
    let categories = CategoryRepository::new(&store);
    let tasks = TaskRepository::new(&store);

    categories
        .create(Category::new("c-1", "Errands", "#795548"))
        .unwrap();
    for id in ["t-1", "t-2"] {
        let mut task = Task::new(id, id);
        task.category_id = Some("c-1".to_string());
        tasks.create(task).unwrap();
    }
    assert_eq!(tasks.get_by_category("c-1").unwrap().len(), 2);

    categories.delete("c-1").unwrap();

    let remaining = tasks.get_all().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|task| task.category_id.is_none()));
    assert!(tasks.get_by_category("c-1").unwrap().is_empty());
}

#[test]
fn task_referencing_unknown_category_is_rejected_by_storage() {
    let store = Store::open_in_memory().unwrap();
    let tasks = TaskRepository::new(&store);

    let mut task = Task::new("t-1", "Orphan");
    task.category_id = Some("missing".to_string());
    let err = tasks.create(task).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));
    assert!(tasks.get_all().unwrap().is_empty());

    let all = tasks
        .filter(&TaskFilter {
            category_id: Some("missing".to_string()),
            ..TaskFilter::default()
        })
        .unwrap();
    assert!(all.is_empty());
}

#[test]
fn empty_patch_is_rejected_before_storage() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    let err = repo.update("c-404", &CategoryPatch::default()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));
    assert_eq!(err.to_string(), "No updates provided");
}

#[test]
fn names_are_stored_trimmed_and_unique_after_trimming() {
    let store = Store::open_in_memory().unwrap();
    let repo = CategoryRepository::new(&store);

    let created = repo.create(Category::new("c-1", "  Work ", "#4CAF50")).unwrap();
    assert_eq!(created.name, "Work");
    assert_eq!(repo.get_by_id("c-1").unwrap().unwrap().name, "Work");
    assert_eq!(repo.get_by_name(" Work").unwrap().unwrap().id, "c-1");

    let err = repo
        .create(Category::new("c-2", "Work\t", "#000000"))
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));

    repo.create(Category::new("c-3", "Home", "#2196F3")).unwrap();
    let err = repo
        .update(
            "c-3",
            &CategoryPatch {
                name: Some(" Work ".to_string()),
                ..CategoryPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::RepoError));

    repo.update(
        "c-3",
        &CategoryPatch {
            name: Some(" House ".to_string()),
            ..CategoryPatch::default()
        },
    )
    .unwrap();
    assert_eq!(repo.get_by_id("c-3").unwrap().unwrap().name, "House");
}
