use blog_core::db::open_db_in_memory;
use blog_core::model::post::{FIELD_CONTENT, FIELD_SUMMARY, FIELD_TITLE};
use blog_core::{
    NewPost, Page, PostCategory, PostChanges, PostListQuery, PostService, RepoError,
    SqlitePostRepository,
};

fn body(chars: usize) -> String {
    "b".repeat(chars)
}

fn rejected_field(err: &RepoError) -> &'static str {
    err.validation()
        .unwrap_or_else(|| panic!("expected validation error, got {err}"))
        .field
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let created = service
        .create_post(
            NewPost::new("Top 10 Facts", body(250))
                .with_category(PostCategory::NonFiction)
                .with_summary("Ten facts."),
        )
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.category, Some(PostCategory::NonFiction));
    assert_eq!(created.summary.as_deref(), Some("Ten facts."));
    assert_eq!(created.updated_at, None);

    let loaded = service.get_post(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);

    let stored: String = conn
        .query_row(
            "SELECT category FROM posts WHERE id = ?1;",
            [created.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "Non-Fiction");
}

#[test]
fn create_rejects_each_invalid_field() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let err = service
        .create_post(NewPost::new("Daily News", body(300)))
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_TITLE);

    let err = service
        .create_post(NewPost::new("Guess What", body(249)))
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_CONTENT);

    let err = service
        .create_post(NewPost::new("Guess What", body(250)).with_summary("s".repeat(251)))
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_SUMMARY);

    assert!(service
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn summary_at_limit_and_absent_summary_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    service
        .create_post(NewPost::new("The Secret", body(250)).with_summary("s".repeat(250)))
        .unwrap();
    service
        .create_post(NewPost::new("The Secret", body(250)))
        .unwrap();
}

#[test]
fn update_merges_changes_and_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let created = service
        .create_post(NewPost::new("Top picks", body(260)).with_category(PostCategory::Fiction))
        .unwrap();
    let updated = service
        .update_post(
            created.id,
            PostChanges {
                title: Some("You Won't Believe These Picks".to_string()),
                summary: Some(Some("Picks.".to_string())),
                ..PostChanges::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "You Won't Believe These Picks");
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.category, Some(PostCategory::Fiction));
    assert_eq!(updated.summary.as_deref(), Some("Picks."));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[test]
fn rejected_update_leaves_every_field_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let created = service
        .create_post(NewPost::new("Top picks", body(260)))
        .unwrap();

    let err = service
        .update_post(
            created.id,
            PostChanges {
                title: Some("Top picks, revised".to_string()),
                category: Some(Some(PostCategory::NonFiction)),
                content: Some(body(10)),
                ..PostChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_CONTENT);

    let loaded = service.get_post(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn update_can_clear_category_and_summary() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let created = service
        .create_post(
            NewPost::new("Top picks", body(260))
                .with_category(PostCategory::Fiction)
                .with_summary("short"),
        )
        .unwrap();
    let updated = service
        .update_post(
            created.id,
            PostChanges {
                category: Some(None),
                summary: Some(None),
                ..PostChanges::default()
            },
        )
        .unwrap();
    assert_eq!(updated.category, None);
    assert_eq!(updated.summary, None);
}

#[test]
fn update_missing_post_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let err = service
        .update_post(7, PostChanges::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "post", id: 7 }));
}

#[test]
fn list_filters_by_category_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let fiction_a = service
        .create_post(NewPost::new("Top A", body(250)).with_category(PostCategory::Fiction))
        .unwrap();
    service
        .create_post(NewPost::new("Top B", body(250)).with_category(PostCategory::NonFiction))
        .unwrap();
    let fiction_c = service
        .create_post(NewPost::new("Top C", body(250)).with_category(PostCategory::Fiction))
        .unwrap();
    service
        .create_post(NewPost::new("Top D", body(250)))
        .unwrap();

    let fiction = service
        .list_posts(&PostListQuery {
            category: Some(PostCategory::Fiction),
            ..PostListQuery::default()
        })
        .unwrap();
    let ids: Vec<i64> = fiction.iter().map(|post| post.id).collect();
    assert_eq!(ids, [fiction_a.id, fiction_c.id]);

    let page = service
        .list_posts(&PostListQuery {
            category: None,
            page: Page {
                limit: Some(2),
                offset: 2,
            },
        })
        .unwrap();
    let titles: Vec<&str> = page.iter().map(|post| post.title.as_str()).collect();
    assert_eq!(titles, ["Top C", "Top D"]);
}

#[test]
fn delete_removes_post() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let post = service
        .create_post(NewPost::new("Top picks", body(250)))
        .unwrap();
    service.delete_post(post.id).unwrap();
    assert_eq!(service.get_post(post.id).unwrap(), None);
    assert!(matches!(
        service.delete_post(post.id).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn invalid_persisted_row_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO posts (title, content) VALUES ('Daily News', 'short');",
        [],
    )
    .unwrap();
    let service = PostService::new(SqlitePostRepository::new(&conn));

    let err = service.get_post(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
