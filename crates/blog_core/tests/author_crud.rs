use blog_core::db::open_db_in_memory;
use blog_core::model::author::{FIELD_NAME, FIELD_PHONE_NUMBER};
use blog_core::{
    AuthorChanges, AuthorListQuery, AuthorRepository, AuthorService, NewAuthor, Page, RepoError,
    SqliteAuthorRepository,
};

fn rejected_field(err: &RepoError) -> &'static str {
    err.validation()
        .unwrap_or_else(|| panic!("expected validation error, got {err}"))
        .field
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let created = service
        .create_author(NewAuthor::new("Ada Lovelace").with_phone_number("5551234567"))
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.name, "Ada Lovelace");
    assert_eq!(created.phone_number.as_deref(), Some("5551234567"));
    assert!(created.created_at > 0);
    assert_eq!(created.updated_at, None);

    let loaded = service.get_author(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_without_phone_number_is_allowed() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let created = service.create_author(NewAuthor::new("Grace")).unwrap();
    assert_eq!(created.phone_number, None);
}

#[test]
fn create_rejects_empty_name() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let err = service.create_author(NewAuthor::new("")).unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_NAME);
    assert!(service
        .list_authors(&AuthorListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn create_rejects_duplicate_name() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    service.create_author(NewAuthor::new("Ada")).unwrap();
    let err = service.create_author(NewAuthor::new("Ada")).unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_NAME);
    assert_eq!(err.validation().unwrap().message, "Author name must be unique.");

    // Exact match only.
    service.create_author(NewAuthor::new("ada")).unwrap();
}

#[test]
fn create_rejects_malformed_phone_numbers() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    for phone in ["555-123-4567", "555123456", "55512345678", "555123456a"] {
        let err = service
            .create_author(NewAuthor::new(format!("Author {phone}")).with_phone_number(phone))
            .unwrap_err();
        assert_eq!(rejected_field(&err), FIELD_PHONE_NUMBER, "phone {phone}");
    }
}

#[test]
fn update_can_keep_own_name() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let created = service.create_author(NewAuthor::new("Ada")).unwrap();
    let updated = service
        .update_author(
            created.id,
            AuthorChanges {
                name: Some("Ada".to_string()),
                phone_number: Some(Some("5550001111".to_string())),
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.phone_number.as_deref(), Some("5550001111"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[test]
fn update_rejects_name_held_by_another_author() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    service.create_author(NewAuthor::new("Ada")).unwrap();
    let grace = service.create_author(NewAuthor::new("Grace")).unwrap();

    let err = service
        .update_author(
            grace.id,
            AuthorChanges {
                name: Some("Ada".to_string()),
                ..AuthorChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_NAME);
}

#[test]
fn rejected_update_leaves_every_field_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let created = service
        .create_author(NewAuthor::new("Ada").with_phone_number("5551234567"))
        .unwrap();

    let err = service
        .update_author(
            created.id,
            AuthorChanges {
                name: Some("Ada Byron".to_string()),
                phone_number: Some(Some("555-123-4567".to_string())),
            },
        )
        .unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_PHONE_NUMBER);

    let loaded = service.get_author(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn update_can_clear_phone_number() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let created = service
        .create_author(NewAuthor::new("Ada").with_phone_number("5551234567"))
        .unwrap();
    let updated = service
        .update_author(
            created.id,
            AuthorChanges {
                phone_number: Some(None),
                ..AuthorChanges::default()
            },
        )
        .unwrap();
    assert_eq!(updated.phone_number, None);
}

#[test]
fn update_missing_author_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let err = service
        .update_author(42, AuthorChanges::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "author",
            id: 42
        }
    ));
}

#[test]
fn storage_and_fast_path_both_reject_name_clash() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let first = repo.create_author(&NewAuthor::new("Ada")).unwrap();
    let second = repo.create_author(&NewAuthor::new("Grace")).unwrap();

    // Simulate a racing writer that skipped the fast path.
    let err = conn
        .execute(
            "UPDATE authors SET name = 'Ada' WHERE id = ?1;",
            [second],
        )
        .unwrap_err();
    assert!(err.to_string().contains("UNIQUE"));

    let ada = repo.get_author(first).unwrap().unwrap();
    let mut clash = repo.get_author(second).unwrap().unwrap();
    clash.name = ada.name.clone();
    let err = repo.update_author(&clash).unwrap_err();
    assert_eq!(rejected_field(&err), FIELD_NAME);
}

#[test]
fn find_by_name_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let ada = service.create_author(NewAuthor::new("Ada")).unwrap();
    assert_eq!(service.find_author_by_name("Ada").unwrap(), Some(ada));
    assert_eq!(service.find_author_by_name("ADA").unwrap(), None);
}

#[test]
fn list_is_ordered_by_id_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let names = ["A", "B", "C", "D"];
    for name in names {
        service.create_author(NewAuthor::new(name)).unwrap();
    }

    let all = service.list_authors(&AuthorListQuery::default()).unwrap();
    let listed: Vec<&str> = all.iter().map(|author| author.name.as_str()).collect();
    assert_eq!(listed, names);

    let page = service
        .list_authors(&AuthorListQuery {
            page: Page {
                limit: Some(2),
                offset: 1,
            },
        })
        .unwrap();
    let listed: Vec<&str> = page.iter().map(|author| author.name.as_str()).collect();
    assert_eq!(listed, ["B", "C"]);

    let tail = service
        .list_authors(&AuthorListQuery {
            page: Page {
                limit: None,
                offset: 3,
            },
        })
        .unwrap();
    assert_eq!(tail.len(), 1);
}

#[test]
fn delete_removes_author_and_frees_name() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::new(&conn));

    let ada = service.create_author(NewAuthor::new("Ada")).unwrap();
    service.delete_author(ada.id).unwrap();
    assert_eq!(service.get_author(ada.id).unwrap(), None);

    let err = service.delete_author(ada.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));

    service.create_author(NewAuthor::new("Ada")).unwrap();
}

#[test]
fn invalid_persisted_row_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Ada', 'not-a-phone');",
        [],
    )
    .unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let err = repo
        .list_authors(&AuthorListQuery::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
