use chrono::{DateTime, NaiveDateTime};
use diesel::prelude::*;
use hoots::domain::hoot::{HootChanges, NewComment, NewHoot};
use hoots::domain::types::{CommentText, HootCategory, HootId, HootText, HootTitle, UserId};
use hoots::repository::{DieselRepository, HootReader, HootWriter, RepositoryError, UserReader};
use hoots::schema::comments;

mod common;

fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

fn new_hoot(title: &str, author: i32, created: i64) -> NewHoot {
    NewHoot {
        title: HootTitle::new(title).unwrap(),
        text: HootText::new("body").unwrap(),
        category: HootCategory::News,
        author: UserId::new(author).unwrap(),
        created_at: at(created),
        updated_at: at(created),
    }
}

fn new_comment(text: &str, author: i32, created: i64) -> NewComment {
    NewComment {
        text: CommentText::new(text).unwrap(),
        author: UserId::new(author).unwrap(),
        created_at: at(created),
        updated_at: at(created),
    }
}

#[test]
fn create_hoot_returns_stored_hoot_without_comments() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let hoot = repo.create_hoot(&new_hoot("First", 1, 100)).unwrap();

    assert_eq!(hoot.title.as_str(), "First");
    assert_eq!(hoot.author, 1);
    assert!(hoot.comments.is_empty());
    assert_eq!(hoot.created_at, at(100));

    let loaded = repo.get_hoot_by_id(hoot.id).unwrap().unwrap();
    assert_eq!(loaded.id, hoot.id);
    assert_eq!(loaded.category, HootCategory::News);
    assert_eq!(loaded.updated_at, at(100));
}

#[test]
fn list_hoots_is_newest_first() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_hoot(&new_hoot("old", 1, 100)).unwrap();
    repo.create_hoot(&new_hoot("new", 1, 300)).unwrap();
    repo.create_hoot(&new_hoot("middle", 2, 200)).unwrap();

    let titles: Vec<String> = repo
        .list_hoots()
        .unwrap()
        .into_iter()
        .map(|h| h.title.into_inner())
        .collect();
    assert_eq!(titles, vec!["new", "middle", "old"]);
}

#[test]
fn missing_hoot_is_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    assert!(repo.get_hoot_by_id(HootId::new(42).unwrap()).unwrap().is_none());
}

#[test]
fn save_hoot_persists_fields_and_comment_changes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut hoot = repo.create_hoot(&new_hoot("Draft", 1, 100)).unwrap();
    hoot.add_comment(new_comment("first", 2, 110));
    hoot.add_comment(new_comment("second", 3, 120));
    let hoot = repo.save_hoot(&hoot).unwrap();
    assert_eq!(hoot.comments.len(), 2);
    assert_eq!(hoot.comments[0].text.as_str(), "first");

    let mut hoot = hoot;
    let first = hoot.comments[0].id;
    let second = hoot.comments[1].id;
    hoot.apply(
        HootChanges {
            title: Some(HootTitle::new("Final").unwrap()),
            ..HootChanges::default()
        },
        at(150),
    );
    hoot.edit_comment(first, CommentText::new("first, edited").unwrap(), at(150))
        .unwrap();
    hoot.remove_comment(second, at(150)).unwrap();
    repo.save_hoot(&hoot).unwrap();

    let stored = repo.get_hoot_by_id(hoot.id).unwrap().unwrap();
    assert_eq!(stored.title.as_str(), "Final");
    assert_eq!(stored.updated_at, at(150));
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].id, first);
    assert_eq!(stored.comments[0].text.as_str(), "first, edited");
    assert_eq!(stored.comments[0].created_at, at(110));
    assert_eq!(stored.comments[0].updated_at, at(150));
}

#[test]
fn save_hoot_after_delete_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut hoot = repo.create_hoot(&new_hoot("Gone", 1, 100)).unwrap();
    assert_eq!(repo.delete_hoot(hoot.id).unwrap(), 1);

    hoot.add_comment(new_comment("too late", 2, 110));
    let err = repo.save_hoot(&hoot).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn editing_a_comment_removed_elsewhere_is_not_found() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut hoot = repo.create_hoot(&new_hoot("Shared", 1, 100)).unwrap();
    hoot.add_comment(new_comment("original", 2, 110));
    let hoot = repo.save_hoot(&hoot).unwrap();
    let comment_id = hoot.comments[0].id;

    let mut remover = repo.get_hoot_by_id(hoot.id).unwrap().unwrap();
    let mut editor = repo.get_hoot_by_id(hoot.id).unwrap().unwrap();

    remover.remove_comment(comment_id, at(120)).unwrap();
    repo.save_hoot(&remover).unwrap();

    editor
        .edit_comment(comment_id, CommentText::new("too late").unwrap(), at(130))
        .unwrap();
    let err = repo.save_hoot(&editor).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    let stored = repo.get_hoot_by_id(hoot.id).unwrap().unwrap();
    assert!(stored.comments.is_empty());
    assert_eq!(stored.updated_at, at(120));
}

#[test]
fn delete_hoot_removes_its_comments() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut doomed = repo.create_hoot(&new_hoot("doomed", 1, 100)).unwrap();
    doomed.add_comment(new_comment("a", 2, 110));
    let doomed = repo.save_hoot(&doomed).unwrap();

    let mut kept = repo.create_hoot(&new_hoot("kept", 1, 200)).unwrap();
    kept.add_comment(new_comment("b", 2, 210));
    repo.save_hoot(&kept).unwrap();

    assert_eq!(repo.delete_hoot(doomed.id).unwrap(), 1);
    assert_eq!(repo.delete_hoot(doomed.id).unwrap(), 0);

    let mut conn = test_db.pool().get().unwrap();
    let remaining: i64 = comments::table.count().get_result(&mut conn).unwrap();
    assert_eq!(remaining, 1);
    assert!(repo.get_hoot_by_id(doomed.id).unwrap().is_none());
}

#[test]
fn list_users_by_ids_skips_unknown_ids() {
    let test_db = common::TestDb::new();
    test_db.insert_user(1, "alice");
    test_db.insert_user(2, "bob");
    let repo = DieselRepository::new(test_db.pool());

    let ids = [UserId::new(2).unwrap(), UserId::new(9).unwrap()];
    let users = repo.list_users_by_ids(&ids).unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username.as_str(), "bob");
    assert!(repo.list_users_by_ids(&[]).unwrap().is_empty());
}
