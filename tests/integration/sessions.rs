//! Session and cursor behavior through the facade.

use arbor::api::Namespace;
use arbor::error::NamespaceError;

#[test]
fn cursor_resolution_follows_shell_rules() {
    let ns = Namespace::new();
    let id = ns.open_session();
    ns.make_directory(&id, "/a/b").unwrap();

    ns.change_directory(&id, "/a/b").unwrap();
    assert_eq!(ns.change_directory(&id, "..").unwrap().to_string(), "/a");

    ns.change_directory(&id, "/a/b").unwrap();
    assert_eq!(ns.change_directory(&id, "../..").unwrap().to_string(), "/");

    // `..` from the root stays at the root.
    assert_eq!(ns.change_directory(&id, "..").unwrap().to_string(), "/");
}

#[test]
fn failed_cd_leaves_cursor_unchanged() {
    let ns = Namespace::new();
    let id = ns.open_session();
    ns.make_directory(&id, "/a").unwrap();
    ns.change_directory(&id, "/a").unwrap();

    assert!(matches!(
        ns.change_directory(&id, "missing"),
        Err(NamespaceError::InvalidPath(_))
    ));
    assert_eq!(ns.current_working_directory(&id).unwrap().to_string(), "/a");
}

#[test]
fn sessions_hold_independent_cursors() {
    let ns = Namespace::new();
    let first = ns.open_session();
    let second = ns.open_session();
    ns.make_directory(&first, "/x").unwrap();
    ns.make_directory(&first, "/y").unwrap();

    ns.change_directory(&first, "/x").unwrap();
    ns.change_directory(&second, "/y").unwrap();

    assert_eq!(ns.current_working_directory(&first).unwrap().to_string(), "/x");
    assert_eq!(
        ns.current_working_directory(&second).unwrap().to_string(),
        "/y"
    );
}

#[test]
fn mutations_are_visible_across_sessions_immediately() {
    let ns = Namespace::new();
    let writer = ns.open_session();
    let reader = ns.open_session();

    ns.make_directory(&writer, "/p/q").unwrap();
    assert_eq!(ns.list_directory(&reader, Some("/p")).unwrap(), ["q"]);
}

#[test]
fn own_cwd_deletion_is_refused_but_foreign_deletion_succeeds() {
    let ns = Namespace::new();
    let first = ns.open_session();
    ns.make_directory(&first, "/a").unwrap();
    ns.change_directory(&first, "/a").unwrap();

    assert!(matches!(
        ns.delete_directory(&first, "."),
        Err(NamespaceError::InvalidPath(_))
    ));
    assert!(matches!(
        ns.delete_directory(&first, ".."),
        Err(NamespaceError::InvalidPath(_))
    ));

    // A different session with cursor at the root is free to delete /a.
    let second = ns.open_session();
    ns.delete_directory(&second, "/a").unwrap();

    // The first session's cursor is now stale; it surfaces lazily.
    assert!(matches!(
        ns.list_directory(&first, None),
        Err(NamespaceError::InvalidPath(_))
    ));
}

#[test]
fn stale_cursor_recovers_by_changing_directory() {
    let ns = Namespace::new();
    let victim = ns.open_session();
    let intruder = ns.open_session();
    ns.make_directory(&victim, "/tmp/work").unwrap();
    ns.change_directory(&victim, "/tmp/work").unwrap();

    ns.delete_directory(&intruder, "/tmp/work").unwrap();

    // Every cursor-relative operation now fails with InvalidPath...
    assert!(matches!(
        ns.create_file(&victim, "notes"),
        Err(NamespaceError::InvalidPath(_))
    ));
    // ...and the session table itself is untouched: the cursor still
    // reads back, and an absolute cd recovers the session.
    assert_eq!(
        ns.current_working_directory(&victim).unwrap().to_string(),
        "/tmp/work"
    );
    ns.change_directory(&victim, "/tmp").unwrap();
    assert!(ns.list_directory(&victim, None).is_ok());
}

#[test]
fn closing_one_session_leaves_others_alone() {
    let ns = Namespace::new();
    let first = ns.open_session();
    let second = ns.open_session();
    assert_eq!(ns.session_count(), 2);

    ns.close_session(&first).unwrap();
    assert_eq!(ns.session_count(), 1);
    assert!(ns.current_working_directory(&second).is_ok());
    assert!(matches!(
        ns.current_working_directory(&first),
        Err(NamespaceError::InvalidSession(_))
    ));
}
