//! Property tests over the namespace invariants.

use crate::support::abs;
use arbor::error::NamespaceError;
use arbor::path::AbsolutePath;
use arbor::store::NamespaceStore;
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    /// writeFile(p, a); writeFile(p, b) reads back as a+b.
    #[test]
    fn prop_writes_concatenate(a in proptest::collection::vec(any::<u8>(), 0..64),
                               b in proptest::collection::vec(any::<u8>(), 0..64)) {
        let store = NamespaceStore::new();
        let path = abs("/f");
        store.create_file(&path).unwrap();
        store.write_file(&path, &a).unwrap();
        store.write_file(&path, &b).unwrap();

        let mut expected = a.clone();
        expected.extend_from_slice(&b);
        prop_assert_eq!(store.read_file(&path).unwrap(), expected);
    }

    /// No directory ever holds a file and a directory under one name.
    #[test]
    fn prop_sibling_names_unique_across_kinds(n in name()) {
        let path: AbsolutePath = format!("/{}", n).parse().unwrap();

        let store = NamespaceStore::new();
        store.make_directory(&path).unwrap();
        prop_assert!(matches!(
            store.create_file(&path),
            Err(NamespaceError::AlreadyExists(_))
        ));

        store.reset();
        store.create_file(&path).unwrap();
        prop_assert!(matches!(
            store.make_directory(&path),
            Err(NamespaceError::AlreadyExists(_))
        ));
    }

    /// A move onto an occupied destination changes nothing at all.
    #[test]
    fn prop_move_collision_is_no_op(a in name(), b in name(), payload in proptest::collection::vec(any::<u8>(), 0..32)) {
        prop_assume!(a != b);
        let store = NamespaceStore::new();
        let from: AbsolutePath = format!("/{}", a).parse().unwrap();
        let to: AbsolutePath = format!("/{}", b).parse().unwrap();

        store.make_directory(&from.join("inner")).unwrap();
        store.create_file(&to).unwrap();
        store.write_file(&to, &payload).unwrap();

        let before = store.snapshot();
        prop_assert!(store.move_node(&from, &to).is_err());
        prop_assert_eq!(store.snapshot(), before);
        prop_assert_eq!(store.read_file(&to).unwrap(), payload);
    }

    /// Lexical resolution matches a simple stack model and never emits
    /// `.`/`..` segments or escapes the root.
    #[test]
    fn prop_resolution_matches_stack_model(
        absolute in any::<bool>(),
        components in proptest::collection::vec(
            prop_oneof![Just(".".to_string()), Just("..".to_string()), name()],
            1..12,
        ),
        cwd_segments in proptest::collection::vec(name(), 0..4),
    ) {
        let cwd = cwd_segments.iter().fold(AbsolutePath::root(), |p, s| p.join(s));
        let expression = if absolute {
            format!("/{}", components.join("/"))
        } else {
            components.join("/")
        };

        let resolved = AbsolutePath::resolve(&expression, &cwd).unwrap();

        let mut model: Vec<String> = if absolute { Vec::new() } else { cwd_segments.clone() };
        for component in &components {
            match component.as_str() {
                "." => {}
                ".." => { model.pop(); }
                other => model.push(other.to_string()),
            }
        }
        prop_assert_eq!(resolved.segments(), &model[..]);
        prop_assert!(resolved.segments().iter().all(|s| s != "." && s != ".."));
    }
}
