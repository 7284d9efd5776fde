//! Recursive override application.
//!
//! Responsibilities:
//! - Walk mappings in insertion order and sequences in index order.
//! - Extend the variable name prefix with each key or index on the way down.
//! - Replace scalar leaves whose full variable name has an override.
//!
//! Does NOT handle:
//! - Namespace validation (see `engine.rs`).
//! - Parsing or rendering documents (see `format.rs`).
//!
//! Invariants:
//! - Each node is owned by exactly one parent during the walk; children are
//!   returned and written back rather than mutated through shared references.
//! - Only scalar leaves are looked up, each exactly once. Containers, including
//!   empty ones, are never replaced.
//! - A value produced by coercion is written as-is and is not walked again.

use crate::coerce::ValueCoercer;
use crate::path::{encode_index, encode_key, join};
use crate::source::OverrideSource;
use crate::tree::{ConfigTree, Mapping};

/// Applies overrides from a source to a tree.
pub struct TreeWalker<'a, S: OverrideSource + ?Sized> {
    source: &'a S,
    coercer: &'a ValueCoercer,
    applied: Vec<String>,
}

impl<'a, S: OverrideSource + ?Sized> TreeWalker<'a, S> {
    pub fn new(source: &'a S, coercer: &'a ValueCoercer) -> Self {
        Self {
            source,
            coercer,
            applied: Vec::new(),
        }
    }

    /// Variable names whose overrides were applied, in traversal order.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Walk `node`, whose own variable name is `prefix`.
    pub fn walk(&mut self, node: ConfigTree, prefix: &str) -> ConfigTree {
        match node {
            ConfigTree::Mapping(mapping) => ConfigTree::Mapping(self.walk_mapping(mapping, prefix)),
            ConfigTree::Sequence(items) => ConfigTree::Sequence(self.walk_sequence(items, prefix)),
            ConfigTree::Scalar(scalar) => self.visit_leaf(ConfigTree::Scalar(scalar), prefix),
        }
    }

    fn walk_mapping(&mut self, mapping: Mapping, prefix: &str) -> Mapping {
        mapping
            .into_iter()
            .map(|(key, value)| {
                let path = join(prefix, &encode_key(&key));
                let value = self.walk(value, &path);
                (key, value)
            })
            .collect()
    }

    fn walk_sequence(&mut self, items: Vec<ConfigTree>, prefix: &str) -> Vec<ConfigTree> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let path = join(prefix, &encode_index(index));
                self.walk(value, &path)
            })
            .collect()
    }

    fn visit_leaf(&mut self, leaf: ConfigTree, path: &str) -> ConfigTree {
        match self.source.lookup(path) {
            Some(raw) => {
                tracing::debug!(key = path, "Applying environment override");
                self.applied.push(path.to_string());
                self.coercer.coerce(&raw)
            }
            None => leaf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::source::MapSource;
    use crate::tree::Scalar;
    use std::cell::RefCell;

    /// Records every key it is asked about.
    struct RecordingSource {
        inner: MapSource,
        seen: RefCell<Vec<String>>,
    }

    impl RecordingSource {
        fn new(inner: MapSource) -> Self {
            Self {
                inner,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl OverrideSource for RecordingSource {
        fn lookup(&self, key: &str) -> Option<String> {
            self.seen.borrow_mut().push(key.to_string());
            self.inner.lookup(key)
        }
    }

    fn parse(text: &str) -> ConfigTree {
        Format::Yaml.parse(text.as_bytes()).unwrap()
    }

    fn walk(tree: ConfigTree, source: &MapSource) -> ConfigTree {
        let coercer = ValueCoercer::new(Format::Yaml);
        TreeWalker::new(source, &coercer).walk(tree, "APP")
    }

    #[test]
    fn test_nested_override() {
        let source = MapSource::new().with_var("APP_CONFIG_OBJECT_KEY", "test");
        let result = walk(parse("config:\n  object:\n    key: value\n"), &source);

        assert_eq!(result, parse("config:\n  object:\n    key: test\n"));
    }

    #[test]
    fn test_sequence_slot_override() {
        let source = MapSource::new().with_var("APP_LIST_1", "99");
        let result = walk(parse("list: [10, 20, 30]\n"), &source);

        assert_eq!(result, parse("list: [10, 99, 30]\n"));
    }

    #[test]
    fn test_sequence_of_mappings() {
        let source = MapSource::new().with_var("APP_SERVERS_1_HOST_NAME", "b.internal");
        let result = walk(
            parse("servers:\n  - hostName: a\n  - hostName: b\n"),
            &source,
        );

        assert_eq!(
            result.get_path(&["servers", "1", "hostName"]),
            Some(&ConfigTree::from("b.internal"))
        );
        assert_eq!(
            result.get_path(&["servers", "0", "hostName"]),
            Some(&ConfigTree::from("a"))
        );
    }

    #[test]
    fn test_every_leaf_queried_once_in_order_and_containers_never() {
        let source = RecordingSource::new(MapSource::new());
        let coercer = ValueCoercer::default();
        let tree = parse("b: 1\na:\n  list: [x, y]\n  empty: {}\n  none: []\nc: ~\n");

        let result = TreeWalker::new(&source, &coercer).walk(tree.clone(), "APP");

        assert_eq!(result, tree);
        assert_eq!(
            *source.seen.borrow(),
            vec!["APP_B", "APP_A_LIST_0", "APP_A_LIST_1", "APP_C"]
        );
    }

    #[test]
    fn test_container_keys_are_not_overridable() {
        let source = MapSource::new().with_var("APP_DB", "replaced");
        let tree = parse("db:\n  host: localhost\n");

        assert_eq!(walk(tree.clone(), &source), tree);
    }

    #[test]
    fn test_type_mismatch_is_accepted() {
        let source = MapSource::new()
            .with_var("APP_PORT", "not-a-number")
            .with_var("APP_NAME", "{first: a, last: b}");
        let result = walk(parse("port: 8080\nname: plain\n"), &source);

        assert_eq!(result.get_path(&["port"]), Some(&ConfigTree::from("not-a-number")));
        assert_eq!(result.get_path(&["name", "first"]), Some(&ConfigTree::from("a")));
    }

    #[test]
    fn test_coerced_structure_is_not_walked_again() {
        let source = RecordingSource::new(
            MapSource::new()
                .with_var("APP_DB", "{host: db}")
                .with_var("APP_DB_HOST", "ignored"),
        );
        let coercer = ValueCoercer::default();

        let result = TreeWalker::new(&source, &coercer).walk(parse("db: ~\n"), "APP");

        assert_eq!(result.get_path(&["db", "host"]), Some(&ConfigTree::from("db")));
        assert_eq!(*source.seen.borrow(), vec!["APP_DB"]);
    }

    #[test]
    fn test_separator_collision_overrides_both_keys() {
        // Both keys encode to APP_MY_KEY and both receive the same override.
        let source = MapSource::new().with_var("APP_MY_KEY", "shared");
        let result = walk(parse("my-key: one\nmy.key: two\n"), &source);

        assert_eq!(result.get_path(&["my-key"]), Some(&ConfigTree::from("shared")));
        assert_eq!(result.get_path(&["my.key"]), Some(&ConfigTree::from("shared")));
    }

    #[test]
    fn test_applied_keys_are_reported() {
        let source = MapSource::new()
            .with_var("APP_A", "1")
            .with_var("APP_UNUSED", "2");
        let coercer = ValueCoercer::default();
        let mut walker = TreeWalker::new(&source, &coercer);

        let result = walker.walk(parse("a: ~\nb: ~\n"), "APP");

        assert_eq!(result.get_path(&["a"]), Some(&ConfigTree::from(1)));
        assert_eq!(
            result.get_path(&["b"]),
            Some(&ConfigTree::Scalar(Scalar::Null))
        );
        assert_eq!(walker.applied(), ["APP_A".to_string()]);
    }
}
