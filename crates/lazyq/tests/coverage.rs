//! Behavioral tests for queries built from every source shape.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use lazyq::{Cursor, Query, QueryError, SourceKind, SourcePolicy};
use serde_json::{json, Value};

fn counting<T>(calls: &Rc<Cell<usize>>, keep: impl Fn(&T) -> bool + 'static) -> impl Fn(&T) -> bool {
    let calls = Rc::clone(calls);
    move |item: &T| {
        calls.set(calls.get() + 1);
        keep(item)
    }
}

// ============================================================================
// Restartability
// ============================================================================

#[test]
fn terminals_repeat_identically() {
    let query = Query::from_source(vec![5, 1, 4, 2, 3])
        .filter(|x| *x != 4)
        .push(6)
        .put_index(2, 0);

    assert_eq!(query.results(), query.results());
    assert_eq!(query.count(), query.count());
    assert_eq!(query.first(), query.first());
    assert_eq!(query.last(), query.last());

    let mut once = Vec::new();
    let mut twice = Vec::new();
    query.for_each(|x| once.push(x));
    query.for_each(|x| twice.push(x));
    assert_eq!(once, twice);
}

#[test]
fn cursors_from_one_query_are_independent() {
    let query = Query::from_source(vec![1, 2, 3]);
    let mut a = query.cursor();
    let mut b = query.cursor();

    assert_eq!(a.pull(), Some(1));
    assert_eq!(a.pull(), Some(2));
    assert_eq!(b.pull(), Some(1));
    assert_eq!(a.pull(), Some(3));
    assert_eq!(b.pull(), Some(2));
}

#[test]
fn exhausted_cursor_stays_exhausted() {
    let query = Query::from_source(vec![1]).push(2);
    let mut cursor = query.cursor();

    assert_eq!(cursor.pull(), Some(1));
    assert_eq!(cursor.pull(), Some(2));
    assert_eq!(cursor.pull(), None);
    assert_eq!(cursor.pull(), None);
    assert!(cursor.is_exhausted());
}

// ============================================================================
// Laziness
// ============================================================================

#[test]
fn building_a_chain_evaluates_nothing() {
    let calls = Rc::new(Cell::new(0));
    let query = Query::from_source(vec![1, 2, 3, 4])
        .filter(counting(&calls, |x: &i32| x % 2 == 0))
        .push(8)
        .put_index(1, 99)
        .filter(counting(&calls, |_: &i32| true));

    assert_eq!(calls.get(), 0);
    assert_eq!(query.results(), vec![2, 99, 4, 8]);
    assert!(calls.get() > 0);
}

#[test]
fn filter_runs_once_per_item_per_pass() {
    let calls = Rc::new(Cell::new(0));
    let query = Query::from_source(vec![1, 2, 3, 4]).filter(counting(&calls, |x: &i32| *x > 1));

    assert_eq!(query.count(), 3);
    assert_eq!(calls.get(), 4);

    assert_eq!(query.count(), 3);
    assert_eq!(calls.get(), 8);
}

#[test]
fn put_index_drains_upstream_once_per_cursor() {
    let calls = Rc::new(Cell::new(0));
    let query = Query::from_source(vec![1, 2, 3])
        .filter(counting(&calls, |_: &i32| true))
        .put_index(1, 0);

    assert_eq!(query.results(), vec![1, 0, 2, 3]);
    assert_eq!(calls.get(), 3);
}

// ============================================================================
// Operator correctness
// ============================================================================

#[test]
fn filter_evens() {
    let query = Query::from_source(vec![1, 2, 3, 4]).filter(|x| x % 2 == 0);
    assert_eq!(query.results(), vec![2, 4]);
}

#[test]
fn push_appends() {
    assert_eq!(Query::from_source(vec![1, 2]).push(3).results(), vec![1, 2, 3]);
}

#[test]
fn put_index_in_range() {
    let query = Query::from_source(vec![1, 2, 3]).put_index(1, 99);
    assert_eq!(query.results(), vec![1, 99, 2, 3]);
}

#[test]
fn put_index_at_count_appends() {
    let query = Query::from_source(vec![1, 2, 3]).put_index(3, 99);
    assert_eq!(query.results(), vec![1, 2, 3, 99]);
}

#[test]
fn put_index_past_count_appends() {
    let query = Query::from_source(vec![1, 2, 3]).put_index(10, 99);
    assert_eq!(query.results(), vec![1, 2, 3, 99]);
}

#[test]
fn put_index_on_empty() {
    let query = Query::<i32>::empty().put_index(0, 1).put_index(5, 2);
    assert_eq!(query.results(), vec![1, 2]);
}

#[test]
fn put_index_u64_overflow_only_when_too_large() {
    let query = Query::from_source(vec![1, 2, 3]);
    assert_eq!(query.put_index_u64(10, 99).unwrap().results(), vec![1, 2, 3, 99]);

    if usize::BITS < 64 {
        assert_eq!(
            query.put_index_u64(u64::MAX, 99).unwrap_err(),
            QueryError::IndexOverflow { index: u64::MAX }
        );
    }
}

#[test]
fn count_first_last_agree_with_results() {
    let query = Query::from_source(vec![7, 3, 9]).push(1).put_index(1, 4);
    let results = query.results();

    assert_eq!(query.count(), results.len());
    assert_eq!(query.first(), results.first().copied());
    assert_eq!(query.last(), results.last().copied());
}

#[test]
fn empty_query_terminals() {
    let query = Query::from_source(Vec::<String>::new());

    assert_eq!(query.count(), 0);
    assert_eq!(query.first(), None);
    assert_eq!(query.last(), None);
    assert!(query.results().is_empty());
    assert!(query.all(|_| false));
    assert!(!query.any(|_| true));
}

// ============================================================================
// Source capture
// ============================================================================

#[test]
fn borrowed_source_is_decoupled() {
    let mut data = vec![1, 2, 3];
    let query = Query::from_source(&data);

    data.clear();
    data.push(42);

    assert_eq!(query.results(), vec![1, 2, 3]);
}

#[test]
fn borrowed_map_is_decoupled() {
    let mut map = BTreeMap::from([("a", 1)]);
    let query = Query::from_source(&map);

    map.insert("b", 2);
    map.remove("a");

    assert_eq!(query.results(), vec![BTreeMap::from([("a", 1)])]);
}

// ============================================================================
// Unordered sources
// ============================================================================

#[test]
fn hash_map_items_are_single_entry_members() {
    let map: HashMap<&str, i32> = HashMap::from([("a", 1), ("b", 2)]);
    let query = Query::from_source(&map);

    assert_eq!(query.count(), 2);

    let mut keys = HashSet::new();
    for item in query.results() {
        assert_eq!(item.len(), 1);
        let (key, value) = item.iter().next().unwrap();
        assert_eq!(map.get(key), Some(value));
        assert!(keys.insert(*key), "duplicate key {}", key);
    }
    assert_eq!(keys, map.keys().copied().collect::<HashSet<_>>());
}

#[test]
fn map_entries_each_get_a_fresh_container() {
    let map = BTreeMap::from([(1, "one"), (2, "two")]);
    let query = Query::from_source(map).push(BTreeMap::from([(3, "three")]));

    let items = query.results();
    assert_eq!(
        items,
        vec![
            BTreeMap::from([(1, "one")]),
            BTreeMap::from([(2, "two")]),
            BTreeMap::from([(3, "three")]),
        ]
    );
}

#[test]
fn filter_map_entries() {
    let map = HashMap::from([
        ("name".to_string(), "emirhan".to_string()),
        ("surname".to_string(), "ataman".to_string()),
        ("age".to_string(), "18".to_string()),
    ]);

    let matched = Query::from_source(map)
        .filter(|entry| entry.get("name").map(String::as_str) == Some("emirhan"))
        .results();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0]["name"], "emirhan");
}

// ============================================================================
// Dynamic sources
// ============================================================================

#[test]
fn dynamic_object_source() {
    let query = Query::from_value(json!({"a": 1, "b": 2}));
    assert_eq!(query.count(), 2);

    let mut keys = Vec::new();
    for item in query.results() {
        let object = item.as_object().expect("object item");
        assert_eq!(object.len(), 1);
        let (key, value) = object.iter().next().unwrap();
        assert_eq!(&json!({"a": 1, "b": 2})[key], value);
        keys.push(key.clone());
    }
    keys.sort();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn dynamic_array_source() {
    let query = Query::from_value(json!([1, 2, 3, 4])).filter(|v| v.as_i64().is_some_and(|n| n % 2 == 0));
    assert_eq!(query.results(), vec![json!(2), json!(4)]);
}

#[test]
fn unsupported_shape_is_empty() {
    assert_eq!(Query::from_value(json!(42)).count(), 0);
    assert_eq!(Query::from_value(json!("text")).count(), 0);
    assert_eq!(Query::from_value(Value::Null).count(), 0);
    assert!(Query::from_value(json!(true)).is_empty());
}

#[test]
fn unsupported_shape_rejected_by_strict_policy() {
    let err = Query::from_value_with(json!(42), SourcePolicy::Reject).unwrap_err();
    assert_eq!(err, QueryError::UnsupportedSource { kind: "number" });
    assert_eq!(
        err.to_string(),
        "unsupported source: expected a sequence or a map, got number"
    );
}

#[test]
fn source_kind_matches_query_behavior() {
    for value in [json!([1]), json!({"k": 1}), json!(1), json!(null)] {
        let supported = SourceKind::of(&value).is_supported();
        assert_eq!(Query::from_value(value).has_results(), supported);
    }
}

// ============================================================================
// Placeholders
// ============================================================================

#[test]
fn placeholders_report_not_implemented() {
    let query = Query::from_source(vec![1]);

    let err = query.put_key("k", 2).unwrap_err();
    assert_eq!(err.to_string(), "operation 'put_key' is not implemented");

    let mut dest = [0i32; 1];
    assert_eq!(
        query.apply_to(&mut dest[..]).unwrap_err(),
        QueryError::NotImplemented {
            operation: "apply_to"
        }
    );
    assert!(query.analyze_with_where(1).is_err());
}

// ============================================================================
// Custom producers
// ============================================================================

#[test]
fn closure_producer_is_restartable() {
    let query = Query::from_fn(|| Query::from_source(vec!['x', 'y']).cursor());

    assert_eq!(query.results(), vec!['x', 'y']);
    assert_eq!(query.push('z').results(), vec!['x', 'y', 'z']);
}

#[test]
fn empty_cursor_query() {
    let query: Query<u8> = Query::from_fn(Cursor::exhausted);
    assert_eq!(query.count(), 0);
    assert_eq!(query.push(1).results(), vec![1]);
}
