use bstmap::{Map, NotFound};
use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use std::collections::BTreeMap;

fn entries(map: &Map<u32, u16>) -> Vec<(u32, u16)> {
    map.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn iter_ascends_strictly() {
    fn test(map: Map<u32, u16>) -> bool {
        map.iter().zip(map.iter().skip(1)).all(|(e1, e2)| e1.0 < e2.0)
    }

    quickcheck(test as fn(Map<u32, u16>) -> bool);
}

#[test]
fn iter_size_hint_is_exact() {
    fn test(map: Map<u32, u16>) -> bool {
        let mut len = map.len();
        let mut it = map.iter();

        loop {
            if it.size_hint() != (len, Some(len)) {
                return false;
            }
            if it.next().is_none() {
                break;
            }
            len -= 1;
        }

        len == 0 && it.size_hint() == (0, Some(0))
    }

    quickcheck(test as fn(Map<u32, u16>) -> bool);
}

#[test]
fn insert_then_get_round_trips() {
    fn test(mut map: Map<u32, u16>, key: u32, value: u16) -> bool {
        map.insert(key, value);
        map.contains_key(&key) && map.get(&key) == Ok(&value)
    }

    quickcheck(test as fn(Map<u32, u16>, u32, u16) -> bool);
}

#[test]
fn inserting_a_present_key_updates_in_place() {
    fn test(mut map: Map<u32, u16>, key: u32, value: u16) -> bool {
        let old = map.get(&key).ok().copied();
        let old_len = map.len();

        map.insert(key, value) == old
            && map.len() == old_len + usize::from(old.is_none())
            && map.get(&key) == Ok(&value)
    }

    quickcheck(test as fn(Map<u32, u16>, u32, u16) -> bool);
}

#[test]
fn remove_removes_the_key() {
    fn test(mut map: Map<u32, u16>, key: u32) -> TestResult {
        match map.remove(&key) {
            Err(_) => TestResult::discard(),
            Ok((removed, _)) => TestResult::from_bool(
                removed == key
                    && !map.contains_key(&key)
                    && map.get(&key).is_err()
                    && map.iter().all(|e| *e.0 != key),
            ),
        }
    }

    quickcheck(test as fn(Map<u32, u16>, u32) -> TestResult);
}

#[test]
fn remove_affects_no_other_entries() {
    fn test(mut map: Map<u32, u16>, key: u32) -> bool {
        let old_map = map.clone();

        match map.remove(&key) {
            Err(_) => map == old_map,
            Ok(_) => {
                entries(&map)
                    == old_map
                        .iter()
                        .filter(|e| *e.0 != key)
                        .map(|(k, v)| (*k, *v))
                        .collect::<Vec<_>>()
            }
        }
    }

    quickcheck(test as fn(Map<u32, u16>, u32) -> bool);
}

#[test]
fn remove_sets_len() {
    fn test(mut map: Map<u32, u16>, key: u32) -> bool {
        let old_len = map.len();

        match map.remove(&key) {
            Err(_) => map.len() == old_len,
            Ok(_) => map.len() == old_len - 1,
        }
    }

    quickcheck(test as fn(Map<u32, u16>, u32) -> bool);
}

#[test]
fn absent_keys_error_with_the_exact_key() {
    fn test(mut map: Map<u32, u16>, key: u32) -> TestResult {
        if map.contains_key(&key) {
            return TestResult::discard();
        }

        TestResult::from_bool(
            map.get(&key) == Err(NotFound { key })
                && map.remove(&key) == Err(NotFound { key }),
        )
    }

    quickcheck(test as fn(Map<u32, u16>, u32) -> TestResult);
}

#[test]
fn clones_share_nothing() {
    fn test(map: Map<u32, u16>, key: u32, value: u16) -> bool {
        let snapshot = entries(&map);

        let mut copy = map.clone();
        copy.insert(key, value);
        let _ = copy.remove(&key);

        entries(&map) == snapshot
    }

    quickcheck(test as fn(Map<u32, u16>, u32, u16) -> bool);
}

#[test]
fn clone_from_matches_clone() {
    fn test(mut dst: Map<u32, u16>, src: Map<u32, u16>) -> bool {
        dst.clone_from(&src);
        dst == src && dst.len() == src.len() && entries(&dst) == entries(&src)
    }

    quickcheck(test as fn(Map<u32, u16>, Map<u32, u16>) -> bool);
}

#[test]
fn taking_a_map_leaves_the_source_empty() {
    fn test(mut map: Map<u32, u16>) -> bool {
        let snapshot = entries(&map);
        let moved = std::mem::take(&mut map);

        moved.into_iter().collect::<Vec<_>>() == snapshot
            && map.is_empty()
            && map.len() == 0
            && snapshot.iter().all(|(k, _)| !map.contains_key(k))
    }

    quickcheck(test as fn(Map<u32, u16>) -> bool);
}

/// An operation on a map.
#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u16),
    Remove(u8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(u8::arbitrary(g), u16::arbitrary(g))
        } else {
            Op::Remove(u8::arbitrary(g))
        }
    }
}

#[test]
fn matches_the_standard_ordered_map() {
    fn test(ops: Vec<Op>) -> bool {
        let mut map = Map::new();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    if map.insert(key, value) != model.insert(key, value) {
                        return false;
                    }
                }
                Op::Remove(key) => {
                    let removed = map.remove(&key).ok();
                    if removed != model.remove(&key).map(|value| (key, value)) {
                        return false;
                    }
                }
            }

            if map.len() != model.len() {
                return false;
            }
        }

        map.iter().collect::<Vec<_>>() == model.iter().collect::<Vec<_>>()
    }

    quickcheck(test as fn(Vec<Op>) -> bool);
}
