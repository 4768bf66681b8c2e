use growvec::{ConstructError, GrowVec, GrowVecError};

#[test]
fn test_erase_front_range() {
    let mut vec = GrowVec::try_from([1, 2, 3, 4, 5]).unwrap();
    let at = vec.erase_range(0..2).unwrap();
    assert_eq!(at, 0);
    assert_eq!(vec, [3, 4, 5]);
    assert_eq!(vec.len(), 3);
}

#[test]
fn test_insert_returns_position_of_new_element() {
    let mut vec = GrowVec::try_from([1, 2, 3]).unwrap();
    let at = vec.insert(1, 9).unwrap();
    assert_eq!(vec[at], 9);
    assert_eq!(vec, [1, 9, 2, 3]);
}

#[test]
fn test_insert_at_ends() {
    let mut vec = GrowVec::new();
    vec.insert(0, 'b').unwrap();
    vec.insert(0, 'a').unwrap();
    vec.insert(2, 'c').unwrap();
    assert_eq!(vec, ['a', 'b', 'c']);
}

#[test]
fn test_insert_past_end_is_rejected() {
    let mut vec = GrowVec::try_from([1, 2]).unwrap();
    assert_eq!(
        vec.insert(3, 0),
        Err(GrowVecError::IndexOutOfBounds {
            index: 3,
            length: 2
        })
    );
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_insert_with_builds_after_growth() {
    let mut vec = GrowVec::try_from([String::from("x"), String::from("z")]).unwrap();
    let at = vec.insert_with(1, || String::from("y")).unwrap();
    assert_eq!(at, 1);
    assert_eq!(vec, ["x", "y", "z"]);
}

#[test]
fn test_insert_n_copies() {
    let mut vec = GrowVec::try_from([1, 5]).unwrap();
    let at = vec.insert_n(1, 3, &0).unwrap();
    assert_eq!(at, 1);
    assert_eq!(vec, [1, 0, 0, 0, 5]);

    let at = vec.insert_n(2, 0, &7).unwrap();
    assert_eq!(at, 2);
    assert_eq!(vec.len(), 5);
}

#[test]
fn test_insert_from_slice_keeps_order() {
    let mut vec = GrowVec::try_from([1, 2, 6]).unwrap();
    vec.insert_from_slice(2, &[3, 4, 5]).unwrap();
    assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_insert_iter_keeps_order() {
    let mut vec = GrowVec::try_from(["a", "e"]).unwrap();
    let at = vec.insert_iter(1, ["b", "c", "d"]).unwrap();
    assert_eq!(at, 1);
    assert_eq!(vec, ["a", "b", "c", "d", "e"]);

    // size_hint of zero still inserts everything
    vec.insert_iter(0, (0..2).filter(|_| true).map(|_| "_")).unwrap();
    assert_eq!(vec, ["_", "_", "a", "b", "c", "d", "e"]);
}

#[test]
fn test_try_insert_with_error_leaves_vector() {
    let mut vec = GrowVec::try_from([1, 2, 3]).unwrap();
    let mut calls = 0;
    let result = vec.try_insert_with(1, 4, || {
        calls += 1;
        if calls == 3 {
            Err("third")
        } else {
            Ok(calls * 100)
        }
    });
    assert_eq!(result, Err(ConstructError::Element("third")));
    assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn test_try_insert_with_bad_index() {
    let mut vec = GrowVec::try_from([1]).unwrap();
    let result = vec.try_insert_with(2, 1, || Ok::<_, ()>(0));
    assert_eq!(
        result,
        Err(ConstructError::Storage(GrowVecError::IndexOutOfBounds {
            index: 2,
            length: 1
        }))
    );
}

#[test]
fn test_erase_single_returns_following_position() {
    let mut vec = GrowVec::try_from([10, 20, 30]).unwrap();
    let at = vec.erase(1).unwrap();
    assert_eq!(vec[at], 30);
    assert_eq!(vec, [10, 30]);

    let at = vec.erase(1).unwrap();
    assert_eq!(at, vec.len());
    assert_eq!(vec, [10]);
}

#[test]
fn test_erase_out_of_range() {
    let mut vec = GrowVec::try_from([1, 2]).unwrap();
    assert_eq!(
        vec.erase(2),
        Err(GrowVecError::IndexOutOfBounds {
            index: 2,
            length: 2
        })
    );
    assert!(vec.erase_range(1..3).is_err());
    #[allow(clippy::reversed_empty_ranges)]
    let reversed = vec.erase_range(2..1);
    assert!(reversed.is_err());
    assert_eq!(vec, [1, 2]);
}

#[test]
fn test_erase_range_bounds_forms() {
    let mut vec = GrowVec::try_from([0, 1, 2, 3, 4, 5, 6]).unwrap();
    vec.erase_range(5..).unwrap();
    assert_eq!(vec, [0, 1, 2, 3, 4]);
    vec.erase_range(1..=2).unwrap();
    assert_eq!(vec, [0, 3, 4]);
    vec.erase_range(1..1).unwrap();
    assert_eq!(vec, [0, 3, 4]);
    vec.erase_range(..).unwrap();
    assert!(vec.is_empty());
    assert_eq!(vec.capacity(), 7);
}

#[test]
fn test_erase_drops_removed_elements() {
    use std::rc::Rc;

    let token = Rc::new(());
    let mut vec: GrowVec<Rc<()>> = (0..5).map(|_| Rc::clone(&token)).collect();
    vec.erase_range(1..4).unwrap();
    assert_eq!(Rc::strong_count(&token), 3);
    vec.erase(0).unwrap();
    assert_eq!(Rc::strong_count(&token), 2);
    drop(vec);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn test_index_survives_reallocation() {
    let mut vec = GrowVec::try_from([1, 2, 3]).unwrap();
    let position = vec.insert(1, 99).unwrap();
    vec.reserve(100).unwrap();
    vec.insert(0, 0).unwrap();
    assert_eq!(vec[position + 1], 99);
}
