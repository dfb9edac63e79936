// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn map_bounded_preserves_order() {
    let items: Vec<u32> = (0..50).collect();
    let results = map_bounded(&items, 4, |x| x * 2);
    let expected: Vec<u32> = items.iter().map(|x| x * 2).collect();
    assert_eq!(results, expected);
}

#[test]
fn map_bounded_visits_every_item_exactly_once() {
    let items: Vec<u32> = (0..257).collect();
    let results = map_bounded(&items, 8, |x| *x);
    assert_eq!(results, items);
}

#[test]
fn map_bounded_handles_empty_input() {
    let items: Vec<u32> = Vec::new();
    let results = map_bounded(&items, 4, |x| *x);
    assert!(results.is_empty());
}

#[test]
fn map_bounded_handles_fewer_items_than_workers() {
    let items = vec![1, 2];
    let results = map_bounded(&items, 8, |x| x + 1);
    assert_eq!(results, vec![2, 3]);
}
