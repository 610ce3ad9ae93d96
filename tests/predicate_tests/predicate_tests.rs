//! Tests for predicates
//!
//! These tests verify:
//! - Atomic comparison semantics
//! - Record-level (`accepts_value`) and zone-level (`accepts_range`) tests
//! - Disjunction across a set of ranges

use zonescan::predicate::{any_accepts_range, any_accepts_value};
use zonescan::{AtomicPredicate, CompareOp, Predicate, PredicateRange};

// =============================================================================
// AtomicPredicate Tests
// =============================================================================

#[test]
fn test_compare_ops() {
    let cases = [
        (CompareOp::Lt, 4, true),
        (CompareOp::Lt, 5, false),
        (CompareOp::Le, 5, true),
        (CompareOp::Gt, 5, false),
        (CompareOp::Gt, 6, true),
        (CompareOp::Ge, 5, true),
        (CompareOp::Eq, 5, true),
        (CompareOp::Eq, 6, false),
        (CompareOp::Ne, 6, true),
        (CompareOp::Ne, 5, false),
    ];

    for (op, value, expected) in cases {
        let pred = AtomicPredicate::new(op, 5);
        assert_eq!(pred.evaluate(&value), expected, "{:?} 5 on {}", op, value);
    }
}

#[test]
fn test_always_accepts_everything() {
    let pred = AtomicPredicate::<i32>::Always;
    assert!(pred.evaluate(&i32::MIN));
    assert!(pred.may_match_range(&0, &0));
}

#[test]
fn test_monotone_range_checks() {
    // Zone [6, 10]
    assert!(AtomicPredicate::new(CompareOp::Ge, 7).may_match_range(&6, &10));
    assert!(AtomicPredicate::new(CompareOp::Le, 9).may_match_range(&6, &10));
    assert!(AtomicPredicate::new(CompareOp::Lt, 7).may_match_range(&6, &10));
    assert!(!AtomicPredicate::new(CompareOp::Lt, 6).may_match_range(&6, &10));
    assert!(!AtomicPredicate::new(CompareOp::Gt, 10).may_match_range(&6, &10));
}

#[test]
fn test_equality_range_check() {
    let pred = AtomicPredicate::new(CompareOp::Eq, 8);
    assert!(pred.may_match_range(&6, &10));
    assert!(!pred.may_match_range(&1, &5));

    let pred = AtomicPredicate::new(CompareOp::Ne, 3);
    assert!(!pred.may_match_range(&3, &3));
    assert!(pred.may_match_range(&3, &4));
}

#[test]
fn test_display() {
    assert_eq!(AtomicPredicate::new(CompareOp::Ge, 1990).to_string(), ">=1990");
    assert_eq!(AtomicPredicate::<i32>::Always.to_string(), "true");
}

// =============================================================================
// PredicateRange Tests
// =============================================================================

#[test]
fn test_between_accepts_value() {
    let range = PredicateRange::between(7, 9);

    assert!(!range.accepts_value(&6));
    assert!(range.accepts_value(&7));
    assert!(range.accepts_value(&9));
    assert!(!range.accepts_value(&10));
}

#[test]
fn test_between_accepts_overlapping_zone() {
    let range = PredicateRange::between(7, 9);

    assert!(range.accepts_range(&6, &10));
    assert!(range.accepts_range(&8, &8));
    assert!(range.accepts_range(&9, &20));
    assert!(!range.accepts_range(&1, &5));
    assert!(!range.accepts_range(&10, &12));
}

#[test]
fn test_one_sided_ranges() {
    let at_most = PredicateRange::at_most(2);
    assert!(at_most.accepts_range(&1, &5));
    assert!(!at_most.accepts_range(&6, &10));

    let at_least = PredicateRange::at_least(9);
    assert!(!at_least.accepts_range(&1, &5));
    assert!(at_least.accepts_range(&6, &10));

    assert!(PredicateRange::less_than(1990).accepts_value(&1989));
    assert!(!PredicateRange::less_than(1990).accepts_value(&1990));
    assert!(PredicateRange::greater_than(2010).accepts_value(&2011));
    assert!(!PredicateRange::greater_than(2010).accepts_value(&2010));
}

#[test]
fn test_equal_to_range() {
    let range = PredicateRange::equal_to(4.5f64);
    assert!(range.accepts_value(&4.5));
    assert!(range.accepts_range(&4.0, &5.0));
    assert!(!range.accepts_range(&5.0, &6.0));
}

#[test]
fn test_empty_range_never_accepts_values() {
    // lower bound above upper bound
    let range = PredicateRange::new(
        AtomicPredicate::new(CompareOp::Ge, 10),
        AtomicPredicate::new(CompareOp::Le, 3),
    );

    for v in 0..20 {
        assert!(!range.accepts_value(&v));
    }
}

// =============================================================================
// Disjunction Tests
// =============================================================================

#[test]
fn test_any_accepts_value() {
    let ranges = [PredicateRange::less_than(1990), PredicateRange::greater_than(2010)];

    assert!(any_accepts_value(&ranges, &1985));
    assert!(!any_accepts_value(&ranges, &2000));
    assert!(any_accepts_value(&ranges, &2015));
}

#[test]
fn test_any_accepts_range() {
    let ranges = [PredicateRange::at_most(2), PredicateRange::at_least(9)];

    assert!(any_accepts_range(&ranges, &1, &5));
    assert!(any_accepts_range(&ranges, &6, &10));
    assert!(!any_accepts_range(&ranges, &3, &8));
}

#[test]
fn test_empty_set_accepts_nothing() {
    let ranges: [PredicateRange<i32>; 0] = [];

    assert!(!any_accepts_value(&ranges, &1));
    assert!(!any_accepts_range(&ranges, &i32::MIN, &i32::MAX));
}
