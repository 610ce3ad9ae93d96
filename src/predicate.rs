//! Predicate Module
//!
//! Range predicates consumed by the zone-map scan.
//!
//! ## Model
//! ```text
//!   set    = range_0 OR range_1 OR ...          (disjunction)
//!   range  = lower AND upper                    (conjunction)
//!   atomic = value <op> operand | always-true
//! ```
//!
//! Two distinct tests exist for every range:
//! - `accepts_value(v)`: the record-level test
//! - `accepts_range(min, max)`: the zone-level test, true when some value in
//!   `[min, max]` could pass both bounds

use std::fmt;
use std::marker::PhantomData;

/// Comparison operator of an atomic predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }
}

/// A single-value test over column values
pub trait Predicate<T> {
    /// Does `value` satisfy the predicate?
    fn evaluate(&self, value: &T) -> bool;

    /// Could any value in `[min, max]` satisfy the predicate?
    ///
    /// The default is exact for monotone comparators (`<`, `<=`, `>`, `>=`):
    /// if any value in the interval passes, one of the endpoints does.
    fn may_match_range(&self, min: &T, max: &T) -> bool {
        self.evaluate(min) || self.evaluate(max)
    }
}

/// Comparison against a constant, or the always-true placeholder used for
/// the open side of a one-sided range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtomicPredicate<T> {
    Always,
    Compare { op: CompareOp, operand: T },
}

impl<T> AtomicPredicate<T> {
    pub fn new(op: CompareOp, operand: T) -> Self {
        AtomicPredicate::Compare { op, operand }
    }
}

impl<T: PartialOrd> Predicate<T> for AtomicPredicate<T> {
    fn evaluate(&self, value: &T) -> bool {
        match self {
            AtomicPredicate::Always => true,
            AtomicPredicate::Compare { op, operand } => match op {
                CompareOp::Lt => value < operand,
                CompareOp::Le => value <= operand,
                CompareOp::Gt => value > operand,
                CompareOp::Ge => value >= operand,
                CompareOp::Eq => value == operand,
                CompareOp::Ne => value != operand,
            },
        }
    }

    fn may_match_range(&self, min: &T, max: &T) -> bool {
        match self {
            AtomicPredicate::Compare {
                op: CompareOp::Eq,
                operand,
            } => min <= operand && operand <= max,
            // Only a zone made entirely of `operand` can be ruled out
            AtomicPredicate::Compare {
                op: CompareOp::Ne,
                operand,
            } => !(min == operand && max == operand),
            _ => self.evaluate(min) || self.evaluate(max),
        }
    }
}

impl<T: fmt::Display> fmt::Display for AtomicPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomicPredicate::Always => write!(f, "true"),
            AtomicPredicate::Compare { op, operand } => write!(f, "{}{}", op.symbol(), operand),
        }
    }
}

/// Conjunctive pair of bound tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredicateRange<T, P = AtomicPredicate<T>> {
    lower: P,
    upper: P,
    _value: PhantomData<T>,
}

impl<T, P: Predicate<T>> PredicateRange<T, P> {
    pub fn new(lower: P, upper: P) -> Self {
        Self {
            lower,
            upper,
            _value: PhantomData,
        }
    }

    pub fn lower(&self) -> &P {
        &self.lower
    }

    pub fn upper(&self) -> &P {
        &self.upper
    }

    /// Record-level test: both bounds hold for `value`
    pub fn accepts_value(&self, value: &T) -> bool {
        self.lower.evaluate(value) && self.upper.evaluate(value)
    }

    /// Zone-level test: both bounds may hold somewhere in `[min, max]`
    ///
    /// Never rejects a zone that contains an accepted value.
    pub fn accepts_range(&self, min: &T, max: &T) -> bool {
        self.lower.may_match_range(min, max) && self.upper.may_match_range(min, max)
    }
}

impl<T: PartialOrd> PredicateRange<T> {
    /// `lo <= v <= hi`
    pub fn between(lo: T, hi: T) -> Self {
        Self::new(
            AtomicPredicate::new(CompareOp::Ge, lo),
            AtomicPredicate::new(CompareOp::Le, hi),
        )
    }

    /// `v >= lo`
    pub fn at_least(lo: T) -> Self {
        Self::new(AtomicPredicate::new(CompareOp::Ge, lo), AtomicPredicate::Always)
    }

    /// `v > lo`
    pub fn greater_than(lo: T) -> Self {
        Self::new(AtomicPredicate::new(CompareOp::Gt, lo), AtomicPredicate::Always)
    }

    /// `v <= hi`
    pub fn at_most(hi: T) -> Self {
        Self::new(AtomicPredicate::Always, AtomicPredicate::new(CompareOp::Le, hi))
    }

    /// `v < hi`
    pub fn less_than(hi: T) -> Self {
        Self::new(AtomicPredicate::Always, AtomicPredicate::new(CompareOp::Lt, hi))
    }

    /// `v == x`
    pub fn equal_to(x: T) -> Self {
        Self::new(AtomicPredicate::new(CompareOp::Eq, x), AtomicPredicate::Always)
    }
}

/// True if any range in the set accepts `value`
pub fn any_accepts_value<T, P: Predicate<T>>(ranges: &[PredicateRange<T, P>], value: &T) -> bool {
    ranges.iter().any(|range| range.accepts_value(value))
}

/// True if any range in the set may accept a value in `[min, max]`
pub fn any_accepts_range<T, P: Predicate<T>>(
    ranges: &[PredicateRange<T, P>],
    min: &T,
    max: &T,
) -> bool {
    ranges.iter().any(|range| range.accepts_range(min, max))
}
