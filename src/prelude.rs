//! Common imports shared across the runtime.
//!
//! Keeps the rest of the crate on one import path for the shared-ownership
//! primitives and the Fx-hashed collections.

pub use std::{
    cell::{Cell, Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

pub use rustc_hash::{FxBuildHasher, FxHashMap};

// ═══════════════════════════════════════════════════════════════════════════════
// IndexSet - insertion-ordered set with FxHasher
// ═══════════════════════════════════════════════════════════════════════════════

pub type IndexSet<T> = indexmap::IndexSet<T, FxBuildHasher>;

/// Create an empty IndexSet
#[inline]
pub fn index_set_new<T>() -> IndexSet<T>
where
    T: core::hash::Hash + Eq,
{
    indexmap::IndexSet::with_hasher(FxBuildHasher)
}

/// Numeric helpers used by the coercion rules.
pub mod math {
    /// Euclidean remainder (modulo) - always returns positive result
    #[inline]
    pub fn rem_euclid(x: f64, y: f64) -> f64 {
        x.rem_euclid(y)
    }

    #[inline]
    pub fn trunc(x: f64) -> f64 {
        x.trunc()
    }

    /// True when `x` has no fractional part and fits in an i64.
    #[inline]
    pub fn is_integral(x: f64) -> bool {
        x.fract() == 0.0 && x >= i64::MIN as f64 && x <= i64::MAX as f64
    }
}
