//! Per-thread accounting of fresh box allocations.
//!
//! Interned singletons are never counted, which makes these counters a
//! direct check that the interning constructors avoid allocation.

use std::cell::Cell;

use crate::runtime::value::Boxed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Every fresh box.
    pub boxes: usize,
    /// Boxes whose payload holds no references to other boxes.
    pub untraced: usize,
    pub strings: usize,
    pub arrays: usize,
    pub closures: usize,
    pub records: usize,
    pub refs: usize,
}

impl AllocStats {
    /// Counters accumulated since `earlier`.
    pub fn since(&self, earlier: &AllocStats) -> AllocStats {
        AllocStats {
            boxes: self.boxes - earlier.boxes,
            untraced: self.untraced - earlier.untraced,
            strings: self.strings - earlier.strings,
            arrays: self.arrays - earlier.arrays,
            closures: self.closures - earlier.closures,
            records: self.records - earlier.records,
            refs: self.refs - earlier.refs,
        }
    }
}

thread_local! {
    static STATS: Cell<AllocStats> = Cell::new(AllocStats::default());
}

pub(crate) fn record(boxed: &Boxed) {
    STATS.with(|stats| {
        let mut current = stats.get();
        current.boxes += 1;
        if boxed.is_untraced() {
            current.untraced += 1;
        }
        match boxed {
            Boxed::String(_) => current.strings += 1,
            Boxed::Array(_) | Boxed::ByteArray(_) => current.arrays += 1,
            Boxed::Closure(_) => current.closures += 1,
            Boxed::Data(_) => current.records += 1,
            Boxed::Ref(_) => current.refs += 1,
            _ => {}
        }
        stats.set(current);
    });
}

pub fn snapshot() -> AllocStats {
    STATS.with(Cell::get)
}
