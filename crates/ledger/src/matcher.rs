//! Prefix matching and deterministic allocation order.
//!
//! Matching is a filter, not a ranking. Allocation additionally needs a fixed
//! order so that concurrent-free reruns select the same units: oldest
//! `added_at` first, unit id as tie-break (ids are UUIDv7, themselves
//! time-ordered).

use core::cmp::Ordering;

use stockbill_catalog::Prefix;

use crate::unit::StockUnit;

/// All units whose code starts with `prefix`, in the iteration order given.
pub fn match_units<'a, I>(prefix: &Prefix, units: I) -> Vec<&'a StockUnit>
where
    I: IntoIterator<Item = &'a StockUnit>,
{
    units
        .into_iter()
        .filter(|unit| prefix.matches(&unit.code))
        .collect()
}

/// Total order used when picking units to consume: oldest first.
pub fn allocation_order(a: &StockUnit, b: &StockUnit) -> Ordering {
    a.added_at.cmp(&b.added_at).then_with(|| a.id.cmp(&b.id))
}

/// Up to `max` matching units in allocation order.
pub fn select_for_allocation<'a, I>(prefix: &Prefix, units: I, max: usize) -> Vec<&'a StockUnit>
where
    I: IntoIterator<Item = &'a StockUnit>,
{
    let mut matched = match_units(prefix, units);
    matched.sort_by(|a, b| allocation_order(a, b));
    matched.truncate(max);
    matched
}
