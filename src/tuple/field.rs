// Wed Jan 14 2026 - Alex

use std::fmt;

/// Enumeration naming the slots of a record, in slot order.
///
/// Discriminants are the slot indices; `record!` turns each one into the
/// index of the record's matching [`Slot`](crate::tuple::Slot).
pub trait FieldId: Copy + Eq + fmt::Debug + 'static {
    /// Every identifier, ordered by index.
    const ALL: &'static [Self];

    const COUNT: usize = Self::ALL.len();

    /// Index of the last field.
    const LAST: usize = Self::COUNT - 1;

    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn all() -> std::iter::Copied<std::slice::Iter<'static, Self>> {
        Self::ALL.iter().copied()
    }
}
