// Thu Jan 15 2026 - Alex

use crate::tuple::element::Element;
use crate::tuple::field::FieldId;
use crate::tuple::record::Record;
use std::fmt;
use std::marker::PhantomData;

/// Typed handle on field `I` of record `R`.
///
/// `record!` declares one per field as an associated constant of the record
/// (`Person::Age`), so a field is always named through its own record: a
/// bare index or another record's field does not type-check.
pub struct Slot<R, const I: usize> {
    record: PhantomData<fn() -> R>,
}

impl<R, const I: usize> Slot<R, I>
where
    R: Record,
    R::Value: Element<I>,
{
    pub const INDEX: usize = I;

    /// Declares slot `I` of `R`. Used by `Record` implementations.
    #[doc(hidden)]
    pub const fn declare() -> Self {
        let () = R::LAYOUT;
        Self { record: PhantomData }
    }

    pub fn index(self) -> usize {
        I
    }

    pub fn id(self) -> R::Id {
        let () = R::LAYOUT;
        <R::Id as FieldId>::ALL[I]
    }

    pub fn name(self) -> &'static str {
        let () = R::LAYOUT;
        R::NAMES[I]
    }
}

impl<R, const I: usize> Clone for Slot<R, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, const I: usize> Copy for Slot<R, I> {}

impl<R: Record, const I: usize> fmt::Debug for Slot<R, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", I)
    }
}
