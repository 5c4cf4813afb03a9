// Wed Jan 14 2026 - Alex

use crate::tuple::element::Element;
use crate::tuple::printable::Printable;
use crate::tuple::record::Record;
use crate::tuple::slot::Slot;
use std::fmt;

/// Shared view of a record tuple.
pub struct RecordRef<'a, R: Record> {
    data: &'a R::Value,
}

impl<'a, R: Record> RecordRef<'a, R> {
    pub fn new(data: &'a R::Value) -> Self {
        let () = R::LAYOUT;
        Self { data }
    }

    pub fn get<const I: usize>(&self, field: Slot<R, I>) -> &'a <R::Value as Element<I>>::Type
    where
        R::Value: Element<I>,
    {
        R::get(self.data, field)
    }

    pub fn name(&self, id: R::Id) -> &'static str {
        R::name_of(id)
    }

    pub fn data(&self) -> &'a R::Value {
        self.data
    }

    pub fn printable(&self) -> Printable<'a, R> {
        Printable::new(self.data)
    }
}

impl<'a, R: Record> Clone for RecordRef<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: Record> Copy for RecordRef<'a, R> {}

impl<'a, R: Record> fmt::Debug for RecordRef<'a, R>
where
    R::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(self.data).finish()
    }
}

/// Mutable view of a record tuple; writes go straight to the borrowed tuple.
pub struct RecordMut<'a, R: Record> {
    data: &'a mut R::Value,
}

impl<'a, R: Record> RecordMut<'a, R> {
    pub fn new(data: &'a mut R::Value) -> Self {
        let () = R::LAYOUT;
        Self { data }
    }

    pub fn get<const I: usize>(&self, field: Slot<R, I>) -> &<R::Value as Element<I>>::Type
    where
        R::Value: Element<I>,
    {
        R::get(&*self.data, field)
    }

    pub fn get_mut<const I: usize>(&mut self, field: Slot<R, I>) -> &mut <R::Value as Element<I>>::Type
    where
        R::Value: Element<I>,
    {
        R::get_mut(&mut *self.data, field)
    }

    pub fn set<const I: usize>(&mut self, field: Slot<R, I>, new: <R::Value as Element<I>>::Type)
    where
        R::Value: Element<I>,
    {
        R::set(&mut *self.data, field, new);
    }

    pub fn const_reference(&self) -> RecordRef<'_, R> {
        RecordRef::new(&*self.data)
    }
}

/// Record that owns its tuple.
pub struct Wrapped<R: Record> {
    data: R::Value,
}

impl<R: Record> Wrapped<R> {
    pub fn new(data: R::Value) -> Self {
        let () = R::LAYOUT;
        Self { data }
    }

    pub fn get<const I: usize>(&self, field: Slot<R, I>) -> &<R::Value as Element<I>>::Type
    where
        R::Value: Element<I>,
    {
        R::get(&self.data, field)
    }

    pub fn get_mut<const I: usize>(&mut self, field: Slot<R, I>) -> &mut <R::Value as Element<I>>::Type
    where
        R::Value: Element<I>,
    {
        R::get_mut(&mut self.data, field)
    }

    pub fn set<const I: usize>(&mut self, field: Slot<R, I>, new: <R::Value as Element<I>>::Type)
    where
        R::Value: Element<I>,
    {
        R::set(&mut self.data, field, new);
    }

    pub fn const_reference(&self) -> RecordRef<'_, R> {
        RecordRef::new(&self.data)
    }

    pub fn reference(&mut self) -> RecordMut<'_, R> {
        RecordMut::new(&mut self.data)
    }

    pub fn printable(&self) -> Printable<'_, R> {
        Printable::new(&self.data)
    }

    /// Moves the tuple out, leaving default values behind.
    pub fn release(&mut self) -> R::Value
    where
        R::Value: Default,
    {
        std::mem::take(&mut self.data)
    }

    pub fn into_inner(self) -> R::Value {
        self.data
    }
}

impl<R: Record> Clone for Wrapped<R>
where
    R::Value: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.data.clone())
    }
}

impl<R: Record> fmt::Debug for Wrapped<R>
where
    R::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Wrapped").field(&self.data).finish()
    }
}
