// Wed Jan 14 2026 - Alex

use crate::tuple::access::Accessor;
use crate::tuple::element::{Element, Tuple};
use crate::tuple::error::AccessError;
use crate::tuple::field::FieldId;
use crate::tuple::printable::Printable;
use crate::tuple::slot::Slot;
use crate::tuple::view::{RecordMut, RecordRef, Wrapped};

/// Binds a [`FieldId`] enumeration to a tuple type and a name per slot.
///
/// Fields are selected through the record's [`Slot`] constants, e.g.
/// `Person::get(&row, Person::Age)`.
///
/// Identifiers, names and tuple slots must line up or the build fails:
///
/// ```compile_fail
/// use cor::tuple::{FieldId, Record};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Id {
///     A,
///     B,
/// }
///
/// impl FieldId for Id {
///     const ALL: &'static [Self] = &[Id::A, Id::B];
///
///     fn index(self) -> usize {
///         self as usize
///     }
/// }
///
/// struct Broken;
///
/// impl Record for Broken {
///     type Id = Id;
///     type Value = (i32, i32);
///
///     const NAMES: &'static [&'static str] = &["a"];
/// }
///
/// println!("{}", Broken::printable(&(1, 2)));
/// ```
pub trait Record: Sized + 'static {
    type Id: FieldId;
    type Value: Tuple;

    const NAMES: &'static [&'static str];

    /// Fails the build when the identifier list and the tuple disagree.
    const LAYOUT: () = assert!(
        <Self::Id as FieldId>::COUNT == <Self::Value as Tuple>::ARITY
            && Self::NAMES.len() == <Self::Value as Tuple>::ARITY,
        "record ids, names and tuple slots must line up"
    );

    fn name_of(id: Self::Id) -> &'static str {
        let () = Self::LAYOUT;
        Self::NAMES[id.index()]
    }

    fn id_of(name: &str) -> Option<Self::Id> {
        let () = Self::LAYOUT;
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .and_then(<Self::Id as FieldId>::from_index)
    }

    fn get<const I: usize>(value: &Self::Value, _field: Slot<Self, I>) -> &<Self::Value as Element<I>>::Type
    where
        Self::Value: Element<I>,
    {
        let () = Self::LAYOUT;
        <Self::Value as Element<I>>::get(value)
    }

    fn get_mut<const I: usize>(
        value: &mut Self::Value,
        _field: Slot<Self, I>,
    ) -> &mut <Self::Value as Element<I>>::Type
    where
        Self::Value: Element<I>,
    {
        let () = Self::LAYOUT;
        <Self::Value as Element<I>>::get_mut(value)
    }

    fn set<const I: usize>(value: &mut Self::Value, field: Slot<Self, I>, new: <Self::Value as Element<I>>::Type)
    where
        Self::Value: Element<I>,
    {
        *Self::get_mut(value, field) = new;
    }

    fn reference(value: &mut Self::Value) -> RecordMut<'_, Self> {
        RecordMut::new(value)
    }

    fn const_reference(value: &Self::Value) -> RecordRef<'_, Self> {
        RecordRef::new(value)
    }

    fn wrap(value: Self::Value) -> Wrapped<Self> {
        Wrapped::new(value)
    }

    fn printable(value: &Self::Value) -> Printable<'_, Self> {
        Printable::new(value)
    }

    /// Reads the whole tuple, nested tuples included, from `storage`.
    fn load<A, S>(storage: &mut S) -> Result<Self::Value, AccessError>
    where
        S: ?Sized,
        A: Accessor<S, Self::Value>,
    {
        let () = Self::LAYOUT;
        A::read(storage)
    }

    /// Writes the tuple into `storage` as a flat sequence of leaves.
    fn store<A, S>(storage: &mut S, value: &Self::Value) -> Result<(), AccessError>
    where
        S: ?Sized,
        A: Accessor<S, Self::Value>,
    {
        let () = Self::LAYOUT;
        A::write(storage, value)
    }
}

pub fn name<R: Record>(id: R::Id) -> &'static str {
    R::name_of(id)
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_name {
    ($field:ident) => {
        stringify!($field)
    };
    ($field:ident, $label:literal) => {
        $label
    };
}

/// Declares a record: the identifier enum, the record type with one
/// [`Slot`] constant per field, and its tuple.
///
/// ```
/// cor::record! {
///     pub struct Person: PersonField {
///         Name: String,
///         Age: u32 => "age",
///     }
/// }
///
/// use cor::tuple::Record;
///
/// let row = ("Ann".to_string(), 41);
/// assert_eq!(*Person::get(&row, Person::Age), 41);
/// assert_eq!(Person::Age.id(), PersonField::Age);
/// assert_eq!(Person::printable(&row).to_string(), "(Name=Ann, age=41)");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $record:ident : $id:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty $(=> $label:literal)? ),+ $(,)?
        }
    ) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(usize)]
        $vis enum $id {
            $( $(#[$fmeta])* $field, )+
        }

        impl $crate::tuple::FieldId for $id {
            const ALL: &'static [Self] = &[$( $id::$field ),+];

            fn index(self) -> usize {
                self as usize
            }
        }

        impl ::core::fmt::Display for $id {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(<$record as $crate::tuple::Record>::name_of(*self))
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        $vis struct $record;

        #[allow(non_upper_case_globals)]
        impl $record {
            $(
                $vis const $field: $crate::tuple::Slot<$record, { $id::$field as usize }> =
                    $crate::tuple::Slot::declare();
            )+
        }

        impl $crate::tuple::Record for $record {
            type Id = $id;
            type Value = ( $( $ty, )+ );

            const NAMES: &'static [&'static str] = &[
                $( $crate::__record_field_name!($field $(, $label)?) ),+
            ];
        }
    };
}
