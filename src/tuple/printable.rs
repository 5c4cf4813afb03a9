// Wed Jan 14 2026 - Alex

use crate::tuple::element::for_each_tuple;
use crate::tuple::record::Record;
use std::fmt;

/// A value that can sit in a printed record slot. Nested tuples print as
/// `(a, b)`.
pub trait SlotDisplay {
    fn fmt_slot(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! leaf_slot_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl SlotDisplay for $ty {
                fn fmt_slot(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )+
    };
}

leaf_slot_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str, String);

impl<T: SlotDisplay + ?Sized> SlotDisplay for &T {
    fn fmt_slot(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_slot(f)
    }
}

macro_rules! impl_nested_slot_display {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: SlotDisplay),+> SlotDisplay for ($($T,)+) {
            fn fmt_slot(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("(")?;
                $(
                    if $idx != 0 {
                        f.write_str(", ")?;
                    }
                    self.$idx.fmt_slot(f)?;
                )+
                f.write_str(")")
            }
        }
    };
}

for_each_tuple!(impl_nested_slot_display);

/// Tuples whose every slot can be displayed.
pub trait DisplayFields {
    /// `names` holds one entry per slot.
    fn fmt_fields(&self, names: &[&str], f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_display_fields {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: SlotDisplay),+> DisplayFields for ($($T,)+) {
            fn fmt_fields(&self, names: &[&str], f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("(")?;
                $(
                    if $idx != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}=", names[$idx])?;
                    self.$idx.fmt_slot(f)?;
                )+
                f.write_str(")")
            }
        }
    };
}

for_each_tuple!(impl_display_fields);

/// `Display` adapter rendering a record as `(name=value, ...)`.
pub struct Printable<'a, R: Record> {
    data: &'a R::Value,
}

impl<'a, R: Record> Printable<'a, R> {
    pub fn new(data: &'a R::Value) -> Self {
        let () = R::LAYOUT;
        Self { data }
    }
}

impl<'a, R: Record> fmt::Display for Printable<'a, R>
where
    R::Value: DisplayFields,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt_fields(R::NAMES, f)
    }
}

pub fn printable<R: Record>(data: &R::Value) -> Printable<'_, R> {
    Printable::new(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::record::name;

    crate::record! {
        struct TestRecord: Field {
            A: i32,
            B: String,
        }
    }

    crate::record! {
        struct Single: SingleField {
            Only: f64 => "only",
        }
    }

    #[test]
    fn test_output() {
        let text = format!(
            "{}/{}/{}",
            name::<TestRecord>(Field::A),
            name::<TestRecord>(Field::B),
            printable::<TestRecord>(&(12, "E".to_string()))
        );
        assert_eq!(text, "A/B/(A=12, B=E)");
    }

    #[test]
    fn test_single_field() {
        assert_eq!(Single::printable(&(1.5,)).to_string(), "(only=1.5)");
    }

    crate::record! {
        struct Placed: PlacedField {
            Id: u32 => "id",
            Pos: (f64, (i8, char)) => "pos",
            Tag: &'static str => "tag",
        }
    }

    #[test]
    fn test_nested_field() {
        let value = (4, (0.5, (-1, 'z')), "t");
        assert_eq!(Placed::printable(&value).to_string(), "(id=4, pos=(0.5, (-1, z)), tag=t)");
    }
}
