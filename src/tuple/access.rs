// Wed Jan 14 2026 - Alex

//! Accessor-driven conversion between tuples and sequential storages.
//!
//! An accessor knows how to move one leaf value in or out of a storage.
//! Tuples of accessible values are accessible through the same accessor:
//! reads rebuild nested tuples leaf by leaf, writes flatten them.

use crate::tuple::element::for_each_tuple;
use crate::tuple::error::AccessResult;

pub trait Accessor<S: ?Sized, V> {
    fn read(storage: &mut S) -> AccessResult<V>;

    fn write(storage: &mut S, value: &V) -> AccessResult<()>;
}

macro_rules! impl_tuple_accessor {
    ($($idx:tt $T:ident),+) => {
        impl<A, S: ?Sized, $($T),+> Accessor<S, ($($T,)+)> for A
        where
            $(A: Accessor<S, $T>,)+
        {
            fn read(storage: &mut S) -> AccessResult<($($T,)+)> {
                Ok(($(<A as Accessor<S, $T>>::read(storage)?,)+))
            }

            fn write(storage: &mut S, value: &($($T,)+)) -> AccessResult<()> {
                $(<A as Accessor<S, $T>>::write(storage, &value.$idx)?;)+
                Ok(())
            }
        }
    };
}

for_each_tuple!(impl_tuple_accessor);

/// Reads a `T` out of `storage`.
pub fn get<A, T, S>(storage: &mut S) -> AccessResult<T>
where
    S: ?Sized,
    A: Accessor<S, T>,
{
    A::read(storage)
}

/// Reads a value shaped like `prototype` out of `storage`.
pub fn get_similar<A, S, T>(storage: &mut S, _prototype: &T) -> AccessResult<T>
where
    S: ?Sized,
    A: Accessor<S, T>,
{
    A::read(storage)
}

/// Writes `value` into `storage`, flattening nested tuples.
pub fn set<A, S, T>(storage: &mut S, value: &T) -> AccessResult<()>
where
    S: ?Sized,
    A: Accessor<S, T>,
{
    A::write(storage, value)
}

/// Reads a `T` from `from` through `In` and writes it into `to` through `Out`.
pub fn convert<In, Out, S1, S2, T>(from: &mut S1, to: &mut S2) -> AccessResult<T>
where
    S1: ?Sized,
    S2: ?Sized,
    In: Accessor<S1, T>,
    Out: Accessor<S2, T>,
{
    let value = In::read(from)?;
    Out::write(to, &value)?;
    log::trace!("converted {} into {}", std::any::type_name::<S1>(), std::any::type_name::<S2>());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuple::error::AccessError;
    use std::collections::VecDeque;

    /// Storage that only understands integers.
    struct Ints;

    impl Accessor<VecDeque<i64>, i64> for Ints {
        fn read(storage: &mut VecDeque<i64>) -> AccessResult<i64> {
            storage.pop_front().ok_or(AccessError::Exhausted(0))
        }

        fn write(storage: &mut VecDeque<i64>, value: &i64) -> AccessResult<()> {
            storage.push_back(*value);
            Ok(())
        }
    }

    impl Accessor<VecDeque<i64>, bool> for Ints {
        fn read(storage: &mut VecDeque<i64>) -> AccessResult<bool> {
            <Ints as Accessor<_, i64>>::read(storage).map(|v| v != 0)
        }

        fn write(storage: &mut VecDeque<i64>, value: &bool) -> AccessResult<()> {
            storage.push_back(*value as i64);
            Ok(())
        }
    }

    #[test]
    fn test_set_flattens_nested_tuples() {
        let mut storage: VecDeque<i64> = VecDeque::new();
        set::<Ints, _, _>(&mut storage, &(1i64, (true, (3i64, false)), 5i64)).unwrap();

        assert_eq!(storage, VecDeque::from(vec![1, 1, 3, 0, 5]));
    }

    #[test]
    fn test_get_rebuilds_nesting() {
        let mut storage = VecDeque::from(vec![7i64, 0, 9]);
        let value: (i64, (bool, i64)) = get::<Ints, _, _>(&mut storage).unwrap();

        assert_eq!(value, (7, (false, 9)));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_get_similar_uses_prototype_shape() {
        let mut storage = VecDeque::from(vec![4i64, 1]);
        let value = get_similar::<Ints, _, _>(&mut storage, &(0i64, false)).unwrap();
        assert_eq!(value, (4, true));
    }

    #[test]
    fn test_short_storage() {
        let mut storage = VecDeque::from(vec![4i64]);
        let result = get::<Ints, (i64, i64), _>(&mut storage);
        assert_eq!(result, Err(AccessError::Exhausted(0)));
    }

    #[test]
    fn test_convert_between_storages() {
        let mut from = VecDeque::from(vec![2i64, 1]);
        let mut to: VecDeque<i64> = VecDeque::new();

        let value = convert::<Ints, Ints, _, _, (i64, bool)>(&mut from, &mut to).unwrap();
        assert_eq!(value, (2, true));
        assert_eq!(to, VecDeque::from(vec![2, 1]));
    }
}
