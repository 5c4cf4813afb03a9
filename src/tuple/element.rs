// Wed Jan 14 2026 - Alex

/// Expands `$callback!` once per supported tuple arity with `index Type`
/// pairs, so every tuple trait in the crate covers the same shapes.
macro_rules! for_each_tuple {
    ($callback:ident) => {
        $callback!(0 T0);
        $callback!(0 T0, 1 T1);
        $callback!(0 T0, 1 T1, 2 T2);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10);
        $callback!(0 T0, 1 T1, 2 T2, 3 T3, 4 T4, 5 T5, 6 T6, 7 T7, 8 T8, 9 T9, 10 T10, 11 T11);
    };
}

pub(crate) use for_each_tuple;

pub const MAX_ARITY: usize = 12;

pub trait Tuple {
    const ARITY: usize;
}

/// Typed access to slot `I` of a tuple.
pub trait Element<const I: usize> {
    type Type;

    fn get(&self) -> &Self::Type;

    fn get_mut(&mut self) -> &mut Self::Type;
}

macro_rules! impl_tuple {
    (@elements $generics:tt; $($idx:tt $T:ident),+) => {
        $( impl_tuple!(@element $generics $idx $T); )+
    };
    (@element ($($G:ident),+) $idx:tt $T:ident) => {
        impl<$($G),+> Element<$idx> for ($($G,)+) {
            type Type = $T;

            fn get(&self) -> &$T {
                &self.$idx
            }

            fn get_mut(&mut self) -> &mut $T {
                &mut self.$idx
            }
        }
    };
    ($($idx:tt $T:ident),+) => {
        impl<$($T),+> Tuple for ($($T,)+) {
            const ARITY: usize = [$(stringify!($T)),+].len();
        }

        impl_tuple!(@elements ($($T),+); $($idx $T),+);
    };
}

for_each_tuple!(impl_tuple);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(<(u8,) as Tuple>::ARITY, 1);
        assert_eq!(<(u8, String, bool) as Tuple>::ARITY, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as Tuple>::ARITY,
            MAX_ARITY
        );
    }

    #[test]
    fn test_element_access() {
        let mut t = (1u8, "two".to_string(), 3.0f64);

        assert_eq!(<_ as Element<1>>::get(&t), "two");
        *<_ as Element<0>>::get_mut(&mut t) = 10;
        <_ as Element<1>>::get_mut(&mut t).push('!');

        assert_eq!(t, (10, "two!".to_string(), 3.0));
    }
}
