use std::{
    fmt::Debug,
    ops::{Add, Sub},
};

use num::{Bounded, NumCast, Zero};

/// Capacity and flow amounts.
///
/// Implemented for every primitive integer. A single edge carries at most its
/// capacity, but sums over several edges (excess, flow values, cut
/// capacities) are accumulated in [`Flow::Wide`], which is twice as wide as
/// the capacity type wherever a wider primitive exists.
pub trait Flow:
    Copy + Debug + Ord + Add<Output = Self> + Sub<Output = Self> + Zero + Bounded + NumCast
{
    type Wide: Flow;

    fn widen(self) -> Self::Wide;

    /// Converts back from the accumulator, saturating at the bounds of `Self`.
    fn narrow(wide: Self::Wide) -> Self;
}

/// Accumulator type of the flow type `F`.
pub type Wide<F> = <F as Flow>::Wide;

macro_rules! impl_flow {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl Flow for $t {
                type Wide = $wide;

                fn widen(self) -> $wide {
                    self as $wide
                }

                fn narrow(wide: $wide) -> Self {
                    wide.clamp(<$t>::MIN as $wide, <$t>::MAX as $wide) as $t
                }
            }
        )*
    };
}

impl_flow!(
    i8 => i16,
    i16 => i32,
    i32 => i64,
    i64 => i128,
    isize => i128,
    i128 => i128,
    u8 => u16,
    u16 => u32,
    u32 => u64,
    u64 => u128,
    usize => u128,
    u128 => u128
);
