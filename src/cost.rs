use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
};

use num::{Bounded, NumCast, Zero};

use crate::Flow;

pub trait Cost:
    Copy
    + Debug
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Sum
    + Neg<Output = Self>
    + Zero
    + Bounded
    + NumCast
{
    /// Converts a flow amount so it can be multiplied with a per-unit cost.
    ///
    /// Panics when the amount does not fit, which means the cost type is too
    /// narrow for the network.
    fn from_flow<F: Flow>(amount: F) -> Self {
        match <Self as NumCast>::from(amount) {
            Some(value) => value,
            None => panic!("flow amount {amount:?} does not fit in the cost type"),
        }
    }
}

macro_rules! impl_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {}
        )*
    };
}

impl_cost!(i8, i16, i32, i64, i128, isize);
