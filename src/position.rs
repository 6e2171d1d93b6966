use std::fmt;
use std::ops::Add;

/// A coordinate on the line indexed by `IntervalTree`.
///
/// Shift amounts are expressed in the same type, so negative shifts need a
/// signed position type.
pub trait Position: Copy + Ord + Add<Output = Self> + fmt::Debug + 'static {
    /// The neutral shift amount.
    const ZERO: Self;
}

macro_rules! impl_position {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Position for $ty {
                const ZERO: Self = 0;
            }
        )*
    };
}

impl_position!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
