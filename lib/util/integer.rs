use std::mem::{size_of, transmute_copy};
use std::ops::RangeInclusive;

/// Trait for types that can be represented by a contiguous range of `u8`.
///
/// # Safety
///
/// Must only be implemented for `#[repr(u8)]` enums whose variants cover every integer in
/// the range `MIN..=MAX`.
pub unsafe trait Integer: Copy {
    /// The minimum repr.
    const MIN: u8;

    /// The maximum repr.
    const MAX: u8;

    /// Casts from `u8`, or returns `None` if out of range.
    #[inline(always)]
    fn try_new(i: u8) -> Option<Self> {
        debug_assert_eq!(size_of::<Self>(), size_of::<u8>());

        if Self::in_range(i) {
            Some(unsafe { transmute_copy(&i) })
        } else {
            None
        }
    }

    /// Casts from `u8`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline(always)]
    #[track_caller]
    fn new(i: u8) -> Self {
        match Self::try_new(i) {
            Some(v) => v,
            None => panic!("{i} is out of the range {:?}", Self::MIN..=Self::MAX),
        }
    }

    /// Casts to `u8`.
    #[inline(always)]
    fn get(self) -> u8 {
        unsafe { transmute_copy(&self) }
    }

    /// Whether a value is in the range `MIN..=MAX`.
    #[inline(always)]
    fn in_range(i: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&i)
    }

    /// An iterator over all values in order.
    #[inline(always)]
    fn iter() -> std::iter::Map<RangeInclusive<u8>, fn(u8) -> Self> {
        (Self::MIN..=Self::MAX).map(Self::new as fn(u8) -> Self)
    }
}
