use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, DivAssign, MulAssign, SubAssign},
};

use num_traits::{AsPrimitive, ConstOne, ConstZero};

pub trait Float:
    'static
    + Debug
    + Display
    + Sync
    + Send
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + num_traits::Float
    + num_traits::NumCast
    + ConstZero
    + ConstOne
    + AsPrimitive<isize>
    + AsPrimitive<f64>
{
    const TWO: Self;
    /// Upper bound of the darkness scale.
    const TWO_FIVE_FIVE: Self;
    /// Ink removed by a single string under the default flat model.
    const TWENTY_FIVE: Self;
    /// Default share of the pin count kept as minimum gap between linked pins.
    const TENTH: Self;
}

impl Float for f32 {
    const TWO: Self = 2.0;
    const TWO_FIVE_FIVE: Self = 255.0;
    const TWENTY_FIVE: Self = 25.0;
    const TENTH: Self = 0.1;
}

impl Float for f64 {
    const TWO: Self = 2.0;
    const TWO_FIVE_FIVE: Self = 255.0;
    const TWENTY_FIVE: Self = 25.0;
    const TENTH: Self = 0.1;
}
