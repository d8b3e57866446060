use crate::float_types::{Real, tolerance};

/// Tolerance-based comparison shared by every value type of the crate.
///
/// `PartialEq` on these types delegates to [`AlmostEqual::almost_equal`], so
/// `==` means "equal within the current [`tolerance`]", component by component.
/// That relation is not transitive; use [`AlmostEqual::almost_equal_with`] with an
/// explicit epsilon when that matters.
pub trait AlmostEqual {
    /// Compare component-wise with an explicit absolute epsilon.
    fn almost_equal_with(&self, other: &Self, epsilon: Real) -> bool;

    /// Compare component-wise with the crate-wide [`tolerance`].
    fn almost_equal(&self, other: &Self) -> bool {
        self.almost_equal_with(other, tolerance())
    }
}

/// Implements `PartialEq`, [`AlmostEqual`] and the `approx` traits for a type
/// exposing its scalar components through a method returning `[Real; N]`.
macro_rules! impl_tolerant_eq {
    ($ty:ty, $components:ident) => {
        impl $crate::traits::AlmostEqual for $ty {
            fn almost_equal_with(&self, other: &Self, epsilon: $crate::float_types::Real) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| (a - b).abs() <= epsilon)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::traits::AlmostEqual::almost_equal(self, other)
            }
        }

        impl approx::AbsDiffEq for $ty {
            type Epsilon = $crate::float_types::Real;

            fn default_epsilon() -> Self::Epsilon {
                <$crate::float_types::Real as approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $ty {
            fn default_max_relative() -> Self::Epsilon {
                <$crate::float_types::Real as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }

        impl approx::UlpsEq for $ty {
            fn default_max_ulps() -> u32 {
                <$crate::float_types::Real as approx::UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
                self.$components()
                    .iter()
                    .zip(other.$components().iter())
                    .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    };
}

pub(crate) use impl_tolerant_eq;
