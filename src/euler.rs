//! Euler angles tagged with the unit they are expressed in.

use crate::errors::{GmathError, check_index};
use crate::float_types::Real;
use crate::scalar;
use crate::vector3::Vector3;
use core::ops::Index;
use std::fmt::Display;

/// Unit of the three angles stored in an [`Euler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// Three rotation angles about X, Y and Z.
///
/// The unit is fixed when the value is built and can only change through
/// [`Euler::set_unit`], which converts the stored angles along with it. Every
/// rotation constructor in the crate goes through [`Euler::to_radians`]
/// before evaluating any trigonometry, and every Euler the crate produces is
/// tagged [`AngleUnit::Radians`].
///
/// The rotation order is not part of the value; it is passed to each
/// conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    unit: AngleUnit,
}

// Equality compares the three angles only, never the unit:
// `Euler::degrees(1.0, 0.0, 0.0) == Euler::radians(1.0, 0.0, 0.0)` holds.
crate::traits::impl_tolerant_eq!(Euler, to_array);

impl Euler {
    #[inline]
    pub const fn new(x: Real, y: Real, z: Real, unit: AngleUnit) -> Self {
        Self { x, y, z, unit }
    }

    #[inline]
    pub const fn radians(x: Real, y: Real, z: Real) -> Self {
        Self::new(x, y, z, AngleUnit::Radians)
    }

    #[inline]
    pub const fn degrees(x: Real, y: Real, z: Real) -> Self {
        Self::new(x, y, z, AngleUnit::Degrees)
    }

    /// Pack the components of `v` as angles in `unit`.
    #[inline]
    pub const fn from_vector(v: Vector3, unit: AngleUnit) -> Self {
        Self::new(v.x, v.y, v.z, unit)
    }

    #[inline]
    pub const fn unit(&self) -> AngleUnit {
        self.unit
    }

    #[inline]
    pub const fn to_array(&self) -> [Real; 3] {
        [self.x, self.y, self.z]
    }

    /// The raw angles, in whatever unit they are stored.
    #[inline]
    pub const fn to_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn get(&self, index: usize) -> Result<Real, GmathError> {
        check_index("Euler", index, 3).map(|i| self.to_array()[i])
    }

    /// Copy expressed in degrees. No-op if already in degrees.
    pub fn to_degrees(&self) -> Euler {
        match self.unit {
            AngleUnit::Degrees => *self,
            AngleUnit::Radians => Euler::degrees(
                scalar::to_degrees(self.x),
                scalar::to_degrees(self.y),
                scalar::to_degrees(self.z),
            ),
        }
    }

    /// Copy expressed in radians. No-op if already in radians.
    pub fn to_radians(&self) -> Euler {
        match self.unit {
            AngleUnit::Radians => *self,
            AngleUnit::Degrees => Euler::radians(
                scalar::to_radians(self.x),
                scalar::to_radians(self.y),
                scalar::to_radians(self.z),
            ),
        }
    }

    /// Switch the unit, converting the stored angles.
    pub fn set_unit(&mut self, unit: AngleUnit) {
        *self = match unit {
            AngleUnit::Radians => self.to_radians(),
            AngleUnit::Degrees => self.to_degrees(),
        };
    }
}

impl Index<usize> for Euler {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("{}", GmathError::IndexOutOfRange { type_name: "Euler", index, len: 3 }),
        }
    }
}

impl Display for Euler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self.unit {
            AngleUnit::Radians => "radians",
            AngleUnit::Degrees => "degrees",
        };
        write!(f, "Euler({}, {}, {}, {})", self.x, self.y, self.z, unit)
    }
}
