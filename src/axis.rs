//! Enumerations that parameterise rotation conversions: the Euler
//! [`RotationOrder`], the signed [`Axis`] used by look-at/aim, and the
//! [`CartesianPlane`] used by mirroring.

use crate::errors::GmathError;
use crate::vector3::Vector3;
use std::fmt::Display;

/// Axis sequence in which elementary rotations are composed.
///
/// `XYZ` means the X rotation is applied first, then Y, then Z. With row
/// vectors that is the matrix product `X * Y * Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationOrder {
    #[default]
    XYZ = 0,
    XZY = 1,
    YXZ = 2,
    YZX = 3,
    ZXY = 4,
    ZYX = 5,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::XYZ,
        RotationOrder::XZY,
        RotationOrder::YXZ,
        RotationOrder::YZX,
        RotationOrder::ZXY,
        RotationOrder::ZYX,
    ];

    /// Axis indices (0 = X, 1 = Y, 2 = Z) in application order.
    pub const fn axes(self) -> [usize; 3] {
        match self {
            RotationOrder::XYZ => [0, 1, 2],
            RotationOrder::XZY => [0, 2, 1],
            RotationOrder::YXZ => [1, 0, 2],
            RotationOrder::YZX => [1, 2, 0],
            RotationOrder::ZXY => [2, 0, 1],
            RotationOrder::ZYX => [2, 1, 0],
        }
    }

    /// `true` for the cyclic permutations XYZ, YZX and ZXY.
    pub const fn is_even(self) -> bool {
        matches!(self, RotationOrder::XYZ | RotationOrder::YZX | RotationOrder::ZXY)
    }
}

impl TryFrom<i32> for RotationOrder {
    type Error = GmathError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RotationOrder::XYZ),
            1 => Ok(RotationOrder::XZY),
            2 => Ok(RotationOrder::YXZ),
            3 => Ok(RotationOrder::YZX),
            4 => Ok(RotationOrder::ZXY),
            5 => Ok(RotationOrder::ZYX),
            _ => Err(GmathError::InvalidCode { kind: "RotationOrder", code }),
        }
    }
}

impl Display for RotationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RotationOrder::XYZ => "XYZ",
            RotationOrder::XZY => "XZY",
            RotationOrder::YXZ => "YXZ",
            RotationOrder::YZX => "YZX",
            RotationOrder::ZXY => "ZXY",
            RotationOrder::ZYX => "ZYX",
        };
        f.write_str(name)
    }
}

/// A signed cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NegX = -1,
    NegY = -2,
    NegZ = -3,
    PosX = 1,
    PosY = 2,
    PosZ = 3,
}

impl Axis {
    /// 0 for X, 1 for Y, 2 for Z, regardless of sign.
    pub const fn index(self) -> usize {
        match self {
            Axis::PosX | Axis::NegX => 0,
            Axis::PosY | Axis::NegY => 1,
            Axis::PosZ | Axis::NegZ => 2,
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Axis::NegX | Axis::NegY | Axis::NegZ)
    }

    /// The same axis with a positive sign.
    pub const fn positive(self) -> Axis {
        match self.index() {
            0 => Axis::PosX,
            1 => Axis::PosY,
            _ => Axis::PosZ,
        }
    }

    /// The unit vector pointing along this signed axis.
    pub const fn to_vector3(self) -> Vector3 {
        match self {
            Axis::PosX => Vector3::XAXIS,
            Axis::PosY => Vector3::YAXIS,
            Axis::PosZ => Vector3::ZAXIS,
            Axis::NegX => Vector3::NEG_XAXIS,
            Axis::NegY => Vector3::NEG_YAXIS,
            Axis::NegZ => Vector3::NEG_ZAXIS,
        }
    }
}

impl TryFrom<i32> for Axis {
    type Error = GmathError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Axis::NegX),
            -2 => Ok(Axis::NegY),
            -3 => Ok(Axis::NegZ),
            1 => Ok(Axis::PosX),
            2 => Ok(Axis::PosY),
            3 => Ok(Axis::PosZ),
            _ => Err(GmathError::InvalidCode { kind: "Axis", code }),
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::PosX => "+X",
            Axis::PosY => "+Y",
            Axis::PosZ => "+Z",
            Axis::NegX => "-X",
            Axis::NegY => "-Y",
            Axis::NegZ => "-Z",
        };
        f.write_str(name)
    }
}

/// One of the three coordinate planes through the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CartesianPlane {
    XY,
    #[default]
    YZ,
    ZX,
}

impl CartesianPlane {
    /// Unit normal of the plane.
    pub const fn normal(self) -> Vector3 {
        match self {
            CartesianPlane::XY => Vector3::ZAXIS,
            CartesianPlane::YZ => Vector3::XAXIS,
            CartesianPlane::ZX => Vector3::YAXIS,
        }
    }

    /// The pair of in-plane axes used to rebuild an orientation after mirroring.
    pub const fn mirror_axes(self) -> (Axis, Axis) {
        match self {
            CartesianPlane::XY => (Axis::PosX, Axis::PosY),
            CartesianPlane::YZ => (Axis::PosY, Axis::PosZ),
            CartesianPlane::ZX => (Axis::PosZ, Axis::PosX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_order_codes_round_trip() {
        for order in RotationOrder::ALL {
            assert_eq!(RotationOrder::try_from(order as i32), Ok(order));
        }
        assert!(RotationOrder::try_from(6).is_err());
        assert_eq!(RotationOrder::default(), RotationOrder::XYZ);
        assert_eq!(RotationOrder::ZXY.to_string(), "ZXY");
    }

    #[test]
    fn rotation_order_parity() {
        let even: Vec<_> = RotationOrder::ALL.iter().filter(|o| o.is_even()).collect();
        assert_eq!(even, [&RotationOrder::XYZ, &RotationOrder::YZX, &RotationOrder::ZXY]);
    }

    #[test]
    fn axis_sign_and_index() {
        assert_eq!(Axis::try_from(-2), Ok(Axis::NegY));
        assert!(Axis::try_from(0).is_err());
        assert!(Axis::NegZ.is_negative());
        assert!(!Axis::PosZ.is_negative());
        assert_eq!(Axis::NegZ.index(), 2);
        assert_eq!(Axis::NegY.positive(), Axis::PosY);
        assert_eq!(Axis::NegX.to_vector3(), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(Axis::NegX.to_string(), "-X");
    }

    #[test]
    fn planes() {
        assert_eq!(CartesianPlane::default(), CartesianPlane::YZ);
        assert_eq!(CartesianPlane::XY.normal(), Vector3::ZAXIS);
        assert_eq!(CartesianPlane::ZX.mirror_axes(), (Axis::PosZ, Axis::PosX));
    }
}
