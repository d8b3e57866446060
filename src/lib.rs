//! **3D graphics linear algebra** for animation and rigging tools: vectors,
//! 3x3/4x4 matrices, quaternions, Euler angles and the composite transform
//! [`Xfo`], with conversions between every rotation representation.
//!
//! Rotations can be built from Euler angles in any of the six
//! [`RotationOrder`]s, from an axis and an angle, from one vector to another, or
//! by aiming an [`Axis`] at a target. They can be read back in any of those
//! forms, including the gimbal-locked and near-180° cases.
//!
//! # Conventions
//! - Row vectors: points transform as `v * M`, and `v * (A * B)` applies `A` first.
//! - Row-major storage: rows 0..2 of a rotation matrix are its X, Y and Z axes,
//!   row 3 of a [`Matrix4`] is the translation.
//! - `==` compares within [`float_types::tolerance`]; see [`AlmostEqual`].
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**nalgebra**](https://nalgebra.org): `From`/`Into` conversions with nalgebra's vectors, matrices and unit quaternions
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod axis;
pub mod errors;
pub mod euler;
pub mod float_types;
pub mod geometry;
pub mod matrix3;
pub mod matrix4;
pub mod quaternion;
pub mod scalar;
pub mod traits;
pub mod vector3;
pub mod vector4;
pub mod xfo;

#[cfg(feature = "nalgebra")]
pub mod interop;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use axis::{Axis, CartesianPlane, RotationOrder};
pub use errors::GmathError;
pub use euler::{AngleUnit, Euler};
pub use float_types::Real;
pub use geometry::Intersection;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use traits::AlmostEqual;
pub use vector3::Vector3;
pub use vector4::Vector4;
pub use xfo::Xfo;
