//! Free functions built on the value types: aiming, distances and
//! intersections between lines, planes, circles and spheres.

use crate::axis::Axis;
use crate::errors::GmathError;
use crate::float_types::{Real, tolerance};
use crate::matrix3::Matrix3;
use crate::quaternion::Quaternion;
use crate::scalar::{self, is_close_to_zero};
use crate::vector3::Vector3;
use crate::xfo::Xfo;

/// Outcome of an intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection<T> {
    /// A regular crossing.
    Intersection(T),
    /// A tangential contact: the two shapes meet in a single point.
    TouchOnOnePoint(T),
    NoIntersection,
    Parallel,
    /// The line (or circle) lies inside the plane: infinitely many solutions.
    LaysOnPlane,
}

impl<T> Intersection<T> {
    /// `true` for both regular crossings and tangential contacts.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Intersection::Intersection(_) | Intersection::TouchOnOnePoint(_))
    }

    /// The intersection value, if there is a single well-defined one.
    pub fn value(self) -> Option<T> {
        match self {
            Intersection::Intersection(v) | Intersection::TouchOnOnePoint(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Intersection<U> {
        match self {
            Intersection::Intersection(v) => Intersection::Intersection(f(v)),
            Intersection::TouchOnOnePoint(v) => Intersection::TouchOnOnePoint(f(v)),
            Intersection::NoIntersection => Intersection::NoIntersection,
            Intersection::Parallel => Intersection::Parallel,
            Intersection::LaysOnPlane => Intersection::LaysOnPlane,
        }
    }
}

/* ------------------------------ aiming ------------------------------ */

/// Frame whose `primary` axis points along `direction` and whose `secondary`
/// axis leans toward `up`. Same as [`Matrix3::look_at`].
pub fn aim_matrix3(direction: &Vector3, up: &Vector3, primary: Axis, secondary: Axis) -> Result<Matrix3, GmathError> {
    Matrix3::look_at(direction, up, primary, secondary)
}

pub fn aim_quaternion(direction: &Vector3, up: &Vector3, primary: Axis, secondary: Axis) -> Result<Quaternion, GmathError> {
    Ok(aim_matrix3(direction, up, primary, secondary)?.to_quaternion())
}

/// [`aim_quaternion`] as an `Xfo` at the origin with unit scale.
pub fn aim_xfo(direction: &Vector3, up: &Vector3, primary: Axis, secondary: Axis) -> Result<Xfo, GmathError> {
    Ok(Xfo::from_orientation(aim_quaternion(direction, up, primary, secondary)?))
}

/// Fixed-axis aim: Y points along `direction`, X leans toward `up`.
///
/// ```text
/// y = normalize(direction)
/// x = normalize((y × up) × y)
/// z = normalize(x × y)
/// ```
pub fn fast_aim_matrix3(direction: &Vector3, up: &Vector3) -> Matrix3 {
    let primary = direction.normalize();
    let secondary = primary.cross(&up.normalize()).cross_normalize(&primary);
    let tertiary = secondary.cross_normalize(&primary);
    Matrix3::from_rows(secondary, primary, tertiary)
}

pub fn fast_aim_quaternion(direction: &Vector3, up: &Vector3) -> Quaternion {
    fast_aim_matrix3(direction, up).to_quaternion()
}

pub fn fast_aim_xfo(direction: &Vector3, up: &Vector3) -> Xfo {
    Xfo::from_orientation(fast_aim_quaternion(direction, up))
}

/* ------------------------------ distances ------------------------------ */

/// Signed distance from `point` to the plane, positive on the side `normal`
/// points to. `normal` does not need to be unit length.
pub fn distance_to_plane(origin: &Vector3, normal: &Vector3, point: &Vector3) -> Real {
    (*point - *origin).dot(&normal.normalize())
}

/// Distance from `point` to the line through `start` and `end`, or to the
/// segment between them when `infinite` is false. A degenerate line is
/// treated as the point `start`.
pub fn distance_to_line(start: &Vector3, end: &Vector3, point: &Vector3, infinite: bool) -> Real {
    point.distance(&closest_point_to_line(start, end, point, infinite))
}

/// Projection of `point` on the line through `start` and `end`, clamped to the
/// segment when `infinite` is false.
pub fn closest_point_to_line(start: &Vector3, end: &Vector3, point: &Vector3, infinite: bool) -> Vector3 {
    let line = *end - *start;
    let length = line.length();
    if is_close_to_zero(length) {
        return *start;
    }

    let direction = line * (1.0 / length);
    let mut along = (*point - *start).dot(&direction);
    if !infinite {
        along = scalar::clamp(along, 0.0, length);
    }
    *start + direction * along
}

/* ------------------------------ intersections ------------------------------ */

/// **Mathematical Foundation: line / plane intersection**
///
/// ```text
/// a = (p1 − p0)·n
/// b = (plane_point − p0)·n
/// x = b / a,      hit = p0 + (p1 − p0)·x
/// ```
/// `a ≈ 0` means the line is parallel to the plane; it then lies on it when
/// `b ≈ 0` as well. For a finite segment, `x` must fall in `[0, 1]`.
pub fn intersect_line_plane(
    p0: &Vector3,
    p1: &Vector3,
    plane_normal: &Vector3,
    plane_point: &Vector3,
    infinite: bool,
) -> Intersection<Vector3> {
    let segment = *p1 - *p0;
    let a = segment.dot(plane_normal);
    let b = (*plane_point - *p0).dot(plane_normal);

    if is_close_to_zero(a) {
        return if is_close_to_zero(b) {
            Intersection::LaysOnPlane
        } else {
            Intersection::Parallel
        };
    }

    let x = b / a;
    if !infinite && !(0.0..=1.0).contains(&x) {
        return Intersection::NoIntersection;
    }
    Intersection::Intersection(*p0 + segment * x)
}

/// Line shared by two planes, as `(origin, unit direction)`. The origin is the
/// point of the line closest to `p1`.
pub fn intersect_plane_plane(
    p1: &Vector3,
    n1: &Vector3,
    p2: &Vector3,
    n2: &Vector3,
) -> Intersection<(Vector3, Vector3)> {
    let (n1, n2) = (n1.normalize(), n2.normalize());
    if scalar::almost_equal(n1.dot(&n2).abs(), 1.0) {
        return Intersection::Parallel;
    }

    let direction = n1.cross_normalize(&n2);
    // in plane 1, perpendicular to the shared line
    let toward_line = direction.cross_normalize(&n1);
    intersect_line_plane(p1, &(*p1 + toward_line), &n2, p2, true).map(|origin| (origin, direction))
}

/// Points where a circle crosses a plane.
///
/// The circle's own plane is intersected with the target plane; the two
/// points then sit on that line at `√(r² − d²)` from the projection of the
/// center, `d` being the distance of the center to the line. A tangent circle
/// yields [`Intersection::TouchOnOnePoint`] with the same point twice. A circle
/// parallel to the plane yields [`Intersection::LaysOnPlane`] when it lies in
/// it, [`Intersection::Parallel`] otherwise.
pub fn intersect_circle_plane(
    center: &Vector3,
    normal: &Vector3,
    radius: Real,
    plane_normal: &Vector3,
    plane_point: &Vector3,
) -> Intersection<(Vector3, Vector3)> {
    let (origin, direction) = match intersect_plane_plane(plane_point, plane_normal, center, normal) {
        Intersection::Intersection(line) => line,
        Intersection::Parallel => {
            return if is_close_to_zero(distance_to_plane(plane_point, plane_normal, center)) {
                Intersection::LaysOnPlane
            } else {
                Intersection::Parallel
            };
        },
        _ => return Intersection::NoIntersection,
    };

    let foot = closest_point_to_line(&origin, &(origin + direction), center, true);
    let distance = foot.distance(center);
    let radius = radius.abs();

    if scalar::almost_equal(distance, radius) {
        return Intersection::TouchOnOnePoint((foot, foot));
    }
    if distance > radius {
        return Intersection::NoIntersection;
    }

    let half_chord = (radius * radius - distance * distance).sqrt();
    Intersection::Intersection((foot + direction * half_chord, foot - direction * half_chord))
}

/// **Mathematical Foundation: ray / sphere**
///
/// With `d` the unit direction from `origin` toward `point_on_line` and
/// `m = origin − center`:
/// ```text
/// t² + 2(m·d)t + (m·m − r²) = 0
/// ```
/// Of the two roots the first one reached walking from `origin` along `d` is
/// returned; when both lie behind `origin`, the nearer one is. A double root
/// is reported as [`Intersection::TouchOnOnePoint`].
pub fn intersect_line_sphere(origin: &Vector3, point_on_line: &Vector3, center: &Vector3, radius: Real) -> Intersection<Vector3> {
    let line = *point_on_line - *origin;
    if is_close_to_zero(line.length()) {
        return Intersection::NoIntersection;
    }

    let d = line.normalize();
    let m = *origin - *center;
    let b = m.dot(&d);
    let c = m.squared_length() - radius * radius;
    let discriminant = b * b - c;

    if discriminant.abs() <= tolerance() {
        return Intersection::TouchOnOnePoint(*origin + d * -b);
    }
    if discriminant < 0.0 {
        return Intersection::NoIntersection;
    }

    let root = discriminant.sqrt();
    let (near, far) = (-b - root, -b + root);
    let t = if near >= 0.0 { near } else { far };
    Intersection::Intersection(*origin + d * t)
}
