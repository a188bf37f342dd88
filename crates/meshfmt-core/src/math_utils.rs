//! Fixed-size vector aliases and the handful of geometric helpers the
//! format codecs need.
//!
//! Vectors are plain arrays so they can be copied straight into and out of
//! file records without conversion.

use num_traits::Float;

pub type Vector2f = [f32; 2];
pub type Vector3f = [f32; 3];
pub type Vector4f = [f32; 4];
pub type Vector2d = [f64; 2];
pub type Vector3d = [f64; 3];

/// Three vertex (or attribute) indices of a triangle.
pub type Index3i = [i32; 3];
/// Four vertex (or attribute) indices of a quad.
pub type Index4i = [i32; 4];

/// Marks an attribute reference that is absent.
pub const INVALID_INDEX: i32 = -1;

/// Returns true if `index` addresses an element of a pool of `len` values.
#[inline]
pub fn is_valid_index(index: i32, len: usize) -> bool {
    index >= 0 && (index as usize) < len
}

#[inline]
pub fn sub3<T: Float>(a: [T; 3], b: [T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn cross3<T: Float>(a: [T; 3], b: [T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn length3<T: Float>(v: [T; 3]) -> T {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Normalizes `v`, returning the zero vector when its length is zero.
pub fn normalized3<T: Float>(v: [T; 3]) -> [T; 3] {
    let len = length3(v);
    if len > T::zero() {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [T::zero(); 3]
    }
}

/// Unit normal of the triangle `(a, b, c)` following counter-clockwise
/// winding. Degenerate triangles yield the zero vector.
pub fn triangle_normal<T: Float>(a: [T; 3], b: [T; 3], c: [T; 3]) -> [T; 3] {
    normalized3(cross3(sub3(b, a), sub3(c, a)))
}

#[inline]
pub fn to_f64<const N: usize>(v: [f32; N]) -> [f64; N] {
    v.map(f64::from)
}

#[inline]
pub fn to_f32<const N: usize>(v: [f64; N]) -> [f32; N] {
    v.map(|c| c as f32)
}
