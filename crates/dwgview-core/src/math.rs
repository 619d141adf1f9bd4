//! 数学基础类型
//!
//! 基于 nalgebra 提供的向量和点类型的别名。

use nalgebra as na;

/// 2D点类型
pub type Point2 = na::Point2<f64>;

/// 3D点类型
pub type Point3 = na::Point3<f64>;

/// 2D向量类型
pub type Vector2 = na::Vector2<f64>;

/// 3D向量类型
pub type Vector3 = na::Vector3<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 2π，完整一圈的弧度
pub const TAU: f64 = 2.0 * std::f64::consts::PI;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 将角度归一化到 [0, 2π)
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a < 0.0 {
        a += TAU;
    }
    a
}

/// 3D点转换为线格式数组 [x, y, z]
#[inline]
pub fn to_array3(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// 2D点转换为线格式数组 [x, y]
#[inline]
pub fn to_array2(p: &Point2) -> [f64; 2] {
    [p.x, p.y]
}
