//! 曲线采样
//!
//! 将参数化曲线（圆弧、椭圆弧、凸度弧）离散为有序点列，
//! 供边界环构建和填充渲染使用。全部为纯函数。

use dwgview_core::math::{normalize_angle, Point2, Vector2, TAU};

/// 圆弧采样的默认分段数
pub const ARC_SEGMENTS: usize = 16;

/// 椭圆弧采样的默认分段数
pub const ELLIPSE_SEGMENTS: usize = 64;

/// 圆/弧区分容差（弧度）：扫角与2π之差小于该值视为完整的圆
pub const FULL_CIRCLE_TOL: f64 = 0.01;

/// 采样圆弧
///
/// 角度为弧度。当 `end_angle < start_angle` 时先加2π（跨0°的圆弧），
/// 然后对角度参数线性插值，输出 `segments + 1` 个点（含两端点）。
pub fn sample_arc(
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
) -> Vec<[f64; 2]> {
    let mut end = end_angle;
    if end < start_angle {
        end += TAU;
    }

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let angle = start_angle + (end - start_angle) * t;
        points.push([
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ]);
    }
    points
}

/// 采样椭圆弧
///
/// `major_axis` 是从中心指向长轴端点的向量；短轴由长轴旋转90°
/// 再乘以 `ratio` 得到。参数t处的点为
/// `center + major*cos(t) + minor*sin(t)`。
pub fn sample_ellipse(
    center: Point2,
    major_axis: Vector2,
    ratio: f64,
    start_angle: f64,
    end_angle: f64,
    segments: usize,
) -> Vec<[f64; 2]> {
    // 短轴 = 长轴旋转90°后按比例缩放
    let minor_x = -major_axis.y * ratio;
    let minor_y = major_axis.x * ratio;

    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let angle = start_angle + (end_angle - start_angle) * i as f64 / segments as f64;
        let cos = angle.cos();
        let sin = angle.sin();
        points.push([
            center.x + major_axis.x * cos + minor_x * sin,
            center.y + major_axis.y * cos + minor_y * sin,
        ]);
    }
    points
}

/// 按凸度展开多段线弧线段
///
/// 凸度 = tan(扫角/4)，正值表示从起点到终点逆时针。
/// 返回起点到终点之间的中间采样点（不含两端点，
/// 端点由多段线顶点本身提供）。凸度为0返回空。
pub fn expand_bulge(start: Point2, end: Point2, bulge: f64) -> Vec<[f64; 2]> {
    if bulge.abs() < 1e-12 {
        return Vec::new();
    }

    let chord = end - start;
    let chord_len = chord.norm();
    if chord_len < 1e-12 {
        return Vec::new();
    }

    // 带符号扫角和半径/圆心的闭式解
    let sweep = 4.0 * bulge.atan();
    let radius = chord_len * (1.0 + bulge * bulge) / (4.0 * bulge.abs());

    let mid = Point2::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    let left = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + left * (chord_len * (1.0 - bulge * bulge) / (4.0 * bulge));

    let start_angle = (start.y - center.y).atan2(start.x - center.x);

    let segments = ARC_SEGMENTS;
    let mut points = Vec::with_capacity(segments.saturating_sub(1));
    for i in 1..segments {
        let angle = start_angle + sweep * i as f64 / segments as f64;
        points.push([
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ]);
    }
    points
}

/// 判断带起止角的圆实体是否实际是完整的圆
///
/// 扫角与2π之差在 [`FULL_CIRCLE_TOL`] 内视为整圆，否则视为圆弧。
pub fn is_full_circle(start_angle: f64, end_angle: f64) -> bool {
    let mut sweep = end_angle - start_angle;
    if sweep < 0.0 {
        sweep += TAU;
    }
    (sweep - TAU).abs() <= FULL_CIRCLE_TOL
}

/// 归一化后的扫角（始终为正）
pub fn sweep_angle(start_angle: f64, end_angle: f64) -> f64 {
    let sweep = normalize_angle(end_angle) - normalize_angle(start_angle);
    if sweep <= 0.0 {
        sweep + TAU
    } else {
        sweep
    }
}
