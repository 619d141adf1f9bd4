//! 边界环构建
//!
//! 将填充/区域的异构边界边序列（线/弧/椭圆/多段线）展开为
//! 封闭、去重的二维点环，供边界填充渲染使用。

use crate::sampler::{expand_bulge, sample_arc, sample_ellipse, ARC_SEGMENTS, ELLIPSE_SEGMENTS};
use dwgview_core::entity::{BoundaryEdge, BoundaryPath};
use dwgview_core::math::Point2;

/// 消除连续重复点的距离阈值（比较平方距离）
const DEDUP_TOLERANCE: f64 = 1e-9;

/// 首末点强制闭合的距离阈值
const CLOSURE_TOLERANCE: f64 = 1e-6;

/// 按顺序展开一条边界路径的所有边
///
/// - 线边只贡献起点（相邻边首尾相接，终点由下一条边提供）
/// - 弧边/椭圆边通过曲线采样展开
/// - 多段线边逐顶点贡献，顶点凸度非零时在其后插入弧的中间采样点
pub fn process_edges(edges: &[BoundaryEdge]) -> Vec<[f64; 2]> {
    let mut points = Vec::new();

    for edge in edges {
        match edge {
            BoundaryEdge::Line { start, .. } => {
                points.push([start.x, start.y]);
            }
            BoundaryEdge::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                points.extend(sample_arc(
                    *center,
                    *radius,
                    *start_angle,
                    *end_angle,
                    ARC_SEGMENTS,
                ));
            }
            BoundaryEdge::Ellipse {
                center,
                major_axis,
                ratio,
                start_angle,
                end_angle,
            } => {
                points.extend(sample_ellipse(
                    *center,
                    *major_axis,
                    *ratio,
                    *start_angle,
                    *end_angle,
                    ELLIPSE_SEGMENTS,
                ));
            }
            BoundaryEdge::Polyline { vertices } => {
                for (i, vertex) in vertices.iter().enumerate() {
                    points.push([vertex.x, vertex.y]);
                    if vertex.bulge != 0.0 {
                        if let Some(next) = vertices.get(i + 1) {
                            points.extend(expand_bulge(
                                Point2::new(vertex.x, vertex.y),
                                Point2::new(next.x, next.y),
                                vertex.bulge,
                            ));
                        }
                    }
                }
            }
        }
    }

    points
}

/// 清理并闭合点环
///
/// 先去掉连续重复点，然后当点数大于2且首末点距离超过
/// 闭合阈值时追加首点强制闭合。
pub fn finalize_loop(points: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    let mut points = remove_consecutive_duplicates(points);

    if points.len() > 2 {
        let first = points[0];
        let last = points[points.len() - 1];
        let distance = ((first[0] - last[0]).powi(2) + (first[1] - last[1]).powi(2)).sqrt();
        if distance > CLOSURE_TOLERANCE {
            points.push(first);
        }
    }

    points
}

/// 展开并闭合一条完整的边界路径
///
/// 返回 `None` 表示该路径清理后没有点，调用方应将其丢弃。
pub fn build_loop(path: &BoundaryPath) -> Option<Vec<[f64; 2]>> {
    let points = finalize_loop(process_edges(&path.edges));
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

fn remove_consecutive_duplicates(points: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    if points.len() <= 1 {
        return points;
    }

    let mut result = Vec::with_capacity(points.len());
    let mut iter = points.into_iter();
    if let Some(first) = iter.next() {
        result.push(first);
    }

    for curr in iter {
        let prev = result[result.len() - 1];
        let dx = curr[0] - prev[0];
        let dy = curr[1] - prev[1];
        if dx * dx + dy * dy > DEDUP_TOLERANCE * DEDUP_TOLERANCE {
            result.push(curr);
        }
    }

    result
}
