//! 输出线格式模型
//!
//! 转换引擎的输出树：每个实体一个 `ConvertedEntity`（类型标签 +
//! 几何 + 有序属性包 + 子实体），文档级汇总为 `DocumentResult`。
//! 输出只做序列化（消费端是3D查看器），引擎不反序列化自己的输出。

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 转换后的实体
///
/// `entity_type` 由且仅由一个成功的类型转换器设置；
/// `children` 仅Insert/标注等复合类型非空。
#[derive(Debug, Clone, Serialize)]
pub struct ConvertedEntity {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
    pub children: Vec<ConvertedEntity>,
}

/// 几何变体
///
/// 封闭集合；线格式上不带标签（同级的 `type` 字段区分变体）。
/// 三维点为 `[x, y, z]`，边界环点为 `[x, y]`。
#[derive(Debug, Clone, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Geometry {
    Line {
        points: Vec<[f64; 3]>,
    },
    Circle {
        center: [f64; 3],
        radius: f64,
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        normal: [f64; 3],
    },
    Ellipse {
        center: [f64; 3],
        major_axis: [f64; 3],
        minor_axis_ratio: f64,
        start_angle: f64,
        end_angle: f64,
    },
    LwPolyline {
        points: Vec<[f64; 3]>,
        bulges: Vec<f64>,
        is_closed: bool,
    },
    Polyline {
        vertices: Vec<[f64; 3]>,
        bulges: Vec<f64>,
        is_closed: bool,
    },
    Text {
        insertion_point: [f64; 3],
        text: String,
        height: f64,
        rotation: f64,
        width_factor: f64,
        horizontal_alignment: String,
        vertical_alignment: String,
    },
    MText {
        insertion_point: [f64; 3],
        text: String,
        height: f64,
        rotation: f64,
        rectangle_width: f64,
        attachment_point: String,
    },
    Insert {
        insertion_point: [f64; 3],
        origin: [f64; 3],
        scale: [f64; 3],
        rotation: f64,
        block_name: String,
    },
    Hatch {
        boundaries: Vec<Vec<[f64; 2]>>,
        pattern_name: String,
        pattern_type: String,
        is_solid: bool,
    },
    Region {
        boundaries: Vec<Vec<[f64; 2]>>,
        is_solid: bool,
    },
    DimensionLinear {
        ext_line1_point: [f64; 3],
        ext_line2_point: [f64; 3],
        dim_line_location: [f64; 3],
        rotation: f64,
        measurement: f64,
    },
    DimensionAligned {
        ext_line1_point: [f64; 3],
        ext_line2_point: [f64; 3],
        dim_line_location: [f64; 3],
        measurement: f64,
    },
    DimensionRadius {
        center: [f64; 3],
        chord_point: [f64; 3],
        measurement: f64,
    },
    DimensionDiameter {
        chord_point: [f64; 3],
        far_chord_point: [f64; 3],
        measurement: f64,
    },
    DimensionAngular {
        center_point: [f64; 3],
        first_point: [f64; 3],
        second_point: [f64; 3],
        measurement: f64,
    },
    Leader {
        vertices: Vec<[f64; 3]>,
        has_arrowhead: bool,
        has_hookline: bool,
    },
    MultiLeader {
        landing_location: [f64; 3],
        dogleg_length: f64,
    },
    Spline {
        control_points: Vec<[f64; 3]>,
        fit_points: Vec<[f64; 3]>,
        knots: Vec<f64>,
        degree: u32,
        is_closed: bool,
        is_periodic: bool,
        is_rational: bool,
    },
    Solid {
        vertices: Vec<[f64; 3]>,
    },
    Face3D {
        vertices: Vec<[f64; 3]>,
        edge_flags: i32,
    },
    Point {
        location: [f64; 3],
    },
    Viewport {
        center: [f64; 3],
        width: f64,
        height: f64,
        view_center: [f64; 2],
        view_height: f64,
        scale: f64,
    },
    MLine {
        vertices: Vec<[f64; 3]>,
    },
    Wipeout {
        boundary: Vec<[f64; 2]>,
        is_clipped: bool,
        boundary_type: String,
    },
}

/// 图层信息（输出侧）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    pub name: String,
    pub color: [u8; 3],
    pub is_visible: bool,
    pub is_frozen: bool,
    pub handle: String,
}

/// 线型信息（输出侧）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinetypeInfo {
    pub name: String,
    pub description: String,
    pub pattern: Vec<f64>,
}

/// 转换统计
///
/// found按归一化类型名统计文档中出现的实体，converted统计
/// 成功转换的实体；两者之差即覆盖缺口，供消费端报告。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub total_found: usize,
    pub total_converted: usize,
    pub found_by_type: BTreeMap<String, usize>,
    pub converted_by_type: BTreeMap<String, usize>,
}

/// 文档级转换结果
///
/// 每次parse调用构建一个全新的结果，调用之间不共享状态。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResult {
    pub entities: Vec<ConvertedEntity>,
    pub layers: Vec<LayerInfo>,
    pub linetypes: Vec<LinetypeInfo>,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_serializes_untagged_camel_case() {
        let geometry = Geometry::Arc {
            center: [1.0, 2.0, 0.0],
            radius: 5.0,
            start_angle: 0.0,
            end_angle: 1.5,
            normal: [0.0, 0.0, 1.0],
        };
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["center"], serde_json::json!([1.0, 2.0, 0.0]));
        assert_eq!(json["startAngle"], serde_json::json!(0.0));
        // 无标签：变体名不出现在线格式里
        assert!(json.get("Arc").is_none());
    }

    #[test]
    fn test_entity_type_key_renamed() {
        let entity = ConvertedEntity {
            id: "1A".to_string(),
            entity_type: "Line".to_string(),
            geometry: Geometry::Line {
                points: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            },
            properties: Map::new(),
            children: Vec::new(),
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "Line");
        assert_eq!(json["id"], "1A");
    }
}
