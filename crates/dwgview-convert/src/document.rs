//! 文档转换
//!
//! 遍历文档的全部实体逐个转换，独立提取图层表和线型表，
//! 并按归一化类型名统计"发现/转换"两组计数。计数差即当前
//! 引擎的覆盖缺口，供消费端展示。

use crate::convert::convert_entity;
use crate::output::{DocumentResult, LayerInfo, LinetypeInfo, Metadata};
use dwgview_core::document::CadDocument;
use tracing::{debug, info};

/// 转换整个文档
///
/// 每次调用构建全新的结果，不持有输入文档的任何引用。
pub fn parse(doc: &CadDocument) -> DocumentResult {
    let layers = extract_layers(doc);
    let linetypes = extract_linetypes(doc);

    let mut entities = Vec::new();
    let mut metadata = Metadata::default();

    for entity in &doc.entities {
        let type_key = normalize_type_name(entity.kind.type_name());
        metadata.total_found += 1;
        *metadata.found_by_type.entry(type_key.to_string()).or_insert(0) += 1;

        if let Some(converted) = convert_entity(entity, doc) {
            metadata.total_converted += 1;
            *metadata
                .converted_by_type
                .entry(type_key.to_string())
                .or_insert(0) += 1;
            entities.push(converted);
        } else {
            debug!(
                handle = %entity.handle,
                kind = entity.kind.type_name(),
                "实体未转换"
            );
        }
    }

    info!(
        total_found = metadata.total_found,
        total_converted = metadata.total_converted,
        layers = layers.len(),
        "文档转换完成"
    );

    DocumentResult {
        entities,
        layers,
        linetypes,
        metadata,
    }
}

/// 统计键的归一化类型名
///
/// 同一逻辑类型的不同原生记录名合并到一个键下。
fn normalize_type_name(raw: &str) -> &str {
    match raw {
        "TextEntity" => "Text",
        "LwPolyline" | "Polyline2D" | "Polyline3D" => "Polyline",
        "Face3D" => "3DFace",
        _ if raw.starts_with("Dimension") => "Dimension",
        _ => raw,
    }
}

fn extract_layers(doc: &CadDocument) -> Vec<LayerInfo> {
    doc.layers
        .iter()
        .map(|layer| LayerInfo {
            name: layer.name.clone(),
            color: layer.color.to_array(),
            is_visible: layer.is_on,
            is_frozen: layer.is_frozen,
            handle: layer.handle.clone(),
        })
        .collect()
}

fn extract_linetypes(doc: &CadDocument) -> Vec<LinetypeInfo> {
    doc.linetypes
        .iter()
        .map(|linetype| LinetypeInfo {
            name: linetype.name.clone(),
            description: linetype.description.clone(),
            pattern: linetype.pattern.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwgview_core::color::Rgb;
    use dwgview_core::document::{Layer, Linetype};
    use dwgview_core::entity::{
        BoundaryEdge, BoundaryPath, CadEntity, EntityKind, HatchData, LineData, RayData,
    };
    use dwgview_core::math::{Point2, Point3, Vector3};

    fn line(handle: &str) -> CadEntity {
        CadEntity::new(
            handle,
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
        )
    }

    fn ray(handle: &str) -> CadEntity {
        CadEntity::new(
            handle,
            EntityKind::Ray(RayData {
                origin: Point3::origin(),
                direction: Vector3::new(1.0, 0.0, 0.0),
            }),
        )
    }

    fn triangle_hatch(handle: &str) -> CadEntity {
        let path = BoundaryPath {
            edges: vec![
                BoundaryEdge::Line {
                    start: Point2::new(0.0, 0.0),
                    end: Point2::new(10.0, 0.0),
                },
                BoundaryEdge::Line {
                    start: Point2::new(10.0, 0.0),
                    end: Point2::new(5.0, 8.0),
                },
                BoundaryEdge::Line {
                    start: Point2::new(5.0, 8.0),
                    end: Point2::new(0.0, 0.0),
                },
            ],
        };
        CadEntity::new(handle, EntityKind::Hatch(HatchData::solid(vec![path])))
    }

    #[test]
    fn test_statistics_track_coverage_gap() {
        // 5条线 + 2个不支持的实体 + 1个三角形填充
        let mut doc = CadDocument::new();
        for i in 0..5 {
            doc.add_entity(line(&format!("L{i}")));
        }
        doc.add_entity(ray("R1"));
        doc.add_entity(ray("R2"));
        doc.add_entity(triangle_hatch("H1"));

        let result = parse(&doc);

        assert_eq!(result.metadata.total_found, 8);
        assert_eq!(result.metadata.total_converted, 6);
        assert_eq!(result.entities.len(), 6);
        assert_eq!(result.metadata.found_by_type["Line"], 5);
        assert_eq!(result.metadata.converted_by_type["Line"], 5);
        assert_eq!(result.metadata.found_by_type["Ray"], 2);
        assert!(!result.metadata.converted_by_type.contains_key("Ray"));

        // 填充边界：3个顶点 + 闭合点
        let hatch = result
            .entities
            .iter()
            .find(|e| e.entity_type == "Hatch")
            .unwrap();
        match &hatch.geometry {
            crate::output::Geometry::Hatch { boundaries, .. } => {
                assert_eq!(boundaries[0].len(), 4);
            }
            _ => panic!("应为填充几何"),
        }
    }

    #[test]
    fn test_type_name_aliasing() {
        assert_eq!(normalize_type_name("TextEntity"), "Text");
        assert_eq!(normalize_type_name("MText"), "MText");
        assert_eq!(normalize_type_name("LwPolyline"), "Polyline");
        assert_eq!(normalize_type_name("Polyline2D"), "Polyline");
        assert_eq!(normalize_type_name("Polyline3D"), "Polyline");
        assert_eq!(normalize_type_name("DimensionLinear"), "Dimension");
        assert_eq!(normalize_type_name("DimensionRadius"), "Dimension");
        assert_eq!(normalize_type_name("Face3D"), "3DFace");
        assert_eq!(normalize_type_name("Circle"), "Circle");
    }

    #[test]
    fn test_layers_and_linetypes_extracted_independently() {
        let mut doc = CadDocument::new();
        doc.layers
            .push(Layer::new("Walls", "10").with_color(Rgb::RED));
        doc.linetypes
            .push(Linetype::new("DASHED").with_pattern(vec![12.0, -6.0]));

        // 没有任何实体也能提取表
        let result = parse(&doc);
        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.layers[0].color, [255, 0, 0]);
        assert!(result.layers[0].is_visible);
        assert_eq!(result.linetypes[0].pattern, vec![12.0, -6.0]);
        assert_eq!(result.metadata.total_found, 0);
    }

    #[test]
    fn test_wire_shape_top_level_keys() {
        let mut doc = CadDocument::new();
        doc.add_entity(line("L1"));

        let json = serde_json::to_value(parse(&doc)).unwrap();
        assert!(json.get("entities").is_some());
        assert!(json.get("layers").is_some());
        assert!(json.get("linetypes").is_some());
        assert!(json.get("metadata").is_some());
        assert_eq!(json["metadata"]["totalFound"], 1);
        assert_eq!(json["metadata"]["totalConverted"], 1);
        // 点是 [x, y, z] 数组
        assert_eq!(
            json["entities"][0]["geometry"]["points"][1],
            serde_json::json!([1.0, 0.0, 0.0])
        );
    }
}
