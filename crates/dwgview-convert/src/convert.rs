//! 实体转换
//!
//! 转换引擎的核心：对实体的几何载荷做穷尽匹配，为每种支持的
//! 类型生成类型标签、几何变体和属性包。公共属性（句柄、图层、
//! 颜色、线型、可见性）由入口统一填充，类型特定属性由各分支
//! 追加，绝不覆盖公共键。
//!
//! Insert和标注会递归转换所引用块中的实体，递归深度受
//! [`MAX_BLOCK_DEPTH`] 保护，超限时记录警告并返回零子实体。

use crate::boundary;
use crate::output::{ConvertedEntity, Geometry};
use crate::resolve::{color_method_name, resolve_color};
use crate::sampler::{is_full_circle, sweep_angle};
use crate::text::strip_inline_codes;
use dwgview_core::document::CadDocument;
use dwgview_core::entity::{
    CadEntity, CircleData, DimensionData, DimensionKind, EllipseData, EntityKind, Face3DData,
    HatchData, InsertData, LeaderData, LeaderPathType, LineData, LwPolylineData, MLineData,
    MTextData, MultiLeaderData, PointData, PolylineData, SolidData, SplineData, TextData,
    ViewportData, WipeoutData,
};
use dwgview_core::math::{normalize_angle, to_array2, to_array3, Point3, TAU};
use serde_json::{json, Map, Value};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// 块递归展开的最大深度
pub const MAX_BLOCK_DEPTH: usize = 32;

/// 转换单个实体
///
/// 不支持的类型返回 `None`（丢弃，不是错误）。
pub fn convert_entity(entity: &CadEntity, doc: &CadDocument) -> Option<ConvertedEntity> {
    convert_at_depth(entity, doc, 0)
}

fn convert_at_depth(
    entity: &CadEntity,
    doc: &CadDocument,
    depth: usize,
) -> Option<ConvertedEntity> {
    let mut properties = common_properties(entity, doc);
    let mut children = Vec::new();

    let (entity_type, geometry) = match &entity.kind {
        EntityKind::Line(line) => convert_line(line, &mut properties),
        EntityKind::Circle(circle) => convert_circle(circle, &mut properties),
        EntityKind::Ellipse(ellipse) => convert_ellipse(ellipse, &mut properties),
        EntityKind::LwPolyline(poly) => convert_lwpolyline(poly, &mut properties),
        EntityKind::Polyline(poly) => convert_polyline(poly, &mut properties),
        EntityKind::Text(text) => convert_text(text, &mut properties),
        EntityKind::MText(mtext) => convert_mtext(mtext, &mut properties),
        EntityKind::Insert(insert) => {
            convert_insert(insert, doc, depth, &mut properties, &mut children)
        }
        EntityKind::Hatch(hatch) => convert_hatch(hatch, &mut properties),
        EntityKind::Region => convert_region(entity, &mut properties),
        EntityKind::Dimension(dim) => {
            convert_dimension(dim, doc, depth, &mut properties, &mut children)
        }
        EntityKind::Leader(leader) => convert_leader(leader, &mut properties),
        EntityKind::MultiLeader(mleader) => convert_multileader(mleader, &mut properties),
        EntityKind::Spline(spline) => convert_spline(spline, &mut properties),
        EntityKind::Solid(solid) => convert_solid(solid, &mut properties),
        EntityKind::Face3D(face) => convert_face3d(face, &mut properties),
        EntityKind::Point(point) => convert_point(point, &mut properties),
        EntityKind::Viewport(viewport) => convert_viewport(viewport, &mut properties),
        EntityKind::MLine(mline) => convert_mline(mline, &mut properties),
        EntityKind::Wipeout(wipeout) => convert_wipeout(wipeout, &mut properties),
        EntityKind::Ray(_) | EntityKind::XLine(_) => {
            debug!(
                handle = %entity.handle,
                kind = entity.kind.type_name(),
                "不支持的实体类型，跳过"
            );
            return None;
        }
    };

    Some(ConvertedEntity {
        id: entity.handle.clone(),
        entity_type: entity_type.to_string(),
        geometry,
        properties,
        children,
    })
}

/// 填充所有实体共有的属性（类型转换器不得覆盖这些键）
fn common_properties(entity: &CadEntity, doc: &CadDocument) -> Map<String, Value> {
    let color = resolve_color(entity, doc);
    let layer_name = entity.layer.as_deref().unwrap_or("0");
    let layer_handle = entity
        .layer
        .as_deref()
        .and_then(|name| doc.layer(name))
        .map(|layer| layer.handle.clone())
        .unwrap_or_else(|| "0".to_string());

    let mut props = Map::new();
    props.insert("Handle".to_string(), json!(entity.handle));
    props.insert("ObjectName".to_string(), json!(entity.kind.object_name()));
    props.insert("ObjectType".to_string(), json!(entity.kind.type_name()));
    props.insert("OwnerHandle".to_string(), json!(entity.owner_handle));
    props.insert("Layer".to_string(), json!(layer_name));
    props.insert("LayerHandle".to_string(), json!(layer_handle));
    props.insert(
        "Color".to_string(),
        json!(format!("{}, {}, {}", color.r, color.g, color.b)),
    );
    props.insert("ColorIndex".to_string(), json!(entity.color_index));
    props.insert(
        "ColorMethod".to_string(),
        json!(color_method_name(&entity.color)),
    );
    props.insert("IsByLayer".to_string(), json!(entity.color.is_by_layer()));
    props.insert("IsByBlock".to_string(), json!(entity.color.is_by_block()));
    props.insert(
        "LineType".to_string(),
        json!(entity.linetype.as_deref().unwrap_or("Continuous")),
    );
    props.insert("LineWeight".to_string(), json!(entity.lineweight));
    props.insert("IsInvisible".to_string(), json!(entity.invisible));
    props.insert(
        "Transparency".to_string(),
        json!(entity.transparency.to_string()),
    );
    props
}

fn fmt_point(p: &Point3) -> String {
    format!("{:.2}, {:.2}, {:.2}", p.x, p.y, p.z)
}

fn deg(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

fn convert_line(line: &LineData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    props.insert("Thickness".to_string(), json!(line.thickness));
    props.insert("Start Point".to_string(), json!(fmt_point(&line.start)));
    props.insert("End Point".to_string(), json!(fmt_point(&line.end)));
    props.insert("Length".to_string(), json!(line.length()));

    (
        "Line",
        Geometry::Line {
            points: vec![to_array3(&line.start), to_array3(&line.end)],
        },
    )
}

/// 圆/圆弧区分转换
///
/// 带起止角且扫角明显小于2π的圆实际是圆弧，按弧输出；
/// 否则按整圆输出。
fn convert_circle(circle: &CircleData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    if let (Some(start), Some(end)) = (circle.start_angle, circle.end_angle) {
        if !is_full_circle(start, end) {
            let start = normalize_angle(start);
            let end = normalize_angle(end);
            let arc_angle = sweep_angle(start, end);

            props.insert("Thickness".to_string(), json!(circle.thickness));
            props.insert("Center".to_string(), json!(fmt_point(&circle.center)));
            props.insert("Radius".to_string(), json!(circle.radius));
            props.insert("Start Angle".to_string(), json!(deg(start)));
            props.insert("End Angle".to_string(), json!(deg(end)));
            props.insert("Arc Length".to_string(), json!(circle.radius * arc_angle));

            return (
                "Arc",
                Geometry::Arc {
                    center: to_array3(&circle.center),
                    radius: circle.radius,
                    start_angle: start,
                    end_angle: end,
                    normal: [circle.normal.x, circle.normal.y, circle.normal.z],
                },
            );
        }
    }

    props.insert("Thickness".to_string(), json!(circle.thickness));
    props.insert("Center".to_string(), json!(fmt_point(&circle.center)));
    props.insert("Radius".to_string(), json!(circle.radius));
    props.insert("Diameter".to_string(), json!(circle.radius * 2.0));
    props.insert("Area".to_string(), json!(PI * circle.radius * circle.radius));
    props.insert(
        "Circumference".to_string(),
        json!(TAU * circle.radius),
    );

    (
        "Circle",
        Geometry::Circle {
            center: to_array3(&circle.center),
            radius: circle.radius,
        },
    )
}

fn convert_ellipse(
    ellipse: &EllipseData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    let major_length = ellipse.major_axis_length();
    let minor_length = ellipse.ratio * major_length;

    props.insert("Center".to_string(), json!(fmt_point(&ellipse.center)));
    props.insert("MajorAxisLength".to_string(), json!(major_length));
    props.insert("MinorAxisLength".to_string(), json!(minor_length));
    props.insert("MinorAxisRatio".to_string(), json!(ellipse.ratio));
    props.insert("StartAngle".to_string(), json!(deg(ellipse.start_param)));
    props.insert("EndAngle".to_string(), json!(deg(ellipse.end_param)));

    (
        "Ellipse",
        Geometry::Ellipse {
            center: to_array3(&ellipse.center),
            major_axis: [
                ellipse.major_axis.x,
                ellipse.major_axis.y,
                ellipse.major_axis.z,
            ],
            minor_axis_ratio: ellipse.ratio,
            start_angle: ellipse.start_param,
            end_angle: ellipse.end_param,
        },
    )
}

fn convert_lwpolyline(
    poly: &LwPolylineData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    // 轻量多段线顶点是2D的，用elevation补全Z坐标
    let points: Vec<[f64; 3]> = poly
        .vertices
        .iter()
        .map(|v| [v.x, v.y, poly.elevation])
        .collect();
    let bulges: Vec<f64> = poly.vertices.iter().map(|v| v.bulge).collect();

    props.insert("Closed".to_string(), json!(poly.is_closed));
    props.insert("Constant Width".to_string(), json!(poly.constant_width));
    props.insert("Thickness".to_string(), json!(poly.thickness));
    props.insert("Vertices Count".to_string(), json!(poly.vertices.len()));

    (
        "LwPolyline",
        Geometry::LwPolyline {
            points,
            bulges,
            is_closed: poly.is_closed,
        },
    )
}

fn convert_polyline(
    poly: &PolylineData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    let vertices: Vec<[f64; 3]> = poly.vertices.iter().map(to_array3).collect();
    // 重量多段线没有凸度信息，统一补0
    let bulges = vec![0.0; vertices.len()];

    props.insert("IsClosed".to_string(), json!(poly.is_closed));
    props.insert("VertexCount".to_string(), json!(vertices.len()));

    (
        "Polyline",
        Geometry::Polyline {
            vertices,
            bulges,
            is_closed: poly.is_closed,
        },
    )
}

fn convert_text(text: &TextData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    props.insert("Text".to_string(), json!(text.value));
    props.insert("Height".to_string(), json!(text.height));
    props.insert("Rotation".to_string(), json!(deg(text.rotation)));
    props.insert("WidthFactor".to_string(), json!(text.width_factor));
    props.insert(
        "Style".to_string(),
        json!(text.style.as_deref().unwrap_or("Standard")),
    );
    props.insert(
        "HorizontalAlignment".to_string(),
        json!(text.horizontal_alignment),
    );
    props.insert(
        "VerticalAlignment".to_string(),
        json!(text.vertical_alignment),
    );

    (
        "Text",
        Geometry::Text {
            insertion_point: to_array3(&text.insert),
            text: text.value.clone(),
            height: text.height,
            rotation: text.rotation,
            width_factor: text.width_factor,
            horizontal_alignment: text.horizontal_alignment.clone(),
            vertical_alignment: text.vertical_alignment.clone(),
        },
    )
}

fn convert_mtext(mtext: &MTextData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    // 存入剥离格式码后的显示文本
    let display_text = strip_inline_codes(&mtext.value);

    props.insert("Text".to_string(), json!(display_text));
    props.insert("Height".to_string(), json!(mtext.height));
    props.insert("Rotation".to_string(), json!(deg(mtext.rotation)));
    props.insert("RectangleWidth".to_string(), json!(mtext.rectangle_width));
    props.insert(
        "Style".to_string(),
        json!(mtext.style.as_deref().unwrap_or("Standard")),
    );
    props.insert("AttachmentPoint".to_string(), json!(mtext.attachment_point));

    (
        "MText",
        Geometry::MText {
            insertion_point: to_array3(&mtext.insert),
            text: display_text,
            height: mtext.height,
            rotation: mtext.rotation,
            rectangle_width: mtext.rectangle_width,
            attachment_point: mtext.attachment_point.clone(),
        },
    )
}

fn convert_insert(
    insert: &InsertData,
    doc: &CadDocument,
    depth: usize,
    props: &mut Map<String, Value>,
    children: &mut Vec<ConvertedEntity>,
) -> (&'static str, Geometry) {
    let block = doc.block(&insert.block_name);
    let origin = block
        .map(|b| to_array3(&b.origin))
        .unwrap_or([0.0, 0.0, 0.0]);

    props.insert("BlockName".to_string(), json!(insert.block_name));
    props.insert(
        "ScaleFactor".to_string(),
        json!(format!(
            "{}, {}, {}",
            insert.scale.x, insert.scale.y, insert.scale.z
        )),
    );
    props.insert("RotationAngle".to_string(), json!(deg(insert.rotation)));

    if !insert.attributes.is_empty() {
        let mut attributes = Map::new();
        for (tag, value) in &insert.attributes {
            attributes.insert(tag.clone(), json!(value));
        }
        props.insert("Attributes".to_string(), Value::Object(attributes));
    }

    // 递归转换块内实体，深度超限时放弃展开
    if let Some(block) = block {
        if depth >= MAX_BLOCK_DEPTH {
            warn!(
                block = %insert.block_name,
                depth,
                "块嵌套深度超限，停止展开"
            );
        } else {
            for child in &block.entities {
                if let Some(converted) = convert_at_depth(child, doc, depth + 1) {
                    children.push(converted);
                }
            }
        }
    } else {
        debug!(block = %insert.block_name, "块定义缺失，Insert无子实体");
    }

    (
        "Insert",
        Geometry::Insert {
            insertion_point: to_array3(&insert.insert),
            origin,
            scale: [insert.scale.x, insert.scale.y, insert.scale.z],
            rotation: insert.rotation,
            block_name: insert.block_name.clone(),
        },
    )
}

fn convert_hatch(hatch: &HatchData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    // 每条边界路径展开为一个闭合点环，空环丢弃
    let boundaries: Vec<Vec<[f64; 2]>> = hatch
        .paths
        .iter()
        .filter_map(boundary::build_loop)
        .collect();

    props.insert("PatternName".to_string(), json!(hatch.pattern_name));
    props.insert("PatternType".to_string(), json!(hatch.pattern_type));
    props.insert("IsSolid".to_string(), json!(hatch.is_solid));
    props.insert("Associative".to_string(), json!(hatch.is_associative));
    props.insert("BoundaryCount".to_string(), json!(boundaries.len()));

    (
        "Hatch",
        Geometry::Hatch {
            boundaries,
            pattern_name: hatch.pattern_name.clone(),
            pattern_type: hatch.pattern_type.clone(),
            is_solid: hatch.is_solid,
        },
    )
}

/// 面域转换
///
/// 面域的边界存在ACIS实体数据里，目前未解码，
/// 输出空边界列表并在属性里注明。
fn convert_region(entity: &CadEntity, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    debug!(handle = %entity.handle, "面域边界未提取，输出空边界列表");

    props.insert("IsSolid".to_string(), json!(true));
    props.insert("BoundaryCount".to_string(), json!(0));
    props.insert(
        "Note".to_string(),
        json!("Region boundary extraction pending investigation"),
    );

    (
        "Region",
        Geometry::Region {
            boundaries: Vec::new(),
            is_solid: true,
        },
    )
}

fn convert_dimension(
    dim: &DimensionData,
    doc: &CadDocument,
    depth: usize,
    props: &mut Map<String, Value>,
    children: &mut Vec<ConvertedEntity>,
) -> (&'static str, Geometry) {
    let (entity_type, geometry) = match &dim.kind {
        DimensionKind::Linear {
            first,
            second,
            dim_line,
            rotation,
            measurement,
        } => {
            props.insert(
                "FirstPoint".to_string(),
                json!(format!("{:.2}, {:.2}", first.x, first.y)),
            );
            props.insert(
                "SecondPoint".to_string(),
                json!(format!("{:.2}, {:.2}", second.x, second.y)),
            );
            props.insert("Measurement".to_string(), json!(measurement));
            props.insert("Rotation".to_string(), json!(deg(*rotation)));

            (
                "DimensionLinear",
                Geometry::DimensionLinear {
                    ext_line1_point: to_array3(first),
                    ext_line2_point: to_array3(second),
                    dim_line_location: to_array3(dim_line),
                    rotation: *rotation,
                    measurement: *measurement,
                },
            )
        }
        DimensionKind::Aligned {
            first,
            second,
            dim_line,
            measurement,
        } => {
            props.insert(
                "FirstPoint".to_string(),
                json!(format!("{:.2}, {:.2}", first.x, first.y)),
            );
            props.insert(
                "SecondPoint".to_string(),
                json!(format!("{:.2}, {:.2}", second.x, second.y)),
            );
            props.insert("Measurement".to_string(), json!(measurement));

            (
                "DimensionAligned",
                Geometry::DimensionAligned {
                    ext_line1_point: to_array3(first),
                    ext_line2_point: to_array3(second),
                    dim_line_location: to_array3(dim_line),
                    measurement: *measurement,
                },
            )
        }
        DimensionKind::Radius {
            center,
            chord,
            measurement,
        } => {
            props.insert(
                "Center".to_string(),
                json!(format!("{:.2}, {:.2}", center.x, center.y)),
            );
            props.insert("Measurement".to_string(), json!(measurement));

            (
                "DimensionRadius",
                Geometry::DimensionRadius {
                    center: to_array3(center),
                    chord_point: to_array3(chord),
                    measurement: *measurement,
                },
            )
        }
        DimensionKind::Diameter {
            chord,
            far_chord,
            measurement,
        } => {
            props.insert("Measurement".to_string(), json!(measurement));

            (
                "DimensionDiameter",
                Geometry::DimensionDiameter {
                    chord_point: to_array3(chord),
                    far_chord_point: to_array3(far_chord),
                    measurement: *measurement,
                },
            )
        }
        DimensionKind::Angular {
            vertex,
            first,
            second,
            measurement,
        } => {
            props.insert("Measurement".to_string(), json!(measurement));

            (
                "DimensionAngular",
                Geometry::DimensionAngular {
                    center_point: to_array3(vertex),
                    first_point: to_array3(first),
                    second_point: to_array3(second),
                    measurement: *measurement,
                },
            )
        }
    };

    props.insert(
        "DimensionStyle".to_string(),
        json!(dim.style.as_deref().unwrap_or("Standard")),
    );
    props.insert("Text".to_string(), json!(strip_inline_codes(&dim.text)));
    props.insert("TextRotation".to_string(), json!(deg(dim.text_rotation)));

    // 标注的渲染内容（线段和文字）在匿名块里，递归转换
    if let Some(block) = dim.block_name.as_deref().and_then(|name| doc.block(name)) {
        if depth >= MAX_BLOCK_DEPTH {
            warn!(block = %block.name, depth, "块嵌套深度超限，停止展开");
        } else {
            for child in &block.entities {
                if let Some(converted) = convert_at_depth(child, doc, depth + 1) {
                    children.push(converted);
                }
            }
        }
    }

    (entity_type, geometry)
}

fn convert_leader(leader: &LeaderData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    let vertices: Vec<[f64; 3]> = leader.vertices.iter().map(to_array3).collect();

    props.insert("VertexCount".to_string(), json!(vertices.len()));
    props.insert("HasArrowhead".to_string(), json!(leader.arrowhead_enabled));
    props.insert(
        "PathType".to_string(),
        json!(path_type_name(leader.path_type)),
    );
    props.insert(
        "DimensionStyle".to_string(),
        json!(leader.style.as_deref().unwrap_or("Standard")),
    );

    (
        "Leader",
        Geometry::Leader {
            vertices,
            has_arrowhead: leader.arrowhead_enabled,
            has_hookline: leader.path_type == LeaderPathType::Spline,
        },
    )
}

fn convert_multileader(
    mleader: &MultiLeaderData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    props.insert(
        "LeaderLineType".to_string(),
        json!(path_type_name(mleader.path_type)),
    );
    props.insert(
        "Style".to_string(),
        json!(mleader.style.as_deref().unwrap_or("Standard")),
    );

    (
        "MultiLeader",
        Geometry::MultiLeader {
            landing_location: [0.0, 0.0, 0.0],
            dogleg_length: 0.0,
        },
    )
}

fn path_type_name(path_type: LeaderPathType) -> &'static str {
    match path_type {
        LeaderPathType::StraightLine => "StraightLine",
        LeaderPathType::Spline => "Spline",
    }
}

fn convert_spline(spline: &SplineData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    let control_points: Vec<[f64; 3]> = spline.control_points.iter().map(to_array3).collect();
    let fit_points: Vec<[f64; 3]> = spline.fit_points.iter().map(to_array3).collect();

    props.insert("Degree".to_string(), json!(spline.degree));
    props.insert("IsClosed".to_string(), json!(spline.is_closed));
    props.insert("IsPeriodic".to_string(), json!(spline.is_periodic));
    props.insert("IsRational".to_string(), json!(spline.is_rational));
    props.insert("ControlPointCount".to_string(), json!(control_points.len()));
    props.insert("FitPointCount".to_string(), json!(fit_points.len()));
    props.insert("KnotCount".to_string(), json!(spline.knots.len()));

    (
        "Spline",
        Geometry::Spline {
            control_points,
            fit_points,
            knots: spline.knots.clone(),
            degree: spline.degree,
            is_closed: spline.is_closed,
            is_periodic: spline.is_periodic,
            is_rational: spline.is_rational,
        },
    )
}

fn convert_solid(solid: &SolidData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    props.insert("Thickness".to_string(), json!(solid.thickness));

    (
        "Solid",
        Geometry::Solid {
            vertices: solid.corners.iter().map(to_array3).collect(),
        },
    )
}

fn convert_face3d(face: &Face3DData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    props.insert("EdgeFlags".to_string(), json!(face.edge_flags.to_string()));

    (
        "3DFace",
        Geometry::Face3D {
            vertices: face.corners.iter().map(to_array3).collect(),
            edge_flags: face.edge_flags,
        },
    )
}

fn convert_point(point: &PointData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    props.insert("Location".to_string(), json!(fmt_point(&point.location)));
    props.insert("Thickness".to_string(), json!(point.thickness));

    (
        "Point",
        Geometry::Point {
            location: to_array3(&point.location),
        },
    )
}

fn convert_viewport(
    viewport: &ViewportData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    // 视口缩放 = 纸面高度/视图高度，视图高度非正时回退1.0
    let scale = if viewport.view_height > 0.0 {
        viewport.height / viewport.view_height
    } else {
        1.0
    };

    props.insert(
        "Center".to_string(),
        json!(format!("{:.2}, {:.2}", viewport.center.x, viewport.center.y)),
    );
    props.insert("Width".to_string(), json!(viewport.width));
    props.insert("Height".to_string(), json!(viewport.height));
    props.insert(
        "ViewCenter".to_string(),
        json!(format!(
            "{:.2}, {:.2}",
            viewport.view_center.x, viewport.view_center.y
        )),
    );
    props.insert("ViewHeight".to_string(), json!(viewport.view_height));
    props.insert("Scale".to_string(), json!(scale));
    props.insert("IsOn".to_string(), json!(viewport.status != 0));

    (
        "Viewport",
        Geometry::Viewport {
            center: to_array3(&viewport.center),
            width: viewport.width,
            height: viewport.height,
            view_center: to_array2(&viewport.view_center),
            view_height: viewport.view_height,
            scale,
        },
    )
}

fn convert_mline(mline: &MLineData, props: &mut Map<String, Value>) -> (&'static str, Geometry) {
    let vertices: Vec<[f64; 3]> = mline.vertices.iter().map(to_array3).collect();

    props.insert(
        "Scale".to_string(),
        json!(mline.scale_factor.unwrap_or(1.0)),
    );
    props.insert(
        "Justification".to_string(),
        json!(mline.justification.as_deref().unwrap_or("Top")),
    );
    props.insert("VertexCount".to_string(), json!(vertices.len()));
    props.insert(
        "StyleName".to_string(),
        json!(mline.style.as_deref().unwrap_or("STANDARD")),
    );

    ("MLine", Geometry::MLine { vertices })
}

fn convert_wipeout(
    wipeout: &WipeoutData,
    props: &mut Map<String, Value>,
) -> (&'static str, Geometry) {
    // 剪裁边界和填充边界环一样做去重和闭合
    let raw: Vec<[f64; 2]> = wipeout.clip_vertices.iter().map(to_array2).collect();
    let boundary = boundary::finalize_loop(raw);
    let is_clipped = !boundary.is_empty();

    props.insert("IsClipped".to_string(), json!(is_clipped));
    props.insert("BoundaryType".to_string(), json!("Polygonal"));
    props.insert("VertexCount".to_string(), json!(boundary.len()));

    (
        "Wipeout",
        Geometry::Wipeout {
            boundary,
            is_clipped,
            boundary_type: "Polygonal".to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwgview_core::color::{ColorSpec, Rgb};
    use dwgview_core::document::{Block, Layer};
    use dwgview_core::entity::{BoundaryEdge, BoundaryPath, LwVertex};
    use dwgview_core::math::{Point2, Vector3};

    fn empty_doc() -> CadDocument {
        CadDocument::new()
    }

    #[test]
    fn test_line_conversion() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "1A",
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0))),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Line");
        assert_eq!(converted.id, "1A");
        assert!(converted.children.is_empty());
        assert!((converted.properties["Length"].as_f64().unwrap() - 5.0).abs() < 1e-9);

        match &converted.geometry {
            Geometry::Line { points } => {
                assert_eq!(points[0], [0.0, 0.0, 0.0]);
                assert_eq!(points[1], [3.0, 4.0, 0.0]);
            }
            _ => panic!("应为线段几何"),
        }
    }

    #[test]
    fn test_circle_near_full_sweep_stays_circle() {
        // 扫角 2π-0.005 在容差内，按整圆处理
        let doc = empty_doc();
        let entity = CadEntity::new(
            "20",
            EntityKind::Circle(CircleData::arc(Point3::origin(), 5.0, 0.0, TAU - 0.005)),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Circle");
        assert!(converted.properties.contains_key("Circumference"));
    }

    #[test]
    fn test_half_sweep_becomes_arc() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "21",
            EntityKind::Circle(CircleData::arc(Point3::origin(), 2.0, 0.0, PI)),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Arc");
        // 弧长 = r * 扫角
        assert!(
            (converted.properties["Arc Length"].as_f64().unwrap() - 2.0 * PI).abs() < 1e-9
        );
    }

    #[test]
    fn test_circle_without_angles_is_circle() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "22",
            EntityKind::Circle(CircleData::full(Point3::new(1.0, 1.0, 0.0), 3.0)),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Circle");
        assert!(
            (converted.properties["Area"].as_f64().unwrap() - PI * 9.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_common_properties_populated() {
        let mut doc = empty_doc();
        doc.layers
            .push(Layer::new("Walls", "10").with_color(Rgb::RED));

        let entity = CadEntity::new(
            "2F",
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
        )
        .on_layer("Walls");

        let converted = convert_entity(&entity, &doc).unwrap();
        let props = &converted.properties;
        assert_eq!(props["Handle"], "2F");
        assert_eq!(props["Layer"], "Walls");
        assert_eq!(props["LayerHandle"], "10");
        assert_eq!(props["Color"], "255, 0, 0");
        assert_eq!(props["ColorMethod"], "ByLayer");
        assert_eq!(props["LineType"], "Continuous");
        assert_eq!(props["ObjectName"], "LINE");
    }

    #[test]
    fn test_insert_converts_block_children() {
        let mut doc = empty_doc();
        let mut block = Block::new("Door", Point3::origin());
        block.add_entity(CadEntity::new(
            "B1",
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
        ));
        block.add_entity(CadEntity::new(
            "B2",
            EntityKind::Circle(CircleData::full(Point3::origin(), 0.5)),
        ));
        doc.add_block(block);

        let entity = CadEntity::new(
            "30",
            EntityKind::Insert(InsertData::new("Door", Point3::new(10.0, 10.0, 0.0))),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Insert");
        assert_eq!(converted.children.len(), 2);
        assert_eq!(converted.children[0].entity_type, "Line");
        assert_eq!(converted.children[1].entity_type, "Circle");
    }

    #[test]
    fn test_self_referencing_block_stops_at_depth_limit() {
        let mut doc = empty_doc();
        let mut block = Block::new("Loop", Point3::origin());
        block.add_entity(CadEntity::new(
            "L1",
            EntityKind::Insert(InsertData::new("Loop", Point3::origin())),
        ));
        doc.add_block(block);

        let entity = CadEntity::new(
            "31",
            EntityKind::Insert(InsertData::new("Loop", Point3::origin())),
        );

        // 自引用的块在深度上限处截断，仍返回结果
        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Insert");

        let mut depth = 0;
        let mut node = &converted;
        while let Some(child) = node.children.first() {
            depth += 1;
            node = child;
        }
        assert_eq!(depth, MAX_BLOCK_DEPTH);
    }

    #[test]
    fn test_hatch_triangle_boundary() {
        // 三条线边的三角形：3个起点 + 闭合点 = 4个点
        let doc = empty_doc();
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
        let entity = CadEntity::new("40", EntityKind::Hatch(HatchData::solid(vec![path])));

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Hatch");
        assert_eq!(converted.properties["BoundaryCount"], 1);

        match &converted.geometry {
            Geometry::Hatch { boundaries, .. } => {
                assert_eq!(boundaries.len(), 1);
                assert_eq!(boundaries[0].len(), 4);
                assert_eq!(boundaries[0][0], boundaries[0][3]);
            }
            _ => panic!("应为填充几何"),
        }
    }

    #[test]
    fn test_mtext_value_stripped() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "50",
            EntityKind::MText(MTextData::new(
                Point3::origin(),
                "{\\fArial;Hello}\\PWorld",
                2.5,
            )),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.properties["Text"], "Hello\nWorld");
    }

    #[test]
    fn test_unsupported_kind_dropped() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "60",
            EntityKind::Ray(dwgview_core::entity::RayData {
                origin: Point3::origin(),
                direction: Vector3::new(1.0, 0.0, 0.0),
            }),
        );
        assert!(convert_entity(&entity, &doc).is_none());
    }

    #[test]
    fn test_viewport_scale_fallback() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "70",
            EntityKind::Viewport(ViewportData {
                center: Point3::origin(),
                width: 100.0,
                height: 50.0,
                view_center: Point2::new(0.0, 0.0),
                view_height: 0.0,
                status: 1,
            }),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        match &converted.geometry {
            Geometry::Viewport { scale, .. } => assert_eq!(*scale, 1.0),
            _ => panic!("应为视口几何"),
        }
    }

    #[test]
    fn test_dimension_expands_render_block() {
        let mut doc = empty_doc();
        let mut block = Block::new("*D1", Point3::origin());
        block.add_entity(CadEntity::new(
            "D1L",
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(5.0, 0.0, 0.0))),
        ));
        doc.add_block(block);

        let entity = CadEntity::new(
            "80",
            EntityKind::Dimension(DimensionData {
                kind: DimensionKind::Linear {
                    first: Point3::origin(),
                    second: Point3::new(5.0, 0.0, 0.0),
                    dim_line: Point3::new(2.5, 2.0, 0.0),
                    rotation: 0.0,
                    measurement: 5.0,
                },
                text: String::new(),
                text_rotation: 0.0,
                style: None,
                block_name: Some("*D1".to_string()),
            }),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "DimensionLinear");
        assert_eq!(converted.children.len(), 1);
        assert_eq!(converted.properties["DimensionStyle"], "Standard");
    }

    #[test]
    fn test_lwpolyline_carries_bulges() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "90",
            EntityKind::LwPolyline(LwPolylineData {
                vertices: vec![
                    LwVertex::with_bulge(0.0, 0.0, 0.5),
                    LwVertex::new(10.0, 0.0),
                ],
                elevation: 1.5,
                is_closed: false,
                constant_width: 0.0,
                thickness: 0.0,
            }),
        );

        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "LwPolyline");
        match &converted.geometry {
            Geometry::LwPolyline {
                points,
                bulges,
                is_closed,
            } => {
                // 2D顶点用elevation补全Z
                assert_eq!(points[0], [0.0, 0.0, 1.5]);
                assert_eq!(bulges, &vec![0.5, 0.0]);
                assert!(!is_closed);
            }
            _ => panic!("应为轻量多段线几何"),
        }
    }

    #[test]
    fn test_heavy_polyline_conversion() {
        let doc = empty_doc();
        let entity = CadEntity::new(
            "91",
            EntityKind::Polyline(PolylineData {
                vertices: vec![
                    Point3::origin(),
                    Point3::new(10.0, 0.0, 2.0),
                    Point3::new(10.0, 10.0, 4.0),
                ],
                is_closed: true,
                is_3d: true,
            }),
        );

        assert_eq!(entity.kind.type_name(), "Polyline3D");
        let converted = convert_entity(&entity, &doc).unwrap();
        assert_eq!(converted.entity_type, "Polyline");
        assert_eq!(converted.properties["VertexCount"], 3);
        match &converted.geometry {
            Geometry::Polyline {
                vertices,
                bulges,
                is_closed,
            } => {
                assert_eq!(vertices[1], [10.0, 0.0, 2.0]);
                // 重量多段线无凸度信息
                assert_eq!(bulges, &vec![0.0, 0.0, 0.0]);
                assert!(*is_closed);
            }
            _ => panic!("应为多段线几何"),
        }
    }
}
