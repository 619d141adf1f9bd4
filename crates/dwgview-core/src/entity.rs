//! CAD实体定义
//!
//! 解码器输出的实体节点：一个公共属性头（句柄、图层、颜色、线型等）
//! 加上按类型区分的几何载荷。支持的类型：
//! - 线段 (Line)
//! - 圆/圆弧 (Circle，带可选的起止角)
//! - 多段线 (LwPolyline / Polyline)
//! - 文本 (Text / MText)
//! - 块参照 (Insert)
//! - 填充 (Hatch) / 面域 (Region) / 遮罩 (Wipeout)
//! - 尺寸标注 (Dimension)
//! - 引线 (Leader / MultiLeader)
//! - 样条曲线 (Spline)
//! - 实体面 (Solid / Face3D)
//! - 点 (Point) / 视口 (Viewport) / 多线 (MLine)

use crate::color::ColorSpec;
use crate::math::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// CAD实体
///
/// 公共属性头来自实体的对象记录，几何载荷按类型区分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadEntity {
    /// 句柄（文档内唯一的稳定标识）
    pub handle: String,
    /// 所有者句柄
    pub owner_handle: String,
    /// 所属图层名称
    pub layer: Option<String>,
    /// 颜色说明
    pub color: ColorSpec,
    /// ACI颜色索引
    pub color_index: i16,
    /// 线型名称
    pub linetype: Option<String>,
    /// 线宽
    pub lineweight: String,
    /// 是否不可见
    pub invisible: bool,
    /// 透明度 (0.0-1.0)
    pub transparency: f64,
    /// 几何载荷
    pub kind: EntityKind,
}

impl CadEntity {
    /// 创建新实体（公共属性取默认值）
    pub fn new(handle: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            handle: handle.into(),
            owner_handle: "0".to_string(),
            layer: None,
            color: ColorSpec::ByLayer,
            color_index: 256,
            linetype: None,
            lineweight: "ByLayer".to_string(),
            invisible: false,
            transparency: 0.0,
            kind,
        }
    }

    /// 设置图层
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// 设置颜色
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = color;
        self
    }
}

/// 实体几何载荷
///
/// 封闭枚举：每个原生实体类型一个变体，转换引擎对其做穷尽匹配。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Line(LineData),
    Circle(CircleData),
    Ellipse(EllipseData),
    LwPolyline(LwPolylineData),
    Polyline(PolylineData),
    Text(TextData),
    MText(MTextData),
    Insert(InsertData),
    Hatch(HatchData),
    Region,
    Dimension(DimensionData),
    Leader(LeaderData),
    MultiLeader(MultiLeaderData),
    Spline(SplineData),
    Solid(SolidData),
    Face3D(Face3DData),
    Point(PointData),
    Viewport(ViewportData),
    MLine(MLineData),
    Wipeout(WipeoutData),
    Ray(RayData),
    XLine(RayData),
}

impl EntityKind {
    /// 原生对象类型名称（对应DWG对象记录的类名）
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Line(_) => "Line",
            EntityKind::Circle(_) => "Circle",
            EntityKind::Ellipse(_) => "Ellipse",
            EntityKind::LwPolyline(_) => "LwPolyline",
            EntityKind::Polyline(p) if p.is_3d => "Polyline3D",
            EntityKind::Polyline(_) => "Polyline2D",
            EntityKind::Text(_) => "TextEntity",
            EntityKind::MText(_) => "MText",
            EntityKind::Insert(_) => "Insert",
            EntityKind::Hatch(_) => "Hatch",
            EntityKind::Region => "Region",
            EntityKind::Dimension(d) => d.kind.type_name(),
            EntityKind::Leader(_) => "Leader",
            EntityKind::MultiLeader(_) => "MultiLeader",
            EntityKind::Spline(_) => "Spline",
            EntityKind::Solid(_) => "Solid",
            EntityKind::Face3D(_) => "Face3D",
            EntityKind::Point(_) => "Point",
            EntityKind::Viewport(_) => "Viewport",
            EntityKind::MLine(_) => "MLine",
            EntityKind::Wipeout(_) => "Wipeout",
            EntityKind::Ray(_) => "Ray",
            EntityKind::XLine(_) => "XLine",
        }
    }

    /// DXF对象名称（全大写的记录名）
    pub fn object_name(&self) -> &'static str {
        match self {
            EntityKind::Line(_) => "LINE",
            EntityKind::Circle(c) if c.start_angle.is_some() => "ARC",
            EntityKind::Circle(_) => "CIRCLE",
            EntityKind::Ellipse(_) => "ELLIPSE",
            EntityKind::LwPolyline(_) => "LWPOLYLINE",
            EntityKind::Polyline(_) => "POLYLINE",
            EntityKind::Text(_) => "TEXT",
            EntityKind::MText(_) => "MTEXT",
            EntityKind::Insert(_) => "INSERT",
            EntityKind::Hatch(_) => "HATCH",
            EntityKind::Region => "REGION",
            EntityKind::Dimension(_) => "DIMENSION",
            EntityKind::Leader(_) => "LEADER",
            EntityKind::MultiLeader(_) => "MULTILEADER",
            EntityKind::Spline(_) => "SPLINE",
            EntityKind::Solid(_) => "SOLID",
            EntityKind::Face3D(_) => "3DFACE",
            EntityKind::Point(_) => "POINT",
            EntityKind::Viewport(_) => "VIEWPORT",
            EntityKind::MLine(_) => "MLINE",
            EntityKind::Wipeout(_) => "WIPEOUT",
            EntityKind::Ray(_) => "RAY",
            EntityKind::XLine(_) => "XLINE",
        }
    }
}

/// 线段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineData {
    pub start: Point3,
    pub end: Point3,
    pub thickness: f64,
}

impl LineData {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self {
            start,
            end,
            thickness: 0.0,
        }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// 圆
///
/// 某些解码路径会把圆弧作为带起止角的圆输出，
/// 因此起止角是可选字段，圆/弧的区分由转换引擎完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleData {
    pub center: Point3,
    pub radius: f64,
    /// 法向量（OCS挤出方向）
    pub normal: Vector3,
    pub thickness: f64,
    /// 起始角度（弧度），仅当实体实际是圆弧时存在
    pub start_angle: Option<f64>,
    /// 终止角度（弧度）
    pub end_angle: Option<f64>,
}

impl CircleData {
    /// 创建完整的圆
    pub fn full(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            normal: Vector3::new(0.0, 0.0, 1.0),
            thickness: 0.0,
            start_angle: None,
            end_angle: None,
        }
    }

    /// 创建圆弧
    pub fn arc(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            start_angle: Some(start_angle),
            end_angle: Some(end_angle),
            ..Self::full(center, radius)
        }
    }
}

/// 椭圆/椭圆弧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EllipseData {
    pub center: Point3,
    /// 长轴端点（相对于中心的向量）
    pub major_axis: Vector3,
    /// 短轴与长轴的比例
    pub ratio: f64,
    /// 起始参数（弧度），整椭圆为0
    pub start_param: f64,
    /// 终止参数（弧度），整椭圆为2π
    pub end_param: f64,
}

impl EllipseData {
    /// 长轴长度
    pub fn major_axis_length(&self) -> f64 {
        self.major_axis.norm()
    }
}

/// 轻量多段线顶点（2D + 凸度）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LwVertex {
    pub x: f64,
    pub y: f64,
    /// 凸度（bulge）- 用于弧线段，0表示直线
    pub bulge: f64,
}

impl LwVertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    pub fn with_bulge(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }
}

/// 轻量多段线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LwPolylineData {
    pub vertices: Vec<LwVertex>,
    pub elevation: f64,
    pub is_closed: bool,
    pub constant_width: f64,
    pub thickness: f64,
}

/// 重量多段线（2D/3D顶点，无凸度信息）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylineData {
    pub vertices: Vec<Point3>,
    pub is_closed: bool,
    /// 3D多段线标记，决定原生记录名是Polyline2D还是Polyline3D
    pub is_3d: bool,
}

/// 单行文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextData {
    pub insert: Point3,
    pub value: String,
    pub height: f64,
    /// 旋转角度（弧度）
    pub rotation: f64,
    pub width_factor: f64,
    pub style: Option<String>,
    pub horizontal_alignment: String,
    pub vertical_alignment: String,
}

impl TextData {
    pub fn new(insert: Point3, value: impl Into<String>, height: f64) -> Self {
        Self {
            insert,
            value: value.into(),
            height,
            rotation: 0.0,
            width_factor: 1.0,
            style: None,
            horizontal_alignment: "Left".to_string(),
            vertical_alignment: "Baseline".to_string(),
        }
    }
}

/// 多行文本
///
/// value 可能包含内联格式控制码（{...} 分组、反斜杠转义），
/// 由转换引擎剥离后存入显示文本。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MTextData {
    pub insert: Point3,
    pub value: String,
    pub height: f64,
    pub rotation: f64,
    pub rectangle_width: f64,
    pub style: Option<String>,
    pub attachment_point: String,
}

impl MTextData {
    pub fn new(insert: Point3, value: impl Into<String>, height: f64) -> Self {
        Self {
            insert,
            value: value.into(),
            height,
            rotation: 0.0,
            rectangle_width: 0.0,
            style: None,
            attachment_point: "TopLeft".to_string(),
        }
    }
}

/// 块参照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertData {
    /// 参照的块名称
    pub block_name: String,
    /// 插入点
    pub insert: Point3,
    /// 各轴缩放
    pub scale: Vector3,
    /// 旋转角度（弧度）
    pub rotation: f64,
    /// 属性标签/值对
    pub attributes: Vec<(String, String)>,
}

impl InsertData {
    pub fn new(block_name: impl Into<String>, insert: Point3) -> Self {
        Self {
            block_name: block_name.into(),
            insert,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            attributes: Vec::new(),
        }
    }
}

/// 填充边界边
///
/// 边界路径由异构边组成，转换引擎将其展开为闭合点环。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoundaryEdge {
    /// 线段边
    Line { start: Point2, end: Point2 },
    /// 圆弧边
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// 椭圆弧边
    Ellipse {
        center: Point2,
        /// 长轴端点（相对于中心的向量）
        major_axis: Vector2,
        /// 短轴与长轴的比例
        ratio: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// 多段线边（顶点可带凸度）
    Polyline { vertices: Vec<LwVertex> },
}

/// 填充边界路径（一个环）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryPath {
    pub edges: Vec<BoundaryEdge>,
}

/// 填充
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HatchData {
    pub paths: Vec<BoundaryPath>,
    pub pattern_name: String,
    pub pattern_type: String,
    pub is_solid: bool,
    pub is_associative: bool,
}

impl HatchData {
    /// 创建实心填充
    pub fn solid(paths: Vec<BoundaryPath>) -> Self {
        Self {
            paths,
            pattern_name: "SOLID".to_string(),
            pattern_type: "PatternFill".to_string(),
            is_solid: true,
            is_associative: false,
        }
    }
}

/// 尺寸标注
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionData {
    /// 标注子类型及其定义点
    pub kind: DimensionKind,
    /// 覆盖文本（空表示显示测量值，"<>"表示占位）
    pub text: String,
    /// 文本旋转角度（弧度）
    pub text_rotation: f64,
    /// 标注样式名称
    pub style: Option<String>,
    /// 渲染块名称（标注展开后的线/文字所在的匿名块）
    pub block_name: Option<String>,
}

/// 标注子类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DimensionKind {
    /// 线性标注
    Linear {
        first: Point3,
        second: Point3,
        dim_line: Point3,
        rotation: f64,
        measurement: f64,
    },
    /// 对齐标注
    Aligned {
        first: Point3,
        second: Point3,
        dim_line: Point3,
        measurement: f64,
    },
    /// 半径标注
    Radius {
        center: Point3,
        chord: Point3,
        measurement: f64,
    },
    /// 直径标注
    Diameter {
        chord: Point3,
        far_chord: Point3,
        measurement: f64,
    },
    /// 三点角度标注
    Angular {
        vertex: Point3,
        first: Point3,
        second: Point3,
        measurement: f64,
    },
}

impl DimensionKind {
    /// 原生对象类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DimensionKind::Linear { .. } => "DimensionLinear",
            DimensionKind::Aligned { .. } => "DimensionAligned",
            DimensionKind::Radius { .. } => "DimensionRadius",
            DimensionKind::Diameter { .. } => "DimensionDiameter",
            DimensionKind::Angular { .. } => "DimensionAngular",
        }
    }
}

/// 引线路径类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LeaderPathType {
    /// 直线段
    #[default]
    StraightLine,
    /// 样条
    Spline,
}

/// 引线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderData {
    pub vertices: Vec<Point3>,
    pub arrowhead_enabled: bool,
    pub path_type: LeaderPathType,
    pub style: Option<String>,
}

/// 多重引线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLeaderData {
    pub path_type: LeaderPathType,
    pub style: Option<String>,
}

/// 样条曲线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineData {
    pub degree: u32,
    pub control_points: Vec<Point3>,
    pub fit_points: Vec<Point3>,
    pub knots: Vec<f64>,
    pub is_closed: bool,
    pub is_periodic: bool,
    pub is_rational: bool,
}

/// 实体填充面（四角形，可退化为三角形）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidData {
    pub corners: [Point3; 4],
    pub thickness: f64,
}

/// 3D面
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face3DData {
    pub corners: [Point3; 4],
    /// 边可见性标志位
    pub edge_flags: i32,
}

/// 点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointData {
    pub location: Point3,
    pub thickness: f64,
}

/// 视口
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportData {
    pub center: Point3,
    pub width: f64,
    pub height: f64,
    pub view_center: Point2,
    pub view_height: f64,
    /// 状态（0表示关闭）
    pub status: i32,
}

/// 多线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MLineData {
    pub vertices: Vec<Point3>,
    pub scale_factor: Option<f64>,
    pub justification: Option<String>,
    pub style: Option<String>,
}

/// 遮罩（剪裁边界的光栅图像）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipeoutData {
    pub clip_vertices: Vec<Point2>,
}

/// 射线/构造线（起点 + 方向，无限延伸）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayData {
    pub origin: Point3,
    pub direction: Vector3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = LineData::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0));
        assert!((line.length() - 5.0).abs() < crate::math::EPSILON);
    }

    #[test]
    fn test_type_names() {
        let circle = EntityKind::Circle(CircleData::full(Point3::origin(), 1.0));
        assert_eq!(circle.type_name(), "Circle");

        let dim = EntityKind::Dimension(DimensionData {
            kind: DimensionKind::Radius {
                center: Point3::origin(),
                chord: Point3::new(1.0, 0.0, 0.0),
                measurement: 1.0,
            },
            text: String::new(),
            text_rotation: 0.0,
            style: None,
            block_name: None,
        });
        assert_eq!(dim.type_name(), "DimensionRadius");
    }

    #[test]
    fn test_entity_builder() {
        let entity = CadEntity::new(
            "1A",
            EntityKind::Line(LineData::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0))),
        )
        .on_layer("Walls");

        assert_eq!(entity.handle, "1A");
        assert_eq!(entity.layer.as_deref(), Some("Walls"));
        assert!(entity.color.is_by_layer());
    }
}
