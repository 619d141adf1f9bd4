//! DWGView 演示程序入口
//! 构建一个示例CAD文档，跑完整的转换管线，输出线格式JSON

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dwgview_convert::document::parse;
use dwgview_core::color::{ColorSpec, Rgb};
use dwgview_core::document::{Block, CadDocument, Layer, Linetype};
use dwgview_core::entity::{
    BoundaryEdge, BoundaryPath, CadEntity, CircleData, EntityKind, HatchData, InsertData,
    LineData, LwPolylineData, LwVertex, MTextData, TextData,
};
use dwgview_core::math::{Point2, Point3};

/// 构建演示文档
fn create_demo_document() -> CadDocument {
    let mut doc = CadDocument::new();

    // 图层和线型表
    doc.layers.push(Layer::new("0", "10"));
    doc.layers
        .push(Layer::new("Walls", "11").with_color(Rgb::CYAN));
    doc.layers
        .push(Layer::new("Dimensions", "12").with_color(Rgb::YELLOW));
    doc.linetypes
        .push(Linetype::new("Continuous"));
    doc.linetypes
        .push(Linetype::new("DASHED").with_pattern(vec![12.0, -6.0]));

    // 一圈墙线
    for i in 0..4 {
        let x = i as f64 * 50.0;
        doc.add_entity(
            CadEntity::new(
                format!("L{i}"),
                EntityKind::Line(LineData::new(
                    Point3::new(x, 0.0, 0.0),
                    Point3::new(x, 200.0, 0.0),
                )),
            )
            .on_layer("Walls"),
        );
    }

    // 圆和圆弧（区分路径）
    doc.add_entity(
        CadEntity::new(
            "C1",
            EntityKind::Circle(CircleData::full(Point3::new(250.0, 100.0, 0.0), 80.0)),
        )
        .on_layer("Walls"),
    );
    doc.add_entity(
        CadEntity::new(
            "A1",
            EntityKind::Circle(CircleData::arc(
                Point3::new(250.0, 100.0, 0.0),
                60.0,
                0.0,
                std::f64::consts::PI,
            )),
        )
        .with_color(ColorSpec::Rgb(Rgb::GREEN)),
    );

    // 带凸度的轻量多段线矩形
    doc.add_entity(CadEntity::new(
        "P1",
        EntityKind::LwPolyline(LwPolylineData {
            vertices: vec![
                LwVertex::new(400.0, 50.0),
                LwVertex::with_bulge(550.0, 50.0, 0.5),
                LwVertex::new(550.0, 150.0),
                LwVertex::new(400.0, 150.0),
            ],
            elevation: 0.0,
            is_closed: true,
            constant_width: 0.0,
            thickness: 0.0,
        }),
    ));

    // 文本
    doc.add_entity(CadEntity::new(
        "T1",
        EntityKind::Text(TextData::new(
            Point3::new(100.0, 220.0, 0.0),
            "DWGView Demo",
            10.0,
        )),
    ));
    doc.add_entity(CadEntity::new(
        "M1",
        EntityKind::MText(MTextData::new(
            Point3::new(100.0, 240.0, 0.0),
            "{\\fArial|b0;Floor Plan}\\PScale 1:100",
            8.0,
        )),
    ));

    // 块定义 + 插入
    let mut door = Block::new("Door", Point3::origin());
    door.add_entity(CadEntity::new(
        "D1",
        EntityKind::Line(LineData::new(
            Point3::origin(),
            Point3::new(30.0, 0.0, 0.0),
        )),
    ));
    door.add_entity(CadEntity::new(
        "D2",
        EntityKind::Circle(CircleData::arc(
            Point3::origin(),
            30.0,
            0.0,
            std::f64::consts::FRAC_PI_2,
        )),
    ));
    doc.add_block(door);
    doc.add_entity(CadEntity::new(
        "I1",
        EntityKind::Insert(InsertData::new("Door", Point3::new(50.0, 0.0, 0.0))),
    ));

    // 三角形实心填充
    doc.add_entity(CadEntity::new(
        "H1",
        EntityKind::Hatch(HatchData::solid(vec![BoundaryPath {
            edges: vec![
                BoundaryEdge::Line {
                    start: Point2::new(600.0, 0.0),
                    end: Point2::new(700.0, 0.0),
                },
                BoundaryEdge::Line {
                    start: Point2::new(700.0, 0.0),
                    end: Point2::new(650.0, 80.0),
                },
                BoundaryEdge::Line {
                    start: Point2::new(650.0, 80.0),
                    end: Point2::new(600.0, 0.0),
                },
            ],
        }])),
    ));

    doc
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    info!("Starting DWGView demo...");

    let doc = create_demo_document();
    info!("Created demo document with {} entities", doc.entity_count());

    let result = parse(&doc);
    info!(
        "Converted {}/{} entities",
        result.metadata.total_converted, result.metadata.total_found
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
