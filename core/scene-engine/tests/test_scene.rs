//! FILENAME: tests/test_scene.rs
//! Integration tests: records -> cells -> cuboids -> scene.

mod common;

use common::PortfolioFixture;
use engine::Record;
use pivot_engine::{AggregationCell, CategoryAxes, CategoryOrder, Metric};
use scene_engine::{
    assemble_scene, build_scene, BarSize, ColorScale, Cuboid, SceneOptions, EMPTY_SCENE_TITLE,
};

fn options(bar_size: f64) -> SceneOptions {
    SceneOptions {
        color_scale: ColorScale::Plasma,
        bar_size: BarSize::new(bar_size).unwrap(),
        category_order: CategoryOrder::FirstSeen,
    }
}

// ============================================================================
// GEOMETRY INVARIANTS
// ============================================================================

#[test]
fn test_every_cuboid_is_closed_and_non_negative() {
    let records = PortfolioFixture::records();

    for metric in Metric::ALL {
        let scene = build_scene(&records, metric, &options(0.4)).unwrap();
        assert!(!scene.is_empty);

        for cuboid in &scene.cuboids {
            assert_eq!(cuboid.vertices.len(), 8);
            assert_eq!(cuboid.triangles.len(), 12);
            assert!(cuboid.vertices.iter().all(|v| v[2] >= 0.0));
            assert!(cuboid.intensity.iter().all(|&i| i >= 0.0));
            assert!(cuboid.height >= 0.0);
        }
    }
}

#[test]
fn test_negative_cell_is_flat() {
    let cell = AggregationCell {
        segment: "Retail".to_string(),
        product: "Loan".to_string(),
        value: -500.0,
    };
    let axes = CategoryAxes::from_cells(std::slice::from_ref(&cell), CategoryOrder::FirstSeen);

    let scene = assemble_scene(&[cell], &axes, Metric::SumBalance, &options(0.4)).unwrap();
    let cuboid = &scene.cuboids[0];

    assert_eq!(cuboid.top(), 0.0);
    assert!(cuboid.hover_text.contains("Value: -500.00"));
}

#[test]
fn test_zero_valued_cells_are_kept() {
    let records = PortfolioFixture::records();
    let scene = build_scene(&records, Metric::SumBalance, &options(0.4)).unwrap();

    let sme_savings: Vec<&Cuboid> = scene
        .cuboids
        .iter()
        .filter(|c| c.segment == "SME" && c.product == "Savings")
        .collect();
    assert_eq!(sme_savings.len(), 1);
    assert_eq!(sme_savings[0].height, 0.0);
}

// ============================================================================
// SCENE ASSEMBLY
// ============================================================================

#[test]
fn test_scene_axes_match_cuboid_grid() {
    let records = PortfolioFixture::records();
    let scene = build_scene(&records, Metric::Accounts, &options(0.3)).unwrap();

    for cuboid in &scene.cuboids {
        let [gx, gy] = cuboid.grid;
        assert_eq!(scene.x_axis.tick_labels[gx as usize], cuboid.segment);
        assert_eq!(scene.y_axis.tick_labels[gy as usize], cuboid.product);
    }

    let retail_current = scene
        .cuboids
        .iter()
        .find(|c| c.segment == "Retail" && c.product == "Current")
        .unwrap();
    assert_eq!(retail_current.value, 2.0);
    assert_eq!(scene.x_axis.title, "Segment");
    assert_eq!(scene.y_axis.title, "Product");
    assert_eq!(scene.z_axis_title, "Accounts");
    assert_eq!(scene.camera.eye, [1.6, 1.6, 1.2]);
    assert_eq!(scene.color_scale, ColorScale::Plasma);
}

#[test]
fn test_scene_is_idempotent() {
    let records = PortfolioFixture::records();
    let first = build_scene(&records, Metric::AvgBalance, &options(0.4)).unwrap();
    let second = build_scene(&records, Metric::AvgBalance, &options(0.4)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_records_give_no_data_scene() {
    let scene = build_scene(&Vec::<Record>::new(), Metric::DelinquencyRate, &options(0.4)).unwrap();

    assert!(scene.is_empty);
    assert_eq!(scene.title, EMPTY_SCENE_TITLE);
    assert!(scene.cuboids.is_empty());
    assert_eq!(scene.z_axis_title, "Delinquency rate (%)");
}

#[test]
fn test_ascending_order_reorders_axes() {
    let records = PortfolioFixture::records();
    let opts = SceneOptions {
        category_order: CategoryOrder::Ascending,
        ..options(0.4)
    };
    let scene = build_scene(&records, Metric::SumBalance, &opts).unwrap();

    assert_eq!(scene.y_axis.tick_labels, vec!["Current", "Invest", "Loan", "Savings"]);
}

#[test]
fn test_scene_serializes_for_renderer() {
    let records = PortfolioFixture::records();
    let scene = build_scene(&records, Metric::SumBalance, &options(0.4)).unwrap();

    let json: serde_json::Value = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["cuboids"][0]["triangles"].as_array().unwrap().len(), 12);
    assert_eq!(json["metric"], "sum_balance");
    assert_eq!(json["color_scale"], "Plasma");
    assert_eq!(json["legend"]["title"], "€");
}
