//! API Regression Tests for the Skyline Crates
//!
//! These tests pin the public API across the `skyline-*` crates. They are
//! organized in tiers of increasing scope:
//!
//! - Tier 1: Foundation (skyline-types, skyline-activity)
//! - Tier 2: Generators (skyline-geometry)
//! - Tier 3: Composition and STL output (skyline-geometry, skyline-io)
//! - Tier 4: Pipeline (skyline)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs a version bump.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use skyline::{activity, geometry, io, prelude::*, types};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// TIER 1: Foundation - Types and Quantizer
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn triangle_normal_from_winding() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert!((tri.normal.z - 1.0).abs() < f64::EPSILON);
        assert!((tri.area() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn aabb_of_points() {
        let points = [Point3::new(-1.0, 2.0, 0.0), Point3::new(3.0, -2.0, 5.0)];
        let b = types::Aabb::from_points(points.iter());
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.depth(), 4.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn quantizer_thresholds_are_exported() {
        assert!(activity::LOW_THRESHOLD < activity::MEDIUM_THRESHOLD);
        assert_eq!(quantize(10, 10), HeightLevel::Top);
        assert_eq!(quantize(0, 10), HeightLevel::None);
        assert_eq!(
            quantize_cell(&ActivityCell::future(), 10),
            HeightLevel::Future
        );
    }

    #[test]
    fn grid_construction() {
        let grid: ActivityGrid = vec![vec![ActivityCell::new(2)], vec![ActivityCell::future()]]
            .into_iter()
            .collect();
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.max_count(), 2);
    }
}

// =============================================================================
// TIER 2: Generators
// =============================================================================

mod tier2_generators {
    use super::*;

    #[test]
    fn cuboid_primitive() {
        let cube = geometry::cuboid(Point3::origin(), 1.0, 1.0, 1.0).unwrap();
        assert_eq!(cube.len(), geometry::CUBOID_TRIANGLES);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn grid_layout_builder_pattern() {
        let layout = GridLayout::default()
            .with_cell_size(2.0)
            .with_column_gap(0.5)
            .with_base_height(3.0)
            .with_margin(1.0)
            .with_rows_per_column(7)
            .with_heights(LevelHeights::new(1.0, 2.0, 3.0, 4.0))
            .with_merge_runs(false);
        assert!(layout.validate().is_ok());
        assert_eq!(layout.pitch(), 2.5);
    }

    #[test]
    fn zero_columns_give_bare_platform() {
        init_logging();
        let mesh = geometry::build_grid(&ActivityGrid::new(), 0, &GridLayout::default()).unwrap();
        assert_eq!(mesh.len(), 12);
    }

    #[test]
    fn increasing_column_round_trip() {
        init_logging();
        let layout = GridLayout::default();
        let grid = ActivityGrid::from_counts(vec![vec![0, 5, 10]]);
        let mesh = geometry::build_grid(&grid, 10, &layout).unwrap();
        assert_eq!(mesh.len(), 12 * 3);

        let heights: Vec<f64> = mesh.triangles[12..]
            .chunks(12)
            .map(|c| TriangleMesh::from_triangles(c.to_vec()).bounds().height())
            .collect();
        assert_eq!(heights.len(), 2);
        assert!(heights[0] < heights[1]);
        assert_eq!(heights[0], layout.heights.medium);
        assert_eq!(heights[1], layout.heights.top);
    }

    #[test]
    fn stacked_levels_preview_helper() {
        let column = [ActivityCell::new(3), ActivityCell::new(0), ActivityCell::new(1)];
        assert_eq!(
            geometry::stacked_levels(&column, 3),
            vec![HeightLevel::Top, HeightLevel::Low]
        );
    }

    #[test]
    fn bitmap_extrusion_without_fonts() {
        let bitmap = geometry::CoverageBitmap::from_fn(4, 2, |x, _| if x < 2 { 255 } else { 0 });
        let mesh =
            geometry::extrude_bitmap(&bitmap, 0.5, &geometry::VoxelParams::new(0.5, 1.0)).unwrap();
        assert_eq!(mesh.len(), 4 * 12);
    }

    #[test]
    fn relief_from_decoded_image() {
        use image::{DynamicImage, Rgba, RgbaImage};

        let img = RgbaImage::from_fn(3, 1, |x, _| {
            let v = [0, 128, 255][x as usize];
            Rgba([v, v, v, 255])
        });
        let mesh = geometry::relief_from_image(
            &DynamicImage::ImageRgba8(img),
            &ReliefConfig::default().with_depth(2.0),
        )
        .unwrap();
        assert_eq!(mesh.len(), 2 * 12);
        assert_relative_eq!(mesh.bounds().height(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn text_config_builder_pattern() {
        let config = TextRenderConfig::default()
            .with_voxel_scale(0.2)
            .with_depth(1.0)
            .with_font_size(24.0)
            .with_label_scale(0.5)
            .with_coverage_threshold(0.4)
            .with_font(FontSource::System);
        assert!(config.validate().is_ok());
    }
}

// =============================================================================
// TIER 3: Composition and STL Output
// =============================================================================

mod tier3_compose_and_io {
    use super::*;

    #[test]
    fn period_offsets_are_pure() {
        assert_eq!(
            geometry::period_offsets(&[5.0, 5.0], 1.0),
            vec![0.0, 6.0]
        );
    }

    #[test]
    fn adjacent_periods_do_not_overlap() {
        let layout = GridLayout::default();
        let grids = [
            ActivityGrid::from_counts(vec![vec![1, 2, 3]; 5]),
            ActivityGrid::from_counts(vec![vec![9]; 3]),
        ];
        let meshes: Vec<_> = grids
            .iter()
            .map(|g| geometry::build_grid(g, g.max_count(), &layout).unwrap())
            .collect();
        let first_len = meshes[0].len();

        let model =
            geometry::compose(meshes, TriangleMesh::new(), None, &ComposeLayout::default()).unwrap();
        let first = TriangleMesh::from_triangles(model.triangles[..first_len].to_vec()).bounds();
        let second = TriangleMesh::from_triangles(model.triangles[first_len..].to_vec()).bounds();
        assert!(!first.overlaps(&second));
        assert!(first.max.x <= second.min.x);
    }

    #[test]
    fn stl_single_triangle_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.stl");

        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        let mesh = TriangleMesh::from_triangles(vec![tri]);
        save_stl(&mesh, &path).unwrap();

        assert_eq!(
            std::fs::metadata(&path).unwrap().len(),
            io::binary_stl_size(1) as u64
        );
        let loaded = load_stl(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.triangles[0].v1, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(loaded.triangles[0].normal, tri.normal);
    }
}

// =============================================================================
// TIER 4: Pipeline
// =============================================================================

mod tier4_pipeline {
    use super::*;
    use skyline::{output_filename, parse_year_range, SkylineError};
    use std::path::PathBuf;

    fn two_years() -> Vec<Period> {
        vec![
            Period::new(
                ActivityGrid::from_counts(vec![vec![0, 1, 2, 3, 4, 5, 6]; 4]),
                "2023",
            ),
            Period::new(ActivityGrid::from_counts(vec![vec![8, 0, 8]; 2]), "2024"),
        ]
    }

    #[test]
    fn naming_helpers() {
        assert_eq!(format_year_range(2023, 2024), "2023-24");
        assert_eq!(
            output_filename("mona", 2023, 2024, None),
            PathBuf::from("mona-2023-24-github-skyline.stl")
        );
        assert_eq!(parse_year_range("2023-2024", 2025).unwrap(), (2023, 2024));
    }

    #[test]
    fn build_model_counts_boxes() {
        init_logging();
        let model = build_model("", "", &two_years(), &SkylineConfig::default()).unwrap();
        // 4 * 6 + 2 * 2 boxes, two platforms.
        assert_eq!(model.len(), 12 * (28 + 2));
        let b = model.bounds();
        assert!(b.min.x.abs() < 1e-9);
        assert!(b.min.z.abs() < 1e-9);
    }

    #[test]
    fn default_periods_touch() {
        let model = build_model("", "", &two_years(), &SkylineConfig::default()).unwrap();
        // First period: 24 boxes plus its platform.
        let split = 12 * 25;
        let first = TriangleMesh::from_triangles(model.triangles[..split].to_vec()).bounds();
        let second = TriangleMesh::from_triangles(model.triangles[split..].to_vec()).bounds();

        assert_relative_eq!(first.max.x, second.min.x, epsilon = 1e-9);
        assert!(!first.overlaps(&second));
        assert_eq!(first.min.y, second.min.y);
    }

    #[test]
    fn default_label_touches_the_front() {
        let grid_only = build_model("", "", &two_years(), &SkylineConfig::default()).unwrap();
        let model =
            match build_model("octocat", "2023", &two_years(), &SkylineConfig::default()) {
                Ok(model) => model,
                Err(SkylineError::Geometry(geometry::GeometryError::Font { .. })) => return,
                Err(other) => panic!("unexpected error: {other}"),
            };
        let label =
            TriangleMesh::from_triangles(model.triangles[grid_only.len()..].to_vec()).bounds();

        assert_relative_eq!(label.max.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(label.min.x, 0.0, epsilon = 1e-9);
        assert!(!label.overlaps(&grid_only.bounds()));
    }

    #[test]
    fn parallel_build_is_deterministic() {
        let periods: Vec<Period> = (0..8u32)
            .map(|i| {
                Period::new(
                    ActivityGrid::from_counts(vec![vec![i, i + 1, 0, 2 * i]; 3 + i as usize]),
                    format!("{}", 2010 + i),
                )
            })
            .collect();
        let config = SkylineConfig::default();
        let a = build_model("", "", &periods, &config).unwrap();
        let b = build_model("", "", &periods, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generate_writes_stl() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let config = SkylineConfig::default().with_output(dir.path().join("sky"));
        let report = generate_skyline("", 2023, 2024, &two_years(), &config).unwrap();

        assert_eq!(report.path, dir.path().join("sky.stl"));
        assert_eq!(report.triangles, 12 * 30);
        assert_eq!(
            std::fs::metadata(&report.path).unwrap().len(),
            report.bytes as u64
        );
        assert_eq!(load_stl(&report.path).unwrap().len(), report.triangles);
    }

    #[test]
    fn relief_image_joins_the_model() {
        use image::{Rgba, RgbaImage};

        let dir = tempfile::tempdir().unwrap();
        let avatar = dir.path().join("avatar.png");
        RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]))
            .save(&avatar)
            .unwrap();

        let config = SkylineConfig::default().with_relief_image(&avatar);
        let model = build_model("", "", &two_years(), &config).unwrap();
        assert_eq!(model.len(), 12 * (28 + 2 + 4));
        assert!(model.bounds().min.y < 0.0);
    }

    #[test]
    fn user_name_is_extruded_when_fonts_exist() {
        init_logging();
        match build_model("octocat", "2023-24", &two_years(), &SkylineConfig::default()) {
            Ok(model) => assert!(model.len() > 12 * 30),
            Err(SkylineError::Geometry(geometry::GeometryError::Font { .. })) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SkylineConfig::default()
            .with_grid(GridLayout::default().with_base_height(-1.0))
            .with_output(dir.path().join("never.stl"));
        let err = generate_skyline("", 2024, 2024, &two_years(), &config).unwrap_err();
        assert!(err.is_config());
        assert!(!dir.path().join("never.stl").exists());
    }
}
