//! Integration tests for sheet generation

use sheet_core::{
    AnswerSheetGenerator, GeneratorConfig, LayoutVariant, Point, Record, Typeface,
};

/// Generator with the built-in face so results do not depend on installed fonts
fn generator(variant: LayoutVariant) -> AnswerSheetGenerator {
    AnswerSheetGenerator::with_typeface(variant, Typeface::Builtin)
}

#[test]
fn test_bubble_totals() {
    for variant in [LayoutVariant::Original, LayoutVariant::Refined] {
        let sheet = generator(variant).generate();
        assert_eq!(sheet.record.bubbles.len(), 243);
        assert_eq!(sheet.record.anchors.len(), 4);
        assert!(sheet.record.mixed_area.is_some());
    }
}

#[test]
fn test_refined_first_entries() {
    let sheet = generator(LayoutVariant::Refined).generate();
    let value: serde_json::Value =
        serde_json::from_str(&sheet.coordinates_json().unwrap()).unwrap();

    assert_eq!(
        value["bubbles"][0],
        serde_json::json!({"label": "1", "center": [150, 252], "radius": 16})
    );
    assert_eq!(
        value["anchors"][0],
        serde_json::json!([[30, 30], [70, 30], [70, 70], [30, 70]])
    );
    assert_eq!(
        value["mixed_area"],
        serde_json::json!([[620, 110], [1150, 110], [1150, 1620], [620, 1620]])
    );
}

#[test]
fn test_original_first_bubble() {
    let sheet = generator(LayoutVariant::Original).generate();
    let first = &sheet.record.bubbles[0];
    assert_eq!(first.center, Point(140, 242));
    assert_eq!(first.radius, 15);
}

#[test]
fn test_bubbles_never_overlap() {
    for variant in [LayoutVariant::Original, LayoutVariant::Refined] {
        let bubbles = generator(variant).generate().record.bubbles;
        for (i, a) in bubbles.iter().enumerate() {
            for b in &bubbles[i + 1..] {
                let min = (a.radius + b.radius) as i64;
                assert!(
                    a.center.distance_sq(b.center) >= min * min,
                    "{:?} overlaps {:?}",
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_question_columns() {
    let record = generator(LayoutVariant::Refined).generate().record;
    let choice = &record.bubbles[43..];
    let option_a = |q: usize| &choice[(q - 1) * 5];

    assert!(option_a(21).center.y() < option_a(40).center.y());
    assert!(option_a(21).center.x() > option_a(1).center.x());
    assert!(option_a(20).center.y() > option_a(1).center.y());
    assert_eq!(record.bubbles_labeled("A").count(), 40);
    assert_eq!(record.bubbles_labeled("E").count(), 40);
}

#[test]
fn test_generation_is_deterministic() {
    let first = generator(LayoutVariant::Refined).generate();
    let second = generator(LayoutVariant::Refined).generate();
    assert_eq!(
        first.coordinates_json().unwrap(),
        second.coordinates_json().unwrap()
    );
    assert_eq!(first.canvas, second.canvas);
}

#[test]
fn test_canvas_matches_record() {
    let sheet = generator(LayoutVariant::Refined).generate();
    let canvas = &sheet.canvas;

    for quad in &sheet.record.anchors {
        let c = quad[0];
        assert!(canvas.is_ink(c.x() + 20, c.y() + 20));
    }
    for bubble in &sheet.record.bubbles {
        let Point(cx, cy) = bubble.center;
        assert!(canvas.is_ink(cx + bubble.radius, cy));
        assert!(canvas.is_ink(cx - bubble.radius, cy));
    }
    let [tl, _, br, _] = sheet.record.mixed_area.unwrap();
    assert!(canvas.is_ink(tl.x(), (tl.y() + br.y()) / 2));
    assert!(!canvas.is_ink((tl.x() + br.x()) / 2, (tl.y() + br.y()) / 2));
}

#[test]
fn test_export_files() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("answer_card_redrawn.png");
    let coords_path = dir.path().join("coordinates.json");

    let sheet = generator(LayoutVariant::Refined).generate();
    sheet.save(&image_path, &coords_path).unwrap();

    let img = image::open(&image_path).unwrap();
    assert_eq!((img.width(), img.height()), (1240, 1754));

    let text = std::fs::read_to_string(&coords_path).unwrap();
    assert_eq!(Record::from_json(&text).unwrap(), sheet.record);
}

#[test]
fn test_config_driven_generator() {
    let config = GeneratorConfig {
        variant: LayoutVariant::Original,
        font_paths: vec!["/nonexistent/font.ttf".into()],
    };
    let sheet = AnswerSheetGenerator::with_config(&config).generate();
    assert_eq!(sheet.record.bubbles[0].radius, 15);
}

#[test]
fn test_png_bytes_decode() {
    let _ = env_logger::builder().is_test(true).try_init();
    let sheet = generator(LayoutVariant::Original).generate();
    let bytes = sheet.png_bytes().unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(&img, sheet.canvas.image());
}
