//! End-to-end tests for the board analysis pipeline.

use inkline_core::api::{AnalyzeOptions, BoardAnalyzer, analyze_detections, analyze_json, analyze_tokens};
use inkline_core::classify::EquationKind;
use inkline_core::geometry::{BBox, Bounds};
use inkline_core::highlight::MatchKind;
use inkline_core::layout::Token;
use inkline_core::mapping::CoordinateMapping;
use inkline_core::ocr::{Detection, Vertex};
use inkline_core::InklineError;

// ============================================================================
// Helper functions
// ============================================================================

fn det(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Detection {
    Detection::new(
        text,
        vec![
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        ],
    )
}

/// "2x + 3 = 11" above "2x = 8" above "x = 4", preceded by the transcript.
fn board() -> Vec<Detection> {
    vec![
        det("2x + 3 = 11\n2x = 8\nx = 4", 0.0, 0.0, 400.0, 300.0),
        det("2x", 10.0, 20.0, 50.0, 60.0),
        det("+", 60.0, 25.0, 80.0, 55.0),
        det("3", 90.0, 22.0, 110.0, 58.0),
        det("=", 120.0, 30.0, 140.0, 50.0),
        det("11", 150.0, 18.0, 190.0, 62.0),
        det("2x", 12.0, 110.0, 52.0, 150.0),
        det("=", 62.0, 118.0, 82.0, 140.0),
        det("8", 92.0, 108.0, 112.0, 152.0),
        det("x", 14.0, 200.0, 34.0, 240.0),
        det("=", 44.0, 210.0, 64.0, 230.0),
        det("4", 74.0, 198.0, 94.0, 242.0),
    ]
}

fn canvas() -> CoordinateMapping {
    CoordinateMapping::new(512.0, 256.0, Bounds::new(100.0, 100.0, 256.0, 128.0))
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_full_board_analysis() {
    let analysis = analyze_detections(&board(), &AnalyzeOptions::default()).unwrap();

    assert_eq!(analysis.lines_in_order, vec!["2x + 3 = 11", "2x = 8", "x = 4"]);
    assert_eq!(analysis.most_recent_step(), Some("x = 4"));
    assert_eq!(analysis.equations.len(), 3);
    assert!(analysis.equations.iter().all(|e| e.classified.kind == EquationKind::Equation));
    assert_eq!(analysis.equations[0].classified.components.numbers, vec!["3", "11"]);
    assert!(analysis.highlight_region.is_none());
    // No mapping: canvas boxes are pixel boxes.
    assert_eq!(
        analysis.equations[1].canvas_bounding_box(),
        &BBox::new(12.0, 108.0, 112.0, 152.0).unwrap()
    );
    assert_eq!(analysis.equations[1].canvas, analysis.equations[1].classified);
}

#[test]
fn test_boxes_are_mapped_and_highlight_located() {
    let options = AnalyzeOptions {
        mapping: Some(canvas()),
        highlight_query: Some("2x = 8".to_string()),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze_detections(&board(), &options).unwrap();

    assert_eq!(
        analysis.equations[2].canvas_bounding_box(),
        &BBox::new(107.0, 199.0, 147.0, 221.0).unwrap()
    );
    // Pixel view stays available for locating highlights.
    assert_eq!(
        analysis.equations[2].classified.bounding_box,
        BBox::new(14.0, 198.0, 94.0, 242.0).unwrap()
    );
    let hit = analysis.highlight_region.as_ref().unwrap();
    assert_eq!(hit.equation_index, 1);
    assert_eq!(hit.region.match_kind, MatchKind::Exact);
    assert_eq!(hit.region.bounding_box, BBox::new(106.0, 154.0, 156.0, 176.0).unwrap());
    assert_eq!(hit.region.padding, 10.0);

    let later = analysis.highlight("x = 4").unwrap();
    assert_eq!(later.equation_index, 2);
}

#[test]
fn test_mapped_output_has_no_pixel_coordinates() {
    let token = Token::from_rect("x", 10.0, 10.0, 20.0, 20.0).unwrap();
    let options = AnalyzeOptions {
        mapping: Some(CoordinateMapping::new(100.0, 100.0, Bounds::new(0.0, 0.0, 200.0, 200.0))),
        highlight_query: Some("x".to_string()),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze_tokens(&[token], &options).unwrap();
    let out: serde_json::Value = serde_json::from_str(&analysis.to_json(false).unwrap()).unwrap();

    let eq = &out["equations"][0];
    let doubled = serde_json::json!({"xMin": 20.0, "yMin": 20.0, "xMax": 40.0, "yMax": 40.0});
    assert_eq!(eq["boundingBox"], doubled);
    assert_eq!(eq["tokens"][0]["box"], doubled);
    assert_eq!(eq["tokens"][0]["center"], serde_json::json!({"x": 30.0, "y": 30.0}));
    assert!(eq.get("canvasBoundingBox").is_none());

    // Every equation coordinate is a doubled one.
    let mut numbers = Vec::new();
    collect_numbers(&out["equations"], &mut numbers);
    assert!(!numbers.is_empty());
    assert!(numbers.iter().all(|n| [20.0, 30.0, 40.0].contains(n)), "{numbers:?}");
    assert_eq!(out["highlightRegion"]["boundingBox"], doubled);
}

fn collect_numbers(value: &serde_json::Value, out: &mut Vec<f64>) {
    match value {
        serde_json::Value::Number(n) => out.extend(n.as_f64()),
        serde_json::Value::Array(items) => items.iter().for_each(|v| collect_numbers(v, out)),
        serde_json::Value::Object(map) => map.values().for_each(|v| collect_numbers(v, out)),
        _ => {}
    }
}

#[test]
fn test_unmatched_query_is_not_an_error() {
    let options = AnalyzeOptions {
        highlight_query: Some("y = 7 z".to_string()),
        ..AnalyzeOptions::default()
    };
    let analysis = analyze_detections(&board(), &options).unwrap();
    assert!(analysis.highlight_region.is_none());
}

#[test]
fn test_empty_input() {
    let analysis = analyze_tokens(&[], &AnalyzeOptions::default()).unwrap();
    assert!(analysis.is_empty());
    assert!(analysis.lines_in_order.is_empty());
    assert_eq!(analysis.most_recent_step(), None);

    // Only the transcript pseudo-entry: nothing spatial remains.
    let analysis = analyze_detections(&board()[..1], &AnalyzeOptions::default()).unwrap();
    assert!(analysis.is_empty());
}

#[test]
fn test_invalid_mapping_is_surfaced() {
    let options = AnalyzeOptions {
        mapping: Some(CoordinateMapping::new(0.0, 300.0, Bounds::new(0.0, 0.0, 10.0, 10.0))),
        ..AnalyzeOptions::default()
    };
    let err = analyze_detections(&board(), &options).unwrap_err();
    assert!(matches!(err, InklineError::InvalidMapping { .. }));
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = BoardAnalyzer::new().mapping(canvas()).highlight("2x + 9");
    let first = analyzer.analyze_detections(&board()).unwrap();
    for _ in 0..5 {
        assert_eq!(analyzer.analyze_detections(&board()).unwrap(), first);
    }
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_analyze_vision_json() {
    let json = r#"{
        "textAnnotations": [
            {"description": "5 7", "boundingPoly": {"vertices": [{"x": 0, "y": 0}, {"x": 60, "y": 20}]}},
            {"description": "5", "boundingPoly": {"vertices": [{"x": 0, "y": 0}, {"x": 20}, {"x": 20, "y": 20}, {"y": 20}]}},
            {"description": "7", "boundingPoly": {"vertices": [{"x": 40, "y": 0}, {"x": 60}, {"x": 60, "y": 20}, {"x": 40, "y": 20}]}}
        ]
    }"#;
    let analysis = analyze_json(json, &AnalyzeOptions::default()).unwrap();
    assert_eq!(analysis.lines_in_order, vec!["5 7"]);
    assert_eq!(analysis.equations[0].classified.kind, EquationKind::NumberSequence);

    let out: serde_json::Value = serde_json::from_str(&analysis.to_json(false).unwrap()).unwrap();
    assert_eq!(out["linesInOrder"][0], "5 7");
    assert_eq!(out["equations"][0]["type"], "number_sequence");
    assert_eq!(out["equations"][0]["boundingBox"]["xMax"], 60.0);
    assert_eq!(out["equations"][0]["tokens"][1]["box"]["xMin"], 40.0);
    assert!(out.get("highlightRegion").is_none());
}

#[test]
fn test_analyze_bare_array_without_transcript() {
    let json = r#"[{"text": "x", "boundingPolygon": {"vertices": [{"x": 0, "y": 0}, {"x": 10, "y": 10}]}}]"#;
    let analyzer = BoardAnalyzer::new().skip_transcript(false);
    let analysis = analyzer.analyze_json(json).unwrap();
    assert_eq!(analysis.lines_in_order, vec!["x"]);
}

#[test]
fn test_malformed_json() {
    let err = analyze_json("{not json", &AnalyzeOptions::default()).unwrap_err();
    assert!(matches!(err, InklineError::Json(_)));
}
