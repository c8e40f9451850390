use assertables::{assert_contains, assert_not_contains};
use svgtess::document::{export_string, import_str};
use svgtess::{ArcMode, Error, TessellationConfig};

const DRAWING: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200" height="120">
  <title>test drawing</title>
  <g id="outline">
    <path id="hull" d="M 20,0 C 0,100 200,100 180,0 L 10,21 Z"/>
    <path id="mast" d="m 100 10 v 50"/>
  </g>
  <path id="sail" d="M 100,10 A 40,40 0 0,1 140,50 Z"/>
  <path id="flag" d="M 100,10 L 110,5 W"/>
  <circle cx="5" cy="5" r="3"/>
</svg>
"##;

#[test]
fn test_partial_import() {
    let report = import_str(DRAWING, &TessellationConfig::default()).unwrap();
    assert!(!report.is_compatible());
    let ids: Vec<_> = report
        .scene
        .iter()
        .map(|s| s.id.clone().unwrap_or_default())
        .collect();
    assert_eq!(ids, vec!["hull", "mast"]);

    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|f| (f.index, f.id.as_deref().unwrap_or_default()))
        .collect();
    assert_eq!(failures, vec![(2, "sail"), (3, "flag")]);
    assert!(matches!(
        report.failures[1].error,
        Error::UnknownCommand { command: 'W', .. }
    ));
}

#[test]
fn test_import_with_arc_sampling() {
    let cfg = TessellationConfig {
        arc_mode: ArcMode::Sample,
        ..Default::default()
    };
    let report = import_str(DRAWING, &cfg).unwrap();
    assert_eq!(report.scene.len(), 3);
    let sail = report.scene.get("sail").unwrap();
    // 100 arc samples plus the closing line
    assert_eq!(sail.path.tessellation().unwrap().vertex_count(), 102);
}

#[test]
fn test_export_roundtrip() {
    let report = import_str(DRAWING, &TessellationConfig::default()).unwrap();
    let svg = export_string(&report.scene).unwrap();
    assert_contains!(
        svg,
        r#"<path id="hull" d="M 20,0 C 0,100 200,100 180,0 L 10,21 Z"/>"#
    );
    assert_contains!(svg, r#"<path id="mast" d="m 100,10 v 50"/>"#);
    assert_not_contains!(svg, "circle");
    assert_not_contains!(svg, "sail");

    let again = import_str(&svg, &TessellationConfig::default()).unwrap();
    assert!(again.is_compatible());
    assert_eq!(again.scene, report.scene);
}

#[test]
fn test_into_result() {
    let report = import_str(DRAWING, &TessellationConfig::default()).unwrap();
    let err = report.into_result().unwrap_err();
    let msg = err.to_string();
    assert_contains!(msg, "   2: Not supported");
    assert_contains!(msg, "   3: Unknown path command 'W'");
}
