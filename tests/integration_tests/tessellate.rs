use assertables::assert_in_delta;
use svgtess::path::implicit_offset;
use svgtess::{tessellate_str, ArcMode, Path, Point, TessellationConfig};

fn config(samples: usize) -> TessellationConfig {
    TessellationConfig {
        curve_samples: samples,
        ..Default::default()
    }
}

#[test]
fn test_cursor_threading() {
    let tess = tessellate_str("M 0,0 L 10,10 L 20,0", &config(100)).unwrap();
    // first line end, second line start
    assert_eq!(tess.vertex(1), Some(Point::new(10., 10.)));
    assert_eq!(tess.vertex(2), Some(Point::new(10., 10.)));
}

#[test]
fn test_relative_accumulation() {
    let tess = tessellate_str("M 0,0 l 10,0 l 10,0", &config(100)).unwrap();
    assert_eq!(tess.cursor.current, Point::new(20., 0.));
}

#[test]
fn test_segment_bridging() {
    let tess = tessellate_str("M 0,0 L 10,0 M 50,50 L 60,50", &config(100)).unwrap();
    assert_eq!(tess.segments.len(), 2);
    for (a, b) in tess.edges() {
        let (sa, sb) = (tess.segment_of(a), tess.segment_of(b));
        assert!(sa.is_some());
        assert_eq!(sa, sb, "edge {a}-{b} crosses segments");
    }
    // nothing joins (10,0) to (50,50)
    assert!(!tess.edges().any(|e| e == (1, 2)));
}

#[test]
fn test_tie_break_branches() {
    // end.x > control2.x: sum
    assert_eq!(implicit_offset(180., 150.), 330.);
    // end.x < control2.x: difference
    assert_eq!(implicit_offset(180., 200.), -20.);
    // equal: end coordinate
    assert_eq!(implicit_offset(180., 180.), 180.);

    let tess = tessellate_str("M 0,0 C 0,100 150,0 180,0", &config(4)).unwrap();
    assert_eq!(tess.cursor.implicit_control, Point::new(330., 0.));
    let tess = tessellate_str("M 0,0 C 0,100 200,0 180,0", &config(4)).unwrap();
    assert_eq!(tess.cursor.implicit_control, Point::new(-20., 0.));
    let tess = tessellate_str("M 0,0 C 0,100 180,0 180,0", &config(4)).unwrap();
    assert_eq!(tess.cursor.implicit_control, Point::new(180., 0.));
}

#[test]
fn test_sampling_determinism() {
    let data = "M 3,7 C 10,90 200,-40 180,5";
    let a = tessellate_str(data, &config(100)).unwrap();
    let b = tessellate_str(data, &config(100)).unwrap();
    let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a.vertices), bits(&b.vertices));
    assert_eq!(a.vertex_count(), 100);
}

#[test]
fn test_sampling_resolution() {
    let path = Path::parse("M 0,0 Q 10,20 20,0 C 0,0 0,0 0,0").unwrap();
    assert_eq!(path.tessellation().unwrap().vertex_count(), 200);
    let path = path.with_config(config(10));
    assert_eq!(path.tessellation().unwrap().vertex_count(), 20);
    // first sample is the curve start; t=1 is not sampled
    assert_eq!(path.tessellation().unwrap().vertex(0), Some(Point::ORIGIN));
    assert_ne!(
        path.tessellation().unwrap().vertex(9),
        Some(Point::new(20., 0.))
    );
}

#[test]
fn test_arc_sampling() {
    let cfg = TessellationConfig {
        arc_mode: ArcMode::Sample,
        curve_samples: 4,
        ..Default::default()
    };
    let tess = tessellate_str("M 0,0 A 10,10 0 0,1 20,0", &cfg).unwrap();
    assert_eq!(tess.vertex_count(), 4);
    let top = tess.vertex(2).unwrap();
    assert_in_delta!(top.x, 10., 1e-4);
    assert_in_delta!(top.y, -10., 1e-4);
}

#[test]
fn test_paths_do_not_share_cursor() {
    let cfg = config(100);
    let first = tessellate_str("M 0,0 C 0,100 150,100 180,0", &cfg).unwrap();
    let second = tessellate_str("S 10,10 20,0", &cfg).unwrap();
    // no cubic precedes within this path, so the first control is the origin
    let alone = tessellate_str("C 0,0 10,10 20,0", &cfg).unwrap();
    assert_eq!(second.vertices, alone.vertices);
    assert_ne!(first.cursor, second.cursor);
}
