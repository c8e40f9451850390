use svgtess::{BoundingBox, Error, Path, Point};

#[test]
fn test_translate_moves_geometry() {
    let mut path = Path::parse("M 20,0 C 0,100 200,100 180,0 L 10,21 Z").unwrap();
    let before = path.bbox().unwrap();
    let verts_before = path.vertices().unwrap().to_vec();

    path.translate(5, -3);
    assert!(!path.is_tessellated());
    let after = path.bbox().unwrap();
    let expected = before.translated(5., -3.);
    for (a, b) in [
        (after.x1, expected.x1),
        (after.y1, expected.y1),
        (after.x2, expected.x2),
        (after.y2, expected.y2),
    ] {
        assert!((a - b).abs() < 1e-3, "{after:?} != {expected:?}");
    }
    assert_eq!(
        path.to_text(),
        "M 25,-3 C 5,97 205,97 185,-3 L 15,18 Z"
    );

    let verts_after = path.vertices().unwrap();
    assert_eq!(verts_after.len(), verts_before.len());
    // the first vertex (curve start) moves by exactly the offset
    assert_eq!(
        Point::new(verts_after[0], verts_after[1]),
        Point::new(verts_before[0] + 5., verts_before[1] - 3.)
    );
}

#[test]
fn test_translate_relative_path() {
    let mut path = Path::parse("m 10,10 l 10,0 l 0,10 z").unwrap();
    path.translate(-10, -10);
    assert_eq!(path.to_text(), "m 0,0 l 10,0 l 0,10 Z");
    assert_eq!(path.bbox(), Some(BoundingBox::new(0., 0., 10., 10.)));
}

#[test]
fn test_resize() {
    let mut path = Path::parse("M 10,10 L 30,10 L 30,20 Z").unwrap();
    path.resize(20, 10).unwrap();
    assert_eq!(path.to_text(), "M 10,10 L 50,10 L 50,30 Z");
    assert_eq!(path.bbox(), Some(BoundingBox::new(10., 10., 50., 30.)));
    assert_eq!(path.vertices().unwrap()[2..4], [50., 10.]);
}

#[test]
fn test_resize_errors() {
    let mut path = Path::parse("M 0,0 L 10,10").unwrap();
    assert!(matches!(path.resize(-10, 5), Err(Error::InvalidValue(..))));

    let mut path = Path::parse("M 0,0 A 10,5 45 0,1 20,20").unwrap();
    assert!(matches!(
        path.resize(5, 0),
        Err(Error::UnsupportedFeature(_))
    ));
}
