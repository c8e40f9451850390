use svgtess::{canonical_path_data, Path};

fn assert_roundtrip(input: &str) {
    let path = Path::parse(input).unwrap();
    let text = path.to_text();
    let again = Path::parse(&text).unwrap();
    assert_eq!(again.commands(), path.commands(), "round-trip of {input:?}");
    // canonical text is a fixed point
    assert_eq!(again.to_text(), text);
}

#[test]
fn test_roundtrip_lines() {
    assert_roundtrip("M 20,0 L 10,21 Z");
    assert_roundtrip("m1 2l3 4h5v6H-7V-8z");
    assert_roundtrip("M0,0 10,10 20,0");
}

#[test]
fn test_roundtrip_curves() {
    assert_roundtrip("M 20,0 C 0,100 200,100 180,0 L 10,21 Z");
    assert_roundtrip("M0 0c1 2 3 4 5 6s7 8 9 10S1 1 2 2");
    assert_roundtrip("M0 0q1 2 3 4t5 6T7 8Q-1-2-3-4");
    assert_roundtrip("M0 0C1,2,3,4,5,6 7,8,9,10,11,12");
}

#[test]
fn test_roundtrip_arcs() {
    assert_roundtrip("M0 0A10 5 30 1 0 20 -3a1,1 0 0,1 2,2");
    // flags need no separators
    assert_roundtrip("M0 0a10 10 0 1120 0");
}

#[test]
fn test_canonical_text() {
    assert_eq!(
        canonical_path_data("M20 0C0 100,200 100,180 0L10 21z").unwrap(),
        "M 20,0 C 0,100 200,100 180,0 L 10,21 Z"
    );
    // implicit repeats become explicit
    assert_eq!(
        canonical_path_data("m 1 1 2 2 3 3").unwrap(),
        "m 1,1 l 2,2 l 3,3"
    );
    assert_eq!(
        canonical_path_data("  M-1-2\n\tL +3 , +4  ").unwrap(),
        "M -1,-2 L 3,4"
    );
    assert_eq!(canonical_path_data("").unwrap(), "");
}
