use assertables::assert_contains;
use svgtess::{tessellate_str, CloseMode, Error, Path, TessellationConfig};

#[test]
fn test_unknown_command() {
    match Path::parse("M 0,0 Q-bad") {
        Err(Error::UnknownCommand { command, offset }) => {
            assert_eq!(command, 'b');
            assert_eq!(offset, 8);
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert!(matches!(
        Path::parse("K 1,1"),
        Err(Error::UnknownCommand {
            command: 'K',
            offset: 0
        })
    ));
    // numbers with no preceding command
    assert!(matches!(
        Path::parse("10,10"),
        Err(Error::UnknownCommand { .. })
    ));
    // and nothing after a close-path is repeated
    assert!(matches!(
        Path::parse("M 0,0 L 1,1 Z 3,3"),
        Err(Error::UnknownCommand { offset: 14, .. })
    ));
}

#[test]
fn test_missing_argument() {
    for (data, command) in [
        ("M 0,0 L 10", 'L'),
        ("M 0,0 C 1,2 3,4", 'C'),
        ("M 0,0 l 1.5,2", 'l'),
        ("M 0,0 L 1e3,2", 'L'),
        ("M 0,0 a 1,1 0 2,0 5,5", 'a'),
        ("M 99999999999,0", 'M'),
    ] {
        match Path::parse(data) {
            Err(Error::MissingArgument { command: c, .. }) => {
                assert_eq!(c, command, "for {data:?}")
            }
            other => panic!("unexpected result {other:?} for {data:?}"),
        }
    }
}

#[test]
fn test_unsupported_features() {
    let err = tessellate_str("M 0,0 A 1,1 0 0,1 2,0", &TessellationConfig::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFeature(_)));
    assert_contains!(err.to_string(), "Not supported");

    let cfg = TessellationConfig {
        close_mode: CloseMode::Reject,
        ..Default::default()
    };
    assert!(matches!(
        tessellate_str("M 0,0 L 1,1 Z", &cfg),
        Err(Error::UnsupportedFeature(_))
    ));
    // an unsupported command never yields partial geometry
    let path = Path::parse("M 0,0 L 5,5 A 1,1 0 0,1 2,0").unwrap();
    assert!(path.vertices().is_err());
    assert!(!path.is_tessellated());
}

#[test]
fn test_error_classification() {
    assert!(Path::parse("X").unwrap_err().is_path_error());
    let err = tessellate_str(
        "M 0,0",
        &TessellationConfig {
            curve_samples: 0,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(!err.is_path_error());
    assert_contains!(err.to_string(), "Invalid curve sample count");
}
