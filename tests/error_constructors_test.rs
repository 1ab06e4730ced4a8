use sirocco::error::SiroccoError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        SiroccoError::config("x"),
        SiroccoError::Config { .. }
    ));
    assert!(matches!(
        SiroccoError::address("x"),
        SiroccoError::Address { .. }
    ));
    assert!(matches!(
        SiroccoError::profile("x"),
        SiroccoError::Profile { .. }
    ));
    assert!(matches!(
        SiroccoError::decode("x"),
        SiroccoError::Decode { .. }
    ));
}

#[test]
fn error_constructors_group_2() {
    let ser = SiroccoError::Serialization {
        message: "s".into(),
    };
    assert!(matches!(ser, SiroccoError::Serialization { .. }));
    assert!(matches!(SiroccoError::io("x"), SiroccoError::Io { .. }));
    assert!(matches!(
        SiroccoError::gateway("x"),
        SiroccoError::Gateway { .. }
    ));
    assert!(matches!(
        SiroccoError::validation("f", "m"),
        SiroccoError::Validation { .. }
    ));
    assert!(matches!(
        SiroccoError::generic("x"),
        SiroccoError::Generic { .. }
    ));
}

#[test]
fn display_messages() {
    let e = SiroccoError::validation("field", "bad");
    let s = format!("{}", e);
    assert!(s.contains("Validation error"));

    let e = SiroccoError::profile("unknown profile 'X1-00-00'");
    assert!(format!("{}", e).contains("unknown profile"));
}

#[test]
fn from_impls_map_to_variants() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let e: SiroccoError = io.into();
    assert!(matches!(e, SiroccoError::Io { .. }));

    let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
    let e: SiroccoError = bad.unwrap_err().into();
    assert!(matches!(e, SiroccoError::Serialization { .. }));
}
