use sirocco::config::Config;
use std::fs;

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = Config::default();
    cfg.gateway.id = 42;
    cfg.logging.file = path.with_extension("log").to_string_lossy().to_string();

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.gateway.id, 42);
    assert_eq!(loaded.logging.file, cfg.logging.file);
}

#[test]
fn load_full_device_configuration() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
gateway:
  id: 123
  name: "hall gateway"
  base_id: "FF-80-00-00"
covers:
  - id: "00-00-00-04"
    name: "Living room shutter"
    eep: "G5-3F-7F"
    sender:
      id: "FF-80-00-04"
      eep: "H5-3F-7F"
    device_class: "shutter"
    time_closes: 24
    time_opens: 25
climate:
  - id: "00-00-00-08"
    name: "Office thermostat"
    eep: "A5-10-06"
    sender:
      id: "FF-80-00-08"
      eep: "A5-10-06"
binary_sensors:
  - id: "00-00-10-08"
    name: "Window contact"
    eep: "D5-00-01"
    device_class: "window"
    invert_signal: true
"#,
    )
    .unwrap();

    let cfg = Config::from_file(&path).unwrap();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.covers.len(), 1);
    assert_eq!(cfg.covers[0].sender.eep, "H5-3F-7F");
    assert_eq!(cfg.climate.len(), 1);
    assert_eq!(cfg.binary_sensors.len(), 1);
    assert!(cfg.binary_sensors[0].invert_signal);
}

#[test]
fn config_validation_errors() {
    let mut cfg = Config::default();

    // Invalid gateway base address
    cfg.gateway.base_id = "zz".to_string();
    assert!(cfg.validate().is_err());

    // Empty gateway name
    cfg = Config::default();
    cfg.gateway.name.clear();
    assert!(cfg.validate().is_err());
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"bad: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Serialization error"));
}
