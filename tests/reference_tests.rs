use flightlog::errors::AppError;
use flightlog::reference::AirportDirectory;
use std::fs;
use std::path::Path;

mod common;
use common::temp_out;

#[test]
fn test_builtin_table() {
    let dir = AirportDirectory::builtin().unwrap();
    assert!(dir.len() > 100);

    let jfk = dir.lookup("kjfk").unwrap();
    assert_eq!(jfk.country, "USA");
    assert!((jfk.latitude - 40.64).abs() < 0.1);

    assert!(dir.codes().all(|c| c == c.to_uppercase()));
    assert!(dir.lookup("ZZZZ").is_none());
}

#[test]
fn test_yaml_reference_file() {
    let path = temp_out("reference_yaml", "yml");
    fs::write(
        &path,
        "abcd:\n  name: \"Test Field\"\n  city: \"Nowhere\"\n  country: \"Utopia\"\n  latitude: 1.5\n  longitude: -2.5\n",
    )
    .unwrap();

    let dir = AirportDirectory::from_file(Path::new(&path)).unwrap();
    assert_eq!(dir.len(), 1);
    let info = dir.lookup("ABCD").unwrap();
    assert_eq!(info.name, "Test Field");
    assert_eq!(info.longitude, -2.5);
}

#[test]
fn test_json_reference_file() {
    let path = temp_out("reference_json", "json");
    fs::write(
        &path,
        r#"{"EFGH": {"name": "Json Field", "city": "C", "country": "D", "latitude": 3.0, "longitude": 4.0}}"#,
    )
    .unwrap();

    let dir = AirportDirectory::load(Some(Path::new(&path))).unwrap();
    assert_eq!(dir.lookup("efgh").unwrap().name, "Json Field");
}

#[test]
fn test_broken_reference_file() {
    let path = temp_out("reference_broken", "yml");
    fs::write(&path, "ABCD: [not, an, airport]\n").unwrap();

    assert!(matches!(
        AirportDirectory::from_file(Path::new(&path)),
        Err(AppError::Reference(_))
    ));
    assert!(matches!(
        AirportDirectory::from_file(Path::new("/definitely/not/here.yml")),
        Err(AppError::Reference(_))
    ));
}
