use flightlog::core::coords::CoordsLogic;
use flightlog::db::queries::{insert_airport_if_absent, load_airport};
use flightlog::models::airport::Airport;
use flightlog::reference::{AirportDirectory, AirportInfo};

mod common;
use common::memory_db;

fn info(name: &str, lat: f64, lon: f64) -> AirportInfo {
    AirportInfo {
        name: name.to_string(),
        city: "City".to_string(),
        country: "Country".to_string(),
        latitude: lat,
        longitude: lon,
    }
}

#[test]
fn test_placeholders_are_upgraded() {
    let mut pool = memory_db();
    insert_airport_if_absent(&pool.conn, &Airport::placeholder("FAJS")).unwrap();
    insert_airport_if_absent(&pool.conn, &Airport::placeholder("ZZZZ")).unwrap();

    let dir = AirportDirectory::builtin().unwrap();
    let summary = CoordsLogic::run(&mut pool.conn, &dir, false).unwrap();

    assert_eq!(summary.matched, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.airports.total, 2);
    assert_eq!(summary.airports.with_coordinates, 1);

    let jnb = load_airport(&pool.conn, "FAJS").unwrap().unwrap();
    assert!(jnb.has_coordinates());
    assert_ne!(jnb.name, "FAJS");

    let unknown = load_airport(&pool.conn, "ZZZZ").unwrap().unwrap();
    assert_eq!(unknown, Airport::placeholder("ZZZZ"));

    // second pass finds nothing to change
    let again = CoordsLogic::run(&mut pool.conn, &dir, false).unwrap();
    assert_eq!(again.matched, 1);
    assert_eq!(again.updated, 0);
}

#[test]
fn test_missing_only_leaves_located_airports_alone() {
    let mut pool = memory_db();

    let mut located = Airport::placeholder("AAAA");
    located.latitude = Some(1.0);
    located.longitude = Some(2.0);
    insert_airport_if_absent(&pool.conn, &located).unwrap();
    insert_airport_if_absent(&pool.conn, &Airport::placeholder("BBBB")).unwrap();

    let dir = AirportDirectory::from_entries([
        ("AAAA", info("Alpha", 10.0, 20.0)),
        ("BBBB", info("Bravo", 30.0, 40.0)),
    ]);

    let summary = CoordsLogic::run(&mut pool.conn, &dir, true).unwrap();
    assert_eq!(summary.updated, 1);

    let a = load_airport(&pool.conn, "AAAA").unwrap().unwrap();
    assert_eq!(a.latitude, Some(1.0));
    let b = load_airport(&pool.conn, "BBBB").unwrap().unwrap();
    assert_eq!(b.name, "Bravo");
    assert_eq!(b.latitude, Some(30.0));

    // without the restriction the located airport is refreshed too
    let summary = CoordsLogic::run(&mut pool.conn, &dir, false).unwrap();
    assert_eq!(summary.updated, 1);
    let a = load_airport(&pool.conn, "AAAA").unwrap().unwrap();
    assert_eq!(a.name, "Alpha");
    assert_eq!(a.latitude, Some(10.0));
}
