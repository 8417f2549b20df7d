use flightlog::core::import::{ImportLogic, ImportOptions};
use flightlog::core::normalize::RowRejection;
use flightlog::db::queries::{load_airport, load_airports, load_flights};
use flightlog::errors::AppError;
use flightlog::reference::AirportDirectory;
use flightlog::source::{ColumnMap, SourceFormat, read_sheet};
use std::path::Path;

mod common;
use common::{LOGBOOK_HEADER, count, memory_db, write_csv};

fn opts(batch_size: usize) -> ImportOptions {
    ImportOptions {
        source: "test.csv".to_string(),
        batch_size,
        ..ImportOptions::default()
    }
}

#[test]
fn test_three_row_scenario() {
    let path = write_csv(
        "import_three_rows",
        &[
            "flight_flightDate,flight_from,flight_to,flight_totalTime",
            "2024-03-15,FAJS,FACT,1:30",
            ",FAJS,FACT,2.0",
            "2024-03-16,,FACT,1.0",
        ],
    );

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped.len(), 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped[0].line, 3);
    assert_eq!(summary.skipped[0].reason, RowRejection::BlankDate);
    assert_eq!(summary.skipped[1].reason, RowRejection::MissingOrigin);

    let flights = load_flights(&pool.conn).unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0].total_time, Some(1.5));

    // rejected rows never create airports
    assert_eq!(count(&pool, "airports"), 2);
    assert_eq!(summary.airports_created, 2);
}

#[test]
fn test_missing_destination_and_bad_date() {
    let path = write_csv(
        "import_destination_and_date",
        &[
            "flight_flightDate,flight_from,flight_to,flight_totalTime",
            "2024-03-15,FAJS,FACT,1:30",
            "2024-03-16,FACT,,2.0",
            "not a date,FAJS,FALE,1.0",
        ],
    );

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped.len(), 2);
    assert_eq!(summary.skipped[0].line, 3);
    assert_eq!(summary.skipped[0].reason, RowRejection::MissingDestination);
    assert_eq!(summary.skipped[1].line, 4);
    assert_eq!(
        summary.skipped[1].reason,
        RowRejection::UnparseableDate("not a date".to_string())
    );

    assert_eq!(count(&pool, "flights"), 1);
    assert_eq!(count(&pool, "airports"), 2);
    assert!(load_airport(&pool.conn, "FALE").unwrap().is_none());
}

#[test]
fn test_out_of_range_year_skips_only_its_row() {
    let path = write_csv(
        "import_out_of_range_year",
        &[
            "flight_flightDate,flight_from,flight_to",
            "2024-03-15,FAJS,FACT",
            "+12345-01-01,FACT,FAJS",
            "2024-03-16,FACT,FAJS",
        ],
    );

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    // one batch holds all rows, so a bad date reaching SQLite would lose all three
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].line, 3);
    assert_eq!(count(&pool, "flights"), 2);
}

#[test]
fn test_failed_destination_leaves_no_origin() {
    let path = write_csv(
        "import_failed_destination",
        &[
            "flight_flightDate,flight_from,flight_to",
            "2024-03-15,FAJS,FAXX",
            "2024-03-16,FAJS,FACT",
        ],
    );

    let mut pool = memory_db();
    pool.conn
        .execute_batch(
            "CREATE TRIGGER block_faxx BEFORE INSERT ON airports
             WHEN NEW.code = 'FAXX'
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.failed, 0);
    assert!(matches!(
        &summary.skipped[0].reason,
        RowRejection::Airport { code, .. } if code == "FAXX"
    ));
    assert_eq!(summary.airports_created, 2);

    let codes: Vec<String> = load_airports(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|a| a.code)
        .collect();
    assert_eq!(codes, ["FACT", "FAJS"]);
}

#[test]
fn test_invalid_utf8_in_csv_is_replaced() {
    let path = common::temp_out("import_latin1", "csv");
    std::fs::write(
        &path,
        b"flight_flightDate,flight_from,flight_to,aircraftType_notes\n\
          2024-03-15,FAJS,FACT,Caf\xe9 stop\n\
          2024-03-16,FACT,FAJS,\n",
    )
    .unwrap();

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::preset(SourceFormat::Logbook),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    assert_eq!(summary.imported, 2);
    let flights = load_flights(&pool.conn).unwrap();
    assert_eq!(flights[0].notes.as_deref(), Some("Caf\u{fffd} stop"));
}

#[test]
fn test_every_flight_has_its_airports() {
    let path = write_csv(
        "import_airports",
        &[
            LOGBOOK_HEADER,
            "2024-01-02,SA302,fajs,FACT,John,2:00,2:00,,1270,ZS-SAX,A320,",
            "2024-01-03,SA303,FACT,FAJS,John,2:05,2:05,0:30,1270,ZS-SAX,A320,return",
            "2024-01-04,,FAJS,XXXX,John,1:00,1:00,,,ZS-ABC,C172,",
        ],
    );

    let mut pool = memory_db();
    let directory = AirportDirectory::builtin().unwrap();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::preset(SourceFormat::Logbook),
        &directory,
        &opts(2),
    )
    .unwrap();

    assert_eq!(summary.imported, 3);
    assert_eq!(summary.batch.flushes, 2);
    assert_eq!(summary.accepted(), summary.batch.rows_flushed);
    assert_eq!(summary.airports_created, 3);
    assert_eq!(summary.placeholder_airports, 1);
    assert_eq!(summary.flights.count, 3);
    assert_eq!(summary.airports.total, 3);
    assert_eq!(summary.airports.with_coordinates, 2);

    let codes: Vec<String> = load_airports(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|a| a.code)
        .collect();
    for f in load_flights(&pool.conn).unwrap() {
        assert!(codes.contains(&f.from_airport));
        assert!(codes.contains(&f.to_airport));
    }

    let jnb = load_airport(&pool.conn, "FAJS").unwrap().unwrap();
    assert!(jnb.has_coordinates());
    let unknown = load_airport(&pool.conn, "XXXX").unwrap().unwrap();
    assert_eq!(unknown.name, "XXXX");
    assert!(!unknown.has_coordinates());

    let flights = load_flights(&pool.conn).unwrap();
    assert_eq!(flights[1].night, Some(0.5));
    assert_eq!(flights[1].notes.as_deref(), Some("return"));
    assert_eq!(flights[0].distance, Some(1270.0));
    assert_eq!(flights[0].aircraft_type.as_deref(), Some("A320"));
}

#[test]
fn test_missing_required_column_aborts() {
    let path = write_csv(
        "import_no_to",
        &["flight_flightDate,flight_from", "2024-03-15,FAJS"],
    );

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let err = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap_err();

    match err {
        AppError::MissingColumn { column } => assert_eq!(column, "flight_to"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count(&pool, "flights"), 0);
    assert_eq!(count(&pool, "airports"), 0);
}

#[test]
fn test_header_with_leading_spaces() {
    let path = write_csv(
        "import_spaced_header",
        &[
            "flight_flightDate, flight_from ,flight_to",
            "2024-03-15,FAJS,FACT",
        ],
    );

    let mut pool = memory_db();
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    assert_eq!(summary.imported, 1);
}

#[test]
fn test_reimport_duplicates_unless_replace() {
    let path = write_csv(
        "import_replace",
        &[
            "flight_flightDate,flight_from,flight_to",
            "2024-03-15,FAJS,FACT",
            "2024-03-16,FACT,FAJS",
        ],
    );
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let map = ColumnMap::default();
    let directory = AirportDirectory::empty();

    let mut pool = memory_db();
    ImportLogic::run(&mut pool.conn, &sheet, &map, &directory, &opts(500)).unwrap();
    ImportLogic::run(&mut pool.conn, &sheet, &map, &directory, &opts(500)).unwrap();
    assert_eq!(count(&pool, "flights"), 4);
    assert_eq!(count(&pool, "airports"), 2);

    let replace = ImportOptions {
        replace: true,
        ..opts(500)
    };
    let summary = ImportLogic::run(&mut pool.conn, &sheet, &map, &directory, &replace).unwrap();
    assert_eq!(summary.cleared, Some((4, 2)));
    assert_eq!(count(&pool, "flights"), 2);
    assert_eq!(summary.airports_created, 2);
}

#[test]
fn test_replace_keeping_airports() {
    let path = write_csv(
        "import_keep_airports",
        &["flight_flightDate,flight_from,flight_to", "2024-03-15,FAJS,FACT"],
    );
    let sheet = read_sheet(Path::new(&path), None).unwrap();
    let map = ColumnMap::default();

    let mut pool = memory_db();
    ImportLogic::run(&mut pool.conn, &sheet, &map, &AirportDirectory::empty(), &opts(500))
        .unwrap();

    // placeholders stay even though reference data is now available
    let keep = ImportOptions {
        replace: true,
        keep_airports: true,
        ..opts(500)
    };
    let summary = ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &map,
        &AirportDirectory::builtin().unwrap(),
        &keep,
    )
    .unwrap();

    assert_eq!(summary.cleared, Some((1, 0)));
    assert_eq!(summary.airports_created, 0);
    assert_eq!(count(&pool, "flights"), 1);
    let jnb = load_airport(&pool.conn, "FAJS").unwrap().unwrap();
    assert!(!jnb.has_coordinates());
}

#[test]
fn test_import_is_logged() {
    let path = write_csv(
        "import_logged",
        &["flight_flightDate,flight_from,flight_to", "2024-03-15,FAJS,FACT"],
    );
    let sheet = read_sheet(Path::new(&path), None).unwrap();

    let mut pool = memory_db();
    ImportLogic::run(
        &mut pool.conn,
        &sheet,
        &ColumnMap::default(),
        &AirportDirectory::empty(),
        &opts(500),
    )
    .unwrap();

    let entries = flightlog::db::log::load_entries(&pool.conn).unwrap();
    let last = entries.last().unwrap();
    assert_eq!(last.operation, "import");
    assert_eq!(last.target, "test.csv");
    assert!(last.message.starts_with("Imported 1 flights"));
}
