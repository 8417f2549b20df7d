use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{fl, setup_test_db, temp_out, write_csv};

fn init(db_path: &str) {
    fl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

#[test]
fn test_init_import_and_info() {
    let db_path = setup_test_db("cli_import");
    let csv = write_csv(
        "cli_import",
        &[
            "flight_flightDate,flight_from,flight_to,flight_totalTime",
            "2024-03-15,FAJS,FACT,1:30",
            ",FAJS,FACT,2.0",
            "2024-03-16,,FACT,1.0",
        ],
    );

    init(&db_path);

    fl().args(["--db", &db_path, "import", &csv])
        .assert()
        .success()
        .stdout(contains("imported:").and(contains("Row 3 skipped: flight date is blank")))
        .stdout(contains("Row 4 skipped: origin airport is blank"));

    fl().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total flights:").and(contains("2024-03-15")));

    fl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("import").and(contains("migration_applied")));
}

#[test]
fn test_import_without_init_creates_schema() {
    let db_path = setup_test_db("cli_import_no_init");
    let csv = write_csv(
        "cli_import_no_init",
        &["flight_flightDate,flight_from,flight_to", "2024-03-15,KJFK,EGLL"],
    );

    fl().args(["--db", &db_path, "import", &csv, "--batch-size", "1"])
        .assert()
        .success()
        .stdout(contains("Imported 1 flights"));
}

#[test]
fn test_import_missing_column_fails() {
    let db_path = setup_test_db("cli_missing_column");
    let csv = write_csv(
        "cli_missing_column",
        &["flight_flightDate,flight_from", "2024-03-15,FAJS"],
    );

    init(&db_path);

    fl().args(["--db", &db_path, "import", &csv])
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("flight_to")));
}

#[test]
fn test_import_unsupported_file_fails() {
    let db_path = setup_test_db("cli_unsupported");
    let txt = temp_out("cli_unsupported", "txt");
    std::fs::write(&txt, "hello").unwrap();

    fl().args(["--db", &db_path, "import", &txt])
        .assert()
        .failure()
        .stderr(contains("Unsupported input file"));
}

#[test]
fn test_invalid_batch_size_fails() {
    let db_path = setup_test_db("cli_batch_size");
    let csv = write_csv(
        "cli_batch_size",
        &["flight_flightDate,flight_from,flight_to", "2024-03-15,FAJS,FACT"],
    );

    fl().args(["--db", &db_path, "import", &csv, "--batch-size", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid batch size 0"));
}

#[test]
fn test_keep_airports_requires_replace() {
    let db_path = setup_test_db("cli_keep_airports");

    fl().args(["--db", &db_path, "import", "x.csv", "--keep-airports"])
        .assert()
        .failure();
}

#[test]
fn test_compact_format_and_coords() {
    let db_path = setup_test_db("cli_compact");
    let csv = write_csv(
        "cli_compact",
        &[
            "flight_flightDate,flight_from,flight_to,flight_aircraftType",
            "03/15/2024,fajs,zzzz,C172",
        ],
    );
    let reference = temp_out("cli_compact_reference", "yml");
    std::fs::write(
        &reference,
        "ZZZZ:\n  name: \"Test Strip\"\n  city: \"Karoo\"\n  country: \"South Africa\"\n  latitude: -31.5\n  longitude: 22.1\n",
    )
    .unwrap();

    init(&db_path);

    fl().args(["--db", &db_path, "import", &csv, "--format", "compact"])
        .assert()
        .success()
        .stdout(contains("1 without reference data"));

    fl().args([
        "--db",
        &db_path,
        "coords",
        "--reference",
        &reference,
        "--missing-only",
    ])
    .assert()
    .success()
    .stdout(contains("Updated 1 airports").and(contains("2 of 2 airports have coordinates")));
}

#[test]
fn test_replace_reimport() {
    let db_path = setup_test_db("cli_replace");
    let csv = write_csv(
        "cli_replace",
        &["flight_flightDate,flight_from,flight_to", "2024-03-15,FAJS,FACT"],
    );

    init(&db_path);

    fl().args(["--db", &db_path, "import", &csv])
        .assert()
        .success();

    fl().args(["--db", &db_path, "import", &csv, "--replace"])
        .assert()
        .success()
        .stdout(contains("Cleared 1 flights and 2 airports"))
        .stdout(contains("flights in database: 1"));
}

#[test]
fn test_migrate_lists_schema_versions() {
    let db_path = setup_test_db("cli_migrate");
    init(&db_path);

    fl().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("(0 applied)"))
        .stdout(
            contains("20250615_0001_create_airports")
                .and(contains("20250615_0002_create_flights")),
        );
}
