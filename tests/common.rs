#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use flightlog::db::initialize::init_db;
use flightlog::db::pool::DbPool;
use flightlog::models::cell::{Cell, RawRow};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Header of the full logbook export, in the order the files carry it.
pub const LOGBOOK_HEADER: &str = "flight_flightDate,flight_flightNumber,flight_from,flight_to,\
flight_selectedCrewPIC,flight_totalTime,flight_pic,flight_night,flight_distance,\
aircraft_aircraftID,aircraftType_type,aircraftType_notes";

pub fn fl() -> Command {
    cargo_bin_cmd!("flightlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_flightlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_flightlog.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `lines` (header first) to a fresh CSV file and return its path.
pub fn write_csv(name: &str, lines: &[&str]) -> String {
    let path = temp_out(name, "csv");
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(&path, content).expect("write csv fixture");
    path
}

/// In-memory database with the full schema.
pub fn memory_db() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Raw row made of text cells; empty strings become blank cells.
pub fn text_row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(h, v)| {
            let cell = if v.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::text(*v)
            };
            (*h, cell)
        })
        .collect()
}

pub fn count(pool: &DbPool, table: &str) -> i64 {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("count rows")
}
