use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// A schema step, applied once and recorded in the `log` table as a
/// `migration_applied` entry whose target is the version id.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250615_0001_create_airports",
        description: "Created airports table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS airports (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            code      TEXT NOT NULL UNIQUE CHECK(length(code) > 0),
            name      TEXT NOT NULL,
            city      TEXT,
            country   TEXT,
            latitude  REAL,
            longitude REAL
        );
        "#,
    },
    Migration {
        version: "20250615_0002_create_flights",
        description: "Created flights table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS flights (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            flight_date           TEXT NOT NULL CHECK(length(flight_date) = 10),
            flight_number         TEXT,
            from_airport          TEXT NOT NULL REFERENCES airports(code),
            to_airport            TEXT NOT NULL REFERENCES airports(code),
            selected_crew_pic     TEXT,
            selected_crew_sic     TEXT,
            selected_crew_relief  TEXT,
            selected_crew_student TEXT,
            actual_departure_time TEXT,
            actual_arrival_time   TEXT,
            distance              REAL,
            total_time            REAL,
            pic                   REAL,
            sic                   REAL,
            night                 REAL,
            actual_instrument     REAL,
            dual_received         REAL,
            dual_given            REAL,
            simulator             REAL,
            pic_night             REAL,
            sic_night             REAL,
            dual_received_night   REAL,
            aircraft_id           TEXT,
            aircraft_type         TEXT,
            aircraft_make         TEXT,
            aircraft_model        TEXT,
            engine_type           TEXT,
            category              TEXT,
            aircraft_class        TEXT,
            notes                 TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_flights_date ON flights(flight_date);
        CREATE INDEX IF NOT EXISTS idx_flights_route ON flights(from_airport, to_airport);
        "#,
    },
];

/// Ensure that the `log` table exists. It also stores migration markers,
/// so it must exist before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql))
        .inspect_err(|_| {
            let _ = conn.execute_batch("ROLLBACK;");
        })?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;

    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, returning how many ran.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
