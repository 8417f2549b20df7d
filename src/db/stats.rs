use crate::db::pool::DbPool;
use crate::db::queries::{airport_stats, flight_stats, load_airports};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW, or_dash};
use crate::utils::table::Table;
use crate::utils::time::format_hours;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) FLIGHTS
    //
    let flights = flight_stats(&pool.conn)?;
    println!(
        "{}• Total flights:{} {}{}{}",
        CYAN, RESET, GREEN, flights.count, RESET
    );

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", or_dash(flights.first));
    println!("    to:   {}", or_dash(flights.last));

    println!(
        "{}• Total time:{} {}",
        CYAN,
        RESET,
        or_dash(flights.total_hours.map(format_hours))
    );

    //
    // 3) AIRPORTS
    //
    let airports = airport_stats(&pool.conn)?;
    println!(
        "{}• Airports:{} {}{}{} ({} with coordinates)",
        CYAN, RESET, GREEN, airports.total, RESET, airports.with_coordinates
    );

    //
    // 4) AIRPORTS WITHOUT COORDINATES
    //
    let mut table = Table::new(["Code", "Name", "City", "Country"]);
    for a in load_airports(&pool.conn)?
        .into_iter()
        .filter(|a| !a.has_coordinates())
    {
        table.add_row(vec![
            a.code,
            a.name,
            a.city.unwrap_or_default(),
            a.country.unwrap_or_default(),
        ]);
    }

    if !table.is_empty() {
        println!();
        println!("{}• Airports without coordinates:{}", CYAN, RESET);
        print!("{}", table.render());
    }

    println!();
    Ok(())
}
