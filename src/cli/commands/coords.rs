use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::coords::CoordsLogic;
use crate::errors::AppResult;
use crate::reference::AirportDirectory;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Coords {
        reference,
        missing_only,
    } = cmd
    {
        let reference_path = reference.as_deref().map(expand_tilde).or(cfg.reference_path());
        let directory = AirportDirectory::load(reference_path.as_deref())?;
        info(format!("Reference data: {} airports", directory.len()));

        let mut pool = open_db(cfg)?;
        CoordsLogic::run(&mut pool.conn, &directory, *missing_only)?;
    }

    Ok(())
}
