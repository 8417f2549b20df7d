use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportOptions};
use crate::errors::AppResult;
use crate::reference::AirportDirectory;
use crate::source::read_sheet;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        file,
        format,
        sheet,
        batch_size,
        reference,
        replace,
        keep_airports,
    } = cmd
    {
        // 1️⃣ Everything that can fail before touching the database
        let path = expand_tilde(file);
        let sheet_name = sheet.as_deref().or(cfg.sheet.as_deref());
        let data = read_sheet(&path, sheet_name)?;
        info(format!("Read {} rows from {}", data.len(), path.display()));

        let map = cfg.column_map(*format);

        let reference_path = reference.as_deref().map(expand_tilde).or(cfg.reference_path());
        let directory = AirportDirectory::load(reference_path.as_deref())?;

        let opts = ImportOptions {
            source: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.clone()),
            batch_size: batch_size.unwrap_or(cfg.batch_size),
            replace: *replace,
            keep_airports: *keep_airports,
        };

        // 2️⃣ Import
        let mut pool = open_db(cfg)?;
        let summary = ImportLogic::run(&mut pool.conn, &data, &map, &directory, &opts)?;

        summary.print();
    }

    Ok(())
}
