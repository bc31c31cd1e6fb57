// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use monthbook::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("signup", sub)) => commands::accounts::signup(&mut store, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut store, sub)?,
        Some(("period", sub)) => commands::periods::handle(&mut store, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut store, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&mut store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
