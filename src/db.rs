// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::store::Store;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Monthbook", "monthbook"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("monthbook.sqlite"))
}

pub fn open_or_init() -> Result<Store> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(Store::new(conn))
}

pub fn init_schema(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS accounts(
        id TEXT PRIMARY KEY,
        doc TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_accounts_owner
        ON accounts(json_extract(doc, '$.owner'));

    CREATE TABLE IF NOT EXISTS month_trackers(
        id TEXT PRIMARY KEY,
        doc TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_month_trackers_owner
        ON month_trackers(json_extract(doc, '$.owner'));

    CREATE TABLE IF NOT EXISTS expenses(
        id TEXT PRIMARY KEY,
        doc TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_tracker
        ON expenses(json_extract(doc, '$.month_tracker'));
    CREATE INDEX IF NOT EXISTS idx_expenses_owner
        ON expenses(json_extract(doc, '$.owner'));
    "#,
    )
}
