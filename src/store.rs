// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// A document that lives in one of the store's collections.
pub trait Document: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

/// Document store over SQLite. Each collection is a table of
/// `(id, doc)` rows with the document serialized as JSON; lookups beyond
/// the primary key go through `json_extract` on indexed fields.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn new(conn: Connection) -> Store {
        Store { conn }
    }

    pub fn in_memory() -> Result<Store> {
        let mut conn = Connection::open_in_memory()?;
        crate::db::init_schema(&mut conn)?;
        Ok(Store { conn })
    }

    /// Run `f` as one unit of work. Commits when `f` returns `Ok`,
    /// rolls back every write otherwise. All command handlers go through
    /// here: a failed command leaves no partial aggregate writes behind.
    pub fn with_txn<T>(&mut self, f: impl FnOnce(&Txn) -> Result<T>) -> Result<T> {
        let tx = self.conn.transaction()?;
        let txn = Txn { tx };
        let out = f(&txn)?;
        txn.tx.commit()?;
        Ok(out)
    }
}

/// Handle on an open transaction, passed to every engine operation.
pub struct Txn<'a> {
    tx: rusqlite::Transaction<'a>,
}

impl Txn<'_> {
    pub fn get<D: Document>(&self, id: &str) -> Result<D> {
        self.try_get(id)?
            .ok_or_else(|| Error::not_found(D::COLLECTION, id))
    }

    pub fn try_get<D: Document>(&self, id: &str) -> Result<Option<D>> {
        let sql = format!("SELECT doc FROM {} WHERE id=?1", D::COLLECTION);
        let raw: Option<String> = self
            .tx
            .query_row(&sql, params![id], |r| r.get(0))
            .optional()?;
        match raw {
            Some(s) => Ok(Some(serde_json::from_str(&s)?)),
            None => Ok(None),
        }
    }

    /// All documents whose top-level `field` equals `value`, in insertion
    /// order. `field` is always a code-supplied name, never user input.
    pub fn find<D: Document>(&self, field: &str, value: &str) -> Result<Vec<D>> {
        let sql = format!(
            "SELECT doc FROM {} WHERE json_extract(doc, '$.{}')=?1 ORDER BY rowid",
            D::COLLECTION,
            field
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let mut rows = stmt.query(params![value])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let raw: String = r.get(0)?;
            out.push(serde_json::from_str(&raw)?);
        }
        Ok(out)
    }

    /// Insert or replace by id.
    pub fn put<D: Document>(&self, doc: &D) -> Result<()> {
        let sql = format!(
            "INSERT INTO {}(id, doc) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET doc=excluded.doc",
            D::COLLECTION
        );
        self.tx
            .execute(&sql, params![doc.id(), serde_json::to_string(doc)?])?;
        Ok(())
    }

    pub fn delete<D: Document>(&self, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id=?1", D::COLLECTION);
        self.tx.execute(&sql, params![id])?;
        Ok(())
    }
}
