// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the engine. Command-level failures abort the whole
/// unit of work; no partial aggregate writes survive.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{collection} '{id}' not found")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error("'{id}' is owned by another user")]
    Forbidden { id: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),

    #[error("document encoding: {0}")]
    Codec(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(collection: &'static str, id: &str) -> Self {
        Error::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn forbidden(id: &str) -> Self {
        Error::Forbidden { id: id.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
