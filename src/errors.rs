// Copyright (c) 2025 Monthwise contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for the ledger core.
///
/// `NotFound` and `AccessDenied` are distinct codes internally, but callers
/// outside the process must not be able to tell them apart; the CLI prints
/// the same "not found" line for both (see [`LedgerError::is_not_found_like`]).
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller error: bad counts, non-positive amounts, malformed date
    /// literals. Raised before any write; never worth retrying.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The entity exists but belongs to a different owner.
    #[error("access denied")]
    AccessDenied,

    /// The underlying store failed or aborted; callers may retry.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl LedgerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(msg.into())
    }

    /// True when the error should surface as a plain "not found", covering
    /// the ownership mismatch case so ids cannot be probed across owners.
    pub fn is_not_found_like(&self) -> bool {
        matches!(self, LedgerError::NotFound(_) | LedgerError::AccessDenied)
    }
}
