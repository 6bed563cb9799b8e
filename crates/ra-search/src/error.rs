//! Search-subsystem error types.

use std::fmt;

use thiserror::Error;

use ra_core::{NodeId, NodeIdx};

/// Which end of a query an error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start  => "start",
            Endpoint::Target => "target",
        })
    }
}

/// Errors produced by `ra-search`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{endpoint} node {id} not found in graph")]
    NodeNotFound { id: NodeId, endpoint: Endpoint },

    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeIdx, to: NodeIdx },

    #[error("search stopped after {limit} expansions without reaching the target")]
    BudgetExhausted { limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Errors from [`OpenList`](crate::OpenList) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpenListError {
    #[error("open list is empty")]
    Empty,
}
