//! Container values carried by tagged literals.
//!
//! Each container exclusively owns its children; dropping a container
//! recursively releases the whole subtree. Containers never form cycles:
//! the data model is a strict tree.

use std::collections::BTreeMap;

use crate::ari::Ari;

/// An ordered array of ARIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ac {
    /// The items, in insertion order.
    pub items: Vec<Ari>,
}

impl Ac {
    /// Creates an empty array.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl From<Vec<Ari>> for Ac {
    fn from(items: Vec<Ari>) -> Self {
        Self { items }
    }
}

impl FromIterator<Ari> for Ac {
    fn from_iter<I: IntoIterator<Item = Ari>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// An ARI-keyed map of ARIs.
///
/// Keys are unique under ARI equality. Iteration is ordered by the
/// canonical ARI ordering, which makes every traversal of the same map
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Am {
    /// The entries, ordered by key.
    pub items: BTreeMap<Ari, Ari>,
}

impl Am {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: BTreeMap::new() }
    }
}

impl FromIterator<(Ari, Ari)> for Am {
    fn from_iter<I: IntoIterator<Item = (Ari, Ari)>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// A table of ARIs: a column count and a flat row-major cell sequence.
///
/// A well-formed table holds `k * ncols` cells for some row count `k`;
/// trailing cells short of a full row are ignored by consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tbl {
    /// Number of columns in each row.
    pub ncols: usize,
    /// Row-major cells.
    pub items: Vec<Ari>,
}

impl Tbl {
    /// Creates an empty table with the given column count.
    #[must_use]
    pub const fn new(ncols: usize) -> Self {
        Self { ncols, items: Vec::new() }
    }

    /// Builds a table from rows, taking the column count from the first
    /// row. Rows of a different width are truncated or ignored by
    /// consumers; callers should supply uniform rows.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Ari>>) -> Self {
        let ncols = rows.first().map_or(0, Vec::len);
        let items = rows.into_iter().flatten().collect();
        Self { ncols, items }
    }

    /// Iterates over complete rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Ari]> {
        self.items.chunks_exact(self.ncols.max(1))
    }
}

/// One report within a report set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Report {
    /// Time of the report relative to the set's reference time, a TD
    /// literal.
    pub reltime: Ari,
    /// The object that produced the report.
    pub source: Ari,
    /// The report items.
    pub items: Vec<Ari>,
}

/// A report set: telemetry reports sharing a nonce and reference time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RptSet {
    /// Correlation nonce.
    pub nonce: Ari,
    /// Absolute reference time, a TP literal.
    pub reftime: Ari,
    /// The reports.
    pub reports: Vec<Report>,
}

/// An execution set: target references sharing a nonce.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExecSet {
    /// Correlation nonce.
    pub nonce: Ari,
    /// Execution targets.
    pub targets: Vec<Ari>,
}
