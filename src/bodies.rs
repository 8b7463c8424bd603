//! # Bodies and table catalog
//!
//! [`Body`] is the closed set of planets a table can be attached to. A [`BodyCatalog`] maps
//! each body to its coefficient [`Table`], held behind an [`Arc`] so that several facades can
//! share one table without copying it.
//!
//! A catalog is filled once by its owner (bundled tables, CSV dumps, truncated copies) and
//! then only read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ephem_errors::EphemError;
use crate::series::truncation::{truncate_with_report, TruncationSpec};
use crate::series::Table;
use crate::vsop87d::{builtin_table, BUILTIN_BODIES};

/// Major planets covered by the VSOP87 theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping `Body → Table`.
#[derive(Debug, Clone, Default)]
pub struct BodyCatalog {
    tables: HashMap<Body, Arc<Table>>,
}

impl BodyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every bundled VSOP87D table.
    pub fn with_builtin() -> Result<Self, EphemError> {
        let mut catalog = BodyCatalog::new();
        for body in BUILTIN_BODIES {
            if let Some(table) = builtin_table(body) {
                catalog.insert(body, table?);
            }
        }
        tracing::debug!(
            "Loaded bundled tables for {} bodies",
            catalog.tables.len()
        );
        Ok(catalog)
    }

    /// Register (or replace) the table of a body.
    pub fn insert(&mut self, body: Body, table: Table) -> Option<Arc<Table>> {
        self.insert_shared(body, Arc::new(table))
    }

    /// Register a table that is already shared elsewhere.
    pub fn insert_shared(&mut self, body: Body, table: Arc<Table>) -> Option<Arc<Table>> {
        let previous = self.tables.insert(body, table);
        if previous.is_some() {
            tracing::debug!("Replaced the table of {body}");
        }
        previous
    }

    /// Table of a body.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::MissingBody`] if no table is registered for `body`.
    pub fn table(&self, body: Body) -> Result<Arc<Table>, EphemError> {
        self.tables
            .get(&body)
            .cloned()
            .ok_or(EphemError::MissingBody(body))
    }

    pub fn contains(&self, body: Body) -> bool {
        self.tables.contains_key(&body)
    }

    /// Registered bodies, in [`Body`] order.
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies: Vec<Body> = self.tables.keys().copied().collect();
        bodies.sort();
        bodies
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// New catalog where every table is truncated with the same spec.
    ///
    /// The source catalog is left untouched.
    pub fn truncated(&self, spec: &TruncationSpec) -> Result<Self, EphemError> {
        let mut catalog = BodyCatalog::new();
        for body in self.bodies() {
            let table = self.table(body)?;
            let (reduced, report) = truncate_with_report(&table, spec)?;
            tracing::debug!(
                "{body}: kept {} terms, discarded {}",
                report.kept(),
                report.discarded()
            );
            catalog.insert(body, reduced);
        }
        Ok(catalog)
    }
}
