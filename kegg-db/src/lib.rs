//! Organism-aware facade over the KEGG client.
//!
//! This crate provides:
//! - A [`Database`] that loads the KEGG organism catalogue once and checks
//!   organism codes before querying per-organism data
//! - An [`OrganismView`] bound to a single organism
//! - Cache snapshots so a session's downloads can be reused later
//!
//! # Quick Start
//!
//! ```no_run
//! use kegg::{Kegg, MemoryCache};
//! use kegg_db::Database;
//!
//! fn main() -> Result<(), kegg_db::DbError> {
//!     let mut db = Database::open(Kegg::new()?, MemoryCache::new())?;
//!
//!     let genes = db.genes("hsa")?;
//!     let pathways = db.organism("hsa")?.pathways()?;
//!     println!("{} genes, {} pathways", genes.len(), pathways.len());
//!
//!     db.dump("kegg-cache.json")?;
//!     Ok(())
//! }
//! ```

pub mod persist;

pub use persist::{dump_cache, load_cache, CacheSnapshot, PersistError};

use indexmap::IndexMap;
use kegg::{Cache, Kegg, Listing, MemoryCache, NoCache, ReqwestTransport, Transport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Kegg(#[from] kegg::Error),

    #[error("organism {0:?} not present in the KEGG database")]
    UnknownOrganism(String),

    #[error("organism line must have four fields, received: {row}")]
    MalformedOrganism { row: String },

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type Result<T, E = DbError> = std::result::Result<T, E>;

/// One entry of the KEGG organism catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    /// KEGG genome identifier, e.g. `T01001`.
    pub t_number: String,
    /// Three- or four-letter organism code, e.g. `hsa`.
    pub code: String,
    /// Scientific name with common name, e.g. `Homo sapiens (human)`.
    pub name: String,
    /// Taxonomic lineage from the broadest group down.
    pub lineage: Vec<String>,
}

impl Organism {
    fn from_row(row: &[String]) -> Result<Self> {
        match row {
            [t_number, code, name, lineage] => Ok(Self {
                t_number: t_number.clone(),
                code: code.clone(),
                name: name.clone(),
                lineage: lineage.split(';').map(str::to_string).collect(),
            }),
            _ => Err(DbError::MalformedOrganism {
                row: format!("{row:?}"),
            }),
        }
    }
}

/// The KEGG database as seen through one client and one cache.
///
/// The cache is supplied by the caller and every request made through the
/// database reads through it.
pub struct Database<T = ReqwestTransport, C = MemoryCache> {
    kegg: Kegg<T>,
    cache: C,
    organisms: IndexMap<String, Organism>,
}

impl<T: Transport, C: Cache> Database<T, C> {
    /// Load the organism catalogue (`list/organism`) and build the database.
    pub fn open(kegg: Kegg<T>, mut cache: C) -> Result<Self> {
        let rows = kegg.list_rows(&mut cache, "organism", None)?;
        let organisms = rows
            .iter()
            .map(|row| Organism::from_row(row).map(|org| (org.code.clone(), org)))
            .collect::<Result<IndexMap<_, _>>>()?;
        tracing::debug!(organisms = organisms.len(), "loaded organism catalogue");

        Ok(Self {
            kegg,
            cache,
            organisms,
        })
    }

    pub fn client(&self) -> &Kegg<T> {
        &self.kegg
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// Give back the cache, e.g. to persist it.
    pub fn into_cache(self) -> C {
        self.cache
    }

    /// All organisms, keyed by organism code, in catalogue order.
    pub fn organisms(&self) -> &IndexMap<String, Organism> {
        &self.organisms
    }

    /// Look up an organism by its KEGG genome identifier (`T01001`).
    pub fn organism_by_t_number(&self, t_number: &str) -> Option<&Organism> {
        self.organisms.values().find(|org| org.t_number == t_number)
    }

    /// Fail with [`DbError::UnknownOrganism`] unless `code` is in the catalogue.
    pub fn check_valid_organism(&self, code: &str) -> Result<&Organism> {
        self.organisms
            .get(code)
            .ok_or_else(|| DbError::UnknownOrganism(code.to_string()))
    }

    /// Release information about KEGG as a whole (`info/kegg`).
    pub fn info(&mut self) -> Result<String> {
        self.get_info("kegg")
    }

    /// Release information about any database or organism, unformatted.
    pub fn get_info(&mut self, code: &str) -> Result<String> {
        Ok(self.kegg.info(&mut self.cache, code)?)
    }

    /// All genes of an organism with their descriptions (`list/<org>`).
    pub fn genes(&mut self, organism: &str) -> Result<Listing> {
        self.check_valid_organism(organism)?;
        Ok(self.kegg.list(&mut self.cache, organism, None)?)
    }

    /// Pathways of an organism (`list/pathway/<org>`).
    pub fn pathways(&mut self, organism: &str) -> Result<Listing> {
        self.check_valid_organism(organism)?;
        Ok(self.kegg.list(&mut self.cache, "pathway", Some(organism))?)
    }

    /// A view bound to one organism.
    pub fn organism(&mut self, code: &str) -> Result<OrganismView<'_, T, C>> {
        let organism = self.check_valid_organism(code)?.clone();
        Ok(OrganismView { db: self, organism })
    }
}

impl<T: Transport> Database<T, MemoryCache> {
    /// Build a database from a snapshot written by [`Database::dump`].
    ///
    /// The organism catalogue is served from the snapshot when it holds one.
    pub fn restore(kegg: Kegg<T>, path: impl AsRef<Path>) -> Result<Self> {
        let cache = load_cache(path)?;
        Self::open(kegg, cache)
    }

    /// Save every response downloaded so far.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(dump_cache(&self.cache, path)?)
    }
}

impl<T: Transport> Database<T, NoCache> {
    /// Build a database that never caches.
    pub fn uncached(kegg: Kegg<T>) -> Result<Self> {
        Self::open(kegg, NoCache)
    }
}

/// A database bound to a single organism.
///
/// Offers the per-organism subset of [`Database`] operations without
/// repeating the organism code.
pub struct OrganismView<'a, T, C> {
    db: &'a mut Database<T, C>,
    organism: Organism,
}

impl<T: Transport, C: Cache> OrganismView<'_, T, C> {
    pub fn code(&self) -> &str {
        &self.organism.code
    }

    /// The catalogue entry of this organism.
    pub fn details(&self) -> &Organism {
        &self.organism
    }

    /// Release information about this organism's genome (`info/<org>`).
    pub fn info(&mut self) -> Result<String> {
        let code = self.organism.code.clone();
        self.db.get_info(&code)
    }

    pub fn genes(&mut self) -> Result<Listing> {
        let code = self.organism.code.clone();
        self.db.genes(&code)
    }

    pub fn pathways(&mut self) -> Result<Listing> {
        let code = self.organism.code.clone();
        self.db.pathways(&code)
    }
}
