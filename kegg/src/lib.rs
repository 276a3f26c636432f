//! Minimal KEGG REST API client.
//!
//! This crate provides:
//! - URL construction for the `info`, `list`, `find`, `get`, `conv` and `link` actions
//! - Parsers for KEGG's tabular, flat-record and BRITE responses
//! - A pluggable, caller-owned response cache
//!
//! # Quick Start
//!
//! ```no_run
//! use kegg::{Kegg, MemoryCache};
//!
//! fn main() -> Result<(), kegg::Error> {
//!     let kegg = Kegg::new()?;
//!     let mut cache = MemoryCache::new();
//!
//!     let pathways = kegg.list(&mut cache, "pathway", Some("hsa"))?;
//!     let (gene_to_path, path_to_gene) = kegg.link(&mut cache, "pathway", "hsa")?;
//!     let glucose = kegg.get(&mut cache, "cpd:C00031", None, true)?;
//!
//!     println!("{} pathways, {} linked genes", pathways.len(), gene_to_path.len());
//!     println!("{:?} / {}", glucose.first("NAME"), path_to_gene.len());
//!     Ok(())
//! }
//! ```

pub mod brite;
pub mod cache;
pub mod parse;
pub mod record;
pub mod request;
pub mod testing;
pub mod transport;

pub use brite::{parse_brite, BriteBranch, BriteLeaves, BriteTree};
pub use cache::{fetch_with_cache, Cache, MemoryCache, NoCache};
pub use parse::{build_listing, build_relations, split_lines, Listing, RelationMap, Row};
pub use record::{parse_record, FlatRecord, Reference};
pub use request::{build_url, Action, Request, Segment, KEGG_BASE_URL};
pub use transport::{ReqwestTransport, ReqwestTransportBuilder, Transport};

use std::time::Duration;
use thiserror::Error;

const BASE_URL_VAR: &str = "KEGG_BASE_URL";
const TIMEOUT_VAR: &str = "KEGG_TIMEOUT_SECS";

/// Errors that can occur when using the KEGG client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("the requested action `{action}` is not one of: {valid}")]
    InvalidAction { action: String, valid: String },

    #[error("relation line must have exactly two fields, received: {row}")]
    MalformedRelation { row: String },

    #[error("malformed BRITE hierarchy at line {line}: {reason}")]
    MalformedHierarchy { line: usize, reason: String },

    #[error("HTTP error {status} {reason} for {url}")]
    Transport {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// KEGG REST client.
///
/// Every operation performs at most one request and takes the cache it
/// should read through and write to; pass [`NoCache`] to always hit the
/// network.
#[derive(Debug, Clone)]
pub struct Kegg<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl Kegg<ReqwestTransport> {
    /// Create a client for the public KEGG service.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }

    /// Create a client configured from the environment.
    ///
    /// `KEGG_BASE_URL` overrides the service URL and `KEGG_TIMEOUT_SECS`
    /// sets a per-request timeout; both are optional.
    pub fn from_env() -> Result<Self> {
        let mut transport = ReqwestTransport::builder();
        if let Ok(secs) = std::env::var(TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{TIMEOUT_VAR}={secs:?}: {e}")))?;
            transport = transport.timeout(Duration::from_secs(secs));
        }

        let kegg = Self::with_transport(transport.build()?);
        Ok(match std::env::var(BASE_URL_VAR) {
            Ok(base_url) if !base_url.trim().is_empty() => kegg.with_base_url(base_url.trim()),
            _ => kegg,
        })
    }
}

impl<T: Transport> Kegg<T> {
    /// Create a client that fetches through `transport`.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            base_url: KEGG_BASE_URL.to_string(),
        }
    }

    /// Send requests to another service root (a mirror or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The URL a request resolves to on this client.
    pub fn url(&self, request: &Request) -> String {
        request.url_with_base(&self.base_url)
    }

    /// Perform `request` and return the raw body.
    pub fn fetch<C: Cache + ?Sized>(&self, cache: &mut C, request: &Request) -> Result<String> {
        fetch_with_cache(&self.transport, cache, &self.url(request))
    }

    /// Perform an arbitrary action given by name, returning the raw body.
    pub fn request<C, S>(&self, cache: &mut C, action: &str, segments: S) -> Result<String>
    where
        C: Cache + ?Sized,
        S: IntoIterator,
        S::Item: Into<Segment>,
    {
        let request = Request {
            action: action.parse()?,
            segments: segments.into_iter().map(Into::into).collect(),
        };
        self.fetch(cache, &request)
    }

    /// Release information about a database (`info/<db>`), unparsed.
    pub fn info<C: Cache + ?Sized>(&self, cache: &mut C, database: &str) -> Result<String> {
        self.fetch(cache, &Request::new(Action::Info).segment(database))
    }

    /// Entries of a database with their descriptions (`list/<db>[/<org>]`).
    ///
    /// `database` may also be one or more entries, in which case only their
    /// descriptions are listed.
    pub fn list<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        database: impl Into<Segment>,
        organism: Option<&str>,
    ) -> Result<Listing> {
        let rows = self.list_rows(cache, database, organism)?;
        build_listing(&rows)
    }

    /// Like [`Kegg::list`] but keeps every column, for listings wider than
    /// two fields such as `list/organism`.
    pub fn list_rows<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        database: impl Into<Segment>,
        organism: Option<&str>,
    ) -> Result<Vec<Row>> {
        let request = Request::new(Action::List)
            .segment(database)
            .optional(organism);
        Ok(split_lines(&self.fetch(cache, &request)?))
    }

    /// Search a database for entries matching `terms`
    /// (`find/<db>/<terms>[/<option>]`).
    ///
    /// `option` selects a chemical search field such as `formula`,
    /// `exact_mass` or `mol_weight`.
    pub fn find<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        database: &str,
        terms: impl Into<Segment>,
        option: Option<&str>,
    ) -> Result<Listing> {
        let request = Request::new(Action::Find)
            .segment(database)
            .segment(terms)
            .optional(option);
        build_listing(&split_lines(&self.fetch(cache, &request)?))
    }

    /// Retrieve and parse flat-file entries (`get/<entries>[/<option>]`).
    pub fn get<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        entries: impl Into<Segment>,
        option: Option<&str>,
        parse_reference: bool,
    ) -> Result<FlatRecord> {
        let body = self.get_raw(cache, entries, option)?;
        Ok(parse_record(&body, parse_reference))
    }

    /// Retrieve entries without parsing, for options such as `aaseq`,
    /// `ntseq`, `mol` or `kgml`.
    pub fn get_raw<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        entries: impl Into<Segment>,
        option: Option<&str>,
    ) -> Result<String> {
        let request = Request::new(Action::Get).segment(entries).optional(option);
        self.fetch(cache, &request)
    }

    /// Retrieve a BRITE hierarchy such as `br:br08901` and parse it.
    pub fn get_brite<C: Cache + ?Sized>(&self, cache: &mut C, entry: &str) -> Result<BriteTree> {
        let body = self.fetch(cache, &Request::new(Action::Get).segment(entry))?;
        parse_brite(&body)
    }

    /// Convert identifiers between KEGG and outside databases
    /// (`conv/<target>/<source>`).
    ///
    /// Returns `(direct, inverse)`, where `direct` is keyed by the first
    /// column of the response, i.e. the `source` side.
    pub fn conv<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        target: &str,
        source: impl Into<Segment>,
    ) -> Result<(RelationMap, RelationMap)> {
        let request = Request::new(Action::Conv).segment(target).segment(source);
        build_relations(&split_lines(&self.fetch(cache, &request)?))
    }

    /// Cross-references between databases (`link/<target>/<source>`).
    ///
    /// Returns `(direct, inverse)`, where `direct` is keyed by the first
    /// column of the response, i.e. the `source` side.
    pub fn link<C: Cache + ?Sized>(
        &self,
        cache: &mut C,
        target: &str,
        source: impl Into<Segment>,
    ) -> Result<(RelationMap, RelationMap)> {
        let request = Request::new(Action::Link).segment(target).segment(source);
        build_relations(&split_lines(&self.fetch(cache, &request)?))
    }
}
