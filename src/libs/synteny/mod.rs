//! Synteny block detection and chaining.
//!
//! Matches between two ordered gene sets (two genomes, or a genome against
//! itself) are projected to integer points and grouped into collinear
//! blocks.
//!
//! # Core Components
//!
//! * [`point`] - Points, chromosome-pair keyed stores, identifier mapping.
//! * [`order`] - Gene order tables giving each accession an ordinal.
//! * [`grouper`] - Union-find over dense ids.
//! * [`scan`] - Distance-bounded single-linkage clustering, per pair and batched.
//! * [`range`] - Chaining blocks into tracks, depth and interleave of intervals.
//! * [`kdtree`] - Spatial indexes for nearest-anchor queries.
//! * [`liftover`] - Pulling hits that lie next to trusted anchors.
//! * [`anchor`] - Reading and writing anchor blocks.
//!
//! # Pipeline
//!
//! 1. **Ingest**: `(query, subject)` pairs are mapped through two [`GeneOrder`]s
//!    into a [`PointStore`] keyed by chromosome pair.
//! 2. **Scan**: each pair is clustered independently ([`batch_scan`]).
//! 3. **Chain**: block extents on a reference become [`Range`]s and are
//!    stacked into tracks ([`chain_tracks`]).
//! 4. **Summarise**: [`range_depth`] and [`range_interleave`] report coverage
//!    and breakpoints.

pub mod anchor;
pub mod error;
pub mod grouper;
pub mod kdtree;
pub mod liftover;
pub mod order;
pub mod point;
pub mod range;
pub mod scan;

pub use anchor::{read_blocks, read_pairs, write_blocks, AnchorBlock};
pub use error::SyntenyError;
pub use grouper::{Grouper, LabelGrouper};
pub use kdtree::{KdTree, LinearIndex, SpatialIndex};
pub use liftover::{liftover_store, synteny_liftover};
pub use order::{Gene, GeneOrder};
pub use point::{PairKey, PairMapper, Point, PointStore};
pub use range::{
    chain_tracks, range_chain, range_depth, range_interleave, range_merge, ChainParams,
    ChainResult, Range, Track,
};
pub use scan::{batch_scan, batch_scan_pairs, cluster_score, synteny_scan, Cluster, ScanParams};
