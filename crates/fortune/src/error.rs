//! Error types for diagram construction.
//!
//! Invalid input is rejected before the sweep starts. Structural errors mean
//! the beach line or mesh bookkeeping is inconsistent; construction aborts
//! with the diagnostic and nothing is repaired.

use thiserror::Error;

use crate::mesh::HalfEdgeId;

/// Structural violation detected by the mesh builder or mesh validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// None of the four orientations of two half-edge pairs share a face.
    #[error("half-edge pairs {left:?} and {right:?} share no incident face")]
    NoSharedFace {
        /// Edge traced by the left breakpoint.
        left: HalfEdgeId,
        /// Edge traced by the right breakpoint.
        right: HalfEdgeId,
    },
    /// A half-edge that should still be open already has a successor.
    #[error("half-edge {edge:?} is already linked to a successor")]
    AlreadyLinked {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
    /// A half-edge that should still be open already has its endpoint.
    #[error("half-edge {edge:?} already has an endpoint")]
    AlreadyTerminated {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
    /// `twin(twin(e)) != e`.
    #[error("twin of half-edge {edge:?} does not point back")]
    TwinMismatch {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
    /// `prev(next(e)) != e` or `next(prev(e)) != e`.
    #[error("next/prev links around half-edge {edge:?} are not mutual")]
    LinkMismatch {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
    /// Consecutive half-edges of a cycle bound different faces.
    #[error("half-edge {edge:?} and its successor bound different faces")]
    FaceMismatch {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
    /// The successor of a half-edge does not start where the half-edge ends.
    #[error("half-edge {edge:?} does not end where its successor starts")]
    VertexMismatch {
        /// The offending half-edge.
        edge: HalfEdgeId,
    },
}

/// Errors returned by [`crate::sweep::compute`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VoronoiError {
    /// A coordinate is NaN or infinite.
    #[error("site {index} has a non-finite coordinate")]
    NonFiniteSite {
        /// Index into the input slice.
        index: usize,
    },
    /// Two input sites coincide.
    #[error("site {index} duplicates site {other}")]
    DuplicateSite {
        /// Index into the input slice.
        index: usize,
        /// Index of the earlier site with the same coordinates.
        other: usize,
    },
    /// Mesh bookkeeping failed while closing or opening edges.
    #[error("mesh invariant violated: {0}")]
    Mesh(#[from] MeshError),
    /// Beach-line bookkeeping failed.
    #[error("beach-line invariant violated: {0}")]
    Invariant(&'static str),
}
