//! Components A+B: an immutable CSR graph representation paired with a flat,
//! mutable flow table, exposing residual edges as (edge id, orientation)
//! pairs per the re-architecture notes.
//!
//! The incidence array is built once, interleaving forward and backward
//! residual arcs of each vertex into one contiguous slice, generalizing the
//! teacher crate's `StaticGraph` offset-array construction.

use crate::error::{Error, Result};
use crate::graph::{EdgeID, NodeID};

/// Orientation of a residual edge relative to its underlying edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Backward,
}

/// A residual edge: an underlying edge plus the direction flow may travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidualEdge {
    pub edge: EdgeID,
    pub orientation: Orientation,
}

impl ResidualEdge {
    pub fn reverse(self) -> Self {
        let orientation = match self.orientation {
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
        };
        Self {
            edge: self.edge,
            orientation,
        }
    }
}

struct EdgeRecord {
    source: NodeID,
    target: NodeID,
    capacity: i64,
}

/// Immutable residual graph: vertex/edge store, incidence view, and the flat
/// flow table `f[0..m)` indexed by edge identity.
pub struct ResidualGraph {
    edges: Vec<EdgeRecord>,
    flow: Vec<i64>,
    start: Vec<usize>,
    incident: Vec<(EdgeID, Orientation)>,
}

impl ResidualGraph {
    /// Builds a residual graph over `n` dense vertex ids from a list of
    /// `(source, target, capacity)` triples. Rejects self-loops and
    /// non-positive capacities, unknown vertex ids (§7 malformed input).
    pub fn new(n: usize, input_edges: &[(NodeID, NodeID, i64)]) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyVertexSet);
        }
        for &(source, target, capacity) in input_edges {
            if source >= n || target >= n {
                return Err(Error::UnknownVertex { source, target, n });
            }
            if source == target {
                return Err(Error::SelfLoop { vertex: source });
            }
            if capacity <= 0 {
                return Err(Error::NonPositiveCapacity {
                    source,
                    target,
                    capacity,
                });
            }
        }

        let m = input_edges.len();
        let edges: Vec<EdgeRecord> = input_edges
            .iter()
            .map(|&(source, target, capacity)| EdgeRecord {
                source,
                target,
                capacity,
            })
            .collect();

        // degree[v] counts both the forward residual arc (v is source) and
        // the backward residual arc (v is target) of every incident edge.
        let mut degree = vec![0usize; n];
        for e in &edges {
            degree[e.source] += 1;
            degree[e.target] += 1;
        }

        let mut start = vec![0usize; n + 1];
        for v in 0..n {
            start[v + 1] = start[v] + degree[v];
        }

        let mut incident = vec![(0usize, Orientation::Forward); 2 * m];
        let mut cursor = start.clone();
        for (edge_id, e) in edges.iter().enumerate() {
            let slot_fwd = cursor[e.source];
            cursor[e.source] += 1;
            incident[slot_fwd] = (edge_id, Orientation::Forward);

            let slot_bwd = cursor[e.target];
            cursor[e.target] += 1;
            incident[slot_bwd] = (edge_id, Orientation::Backward);
        }

        Ok(Self {
            edges,
            flow: vec![0; m],
            start,
            incident,
        })
    }

    pub fn number_of_nodes(&self) -> usize {
        self.start.len() - 1
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn capacity(&self, edge: EdgeID) -> i64 {
        self.edges[edge].capacity
    }

    pub fn source(&self, edge: EdgeID) -> NodeID {
        self.edges[edge].source
    }

    pub fn target(&self, edge: EdgeID) -> NodeID {
        self.edges[edge].target
    }

    pub fn flow(&self, edge: EdgeID) -> i64 {
        self.flow[edge]
    }

    /// All residual arcs with tail `v`, paired with their slot index — the
    /// slot is the stable handle admissibility tracking keys off of.
    pub fn incident(&self, v: NodeID) -> impl Iterator<Item = (usize, ResidualEdge)> + '_ {
        (self.start[v]..self.start[v + 1]).map(|slot| {
            let (edge, orientation) = self.incident[slot];
            (slot, ResidualEdge { edge, orientation })
        })
    }

    pub fn slot_residual_edge(&self, slot: usize) -> ResidualEdge {
        let (edge, orientation) = self.incident[slot];
        ResidualEdge { edge, orientation }
    }

    pub fn tail(&self, r: ResidualEdge) -> NodeID {
        match r.orientation {
            Orientation::Forward => self.edges[r.edge].source,
            Orientation::Backward => self.edges[r.edge].target,
        }
    }

    pub fn head(&self, r: ResidualEdge) -> NodeID {
        match r.orientation {
            Orientation::Forward => self.edges[r.edge].target,
            Orientation::Backward => self.edges[r.edge].source,
        }
    }

    pub fn residual_capacity(&self, r: ResidualEdge) -> i64 {
        let e = &self.edges[r.edge];
        match r.orientation {
            Orientation::Forward => e.capacity - self.flow[r.edge],
            Orientation::Backward => self.flow[r.edge],
        }
    }

    /// Pushes `delta > 0` units of flow along `r`. Returns the residual
    /// capacity remaining on `r` after the push, so callers can tell D
    /// when an edge has just saturated (§4.2).
    pub fn push(&mut self, r: ResidualEdge, delta: i64) -> i64 {
        debug_assert!(delta > 0);
        debug_assert!(delta <= self.residual_capacity(r));
        match r.orientation {
            Orientation::Forward => self.flow[r.edge] += delta,
            Orientation::Backward => self.flow[r.edge] -= delta,
        }
        debug_assert!(self.flow[r.edge] >= 0 && self.flow[r.edge] <= self.edges[r.edge].capacity);
        self.residual_capacity(r)
    }
}
