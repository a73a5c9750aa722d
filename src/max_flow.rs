use crate::graph::NodeID;
use bitvec::vec::BitVec;
use std::sync::{atomic::AtomicI32, Arc};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResidualCapacity {
    pub capacity: i32,
}

impl ResidualCapacity {
    pub fn new(capacity: i32) -> ResidualCapacity {
        ResidualCapacity { capacity }
    }
}

/// Residual edge data for `Dinic`. Distinct from `ResidualCapacity` only in
/// name: `EdmondsKarp` and `Dinic` build their residual graphs independently
/// and don't share an edge-data type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResidualEdgeData {
    pub capacity: i32,
}

impl ResidualEdgeData {
    pub fn new(capacity: i32) -> ResidualEdgeData {
        ResidualEdgeData { capacity }
    }
}

pub trait MaxFlow {
    fn run_with_upper_bound(&mut self, bound: Arc<AtomicI32>);
    fn run(&mut self);
    fn max_flow(&self) -> Result<i32, String>;
    fn assignment(&self, source: NodeID) -> Result<BitVec, String>;
}