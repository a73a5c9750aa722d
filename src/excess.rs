//! Component E: excess/absorption accounting (§3, §4.5).
//!
//! Pure functions over the current flow table, supplies, and demands. No
//! mutable state of its own; caching is left to callers that need it.

use crate::graph::NodeID;
use crate::residual::{Orientation, ResidualGraph};

pub struct Excess<'a> {
    residual: &'a ResidualGraph,
    supply: &'a [i64],
    demand: &'a [i64],
}

impl<'a> Excess<'a> {
    pub fn new(residual: &'a ResidualGraph, supply: &'a [i64], demand: &'a [i64]) -> Self {
        Self {
            residual,
            supply,
            demand,
        }
    }

    fn net_in(&self, v: NodeID) -> i64 {
        self.residual
            .incident(v)
            .fold(0i64, |acc, (_, r)| match r.orientation {
                Orientation::Backward => acc + self.residual.flow(r.edge),
                Orientation::Forward => acc - self.residual.flow(r.edge),
            })
    }

    pub fn absorption(&self, v: NodeID) -> i64 {
        (self.net_in(v) + self.supply[v]).min(self.demand[v])
    }

    pub fn excess(&self, v: NodeID) -> i64 {
        self.net_in(v) + self.supply[v] - self.absorption(v)
    }

    pub fn residual_source(&self, v: NodeID) -> i64 {
        self.excess(v)
    }

    pub fn residual_sink(&self, v: NodeID) -> i64 {
        self.demand[v] - self.absorption(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn before_any_flow_excess_equals_supply() {
        let residual = ResidualGraph::new(2, &[(0, 1, 5)]).unwrap();
        let supply = vec![3, 0];
        let demand = vec![0, 3];
        let e = Excess::new(&residual, &supply, &demand);
        assert_eq!(e.residual_source(0), 3);
        assert_eq!(e.residual_sink(1), 3);
        assert_eq!(e.residual_sink(0), 0); // non-demand vertex is trivially saturated
    }

    #[test]
    fn pushing_flow_moves_excess_downstream() {
        let mut residual = ResidualGraph::new(2, &[(0, 1, 5)]).unwrap();
        let fwd = residual.incident(0).next().unwrap().1;
        residual.push(fwd, 3);

        let supply = vec![3, 0];
        let demand = vec![0, 3];
        let e = Excess::new(&residual, &supply, &demand);
        assert_eq!(e.residual_source(0), 0);
        assert_eq!(e.residual_sink(1), 0);
        assert_eq!(e.absorption(1), 3);
    }
}
