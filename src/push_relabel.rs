use crate::edge::Edge;
use crate::edge::InputEdge;
use crate::graph::{Graph, NodeID};
use crate::static_graph::StaticGraph;
use bitvec::vec::BitVec;
use core::cmp::min;
use log::{debug, trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeCapacity {
    pub capacity: i32,
    pub flow: i32,
}

impl EdgeCapacity {
    pub fn new(capacity: i32) -> EdgeCapacity {
        EdgeCapacity { capacity, flow: 0 }
    }

    pub fn remaining_capacity(&self) -> i32 {
        self.capacity - self.flow
    }
}

pub struct PushRelabel {
    residual_graph: StaticGraph<EdgeCapacity>,
    max_flow: i32,
    finished: bool,
    height: Vec<i32>, // TODO: limits the graph to 2bn edges
    excess: Vec<i32>,
    excess_nodes: Vec<NodeID>,
    source_set: BitVec,
    target_set: BitVec,
}

impl PushRelabel {
    fn push(&mut self, u: NodeID, v: NodeID) {
        let fwd_edge = self
            .residual_graph
            .find_edge(u, v)
            .expect("Graph broken, could not find expected fwd_edge");
        let mut fwd_edge_data = self.residual_graph.data_mut(fwd_edge);
        let d = min(self.excess[u], fwd_edge_data.remaining_capacity());
        fwd_edge_data.flow += d;
        trace!("pushing flow({u},{v})={d} - fwd_edge_data.flow={}", fwd_edge_data.flow);

        let rev_edge = self
            .residual_graph
            .find_edge(v, u)
            .expect("Graph broken, could not find expected rev_edge");
        let mut rev_edge_data = self.residual_graph.data_mut(rev_edge);
        rev_edge_data.flow -= d;
        trace!("pushing flow({v},{u})={d} - rev_edge_data.flow={}", rev_edge_data.flow);

        self.excess[u] -= d;
        trace!("self.excess[{u}]={}", self.excess[u]);
        debug_assert!(self.excess[u] >= 0);
        self.excess[v] += d;
        trace!("self.excess[{v}]={}", self.excess[v]);
        debug_assert!(self.excess[v] >= 0);

        // IF w ≠ s,t AND w ∉ Q THEN Q.add(w)
        if !self.source_set[v] && !self.target_set[v] && !self.excess_nodes.contains(&v) {
            self.excess_nodes.push(v);
        }
    }

    fn relabel(&mut self, v: NodeID) {
        let mut d = i32::MAX;
        for edge in self.residual_graph.edge_range(v) {
            let edge_data = self.residual_graph.data_mut(edge);
            if edge_data.remaining_capacity() > 0 {
                let t = self.residual_graph.target(edge);
                d = min(d, self.height[t]);
            }
        }

        if d < i32::MAX {
            debug!("relabel height[{v}]={}", d + 1);
            self.height[v] = d + 1;
            trace!("pushing {v} to queue");
            self.excess_nodes.push(v);
        }
    }

    fn discharge(&mut self, u: NodeID) {
        trace!("popped {u} from queue");
        for edge in self.residual_graph.edge_range(u) {
            if self.excess[u] <= 0 {
                trace!("node {u} doesn't have excess flow anymore");
                break;
            }
            let v = self.residual_graph.target(edge);
            let edge_data = self.residual_graph.data(edge);

            if edge_data.remaining_capacity() > 0 && self.height[u] == self.height[v] + 1 {
                trace!("pushing edge ({u},{v})");
                self.push(u, v);
            } else {
                trace!(
                    "ignoring edge ({u},{v}), height[u]={}, height[v]={}, capacity={}",
                    self.height[u],
                    self.height[v],
                    edge_data.remaining_capacity()
                );
            }
        }
        if self.excess[u] > 0 {
            debug!("relabel {u}");
            self.relabel(u);
        }
    }

    // todo(dl): add closure parameter to derive edge data
    pub fn from_generic_edge_list(input_edges: Vec<impl Edge<ID = NodeID>>) -> Self {
        let edge_list: Vec<InputEdge<EdgeCapacity>> = input_edges
            .into_iter()
            .map(|edge| InputEdge {
                source: edge.source(),
                target: edge.target(),
                data: EdgeCapacity::new(1),
            })
            .collect();

        PushRelabel::from_edge_list(edge_list)
    }

    pub fn from_edge_list(mut edge_list: Vec<InputEdge<EdgeCapacity>>) -> Self {
        let number_of_edges = edge_list.len();

        // blindly generate reverse edges for all edges with zero capacity
        edge_list.extend_from_within(..);
        edge_list.iter_mut().skip(number_of_edges).for_each(|edge| {
            edge.reverse();
            edge.data.capacity = 0;
        });

        // dedup-merge edge set, by using the following trick: not the dedup(.) call
        // below takes the second argument as mut. When deduping equivalent values
        // a and b, then a is accumulated onto b.
        edge_list.sort_unstable();
        edge_list.dedup_by(|a, mut b| {
            // edges a and b are assumed to be equivalent in the residual graph if
            // (and only if) they are parallel. In other words, this removes parallel
            // edges in the residual graph and accumulates capacities on the remaining
            // egde.
            let result = a.source == b.source && a.target == b.target;
            if result {
                b.data.capacity += a.data.capacity;
            }
            result
        });

        // at this point the edge set of the residual graph doesn't have any
        // duplicates anymore. note that this is fine, as we are looking to
        // compute a node partition.

        Self {
            residual_graph: StaticGraph::new(edge_list),
            max_flow: 0,
            finished: false,
            height: Vec::new(),
            excess: Vec::new(),
            excess_nodes: Vec::new(),
            source_set: BitVec::new(),
            target_set: BitVec::new(),
        }
    }

    pub fn run(&mut self, sources: &[NodeID], targets: &[NodeID]) {
        let number_of_nodes = self.residual_graph.number_of_nodes();

        // init
        self.height = vec![0; number_of_nodes];
        self.excess = vec![0; number_of_nodes];

        self.target_set.resize(number_of_nodes, false);
        for i in targets {
            self.target_set.set(*i as usize, true);
        }

        self.source_set.resize(number_of_nodes, false);
        for i in sources {
            self.source_set.set(*i as usize, true);
        }

        // TODO: this is not tight, should first init all sources, then start traversal
        debug!("source set: {sources:?}");
        debug!("target set: {targets:?}");
        for s in sources {
            self.height[*s] = number_of_nodes as i32;
            trace!("source height[{s}]={number_of_nodes}");
            self.excess[*s] = i32::MAX;

            for edge in self.residual_graph.edge_range(*s) {
                let t = self.residual_graph.target(edge);
                if self.source_set[t] {
                    // don't push edges inside source set
                    trace!("ignoring edge ({s},{t})");
                    continue;
                }
                trace!("pushing edge ({s},{t})");
                self.push(*s, t);
            }
        }

        debug!("init done");

        while let Some(u) = self.excess_nodes.pop() {
            if !self.source_set[u] && !self.target_set[u] {
                self.discharge(u);
            }
        }

        let mut flow = 0;
        for t in targets {
            for rev_edge in self.residual_graph.edge_range(*t) {
                let s = self.residual_graph.target(rev_edge);
                let fwd_edge = self
                    .residual_graph
                    .find_edge(s, *t)
                    .expect("Graph broken. Could not find expected edge");
                flow += self.residual_graph.data(fwd_edge).flow;
            }
        }

        self.max_flow = flow;
        self.finished = true;
    }

    pub fn max_flow(&self) -> Result<i32, String> {
        if !self.finished {
            return Err("Assigment was not computed.".to_string());
        }
        Ok(self.max_flow)
    }

    pub fn assignment(&self, sources: &[NodeID]) -> Result<BitVec, String> {
        if !self.finished {
            return Err("Assigment was not computed.".to_string());
        }

        // run a reachability analysis
        let mut reachable = BitVec::with_capacity(self.residual_graph.number_of_nodes());
        reachable.resize(self.residual_graph.number_of_nodes(), false);
        let mut stack: Vec<usize> = sources.iter().copied().collect();
        while let Some(node) = stack.pop() {
            // TODO: looks like this following is superflous work?
            if *reachable.get(node as usize).unwrap() {
                continue;
            }
            reachable.set(node as usize, true);
            trace!("reached {node}");
            for edge in self.residual_graph.edge_range(node) {
                let target = self.residual_graph.target(edge);
                let reached = reachable.get(target as usize).unwrap();
                if !reached && self.residual_graph.data(edge).remaining_capacity() > 0 {
                    stack.push(self.residual_graph.target(edge));
                }
            }
        }

        Ok(reachable)
    }
}
