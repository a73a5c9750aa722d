use crate::bfs::BFS;
use crate::edge::Edge;
use crate::edge::InputEdge;
use crate::graph::{Graph, NodeID};
use crate::static_graph::StaticGraph;
use bitvec::vec::BitVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeCapacity {
    pub capacity: i32,
}

impl EdgeCapacity {
    pub fn new(capacity: i32) -> EdgeCapacity {
        EdgeCapacity { capacity }
    }
}

pub struct FordFulkerson {
    residual_graph: StaticGraph<EdgeCapacity>,
    max_flow: i32,
    finished: bool,
}

impl FordFulkerson {
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

        println!("created {} ff edges", edge_list.len());
        FordFulkerson::from_edge_list(edge_list)
    }

    pub fn from_edge_list(mut edge_list: Vec<InputEdge<EdgeCapacity>>) -> Self {
        let number_of_edges = edge_list.len();

        println!("extending {} edges", edge_list.len());
        // blindly generate reverse edges for all edges with zero capacity
        edge_list.extend_from_within(..);
        edge_list.iter_mut().skip(number_of_edges).for_each(|edge| {
            edge.reverse();
            edge.data.capacity = 0;
        });
        println!("into {} edges", edge_list.len());

        // dedup-merge edge set, by using the following trick: not the dedup(.) call
        // below takes the second argument as mut. When deduping equivalent values
        // a and b, then a is accumulated onto b.
        edge_list.sort();
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
        println!("dedup-merged {} edges", edge_list.len());

        // at this point the edge set of the residual graph doesn't have any
        // duplicates anymore. note that this is fine, as we are looking to
        // compute a node partition.
        Self {
            residual_graph: StaticGraph::new(edge_list),
            max_flow: 0,
            finished: false,
        }
    }

    pub fn run(&mut self, sources: &[NodeID], targets: &[NodeID]) {
        let mut bfs = BFS::new();
        let filter = |graph: &StaticGraph<EdgeCapacity>, edge| graph.data(edge).capacity <= 0;
        let mut iteration = 0;
        while bfs.run_with_filter(&self.residual_graph, sources, targets, filter) {
            iteration += 1;

            println!("iteration {}", iteration);
            // retrieve node path. This is sufficient, as we removed all duplicate edges
            let path = bfs.fetch_node_path();
            println!("found node path of size {:#?}", path.len());

            // find min capacity on edges of the path
            let st_tuple = path
                .windows(2)
                .min_by_key(|window| {
                    let edge = self.residual_graph.find_edge(window[0], window[1]).unwrap();
                    self.residual_graph.data(edge).capacity
                })
                .unwrap();

            let bottleneck_edge = self
                .residual_graph
                .find_edge(st_tuple[0], st_tuple[1])
                .unwrap();
            // println!("  bottleneck edge: {}", bottleneck_edge);
            let path_flow = self.residual_graph.data(bottleneck_edge).capacity;
            assert!(path_flow > 0);
            println!("min edge: {}, capacity: {}", bottleneck_edge, path_flow);
            // sum up flow
            self.max_flow += path_flow;

            // assign flow to residual graph
            path.windows(2).for_each(|pair| {
                let fwd_edge = self.residual_graph.find_edge(pair[0], pair[1]).unwrap();
                let rev_edge = self.residual_graph.find_edge(pair[1], pair[0]).unwrap();

                self.residual_graph.data_mut(fwd_edge).capacity -= path_flow;
                self.residual_graph.data_mut(rev_edge).capacity += path_flow;
            });
        }

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
        let mut reachable: BitVec = BitVec::with_capacity(self.residual_graph.number_of_nodes());
        reachable.resize(self.residual_graph.number_of_nodes(), false);
        let mut stack = Vec::new();
        for s in sources {
            stack.push(*s);
        }
        while let Some(node) = stack.pop() {
            if *reachable.get(node as usize).unwrap() {
                continue;
            }
            reachable.set(node as usize, true);
            // println!("reached {}", node);
            for edge in self.residual_graph.edge_range(node) {
                let target = self.residual_graph.target(edge);
                let reached = reachable.get(target as usize).unwrap();
                if !reached && self.residual_graph.data(edge).capacity > 0 {
                    stack.push(self.residual_graph.target(edge));
                }
            }
        }

        // retrieve min-cut by walking the graph
        // todo(dl): expose as interface
        for s in 0..self.residual_graph.number_of_nodes() as NodeID {
            for e in self.residual_graph.edge_range(s) {
                let t = self.residual_graph.target(e);
                if reachable.get(s as usize).unwrap() != reachable.get(t as usize).unwrap() {
                    // println!("cut edge ({},{})", s, t);
                }
            }
        }

        // println!("done.");
        Ok(reachable)
    }
}
