//! Component F: the path tracer.
//!
//! An explicit-stack depth-first search over the admissibility index (not
//! the raw graph), mirroring `dfs.rs`'s shape but walking `adm_out` slices
//! and stopping at the first vertex with positive residual sink rather than
//! a single fixed target (§4.6).

use crate::admissibility::Admissibility;
use crate::excess::Excess;
use crate::graph::NodeID;
use crate::level::Levels;
use crate::residual::{ResidualEdge, ResidualGraph};

#[derive(Default)]
pub struct Tracer {
    visited: Vec<bool>,
    parent: Vec<Option<(NodeID, ResidualEdge)>>,
    stack: Vec<(NodeID, Vec<usize>)>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, n: usize) {
        if self.visited.len() != n {
            self.visited = vec![false; n];
            self.parent = vec![None; n];
        } else {
            self.visited.iter_mut().for_each(|b| *b = false);
            self.parent.iter_mut().for_each(|p| *p = None);
        }
        self.stack.clear();
    }

    /// Finds an admissible path from `s` to some vertex with positive
    /// residual sink, or `None` if no such path exists (§4.6). Tie-breaks
    /// deterministically by admissible-slot order.
    pub fn find_path(
        &mut self,
        s: NodeID,
        residual: &ResidualGraph,
        adm: &Admissibility,
        levels: &Levels,
        excess: &Excess,
    ) -> Option<Vec<ResidualEdge>> {
        self.reset(residual.number_of_nodes());

        self.visited[s] = true;
        if excess.residual_sink(s) > 0 {
            return Some(Vec::new());
        }
        self.stack
            .push((s, adm.adm_out(s).iter().copied().collect()));

        while let Some((v, slots)) = self.stack.last_mut() {
            let v = *v;
            match slots.pop() {
                Some(slot) => {
                    let r = residual.slot_residual_edge(slot);
                    let head = residual.head(r);
                    if levels.is_alive(head) && !self.visited[head] {
                        self.visited[head] = true;
                        self.parent[head] = Some((v, r));
                        if excess.residual_sink(head) > 0 {
                            return Some(self.unwind(head));
                        }
                        self.stack
                            .push((head, adm.adm_out(head).iter().copied().collect()));
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }

    fn unwind(&self, mut v: NodeID) -> Vec<ResidualEdge> {
        let mut path = Vec::new();
        while let Some((parent, r)) = self.parent[v] {
            path.push(r);
            v = parent;
        }
        path.reverse();
        path
    }
}
