//! Component G: the solver driver.
//!
//! Implements the `INIT -> RELABEL_PHASE -> AUGMENT_CHECK -> {AUGMENT,
//! DONE}` state machine of §4.7 and exposes the public solve entry point.
//! The driver owns a [`SolverContext`] (observer + iteration counter) for
//! the duration of one solve instead of reaching into process-wide state
//! (§9's "module-level mutable benchmark dictionary" re-architecture note).

use log::info;

use crate::admissibility::Admissibility;
use crate::error::{Error, Result};
use crate::excess::Excess;
use crate::graph::NodeID;
use crate::level::Levels;
use crate::observer::{NullObserver, Observer};
use crate::residual::ResidualGraph;
use crate::tracer::Tracer;
use crate::weight::Weight;

/// Owned, caller-supplied context for one solve: the observer plus a
/// running iteration count, passed explicitly rather than hung off any
/// global state.
pub struct SolverContext<'o> {
    pub observer: &'o mut dyn Observer,
    pub iterations: u64,
}

impl<'o> SolverContext<'o> {
    pub fn new(observer: &'o mut dyn Observer) -> Self {
        Self {
            observer,
            iterations: 0,
        }
    }
}

/// The result of one solve: the scalar routed flow value and the per-edge
/// flow assignment, `f[0..m)` indexed by edge identity.
pub struct SolveResult {
    pub routed_flow: i64,
    pub flow: Vec<i64>,
}

fn validate_inputs(
    n: usize,
    supply: &[i64],
    demand: &[i64],
    h: i64,
) -> Result<()> {
    if n == 0 {
        return Err(Error::EmptyVertexSet);
    }
    if h <= 0 {
        return Err(Error::NonPositiveHeight { h });
    }
    for (v, &s) in supply.iter().enumerate() {
        if s < 0 {
            return Err(Error::NegativeSupplyOrDemand {
                kind: "supply",
                vertex: v,
                value: s,
            });
        }
    }
    for (v, &d) in demand.iter().enumerate() {
        if d < 0 {
            return Err(Error::NegativeSupplyOrDemand {
                kind: "demand",
                vertex: v,
                value: d,
            });
        }
    }
    Ok(())
}

/// The solver entry point (§6). `edges` are `(source, target, capacity)`
/// triples; `supply`/`demand` are length-`n` non-negative vectors; `h` is
/// the height parameter. Returns the routed flow value and the flow table.
pub fn solve(
    n: usize,
    edges: &[(NodeID, NodeID, i64)],
    supply: &[i64],
    demand: &[i64],
    weight: &dyn Weight,
    h: i64,
    ctx: &mut SolverContext,
) -> Result<SolveResult> {
    validate_inputs(n, supply, demand, h)?;

    let mut residual = ResidualGraph::new(n, edges)?;
    let mut levels = Levels::new(n);
    let mut adm = Admissibility::new(n);
    let mut tracer = Tracer::new();

    // INIT: relabel every vertex once so edges whose tail starts at level 0
    // and divide it (every weight divides 0) get their first admissibility
    // evaluation — this seeds adm_out/ASNA correctly before augmenting.
    run_relabel_phase(&mut levels, &residual, weight, h, &mut adm, supply, demand, ctx)?;

    loop {
        let excess = Excess::new(&residual, supply, demand);
        let Some(source) = find_excess_source(n, &levels, &excess) else {
            break;
        };

        ctx.iterations += 1;
        let path = tracer
            .find_path(source, &residual, &adm, &levels, &excess)
            .ok_or(Error::InternalConsistency {
                source,
                iteration: ctx.iterations,
            })?;

        let mut delta = excess.residual_source(source);
        if let Some(&last) = path.last() {
            let last_vertex = residual.head(last);
            delta = delta.min(excess.residual_sink(last_vertex));
        } else {
            // trivial zero-edge path: source is itself a demand vertex
            delta = delta.min(excess.residual_sink(source));
        }
        for &r in &path {
            delta = delta.min(residual.residual_capacity(r));
        }
        debug_assert!(delta > 0, "augmenting path must carry positive flow");

        for &r in &path {
            let tail = residual.tail(r);
            let remaining = residual.push(r, delta);
            if remaining == 0 {
                // find the slot for this residual edge on its tail to notify D
                if let Some((slot, _)) = residual
                    .incident(tail)
                    .find(|(_, candidate)| *candidate == r)
                {
                    adm.mark_inadmissible(tail, slot, levels.is_alive(tail));
                    ctx.observer.on_inadmissible();
                }
            }
        }
        ctx.observer.on_augmenting_path(path.len(), delta);
        info!(
            "augmented {delta} units along a {}-edge path from {source} (iteration {})",
            path.len(),
            ctx.iterations
        );

        run_relabel_phase(&mut levels, &residual, weight, h, &mut adm, supply, demand, ctx)?;
    }

    let routed_flow: i64 = (0..n)
        .filter(|&v| supply[v] > 0)
        .flat_map(|v| residual.incident(v))
        .filter_map(|(_, r)| {
            (r.orientation == crate::residual::Orientation::Forward).then(|| residual.flow(r.edge))
        })
        .sum();

    let flow = (0..residual.number_of_edges())
        .map(|e| residual.flow(e))
        .collect();

    Ok(SolveResult { routed_flow, flow })
}

fn run_relabel_phase(
    levels: &mut Levels,
    residual: &ResidualGraph,
    weight: &dyn Weight,
    h: i64,
    adm: &mut Admissibility,
    supply: &[i64],
    demand: &[i64],
    ctx: &mut SolverContext,
) -> Result<()> {
    info!("entering relabel phase");
    let excess = Excess::new(residual, supply, demand);
    while let Some(v) = adm.next_asna_candidate(
        |v| levels.is_alive(v),
        |v| excess.residual_sink(v) == 0,
    ) {
        levels.relabel(v, residual, weight, h, adm, ctx.observer)?;
    }
    info!("relabel phase reached fixpoint");
    Ok(())
}

fn find_excess_source(n: usize, levels: &Levels, excess: &Excess) -> Option<NodeID> {
    (0..n).find(|&v| levels.is_alive(v) && excess.residual_source(v) > 0)
}

/// Convenience wrapper using a throwaway observer, for callers that don't
/// need counters.
pub fn solve_without_observer(
    n: usize,
    edges: &[(NodeID, NodeID, i64)],
    supply: &[i64],
    demand: &[i64],
    weight: &dyn Weight,
    h: i64,
) -> Result<SolveResult> {
    let mut observer = NullObserver;
    let mut ctx = SolverContext::new(&mut observer);
    solve(n, edges, supply, demand, weight, h, &mut ctx)
}
