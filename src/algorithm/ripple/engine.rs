//! The ripple-spreading main loop.
//!
//! Each step runs four phases to completion before the next step starts:
//!
//! 1. every active ripple grows by the propagation speed `v`;
//! 2. every active ripple that now reaches an unclaimed neighbor proposes a
//!    candidate ripple there, carrying the overshoot `radius - weight`;
//! 3. per node, the candidate with the largest overshoot (earliest arrival in
//!    continuous time) becomes a new ripple and claims the node;
//! 4. ripples whose neighbors are all claimed become inactive.
//!
//! Candidates for a node are only committed after every active ripple has
//! been scanned, otherwise a late-scanned but earlier-arriving wavefront
//! could lose the node.

use std::fmt::Debug;
use log::trace;
use num_traits::Float;

use crate::algorithm::ripple::registry::{RippleId, RippleRegistry};
use crate::algorithm::ripple::{ArrivalRule, SpreadEvent, SpreadStats};
use crate::graph::NeighborTable;

/// Best pending arrival at one node within the current step
#[derive(Debug, Clone, Copy)]
struct Candidate<W> {
    parent: RippleId,
    overshoot: W,
    length: W,
}

/// Where the loop stands after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadState {
    Running,
    /// The destination was claimed by this ripple
    Solved(RippleId),
    /// No active ripple is left and the destination is unclaimed
    Infeasible,
}

/// Simulation state for one source/destination query
pub struct SpreadingEngine<'a, W> {
    table: &'a NeighborTable<W>,
    speed: W,
    rule: ArrivalRule,
    destination: usize,
    registry: RippleRegistry<W>,
    active: Vec<RippleId>,
    /// Indexed by node; reused across steps
    pending: Vec<Option<Candidate<W>>>,
    /// Nodes with a pending candidate, in first-arrival scan order
    touched: Vec<usize>,
    step: usize,
    stats: SpreadStats,
    trace: Option<Vec<SpreadEvent<W>>>,
}

impl<'a, W> SpreadingEngine<'a, W>
where
    W: Float + Debug,
{
    /// Seeds the source ripple (radius 0, path `[source]`, length 0).
    ///
    /// `speed` must be strictly positive; callers validate it.
    pub fn new(
        table: &'a NeighborTable<W>,
        speed: W,
        rule: ArrivalRule,
        source: usize,
        destination: usize,
        record_trace: bool,
    ) -> Self {
        let node_count = table.node_count();
        let mut engine = SpreadingEngine {
            table,
            speed,
            rule,
            destination,
            registry: RippleRegistry::new(node_count),
            active: Vec::new(),
            pending: vec![None; node_count],
            touched: Vec::new(),
            step: 0,
            stats: SpreadStats::default(),
            trace: record_trace.then(Vec::new),
        };

        engine.spawn(source, W::zero(), None, W::zero());
        engine
    }

    /// Current loop state
    pub fn state(&self) -> SpreadState {
        if let Some(id) = self.registry.claim_of(self.destination) {
            SpreadState::Solved(id)
        } else if self.active.is_empty() {
            SpreadState::Infeasible
        } else {
            SpreadState::Running
        }
    }

    /// Runs one spread / detect / resolve / retire step.
    pub fn step(&mut self) -> SpreadState {
        self.step += 1;
        self.stats.iterations = self.step;

        self.spread();
        self.detect_arrivals();
        self.promote_candidates();
        self.retire();

        self.state()
    }

    /// Steps until solved, infeasible, or `max_steps` steps have run.
    ///
    /// Returns `Running` only when the step budget ran out.
    pub fn run(&mut self, max_steps: usize) -> SpreadState {
        let mut state = self.state();
        while state == SpreadState::Running {
            if self.step >= max_steps {
                break;
            }
            state = self.step();
        }
        state
    }

    pub fn registry(&self) -> &RippleRegistry<W> {
        &self.registry
    }

    /// Ids of the ripples still able to reach an unclaimed node
    pub fn active(&self) -> &[RippleId] {
        &self.active
    }

    pub fn stats(&self) -> SpreadStats {
        self.stats
    }

    /// Hands back the registry and recorded trace
    pub fn into_parts(self) -> (RippleRegistry<W>, SpreadStats, Vec<SpreadEvent<W>>) {
        (self.registry, self.stats, self.trace.unwrap_or_default())
    }

    fn spread(&mut self) {
        for &id in &self.active {
            if let Some(ripple) = self.registry.get_mut(id) {
                ripple.radius = ripple.radius + self.speed;
            }
        }
    }

    fn detect_arrivals(&mut self) {
        for &id in &self.active {
            let Some(ripple) = self.registry.get(id) else {
                continue;
            };

            for (node, weight) in self.table.edges(ripple.epicenter) {
                if self.registry.is_claimed(node) || !self.rule.reaches(ripple.radius, weight, self.speed) {
                    continue;
                }

                self.stats.candidates_considered += 1;
                let candidate = Candidate {
                    parent: id,
                    overshoot: ripple.radius - weight,
                    length: ripple.length + weight,
                };

                // Running maximum; on equal overshoot the first one scanned stays
                match self.pending[node].as_mut() {
                    Some(best) => {
                        if candidate.overshoot > best.overshoot {
                            *best = candidate;
                        }
                    }
                    None => {
                        self.pending[node] = Some(candidate);
                        self.touched.push(node);
                    }
                }
            }
        }
    }

    fn promote_candidates(&mut self) {
        let touched = std::mem::take(&mut self.touched);
        for &node in &touched {
            if let Some(winner) = self.pending[node].take() {
                self.spawn(node, winner.overshoot, Some(winner.parent), winner.length);
            }
        }
        // Keep the allocation for the next step
        self.touched = touched;
        self.touched.clear();
    }

    fn retire(&mut self) {
        let registry = &self.registry;
        let table = self.table;
        let step = self.step;
        let events = &mut self.trace;

        self.active.retain(|&id| {
            let Some(ripple) = registry.get(id) else {
                return false;
            };
            let keep = table
                .neighbors(ripple.epicenter)
                .iter()
                .any(|&node| !registry.is_claimed(node));

            if !keep {
                trace!("step {}: ripple {} at node {} retired", step, id, ripple.epicenter);
                if let Some(events) = events.as_mut() {
                    events.push(SpreadEvent::Retired {
                        step,
                        ripple: id,
                        epicenter: ripple.epicenter,
                        radius: ripple.radius,
                    });
                }
            }
            keep
        });
    }

    fn spawn(&mut self, node: usize, radius: W, parent: Option<RippleId>, length: W) -> RippleId {
        let id = self.registry.create(node, radius, parent, length);
        self.active.push(id);

        self.stats.ripples_created += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.active.len());

        trace!(
            "step {}: ripple {} created at node {} (parent {:?}, radius {:?}, length {:?})",
            self.step, id, node, parent, radius, length
        );
        if let Some(events) = self.trace.as_mut() {
            events.push(SpreadEvent::Created {
                step: self.step,
                ripple: id,
                epicenter: node,
                parent,
                radius,
                length,
            });
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, MutableGraph};

    fn line_table() -> NeighborTable<f64> {
        // 0 -2- 1 -3- 2
        let mut graph = DirectedGraph::with_capacity(3);
        graph.add_undirected_edge(0, 1, 2.0);
        graph.add_undirected_edge(1, 2, 3.0);
        NeighborTable::build(&graph).unwrap()
    }

    #[test]
    fn test_single_steps_on_a_line() {
        let table = line_table();
        let mut engine = SpreadingEngine::new(&table, 2.0, ArrivalRule::Cumulative, 0, 2, true);
        assert_eq!(engine.state(), SpreadState::Running);

        // radius 2 reaches node 1 exactly; the seed then has nothing left to claim
        assert_eq!(engine.step(), SpreadState::Running);
        assert_eq!(engine.registry().claim_of(1), Some(1));
        assert_eq!(engine.active(), &[1]);
        assert_eq!(engine.registry().get(1).map(|r| r.radius), Some(0.0));

        // ripple 1 has radius 2 < 3
        assert_eq!(engine.step(), SpreadState::Running);
        assert!(!engine.registry().is_claimed(2));

        // radius 4 >= 3, overshoot 1
        assert_eq!(engine.step(), SpreadState::Solved(2));
        let registry = engine.registry();
        assert_eq!(registry.path_of(2), vec![0, 1, 2]);
        assert_eq!(registry.get(2).map(|r| (r.radius, r.length)), Some((1.0, 5.0)));
    }

    #[test]
    fn test_larger_overshoot_wins_contention() {
        // 0 -> 1 (2), 0 -> 2 (5), 1 -> 2 (2.5). At step 3 the seed reaches
        // node 2 with overshoot 1.0 and ripple 1 with overshoot 1.5.
        let mut graph = DirectedGraph::with_capacity(3);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(0, 2, 5.0);
        graph.add_edge(1, 2, 2.5);
        let table = NeighborTable::build(&graph).unwrap();

        let mut engine = SpreadingEngine::new(&table, 2.0, ArrivalRule::Cumulative, 0, 2, false);
        let state = engine.run(100);
        let SpreadState::Solved(id) = state else {
            panic!("expected solved, got {:?}", state);
        };
        assert_eq!(engine.registry().path_of(id), vec![0, 1, 2]);
        assert_eq!(engine.registry().get(id).map(|r| r.length), Some(4.5));
        assert_eq!(engine.stats().iterations, 3);
        assert_eq!(engine.stats().candidates_considered, 3);
    }

    #[test]
    fn test_run_respects_step_budget() {
        let table = line_table();
        let mut engine = SpreadingEngine::new(&table, 2.0, ArrivalRule::Cumulative, 0, 2, false);
        assert_eq!(engine.run(1), SpreadState::Running);
        assert_eq!(engine.stats().iterations, 1);
    }

    #[test]
    fn test_trace_records_lifecycle() {
        let table = line_table();
        let mut engine = SpreadingEngine::new(&table, 2.0, ArrivalRule::Window, 0, 2, true);
        engine.run(10);
        let (_, stats, events) = engine.into_parts();

        let created = events
            .iter()
            .filter(|e| matches!(e, SpreadEvent::Created { .. }))
            .count();
        assert_eq!(created, 3);
        assert_eq!(stats.ripples_created, 3);
        assert!(matches!(
            events.get(2),
            Some(SpreadEvent::Retired { ripple: 0, step: 1, .. })
        ));
    }
}
