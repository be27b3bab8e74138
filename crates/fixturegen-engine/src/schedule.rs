//! Dependency scheduling of generation passes.
//!
//! Nodes are the requests of a run; an edge `A → B` means a field of `A`
//! resolves to target `B`, so `B` must be published first. Strongly
//! connected components of the graph are visited dependencies first; a
//! component with more than one member is a cycle, and every other node
//! lands one level above its deepest dependency:
//!
//! ```text
//! Order ← Item ← Cart        levels: [Order] [Item] [Cart]
//! A ⇄ B ← C                  A, B: cyclic; C: blocked
//! ```

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::{astar, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use fixturegen_types::FixtureError;

/// One schedulable pass: its target name and the targets it depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassNode {
    pub type_name: String,
    pub depends_on: BTreeSet<String>,
}

/// Result of scheduling a run.
#[derive(Debug, Default)]
pub struct Schedule {
    /// Node indices per level, each level in input order.
    pub levels: Vec<Vec<usize>>,
    /// Nodes that cannot run, with the reason, in input order.
    pub rejected: Vec<(usize, FixtureError)>,
}

/// Pass dependency graph; node `i` is `nodes[i]`.
type PassGraph<'a> = DiGraph<&'a str, ()>;

/// Group `nodes` into dependency levels. Dependencies on names outside
/// `nodes` and on the node itself are ignored.
pub fn schedule(nodes: &[PassNode]) -> Schedule {
    let graph = build_graph(nodes);
    let mut depth: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut schedule = Schedule::default();

    // tarjan_scc yields components in reverse topological order, which for
    // dependent → dependency edges means dependencies first.
    for component in tarjan_scc(&graph) {
        if component.len() > 1 {
            for &member in &component {
                let path = cycle_through(&graph, member)
                    .into_iter()
                    .map(|n| graph[n].to_string())
                    .collect();
                schedule
                    .rejected
                    .push((member.index(), FixtureError::CyclicFixtureDependency(path)));
            }
            continue;
        }

        let node = component[0];
        let level = graph
            .neighbors(node)
            .try_fold(0, |level, dep| depth[dep.index()].map(|d| level.max(d + 1)));
        match level {
            Some(level) => depth[node.index()] = Some(level),
            None => schedule.rejected.push((
                node.index(),
                FixtureError::UnresolvedFixtureReference(format!(
                    "'{}' depends on a fixture caught in a dependency cycle",
                    graph[node]
                )),
            )),
        }
    }

    for (i, level) in depth.iter().enumerate() {
        if let Some(level) = *level {
            if schedule.levels.len() <= level {
                schedule.levels.resize_with(level + 1, Vec::new);
            }
            schedule.levels[level].push(i);
        }
    }
    schedule.rejected.sort_by_key(|(i, _)| *i);
    schedule
}

fn build_graph(nodes: &[PassNode]) -> PassGraph<'_> {
    let mut graph = PassGraph::with_capacity(nodes.len(), 0);
    let index: BTreeMap<&str, NodeIndex> = nodes
        .iter()
        .map(|n| (n.type_name.as_str(), graph.add_node(n.type_name.as_str())))
        .collect();

    for node in nodes {
        let Some(&from) = index.get(node.type_name.as_str()) else {
            continue;
        };
        for dep in &node.depends_on {
            match index.get(dep.as_str()) {
                Some(&to) if to != from => {
                    graph.update_edge(from, to, ());
                }
                _ => {}
            }
        }
    }
    graph
}

/// Shortest path `start → … → start`; `start` must sit on a cycle.
fn cycle_through(graph: &PassGraph<'_>, start: NodeIndex) -> Vec<NodeIndex> {
    let mut successors: Vec<NodeIndex> = graph.neighbors(start).collect();
    successors.sort_unstable();

    successors
        .into_iter()
        .filter_map(|next| astar(graph, next, |n| n == start, |_| 1usize, |_| 0).map(|(_, p)| p))
        .min_by_key(Vec::len)
        .map(|path| std::iter::once(start).chain(path).collect())
        .unwrap_or_else(|| vec![start, start])
}
