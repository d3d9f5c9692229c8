// Copyright (c) 2016-2021 Fabian Schuiki

//! A small directed graph with strongly connected component analysis.
//!
//! Nodes are arbitrary hashable values. Components are computed with
//! Tarjan's algorithm and are produced in reverse topological order: a
//! component is only emitted once every component it has an edge to has been
//! emitted. For a dependency graph with edges pointing from user to used,
//! this puts the leaves first.

use std::collections::HashMap;
use std::hash::Hash;

/// A directed graph over nodes of type `N`.
#[derive(Debug, Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    succs: Vec<Vec<usize>>,
}

impl<N: Clone + Eq + Hash> Graph<N> {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            index: HashMap::new(),
            succs: Vec::new(),
        }
    }

    /// Add a node to the graph. Adding a node twice is a no-op.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(node.clone());
        self.index.insert(node, idx);
        self.succs.push(Vec::new());
        idx
    }

    /// Add an edge between two nodes, adding the nodes if necessary.
    pub fn add_edge(&mut self, from: N, to: N) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if !self.succs[from].contains(&to) {
            self.succs[from].push(to);
        }
    }

    /// Check whether the graph contains a node.
    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Obtain an iterator over all nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Obtain an iterator over the direct successors of a node.
    pub fn successors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        let succs = match self.index.get(node) {
            Some(&idx) => self.succs[idx].as_slice(),
            None => &[],
        };
        succs.iter().map(move |&s| &self.nodes[s])
    }

    /// Check whether a node has an edge to itself.
    pub fn has_self_loop(&self, node: &N) -> bool {
        match self.index.get(node) {
            Some(&idx) => self.succs[idx].contains(&idx),
            None => false,
        }
    }

    /// Compute the strongly connected components of the graph.
    ///
    /// Components come out callees-first: no component has an edge to a
    /// component that appears after it. Within a component, nodes are listed
    /// in insertion order. Roots are visited in insertion order, which makes
    /// the result deterministic.
    pub fn sccs(&self) -> Vec<Vec<N>> {
        let mut tarjan = Tarjan {
            succs: &self.succs,
            next_index: 0,
            index: vec![None; self.nodes.len()],
            lowlink: vec![0; self.nodes.len()],
            on_stack: vec![false; self.nodes.len()],
            stack: Vec::new(),
            components: Vec::new(),
        };
        for v in 0..self.nodes.len() {
            if tarjan.index[v].is_none() {
                tarjan.connect(v);
            }
        }
        tarjan
            .components
            .into_iter()
            .map(|mut comp| {
                comp.sort();
                comp.into_iter().map(|i| self.nodes[i].clone()).collect()
            })
            .collect()
    }

    /// Compute the set of nodes that can reach themselves through at least one
    /// edge.
    pub fn cyclic_nodes(&self) -> Vec<N> {
        let mut out = vec![];
        for comp in self.sccs() {
            if comp.len() > 1 || self.has_self_loop(&comp[0]) {
                out.extend(comp);
            }
        }
        out
    }
}

impl<N: Clone + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Graph::new()
    }
}

struct Tarjan<'a> {
    succs: &'a [Vec<usize>],
    next_index: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl Tarjan<'_> {
    fn connect(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        let succs = self.succs;
        for &w in &succs[v] {
            match self.index[w] {
                None => {
                    self.connect(w);
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                }
                Some(wi) if self.on_stack[w] => {
                    self.lowlink[v] = self.lowlink[v].min(wi);
                }
                Some(_) => (),
            }
        }

        // A root node pops its entire component off the stack.
        if Some(self.lowlink[v]) == self.index[v] {
            let mut comp = vec![];
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                comp.push(w);
                if w == v {
                    break;
                }
            }
            trace!("Found component of {} nodes", comp.len());
            self.components.push(comp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_callee_first() {
        let mut g = Graph::new();
        g.add_edge("A", "B");
        g.add_edge("B", "C");
        assert_eq!(g.sccs(), vec![vec!["C"], vec!["B"], vec!["A"]]);
        assert!(g.cyclic_nodes().is_empty());
    }

    #[test]
    fn cycle_forms_one_component() {
        let mut g = Graph::new();
        g.add_edge("A", "B");
        g.add_edge("B", "A");
        g.add_edge("B", "C");
        assert_eq!(g.sccs(), vec![vec!["C"], vec!["A", "B"]]);
        assert_eq!(g.cyclic_nodes(), vec!["A", "B"]);
    }

    #[test]
    fn self_loop_is_cyclic() {
        let mut g = Graph::new();
        g.add_edge("A", "A");
        g.add_node("B");
        assert_eq!(g.sccs(), vec![vec!["A"], vec!["B"]]);
        assert_eq!(g.cyclic_nodes(), vec!["A"]);
        assert_eq!(g.successors(&"A").collect::<Vec<_>>(), vec![&"A"]);
    }

    #[test]
    fn components_respect_edges() {
        let mut g = Graph::new();
        for (a, b) in &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 4), (6, 1)] {
            g.add_edge(*a, *b);
        }
        let comps = g.sccs();
        let pos = |n: i32| comps.iter().position(|c| c.contains(&n)).unwrap();
        for n in g.nodes() {
            for s in g.successors(n) {
                assert!(pos(*s) <= pos(*n), "{} -> {} out of order", n, s);
            }
        }
        assert_eq!(comps.len(), 3);
    }
}
