// Copyright (c) 2016-2021 Fabian Schuiki

//! Dependency analysis of YACC grammars.

use crate::common::graph::Graph;
use crate::yacc::YGram;

/// Build the graph of references between the productions of a grammar.
///
/// Every production is a node, in source order. A production has an edge to
/// every other production it names; references to names the grammar does
/// not define are tokens and are ignored.
pub fn dependency_graph(gram: &YGram) -> Graph<&str> {
    let mut graph = Graph::new();
    for prod in gram.prods() {
        graph.add_node(prod.name.as_str());
    }
    for prod in gram.prods() {
        for name in prod.references() {
            if gram.contains(name) {
                graph.add_edge(prod.name.as_str(), name);
            }
        }
    }
    graph
}

/// Group the productions of a grammar into strongly connected components,
/// ordered such that every group comes after the groups it refers to.
pub fn dependency_groups(gram: &YGram) -> Vec<Vec<String>> {
    let groups: Vec<Vec<String>> = dependency_graph(gram)
        .sccs()
        .into_iter()
        .map(|group| group.into_iter().map(String::from).collect())
        .collect();
    debug!(
        "Split {} productions into {} groups",
        gram.len(),
        groups.len()
    );
    groups
}
