//! Export of a finished search tree into a `petgraph` directed graph, for
//! inspection or rendering (e.g. via `petgraph::dot`). Not part of the search
//! loop.

use petgraph::{Directed, Graph};

use crate::process::DecisionProcess;
use crate::tree::Tree;

/// One tree node's statistics, detached from the state snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub visits: u64,
    pub score: f64,
    pub depth: u32,
}

/// Parent-to-child edge, carrying the child's expansion rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub order: usize,
}

/// Walk the reachable tree and mirror it as a graph, parents pointing at
/// children in expansion order.
pub fn generate_graph<S: DecisionProcess>(tree: &Tree<S>) -> Graph<GraphNode, GraphEdge, Directed> {
    let mut graph = Graph::new();

    let root = tree.root_node();
    let root_index = graph.add_node(GraphNode {
        id: root.id().to_owned(),
        visits: root.visits(),
        score: root.score(),
        depth: root.depth,
    });

    let mut stack = vec![(tree.root(), root_index)];
    while let Some((node_id, graph_index)) = stack.pop() {
        for (order, &child_id) in tree.children(node_id).iter().enumerate() {
            let child = tree.get(child_id);
            let child_index = graph.add_node(GraphNode {
                id: child.id().to_owned(),
                visits: child.visits(),
                score: child.score(),
                depth: child.depth,
            });
            let _ = graph.add_edge(graph_index, child_index, GraphEdge { order });
            stack.push((child_id, child_index));
        }
    }

    graph
}
