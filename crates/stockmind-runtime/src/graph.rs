//! Render view of the research graph using petgraph.
//!
//! Connections are stored on nodes as plain ids and may dangle. The view
//! resolves them into edges and silently skips ids that are not on the board.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use stockmind_core::ResearchNode;

/// A resolved connection between two nodes on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub dangling_count: usize,
}

/// Nodes plus resolved edges, ready for a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<ResearchNode>,
    /// Directed edges in node order.
    pub edges: Vec<GraphEdge>,
    /// Edges with direction dropped and duplicates removed; what gets drawn.
    pub links: Vec<GraphEdge>,
    pub stats: GraphStats,
}

impl GraphView {
    pub fn build(nodes: &[ResearchNode]) -> Self {
        let mut graph = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();
        for node in nodes {
            let idx = graph.add_node(node.id.clone());
            index.insert(node.id.clone(), idx);
        }

        let mut edges = Vec::new();
        let mut links = Vec::new();
        let mut seen_links = HashSet::new();
        let mut dangling_count = 0;

        for node in nodes {
            let source = index[&node.id];
            for target_id in &node.connections {
                let Some(&target) = index.get(target_id) else {
                    dangling_count += 1;
                    continue;
                };
                graph.add_edge(source, target, ());
                edges.push(GraphEdge {
                    source: node.id.clone(),
                    target: target_id.clone(),
                });

                let key = if node.id <= *target_id {
                    (node.id.clone(), target_id.clone())
                } else {
                    (target_id.clone(), node.id.clone())
                };
                if seen_links.insert(key) {
                    links.push(GraphEdge {
                        source: node.id.clone(),
                        target: target_id.clone(),
                    });
                }
            }
        }

        let stats = GraphStats {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            dangling_count,
        };

        Self {
            nodes: nodes.to_vec(),
            edges,
            links,
            stats,
        }
    }
}
