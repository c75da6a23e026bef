//! Minimum-cost flow via successive shortest augmenting paths.
//!
//! Node balances follow the demand convention: a node with demand −d
//! must emit d units of flow, a node with demand +d must absorb d units.
//! Demands across the network must sum to zero.
//!
//! Negative edge costs are supported as long as the cost graph contains
//! no negative cycle (true for any DAG). Shortest paths in the residual
//! graph are found by Bellman-Ford label correction, which tolerates the
//! negative residual arcs that augmentation creates.
//!
//! # Determinism
//!
//! When several minimum-cost flows exist, the solved flow depends only on
//! insertion order: relaxation scans nodes and arcs in the order they
//! were added and keeps the first-found predecessor on cost ties. Callers
//! get reproducible results by adding nodes and edges in a canonical
//! order.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9.7

use thiserror::Error;

/// A directed capacitated-cost edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Tail node.
    pub from: usize,
    /// Head node.
    pub to: usize,
    /// Maximum flow the edge can carry.
    pub capacity: i64,
    /// Cost per unit of flow (may be negative).
    pub cost: i64,
}

/// A solved flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    /// Flow on each edge, indexed like [`FlowNetwork::edges`].
    pub edge_flows: Vec<i64>,
    /// Total cost: Σ flow × cost over all edges.
    pub total_cost: i64,
}

/// Why a network has no valid flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Node demands do not sum to zero; no flow can balance every node.
    #[error("node demands are unbalanced: supply {supply} vs demand {demand}")]
    Unbalanced {
        /// Units emitted by negative-demand nodes.
        supply: i64,
        /// Units required by positive-demand nodes.
        demand: i64,
    },
    /// Demands balance but the edge capacities cannot route them.
    #[error("no feasible flow: satisfied {satisfied} of {required} demand units")]
    Infeasible {
        /// Units routed before the residual graph ran dry.
        satisfied: i64,
        /// Units required by positive-demand nodes.
        required: i64,
    },
}

/// A flow network under construction.
///
/// # Example
/// ```
/// use groupflow::flow::FlowNetwork;
///
/// let mut net = FlowNetwork::new();
/// let a = net.add_node(-1); // emits one unit
/// let b = net.add_node(1);  // absorbs one unit
/// let e = net.add_edge(a, b, 1, -5);
/// let flow = net.min_cost_flow().unwrap();
/// assert_eq!(flow.edge_flows[e], 1);
/// assert_eq!(flow.total_cost, -5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    demands: Vec<i64>,
    edges: Vec<Edge>,
}

/// A residual arc. Arcs are stored in pairs: arc `i` and arc `i ^ 1` are
/// each other's reverses.
#[derive(Debug, Clone)]
struct Arc {
    to: usize,
    capacity: i64,
    cost: i64,
}

impl FlowNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the given demand and returns its index.
    ///
    /// Demand −d: the node must emit d units. Demand +d: it must absorb
    /// d units. Demand 0: pure transshipment.
    pub fn add_node(&mut self, demand: i64) -> usize {
        self.demands.push(demand);
        self.demands.len() - 1
    }

    /// Adds an edge and returns its index.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i64, cost: i64) -> usize {
        debug_assert!(from < self.demands.len() && to < self.demands.len());
        self.edges.push(Edge {
            from,
            to,
            capacity,
            cost,
        });
        self.edges.len() - 1
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.demands.len()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Computes a minimum-cost flow satisfying every node's demand.
    ///
    /// Augments along shortest residual paths from a super-source (fed by
    /// all negative-demand nodes) to a super-sink (drained by all
    /// positive-demand nodes) until the demand is routed or the residual
    /// graph runs dry.
    ///
    /// # Errors
    /// [`FlowError::Unbalanced`] if demands do not sum to zero,
    /// [`FlowError::Infeasible`] if capacities cannot route the demand.
    pub fn min_cost_flow(&self) -> Result<Flow, FlowError> {
        let n = self.demands.len();
        let source = n;
        let sink = n + 1;
        let node_count = n + 2;

        let mut arcs: Vec<Arc> = Vec::with_capacity(2 * (self.edges.len() + n));
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        fn push_arc(
            arcs: &mut Vec<Arc>,
            adjacency: &mut [Vec<usize>],
            from: usize,
            to: usize,
            capacity: i64,
            cost: i64,
        ) {
            adjacency[from].push(arcs.len());
            arcs.push(Arc { to, capacity, cost });
            adjacency[to].push(arcs.len());
            arcs.push(Arc {
                to: from,
                capacity: 0,
                cost: -cost,
            });
        }

        // Problem edges first, so edge i owns arcs 2i (forward) and
        // 2i + 1 (reverse).
        for edge in &self.edges {
            push_arc(
                &mut arcs,
                &mut adjacency,
                edge.from,
                edge.to,
                edge.capacity,
                edge.cost,
            );
        }

        let mut supply: i64 = 0;
        let mut required: i64 = 0;
        for (node, &demand) in self.demands.iter().enumerate() {
            if demand < 0 {
                supply -= demand;
                push_arc(&mut arcs, &mut adjacency, source, node, -demand, 0);
            } else if demand > 0 {
                required += demand;
                push_arc(&mut arcs, &mut adjacency, node, sink, demand, 0);
            }
        }

        if supply != required {
            return Err(FlowError::Unbalanced {
                supply,
                demand: required,
            });
        }

        let mut satisfied: i64 = 0;
        while satisfied < required {
            let Some(parent) = shortest_path(node_count, &arcs, &adjacency, source, sink) else {
                return Err(FlowError::Infeasible {
                    satisfied,
                    required,
                });
            };

            // Bottleneck along the augmenting path.
            let mut bottleneck = i64::MAX;
            let mut node = sink;
            while node != source {
                let arc = parent[node];
                bottleneck = bottleneck.min(arcs[arc].capacity);
                node = arcs[arc ^ 1].to;
            }

            let mut node = sink;
            while node != source {
                let arc = parent[node];
                arcs[arc].capacity -= bottleneck;
                arcs[arc ^ 1].capacity += bottleneck;
                node = arcs[arc ^ 1].to;
            }
            satisfied += bottleneck;
        }

        // Flow on edge i is the capacity accumulated by its reverse arc.
        let edge_flows: Vec<i64> = (0..self.edges.len())
            .map(|i| arcs[2 * i + 1].capacity)
            .collect();
        let total_cost = self
            .edges
            .iter()
            .zip(&edge_flows)
            .map(|(edge, &flow)| edge.cost * flow)
            .sum();

        Ok(Flow {
            edge_flows,
            total_cost,
        })
    }
}

/// Bellman-Ford shortest path over residual arcs.
///
/// Returns the predecessor arc per node, or `None` if the sink is
/// unreachable. Strict-improvement relaxation in insertion order keeps
/// the first-found path on cost ties.
fn shortest_path(
    node_count: usize,
    arcs: &[Arc],
    adjacency: &[Vec<usize>],
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    let mut distance = vec![i64::MAX; node_count];
    let mut parent = vec![usize::MAX; node_count];
    distance[source] = 0;

    // At most node_count - 1 passes settle all labels when no negative
    // cycle exists, which the caller's DAG cost structure guarantees.
    for _ in 0..node_count {
        let mut changed = false;
        for from in 0..node_count {
            if distance[from] == i64::MAX {
                continue;
            }
            for &arc in &adjacency[from] {
                if arcs[arc].capacity <= 0 {
                    continue;
                }
                let candidate = distance[from] + arcs[arc].cost;
                if candidate < distance[arcs[arc].to] {
                    distance[arcs[arc].to] = candidate;
                    parent[arcs[arc].to] = arc;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    if distance[sink] == i64::MAX {
        None
    } else {
        Some(parent)
    }
}
