//! Search state and moves shared by the local-search operators.

use crate::evaluation::RouteEvaluator;

/// Minimum cost decrease for a move to count as improving.
pub const IMPROVEMENT_EPS: f64 = 1e-9;

/// A local-search move with its cost change (negative = improvement).
#[derive(Debug, Clone, PartialEq)]
pub enum Move {
    /// Reverse `routes[route][i..=j]`.
    TwoOpt {
        /// Route index.
        route: usize,
        /// First reversed position.
        i: usize,
        /// Last reversed position.
        j: usize,
        /// Cost change.
        delta: f64,
    },
    /// Move one bin from one route to a position in another.
    Relocate {
        /// Source route.
        from_route: usize,
        /// Position in the source route.
        from_pos: usize,
        /// Target route.
        to_route: usize,
        /// Insertion position in the target route (after removal elsewhere).
        to_pos: usize,
        /// Cost change.
        delta: f64,
    },
    /// Route a bin that was left out for lack of capacity.
    Insert {
        /// Position in the pending list.
        pending_pos: usize,
        /// Target route.
        route: usize,
        /// Insertion position.
        pos: usize,
        /// Cost change, including the removed unassigned penalty.
        delta: f64,
    },
}

impl Move {
    /// Cost change of this move.
    pub fn delta(&self) -> f64 {
        match self {
            Move::TwoOpt { delta, .. } | Move::Relocate { delta, .. } | Move::Insert { delta, .. } => {
                *delta
            }
        }
    }

    /// Returns `true` if applying the move strictly lowers plan cost.
    pub fn is_improving(&self) -> bool {
        self.delta() < -IMPROVEMENT_EPS
    }
}

/// Working state of the improvement phase: one bin sequence per vehicle plus
/// the bins still waiting for capacity.
///
/// Sequences hold arena indices, so every move is a plain index operation.
/// Route costs are refreshed through the evaluator after each move.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    routes: Vec<Vec<usize>>,
    costs: Vec<f64>,
    pending: Vec<usize>,
    unassigned_penalty: f64,
}

impl SearchState {
    /// Creates a state and evaluates every route.
    pub fn new(
        routes: Vec<Vec<usize>>,
        pending: Vec<usize>,
        evaluator: &RouteEvaluator<'_>,
        unassigned_penalty: f64,
    ) -> Self {
        let costs = routes
            .iter()
            .enumerate()
            .map(|(v, seq)| evaluator.cost(seq, v))
            .collect();
        Self {
            routes,
            costs,
            pending,
            unassigned_penalty,
        }
    }

    /// Bin sequences, one per vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Cached cost of route `r`.
    pub fn route_cost(&self, r: usize) -> f64 {
        self.costs[r]
    }

    /// Bins left out for lack of capacity.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Penalty charged per pending bin.
    pub fn unassigned_penalty(&self) -> f64 {
        self.unassigned_penalty
    }

    /// Plan objective: route costs plus penalties for pending bins.
    pub fn total_cost(&self) -> f64 {
        self.costs.iter().sum::<f64>() + self.unassigned_penalty * self.pending.len() as f64
    }

    /// Consumes the state, returning routes and pending bins.
    pub fn into_parts(self) -> (Vec<Vec<usize>>, Vec<usize>) {
        (self.routes, self.pending)
    }

    /// Applies `mv` and re-evaluates the routes it touched.
    pub fn apply(&mut self, mv: &Move, evaluator: &RouteEvaluator<'_>) {
        match *mv {
            Move::TwoOpt { route, i, j, .. } => {
                self.routes[route][i..=j].reverse();
                self.refresh(route, evaluator);
            }
            Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
                ..
            } => {
                let bin = self.routes[from_route].remove(from_pos);
                self.routes[to_route].insert(to_pos, bin);
                self.refresh(from_route, evaluator);
                self.refresh(to_route, evaluator);
            }
            Move::Insert {
                pending_pos,
                route,
                pos,
                ..
            } => {
                let bin = self.pending.remove(pending_pos);
                self.routes[route].insert(pos, bin);
                self.refresh(route, evaluator);
            }
        }
    }

    fn refresh(&mut self, r: usize, evaluator: &RouteEvaluator<'_>) {
        self.costs[r] = evaluator.cost(&self.routes[r], r);
    }
}
