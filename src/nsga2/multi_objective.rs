//! Pareto ranking utilities.
//!
//! - [`non_dominated_sort`]: fast non-dominated sorting on raw objective vectors
//! - [`constrained_non_dominated_sort`]: the same under constrained domination
//! - [`crowding_distance`]: crowding distance assignment for diversity preservation
//!
//! All objectives are **minimized**.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use super::types::Solution;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Fast non-dominated sorting on objective vectors.
///
/// # Panics
///
/// Panics if `objectives` is empty.
///
/// # Example
///
/// ```
/// use u_realty::nsga2::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by (3, 3)
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    assert!(!objectives.is_empty(), "objectives must not be empty");
    debug_assert!(
        objectives.iter().all(|o| o.len() == objectives[0].len()),
        "all objective vectors must have the same length"
    );
    sort_by_dominance(objectives.len(), |i, j| {
        dominance_cmp(&objectives[i], &objectives[j])
    })
}

/// Fast non-dominated sorting under constrained domination (Deb, 2000).
///
/// - a feasible solution dominates an infeasible one;
/// - of two infeasible solutions, the one with lower total violation dominates;
/// - two feasible solutions compare by Pareto dominance.
///
/// # Panics
///
/// Panics if `solutions` is empty.
pub fn constrained_non_dominated_sort(solutions: &[Solution]) -> NondominatedSortResult {
    assert!(!solutions.is_empty(), "solutions must not be empty");
    sort_by_dominance(solutions.len(), |i, j| {
        constrained_dominance_cmp(&solutions[i], &solutions[j])
    })
}

/// Deb's O(m·n²) front construction over an arbitrary dominance relation.
fn sort_by_dominance<F>(n: usize, cmp: F) -> NondominatedSortResult
where
    F: Fn(usize, usize) -> Dominance,
{
    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match cmp(i, j) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = vec![front_0];
    loop {
        let current = fronts.last().expect("fronts is initialized with front_0; never empty");
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Pareto dominance between two objective vectors.
pub(crate) fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Constrained dominance between two evaluated solutions.
pub(crate) fn constrained_dominance_cmp(a: &Solution, b: &Solution) -> Dominance {
    match (a.feasible, b.feasible) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        (false, false) => {
            if a.violation < b.violation {
                Dominance::Left
            } else if b.violation < a.violation {
                Dominance::Right
            } else {
                Dominance::Neither
            }
        }
        (true, true) => dominance_cmp(&a.objectives, &b.objectives),
    }
}

/// Crowding distance of each solution within one front.
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
/// Objectives with zero or non-finite range contribute nothing to interior
/// solutions.
///
/// # Example
///
/// ```
/// use u_realty::nsga2::multi_objective::crowding_distance;
///
/// let objectives = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
/// let distances = crowding_distance(&objectives);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = objectives[indices[n - 1]][obj_idx] - objectives[indices[0]][obj_idx];
        if !(range.is_finite() && range > 0.0) {
            continue;
        }

        for i in 1..(n - 1) {
            let prev = objectives[indices[i - 1]][obj_idx];
            let next = objectives[indices[i + 1]][obj_idx];
            distances[indices[i]] += (next - prev) / range;
        }
    }

    distances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsga2::types::{ConstraintMode, Evaluated};

    fn solution(objectives: Vec<f64>, constraints: Vec<f64>) -> Solution {
        Solution::new(
            Vec::new(),
            Evaluated::new(objectives, constraints),
            ConstraintMode::NonNegative,
        )
    }

    // ---- Non-dominated sort ----

    #[test]
    fn test_single_solution() {
        let result = non_dominated_sort(&[vec![1.0, 2.0]]);
        assert_eq!(result.ranks, vec![0]);
        assert_eq!(result.fronts, vec![vec![0]]);
    }

    #[test]
    fn test_chain_of_fronts() {
        let objs = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 1, 2]);
        assert_eq!(result.fronts.len(), 3);
    }

    #[test]
    fn test_mixed_fronts() {
        let objs = vec![
            vec![1.0, 5.0],
            vec![3.0, 3.0],
            vec![5.0, 1.0],
            vec![4.0, 4.0], // dominated by (3, 3)
            vec![6.0, 6.0], // dominated by (4, 4)
        ];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_identical_points_share_front() {
        let objs = vec![vec![2.0, 2.0], vec![2.0, 2.0], vec![2.0, 2.0]];
        let result = non_dominated_sort(&objs);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    #[test]
    fn test_single_objective_is_total_order() {
        let objs = vec![vec![-200.0], vec![-150.0], vec![-250.0]];
        let result = non_dominated_sort(&objs);
        assert_eq!(result.ranks, vec![1, 2, 0]);
    }

    #[test]
    fn test_three_objectives_mutually_non_dominated() {
        let objs = vec![
            vec![1.0, 5.0, 3.0],
            vec![3.0, 1.0, 5.0],
            vec![5.0, 3.0, 1.0],
            vec![4.0, 4.0, 4.0],
        ];
        let result = non_dominated_sort(&objs);
        assert!(result.ranks.iter().all(|&r| r == 0));
    }

    // ---- Constrained sort ----

    #[test]
    fn test_feasible_beats_infeasible() {
        // The infeasible point has far better objectives but still ranks behind.
        let sols = vec![
            solution(vec![-100.0, -100.0], vec![-1.0, 10.0]),
            solution(vec![5.0, 5.0], vec![1.0, 1.0]),
        ];
        let result = constrained_non_dominated_sort(&sols);
        assert_eq!(result.ranks, vec![1, 0]);
    }

    #[test]
    fn test_infeasible_ordered_by_violation() {
        let sols = vec![
            solution(vec![0.0], vec![-5.0, 0.0]),
            solution(vec![9.0], vec![-1.0, 0.0]),
            solution(vec![1.0], vec![-1.0, -2.0]),
        ];
        let result = constrained_non_dominated_sort(&sols);
        assert_eq!(result.ranks, vec![2, 0, 1]);
    }

    #[test]
    fn test_feasible_use_pareto_dominance() {
        let sols = vec![
            solution(vec![1.0, 5.0], vec![0.0, 0.0]),
            solution(vec![5.0, 1.0], vec![2.0, 2.0]),
            solution(vec![6.0, 6.0], vec![3.0, 3.0]),
        ];
        let result = constrained_non_dominated_sort(&sols);
        assert_eq!(result.ranks, vec![0, 0, 1]);
    }

    #[test]
    fn test_forced_infeasible_ranks_behind_feasible() {
        let forced = Solution::new(
            Vec::new(),
            Evaluated::new(vec![-1e9], vec![1.0, 1.0]).infeasible(),
            ConstraintMode::NonNegative,
        );
        let sols = vec![forced, solution(vec![0.0], vec![1.0, 1.0])];
        let result = constrained_non_dominated_sort(&sols);
        assert_eq!(result.ranks, vec![1, 0]);
    }

    // ---- Crowding distance ----

    #[test]
    fn test_crowding_small_fronts_are_infinite() {
        assert!(crowding_distance(&[vec![1.0, 2.0]])[0].is_infinite());
        let two = crowding_distance(&[vec![1.0, 3.0], vec![3.0, 1.0]]);
        assert!(two.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_crowding_evenly_spaced() {
        let objs = vec![
            vec![0.0, 4.0],
            vec![1.0, 3.0],
            vec![2.0, 2.0],
            vec![3.0, 1.0],
            vec![4.0, 0.0],
        ];
        let dist = crowding_distance(&objs);
        assert!(dist[0].is_infinite());
        assert!(dist[4].is_infinite());
        assert!((dist[1] - dist[2]).abs() < 1e-10);
        assert!((dist[2] - dist[3]).abs() < 1e-10);
        assert!((dist[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_crowding_zero_range_objective() {
        let objs = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let dist = crowding_distance(&objs);
        assert!(dist[1].is_finite());
        assert!((dist[1] - 1.0).abs() < 1e-10);
    }
}
