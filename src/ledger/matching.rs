//! Optimal one-to-one assignment between two sets of boxes.

use ndarray::Array2;

use crate::error::{LedgerError, Result};

/// Cost given to padding cells when the score matrix is squared up.
const PADDING_COST: f64 = 1e6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Matched `(row, col)` pairs whose score exceeds the threshold, in row order.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

/// Solve the assignment problem over a score matrix (higher is better).
///
/// The pairing maximises the total score over the whole matrix; pairs whose
/// score does not exceed `min_score` are then dropped and reported as
/// unmatched on both sides.
pub fn linear_assignment(scores: &Array2<f32>, min_score: f32) -> Result<AssignmentResult> {
    let (num_rows, num_cols) = scores.dim();

    if num_rows == 0 || num_cols == 0 {
        return Ok(AssignmentResult {
            matches: vec![],
            unmatched_rows: (0..num_rows).collect(),
            unmatched_cols: (0..num_cols).collect(),
        });
    }

    // Every real row of the padded square matrix lands on a real column when
    // rows <= cols (and vice versa), so minimising 1 - score over the padded
    // matrix maximises the total score over the real cells.
    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);
    for ((i, j), &score) in scores.indexed_iter() {
        padded[[i, j]] = 1.0 - score as f64;
    }

    let (row_to_col, _) =
        lapjv::lapjv(&padded).map_err(|e| LedgerError::Assignment(format!("{e:?}")))?;

    let mut matches = vec![];
    let mut unmatched_rows = vec![];
    let mut unmatched_cols_mask = vec![true; num_cols];

    for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
        if col_idx < num_cols && scores[[row_idx, col_idx]] > min_score {
            matches.push((row_idx, col_idx));
            unmatched_cols_mask[col_idx] = false;
        } else {
            unmatched_rows.push(row_idx);
        }
    }

    let unmatched_cols = unmatched_cols_mask
        .iter()
        .enumerate()
        .filter_map(|(j, &u)| u.then_some(j))
        .collect();

    Ok(AssignmentResult {
        matches,
        unmatched_rows,
        unmatched_cols,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn total(scores: &Array2<f32>, pairs: &[(usize, usize)]) -> f32 {
        pairs.iter().map(|&(i, j)| scores[[i, j]]).sum()
    }

    #[test]
    fn test_empty_sides() {
        let rows_only = Array2::<f32>::zeros((3, 0));
        let result = linear_assignment(&rows_only, 0.3).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_rows, vec![0, 1, 2]);

        let cols_only = Array2::<f32>::zeros((0, 2));
        let result = linear_assignment(&cols_only, 0.3).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_cols, vec![0, 1]);
    }

    #[test]
    fn test_optimal_not_greedy() {
        // Greedy would take (0, 0) first and strand row 1 on a weak pair.
        let scores = array![[0.9_f32, 0.8], [0.85, 0.1]];
        let result = linear_assignment(&scores, 0.3).unwrap();
        assert_eq!(result.matches, vec![(0, 1), (1, 0)]);
        assert!(result.unmatched_rows.is_empty());
        assert!(result.unmatched_cols.is_empty());
    }

    #[test]
    fn test_threshold_drops_weak_pairs() {
        let scores = array![[0.9_f32, 0.0], [0.0, 0.3]];
        let result = linear_assignment(&scores, 0.3).unwrap();
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_rows, vec![1]);
        assert_eq!(result.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_single_row_picks_best_column() {
        let scores = array![[0.35_f32, 0.7, 0.5]];
        let result = linear_assignment(&scores, 0.3).unwrap();
        assert_eq!(result.matches, vec![(0, 1)]);
        assert_eq!(result.unmatched_cols, vec![0, 2]);
    }

    #[test]
    fn test_rectangular_is_one_to_one_and_optimal() {
        let scores = array![
            [0.6_f32, 0.9],
            [0.7, 0.8],
            [0.95, 0.4],
        ];
        let result = linear_assignment(&scores, 0.3).unwrap();

        let mut rows: Vec<usize> = result.matches.iter().map(|m| m.0).collect();
        let mut cols: Vec<usize> = result.matches.iter().map(|m| m.1).collect();
        rows.dedup();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(rows.len(), result.matches.len());
        assert_eq!(cols.len(), result.matches.len());

        // Brute force over every injective pairing of the two columns.
        let mut best = 0.0_f32;
        for a in 0..3 {
            for b in 0..3 {
                if a != b {
                    best = best.max(scores[[a, 0]] + scores[[b, 1]]);
                }
            }
        }
        assert!((total(&scores, &result.matches) - best).abs() < 1e-6);
        assert_eq!(result.unmatched_rows, vec![1]);
    }
}
