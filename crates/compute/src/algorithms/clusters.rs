//! Adjacency clusters over a numeric grid.
//!
//! Two orthogonally adjacent cells are linked when their values differ by at
//! most [`CLUSTER_DELTA`]. Components are found with a stack-based DFS in
//! row-major seed order; each component lists cells in visit order.

pub const CLUSTER_DELTA: f64 = 5.0;

/// Connected components of size > 1, as flat row-major indices.
///
/// `values` must hold `rows * cols` entries in row-major order.
pub fn adjacency_clusters(values: &[f64], rows: usize, cols: usize, delta: f64) -> Vec<Vec<usize>> {
    if rows == 0 || cols == 0 || values.len() != rows * cols {
        return Vec::new();
    }

    let mut visited = vec![false; values.len()];
    let mut clusters = Vec::new();

    for seed in 0..values.len() {
        if visited[seed] {
            continue;
        }

        let mut cluster = Vec::new();
        let mut stack = vec![seed];

        while let Some(idx) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            cluster.push(idx);

            let val = values[idx];
            for n in neighbors(idx, rows, cols) {
                if !visited[n] && (values[n] - val).abs() <= delta {
                    stack.push(n);
                }
            }
        }

        if cluster.len() > 1 {
            clusters.push(cluster);
        }
    }

    clusters
}

/// Up, down, left, right, clipped to the grid.
fn neighbors(idx: usize, rows: usize, cols: usize) -> impl Iterator<Item = usize> {
    let r = idx / cols;
    let c = idx % cols;
    let up = (r > 0).then(|| idx - cols);
    let down = (r + 1 < rows).then(|| idx + cols);
    let left = (c > 0).then(|| idx - 1);
    let right = (c + 1 < cols).then(|| idx + 1);
    [up, down, left, right].into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_misshapen_input() {
        assert!(adjacency_clusters(&[], 0, 0, CLUSTER_DELTA).is_empty());
        assert!(adjacency_clusters(&[1.0, 2.0, 3.0], 2, 2, CLUSTER_DELTA).is_empty());
    }

    #[test]
    fn all_close_values_form_one_cluster() {
        let values = [12.0, 14.0, 13.0, 11.0, 15.0, 15.0, 10.0, 13.0, 12.0];
        let clusters = adjacency_clusters(&values, 3, 3, CLUSTER_DELTA);
        assert_eq!(clusters.len(), 1);
        let mut members = clusters[0].clone();
        members.sort();
        assert_eq!(members, (0..9).collect::<Vec<_>>());
        assert_eq!(clusters[0][0], 0);
    }

    #[test]
    fn spike_splits_off_and_singletons_are_dropped() {
        // 1  2  90
        // 50 51 91
        let values = [1.0, 2.0, 90.0, 50.0, 51.0, 91.0];
        let clusters = adjacency_clusters(&values, 2, 3, CLUSTER_DELTA);
        assert_eq!(clusters, vec![vec![0, 1], vec![2, 5], vec![3, 4]]);
    }

    #[test]
    fn diagonal_neighbours_do_not_link() {
        // 1  50
        // 60 2
        let values = [1.0, 50.0, 60.0, 2.0];
        assert!(adjacency_clusters(&values, 2, 2, CLUSTER_DELTA).is_empty());
    }

    #[test]
    fn delta_is_inclusive() {
        let values = [10.0, 15.0];
        assert_eq!(adjacency_clusters(&values, 1, 2, CLUSTER_DELTA), vec![vec![0, 1]]);
    }

    #[test]
    fn visit_order_follows_the_stack() {
        // 0 1
        // 2 3, all within delta. From 0: push down(2), right(1); pop 1 first.
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(adjacency_clusters(&values, 2, 2, CLUSTER_DELTA), vec![vec![0, 1, 3, 2]]);
    }
}
