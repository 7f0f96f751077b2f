//! Strictly increasing runs over the flattened, row-major value order.

pub const MIN_SEQUENCE_LEN: usize = 3;

/// Maximal runs where each value is strictly greater than the one before it,
/// keeping only runs of at least `min_len` cells.
pub fn increasing_runs(values: &[f64], min_len: usize) -> Vec<Vec<usize>> {
    let mut runs = Vec::new();
    if values.is_empty() {
        return runs;
    }

    let mut current = vec![0];
    for i in 1..values.len() {
        if values[i] > values[i - 1] {
            current.push(i);
        } else {
            if current.len() >= min_len {
                runs.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(i);
        }
    }
    if current.len() >= min_len {
        runs.push(current);
    }
    runs
}

/// Length of the longest run, 0 when there are none.
pub fn longest_run(runs: &[Vec<usize>]) -> usize {
    runs.iter().map(|r| r.len()).max().unwrap_or(0)
}
