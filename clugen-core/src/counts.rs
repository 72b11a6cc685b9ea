//! Deterministic corrections applied to per-cluster point counts.
//!
//! Both helpers mutate the slice in place. They are used by the default
//! sizing strategy and are exposed so custom sizing functions can reuse them.

/// Adjusts `counts` so that they sum to `target`.
///
/// While the total is too small the first smallest entry is incremented;
/// while it is too large the first largest entry is decremented. Each step
/// moves the total by one towards `target`. An empty slice is left untouched.
///
/// # Examples
/// ```
/// use clugen_core::fix_num_points;
///
/// let mut counts = vec![5, 2, 2, 9];
/// fix_num_points(&mut counts, 21);
/// assert_eq!(counts, vec![5, 4, 3, 9]);
///
/// fix_num_points(&mut counts, 18);
/// assert_eq!(counts, vec![5, 4, 3, 6]);
/// ```
pub fn fix_num_points(counts: &mut [usize], target: usize) {
    if counts.is_empty() {
        return;
    }
    let mut total: usize = counts.iter().sum();
    while total < target {
        if let Some(slot) = first_min_index(counts).and_then(|index| counts.get_mut(index)) {
            *slot += 1;
        }
        total += 1;
    }
    while total > target {
        if let Some(slot) = first_max_index(counts).and_then(|index| counts.get_mut(index)) {
            *slot -= 1;
        }
        total -= 1;
    }
}

/// Moves single points from the largest clusters into empty ones.
///
/// Does nothing when `allow_empty` is set, or when there are fewer points in
/// total than entries in `counts`. Otherwise every zero entry, in scan
/// order, receives one point taken from the current first largest entry.
/// The total is preserved.
///
/// # Examples
/// ```
/// use clugen_core::fix_empty;
///
/// let mut counts = vec![0, 6, 0, 1];
/// fix_empty(&mut counts, false);
/// assert_eq!(counts, vec![1, 4, 1, 1]);
///
/// let mut allowed = vec![0, 3];
/// fix_empty(&mut allowed, true);
/// assert_eq!(allowed, vec![0, 3]);
/// ```
pub fn fix_empty(counts: &mut [usize], allow_empty: bool) {
    if allow_empty {
        return;
    }
    let empty: Vec<usize> = counts
        .iter()
        .enumerate()
        .filter_map(|(index, &count)| (count == 0).then_some(index))
        .collect();
    let total: usize = counts.iter().sum();
    if empty.is_empty() || total < counts.len() {
        return;
    }
    for index in empty {
        if let Some(slot) = first_max_index(counts).and_then(|largest| counts.get_mut(largest)) {
            *slot -= 1;
        }
        if let Some(slot) = counts.get_mut(index) {
            *slot += 1;
        }
    }
}

fn first_min_index(counts: &[usize]) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .min_by_key(|&(_, count)| *count)
        .map(|(index, _)| index)
}

fn first_max_index(counts: &[usize]) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, usize)>, (index, &count)| match best {
            Some((_, largest)) if largest >= count => best,
            _ => Some((index, count)),
        })
        .map(|(index, _)| index)
}
