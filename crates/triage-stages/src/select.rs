//! Sorting and bounded-selection primitives with fallible comparators.
//!
//! Ordering callbacks can fail, so both primitives thread `Result` through
//! the comparison. `bounded_select` keeps a size-k heap instead of sorting
//! everything; its output is observationally identical to
//! "stable sort, take first k" because equal ranks are broken by original
//! index. The heap lives on the invocation stack and is never shared.

use std::cmp::Ordering;

use triage_core::prelude::{Error, Result};

/// Stable sort with a fallible comparator.
///
/// The first comparator error aborts the sort; remaining comparisons are
/// short-circuited to `Equal` so `sort_by` can unwind normally, then the
/// error is returned.
pub fn sort_stable_by<T>(
    items: &mut [T],
    mut cmp: impl FnMut(&T, &T) -> Result<Ordering>,
) -> Result<()> {
    let mut first_err: Option<Error> = None;
    items.sort_by(|a, b| {
        if first_err.is_some() {
            return Ordering::Equal;
        }
        match cmp(a, b) {
            Ok(ord) => ord,
            Err(e) => {
                first_err = Some(e);
                Ordering::Equal
            }
        }
    });
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Select the k smallest items under `cmp`, in the order a stable sort would
/// produce them.
///
/// Maintains a max-heap of the k best seen so far (root = worst kept), so
/// the cost is O(n log k) comparisons instead of O(n log n). Ties resolve to
/// the earlier original index, which is what makes the result equal to
/// sort-then-truncate.
pub fn bounded_select<T>(
    input: Vec<T>,
    k: usize,
    mut cmp: impl FnMut(&T, &T) -> Result<Ordering>,
) -> Result<Vec<T>> {
    if k == 0 {
        return Ok(Vec::new());
    }

    // Total order: comparator rank, then original index.
    let mut total = |a: &(T, usize), b: &(T, usize)| -> Result<Ordering> {
        match cmp(&a.0, &b.0)? {
            Ordering::Equal => Ok(a.1.cmp(&b.1)),
            other => Ok(other),
        }
    };

    let mut heap: Vec<(T, usize)> = Vec::with_capacity(k.min(input.len()));
    for (idx, item) in input.into_iter().enumerate() {
        let entry = (item, idx);
        if heap.len() < k {
            heap.push(entry);
            let last = heap.len() - 1;
            sift_up(&mut heap, last, &mut total)?;
        } else if total(&entry, &heap[0])? == Ordering::Less {
            heap[0] = entry;
            sift_down(&mut heap, 0, &mut total)?;
        }
    }

    sort_stable_by(&mut heap, |a, b| total(a, b))?;
    Ok(heap.into_iter().map(|(item, _)| item).collect())
}

fn sift_up<T>(
    heap: &mut [T],
    mut i: usize,
    cmp: &mut impl FnMut(&T, &T) -> Result<Ordering>,
) -> Result<()> {
    while i > 0 {
        let parent = (i - 1) / 2;
        if cmp(&heap[i], &heap[parent])? == Ordering::Greater {
            heap.swap(i, parent);
            i = parent;
        } else {
            break;
        }
    }
    Ok(())
}

fn sift_down<T>(
    heap: &mut [T],
    mut i: usize,
    cmp: &mut impl FnMut(&T, &T) -> Result<Ordering>,
) -> Result<()> {
    loop {
        let left = 2 * i + 1;
        let right = 2 * i + 2;
        let mut largest = i;
        if left < heap.len() && cmp(&heap[left], &heap[largest])? == Ordering::Greater {
            largest = left;
        }
        if right < heap.len() && cmp(&heap[right], &heap[largest])? == Ordering::Greater {
            largest = right;
        }
        if largest == i {
            return Ok(());
        }
        heap.swap(i, largest);
        i = largest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icmp(a: &i64, b: &i64) -> Result<Ordering> {
        Ok(a.cmp(b))
    }

    #[test]
    fn test_bounded_select_matches_sort_truncate() {
        let input = vec![5i64, 3, 8, 1, 9, 2, 7, 7, 0, 4];
        for k in 0..=input.len() {
            let selected = bounded_select(input.clone(), k, icmp).unwrap();
            let mut sorted = input.clone();
            sorted.sort();
            sorted.truncate(k);
            assert_eq!(selected, sorted, "k = {}", k);
        }
    }

    #[test]
    fn test_bounded_select_tie_keeps_earlier_index() {
        // Equal ranks: the element seen first must win the last slot.
        let input = vec![(1i64, 'a'), (1, 'b'), (0, 'c')];
        let out = bounded_select(input, 2, |a, b| Ok(a.0.cmp(&b.0))).unwrap();
        assert_eq!(out, vec![(0, 'c'), (1, 'a')]);
    }

    #[test]
    fn test_comparator_error_propagates() {
        let input = vec![1i64, 2, 3];
        let err = bounded_select(input, 2, |_, _| {
            Err(Error::Invocation("boom".into()))
        })
        .unwrap_err();
        assert!(matches!(err, Error::Invocation(_)));
    }

    #[test]
    fn test_sort_stable_by_error_propagates() {
        let mut items = vec![3i64, 1, 2];
        let result = sort_stable_by(&mut items, |_, _| Err(Error::Invocation("boom".into())));
        assert!(result.is_err());
    }
}
