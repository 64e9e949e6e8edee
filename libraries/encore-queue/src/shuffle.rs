//! Shuffle engine
//!
//! Fisher-Yates over everything except an optional pinned head. The queue
//! shuffles canonical indices, never the entries themselves, so turning
//! shuffle off is just "use canonical order again".

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

/// Permute `items`, placing `pinned_first` (if present in `items`) at index 0
///
/// The remaining items are uniformly shuffled. A pin that is not in `items`
/// is ignored.
pub fn shuffle_pinned<T: Clone + PartialEq>(items: &[T], pinned_first: Option<&T>) -> Vec<T> {
    shuffle_pinned_with(items, pinned_first, &mut thread_rng())
}

/// `shuffle_pinned` with a caller-supplied RNG
pub fn shuffle_pinned_with<T, R>(items: &[T], pinned_first: Option<&T>, rng: &mut R) -> Vec<T>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let mut rest = items.to_vec();
    let head = pinned_first
        .and_then(|pinned| rest.iter().position(|item| item == pinned))
        .map(|index| rest.remove(index));

    rest.shuffle(rng);

    match head {
        Some(head) => {
            let mut out = Vec::with_capacity(items.len());
            out.push(head);
            out.extend(rest);
            out
        }
        None => rest,
    }
}
