//! Fork-join helpers shared by the data-parallel loops of this crate.
//!
//! With the `parallel` feature enabled these dispatch to `rayon`. Otherwise the exact same
//! closures run sequentially, in the same chunking, so both builds compute the same thing
//! (up to the floating-point accumulation order of the reductions).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of consecutive cells handled by a single task of a chunked loop.
pub(crate) const CHUNK_LEN: usize = 4096;

/// Calls `f(slab_id, slab)` on every consecutive `slab_len`-sized chunk of `data`.
///
/// The slabs are disjoint so `f` may write to them freely. The last slab may be shorter.
pub(crate) fn for_each_slab_mut<T, F>(data: &mut [T], slab_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if data.is_empty() || slab_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(slab_len)
        .enumerate()
        .for_each(|(id, slab)| f(id, slab));
    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(slab_len)
        .enumerate()
        .for_each(|(id, slab)| f(id, slab));
}

/// Calls `f(linear_index, cell)` on every element of `data`.
pub(crate) fn for_each_indexed_mut<T, F>(data: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync + Send,
{
    for_each_slab_mut(data, CHUNK_LEN, |chunk_id, chunk| {
        let base = chunk_id * CHUNK_LEN;
        for (i, cell) in chunk.iter_mut().enumerate() {
            f(base + i, cell);
        }
    });
}

/// Folds every chunk of `data` with `fold`, then merges the partial results with `merge`.
///
/// `fold` receives the linear index of the first element of the chunk it is given. `merge`
/// must be associative. Partial results are merged in chunk order so order-sensitive merges
/// (like concatenation) see the elements in scan order.
pub(crate) fn fold_chunks<T, A, I, F, M>(data: &[T], identity: I, fold: F, merge: M) -> A
where
    T: Sync,
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(A, usize, &[T]) -> A + Sync + Send,
    M: Fn(A, A) -> A + Sync + Send,
{
    #[cfg(feature = "parallel")]
    return data
        .par_chunks(CHUNK_LEN)
        .enumerate()
        .fold(&identity, |acc, (id, chunk)| fold(acc, id * CHUNK_LEN, chunk))
        .reduce(&identity, &merge);
    #[cfg(not(feature = "parallel"))]
    return data
        .chunks(CHUNK_LEN)
        .enumerate()
        .map(|(id, chunk)| fold(identity(), id * CHUNK_LEN, chunk))
        .fold(identity(), &merge);
}

#[cfg(test)]
mod test {
    use super::{fold_chunks, for_each_indexed_mut, for_each_slab_mut, CHUNK_LEN};

    #[test]
    fn fold_chunks_preserves_scan_order() {
        let data: Vec<usize> = (0..CHUNK_LEN * 3 + 17).collect();
        let collected = fold_chunks(
            &data,
            Vec::new,
            |mut acc, base, chunk| {
                for (i, v) in chunk.iter().enumerate() {
                    assert_eq!(base + i, *v);
                    acc.push(*v);
                }
                acc
            },
            |mut a, b| {
                a.extend(b);
                a
            },
        );

        assert_eq!(collected, data);
    }

    #[test]
    fn slabs_are_disjoint_and_complete() {
        let mut data = vec![0usize; 10 * 7 + 3];
        for_each_slab_mut(&mut data, 10, |id, slab| {
            for v in slab.iter_mut() {
                *v = id + 1;
            }
        });

        assert!(data.iter().all(|v| *v != 0));
        assert_eq!(data[0], 1);
        assert_eq!(data[72], 8);

        for_each_indexed_mut(&mut data, |i, v| *v = i);
        assert!(data.iter().enumerate().all(|(i, v)| i == *v));
    }
}
