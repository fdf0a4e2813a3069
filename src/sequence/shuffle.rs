use crate::foundation::rng::Rng64;

/// Produce a uniformly random permutation of `{0, ..., n-1}`.
///
/// `order[k]` is the index (in grid order) of the tile revealed k-th. The
/// shuffle is an unbiased Fisher-Yates walk from the back of the slice, so
/// every permutation is equally likely given a uniform source. This is what
/// decorrelates reveal order from grid adjacency and turns the fill organic
/// instead of a raster sweep.
pub fn shuffled_order(n: usize, rng: &mut Rng64) -> Vec<u32> {
    let mut order: Vec<u32> = (0..n as u32).collect();
    for i in (1..n).rev() {
        let j = rng.index_below(i + 1);
        order.swap(i, j);
    }
    order
}
