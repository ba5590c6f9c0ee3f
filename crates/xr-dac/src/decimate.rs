/// Stride decimation: `out[i] = src[i * stride]`, `out.len() == ceil(len / stride)`.
///
/// # Panics
/// Panics if `stride == 0`.
pub fn decimate<T: Copy>(src: &[T], stride: usize) -> Vec<T> {
    assert!(stride > 0, "decimation stride must be >= 1");
    src.iter().step_by(stride).copied().collect()
}
