//! Byte slice helpers shared by the optimizer and the planner.

/// Concatenate two byte slices into a fresh buffer.
pub fn concat(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

/// Length of the longest common prefix of `a` and `b`.
pub fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of `a` and `b`, never reaching into
/// the first `skip` bytes of either slice.
pub fn common_suffix_len(a: &[u8], b: &[u8], skip: usize) -> usize {
    let max = a.len().min(b.len()).saturating_sub(skip);
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take(max)
        .take_while(|(x, y)| x == y)
        .count()
}

/// Drop the common suffix of `a` and `b`, returning the remaining heads.
pub fn strip_common_suffix<'a, 'b>(a: &'a [u8], b: &'b [u8]) -> (&'a [u8], &'b [u8]) {
    let n = common_suffix_len(a, b, 0);
    (&a[..a.len() - n], &b[..b.len() - n])
}
