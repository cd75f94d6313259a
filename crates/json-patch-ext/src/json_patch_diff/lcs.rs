//! Longest-common-subsequence alignment of two arrays under deep equality.

use serde_json::Value;

use crate::json_equal::deep_equal;

/// Above this many DP cells the middle section is not aligned at all and
/// every position is paired with its counterpart instead.
const MAX_TABLE_CELLS: usize = 4_000_000;

/// Returns the matched `(src_index, dst_index)` pairs of an LCS of `src`
/// and `dst`, in ascending order.
///
/// Ties are broken towards skipping source elements first, which keeps the
/// earliest target elements matched.
pub fn lcs(src: &[Value], dst: &[Value]) -> Vec<(usize, usize)> {
    let prefix = src
        .iter()
        .zip(dst)
        .take_while(|(a, b)| deep_equal(a, b))
        .count();
    let suffix = src[prefix..]
        .iter()
        .rev()
        .zip(dst[prefix..].iter().rev())
        .take_while(|(a, b)| deep_equal(a, b))
        .count();

    let src_mid = &src[prefix..src.len() - suffix];
    let dst_mid = &dst[prefix..dst.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();
    pairs.extend(
        middle(src_mid, dst_mid)
            .into_iter()
            .map(|(i, j)| (i + prefix, j + prefix)),
    );
    let src_tail = src.len() - suffix;
    let dst_tail = dst.len() - suffix;
    pairs.extend((0..suffix).map(|k| (src_tail + k, dst_tail + k)));
    pairs
}

fn middle(src: &[Value], dst: &[Value]) -> Vec<(usize, usize)> {
    let (n, m) = (src.len(), dst.len());
    if n == 0 || m == 0 || (n + 1) * (m + 1) > MAX_TABLE_CELLS {
        return Vec::new();
    }

    // table[i][j] = LCS length of src[i..] and dst[j..]
    let width = m + 1;
    let mut equal = vec![false; n * m];
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let eq = deep_equal(&src[i], &dst[j]);
            equal[i * m + j] = eq;
            table[i * width + j] = if eq {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[0] as usize);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if equal[i * m + j] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}
