use crate::domain::phone::phone_digits;

/// Levenshtein distance over Unicode scalar values. Insertions, deletions and
/// substitutions all cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1]
            } else {
                1 + dp[i - 1][j - 1].min(dp[i - 1][j]).min(dp[i][j - 1])
            };
        }
    }

    dp[m][n]
}

/// `1 - distance / longer length`, in `0.0..=1.0`. Two empty strings count as identical.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Position-by-position digit agreement between two phone numbers.
///
/// Formatting is ignored. Digits are compared at equal offsets only, so a
/// number shifted by one inserted digit scores low.
pub fn phone_similarity(a: &str, b: &str) -> f64 {
    let a = phone_digits(a);
    let b = phone_digits(b);
    if a == b {
        return 1.0;
    }

    let a = a.as_bytes();
    let b = b.as_bytes();
    let length = a.len().max(b.len());
    let matches = (0..length)
        .filter(|&i| matches!((a.get(i), b.get(i)), (Some(x), Some(y)) if x == y))
        .count();
    matches as f64 / length as f64
}
