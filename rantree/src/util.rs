//! Small collection helpers.

/// A vector of `n` values from `producer`; empty when `n < 1`
pub fn fill_with<T, F: FnMut() -> T>(n: usize, mut producer: F) -> Vec<T> {
    if n < 1 {
        return Vec::new();
    }
    (0..n).map(|_| producer()).collect()
}

const PREALLOCATE_LIMIT: usize = 1024;

/// Like [`fill_with`], stopping at the first error
pub fn try_fill_with<T, E, F: FnMut() -> Result<T, E>>(n: usize, mut producer: F) -> Result<Vec<T>, E> {
    let mut out = Vec::with_capacity(n.min(PREALLOCATE_LIMIT));
    for _ in 0..n {
        out.push(producer()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_with() {
        assert!(fill_with(0, || 1).is_empty());

        let mut counter = 0;
        let values = fill_with(4, || {
            counter += 1;
            counter
        });
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_try_fill_with_stops_on_error() {
        let mut calls = 0;
        let result: Result<Vec<i32>, &str> = try_fill_with(5, || {
            calls += 1;
            if calls == 3 { Err("boom") } else { Ok(calls) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 3);

        let ok: Result<Vec<i32>, &str> = try_fill_with(2, || Ok(7));
        assert_eq!(ok, Ok(vec![7, 7]));
    }
}
