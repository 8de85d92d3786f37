/*!
Primes for sizing the bucket arrays of a [hash table](crate::db::hash).

A prime number of buckets helps smooth collisions when a digest is reduced modulo the number of buckets.
Exactness is not required for correctness of a table, though the search below is exact.
*/

/// The least prime at least as large as `n`.
pub fn next_prime(n: usize) -> usize {
    if n <= 2 {
        return 2;
    }
    let mut candidate = n | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

/// Trial division by odd numbers, up to the square root of `n`.
fn is_prime(n: usize) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        _ if n % 2 == 0 => false,
        _ => {
            let mut divisor = 3;
            while divisor <= n / divisor {
                if n % divisor == 0 {
                    return false;
                }
                divisor += 2;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let expected = [
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 3),
            (4, 5),
            (8, 11),
            (14, 17),
            (24, 29),
            (90, 97),
            (97, 97),
        ];
        for (n, p) in expected {
            assert_eq!(next_prime(n), p, "next prime of {n}");
        }
    }

    #[test]
    fn squares_of_primes_are_skipped() {
        assert_eq!(next_prime(25), 29);
        assert_eq!(next_prime(49), 53);
        assert_eq!(next_prime(121), 127);
    }

    #[test]
    fn default_table_size() {
        let p = next_prime(204_800);
        assert!(p >= 204_800);
        assert!(is_prime(p));
        assert!((204_800..p).all(|n| !is_prime(n)));
    }
}
