//! Exact byte-sequence search over an opaque buffer.

/// Find the first offset at which `needle` occurs in `haystack`.
///
/// Comparison is exact byte equality. Returns `None` when the needle is empty
/// or longer than the haystack.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Iterate every offset at which `needle` occurs, overlapping matches included.
pub fn find_all<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let width = if needle.is_empty() || needle.len() > haystack.len() {
        // windows() panics on zero; an oversized width yields nothing
        haystack.len() + 1
    } else {
        needle.len()
    };

    haystack
        .windows(width)
        .enumerate()
        .filter(move |(_, w)| *w == needle)
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod find_first {
        use super::*;

        #[test]
        fn finds_tag_in_middle() {
            assert_eq!(find(b"XXmsttYY", b"mstt"), Some(2));
        }

        #[test]
        fn finds_tag_at_start() {
            assert_eq!(find(b"mlogrest", b"mlog"), Some(0));
        }

        #[test]
        fn finds_tag_flush_with_end() {
            assert_eq!(find(b"\x00\x00\x00\x00merr", b"merr"), Some(4));
        }

        #[test]
        fn lowest_offset_wins() {
            assert_eq!(find(b"msttmstt", b"mstt"), Some(0));
        }

        #[test]
        fn exact_case() {
            assert_eq!(find(b"MSTT", b"mstt"), None);
        }

        #[test]
        fn empty_haystack_is_absent() {
            assert_eq!(find(b"", b"mstt"), None);
        }

        #[test]
        fn short_haystack_is_absent() {
            assert_eq!(find(&[0u8; 3], b"mstt"), None);
            assert_eq!(find(&[0u8; 4], b"mstt"), None);
        }

        #[test]
        fn empty_needle_is_absent() {
            assert_eq!(find(b"anything", b""), None);
        }

        #[test]
        fn partial_match_at_end_is_absent() {
            assert_eq!(find(b"xxxmst", b"mstt"), None);
        }
    }

    mod find_every {
        use super::*;

        #[test]
        fn yields_all_offsets_in_order() {
            let offsets: Vec<_> = find_all(b"mstt..mstt.mstt", b"mstt").collect();
            assert_eq!(offsets, vec![0, 6, 11]);
        }

        #[test]
        fn includes_overlapping_matches() {
            let offsets: Vec<_> = find_all(b"aaaa", b"aa").collect();
            assert_eq!(offsets, vec![0, 1, 2]);
        }

        #[test]
        fn nothing_for_short_haystack() {
            assert_eq!(find_all(b"ms", b"mstt").count(), 0);
            assert_eq!(find_all(b"", b"mstt").count(), 0);
        }

        #[test]
        fn nothing_for_empty_needle() {
            assert_eq!(find_all(b"mstt", b"").count(), 0);
        }

        #[test]
        fn first_of_all_matches_find() {
            let data = b"..merr..merr";
            assert_eq!(find_all(data, b"merr").next(), find(data, b"merr"));
        }
    }

    proptest! {
        #[test]
        fn find_returns_smallest_matching_offset(
            haystack in proptest::collection::vec(prop_oneof![Just(b'm'), Just(b's'), Just(b't'), any::<u8>()], 0..64),
            needle in proptest::array::uniform4(prop_oneof![Just(b'm'), Just(b's'), Just(b't')]),
        ) {
            let expected = (0..haystack.len().saturating_sub(3))
                .find(|&i| haystack.len() >= 4 && haystack[i..i + 4] == needle);
            prop_assert_eq!(find(&haystack, &needle), expected);
        }

        #[test]
        fn find_is_idempotent(haystack in proptest::collection::vec(any::<u8>(), 0..64), needle in proptest::array::uniform4(any::<u8>())) {
            prop_assert_eq!(find(&haystack, &needle), find(&haystack, &needle));
        }
    }
}
