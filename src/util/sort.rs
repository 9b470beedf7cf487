use std::cmp::Ordering;

const QUICK_SORT_DEPTH_THRESHOLD: usize = 32;

/// osu!'s legacy introsort.
///
/// The sort is unstable and its order of equal elements must be matched
/// exactly since mania difficulty depends on it.
///
/// <https://github.com/ppy/osu/blob/e669e28dc9b6d79d82a36053e6a279de8dafddd1/osu.Game.Rulesets.Mania/MathUtils/LegacySortHelper.cs#L19>
pub fn osu_legacy<T, F>(keys: &mut [T], cmp: F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    if keys.len() < 2 {
        return;
    }

    depth_limited_quick_sort(
        keys,
        0,
        keys.len() as isize - 1,
        QUICK_SORT_DEPTH_THRESHOLD,
        &cmp,
    );
}

fn depth_limited_quick_sort<T, F>(
    keys: &mut [T],
    mut left: isize,
    mut right: isize,
    mut depth_limit: usize,
    cmp: &F,
) where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let key = |keys: &[T], idx: isize| keys[idx as usize];

    loop {
        if depth_limit == 0 {
            heap_sort(keys, left as usize, right as usize, cmp);

            return;
        }

        let mut i = left;
        let mut j = right;

        // * pre-sort the low, middle (pivot), and high values in place.
        let mid = i + ((j - i) >> 1);
        swap_if_greater(keys, cmp, i as usize, mid as usize);
        swap_if_greater(keys, cmp, i as usize, j as usize);
        swap_if_greater(keys, cmp, mid as usize, j as usize);

        let pivot = key(keys, mid);

        loop {
            while cmp(&key(keys, i), &pivot).is_lt() {
                i += 1;
            }

            while cmp(&pivot, &key(keys, j)).is_lt() {
                j -= 1;
            }

            if i > j {
                break;
            }

            if i < j {
                keys.swap(i as usize, j as usize);
            }

            i += 1;
            j -= 1;

            if i > j {
                break;
            }
        }

        depth_limit -= 1;

        if j - left <= right - i {
            if left < j {
                depth_limited_quick_sort(keys, left, j, depth_limit, cmp);
            }

            left = i;
        } else {
            if i < right {
                depth_limited_quick_sort(keys, i, right, depth_limit, cmp);
            }

            right = j;
        }

        if left >= right {
            break;
        }
    }
}

fn heap_sort<T, F>(keys: &mut [T], lo: usize, hi: usize, cmp: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let n = hi - lo + 1;

    for i in (1..=n / 2).rev() {
        down_heap(keys, i, n, lo, cmp);
    }

    for i in (2..=n).rev() {
        keys.swap(lo, lo + i - 1);
        down_heap(keys, 1, i - 1, lo, cmp);
    }
}

fn down_heap<T, F>(keys: &mut [T], mut i: usize, n: usize, lo: usize, cmp: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let d = keys[lo + i - 1];

    while i <= n / 2 {
        let mut child = 2 * i;

        if child < n && cmp(&keys[lo + child - 1], &keys[lo + child]).is_lt() {
            child += 1;
        }

        if !cmp(&d, &keys[lo + child - 1]).is_lt() {
            break;
        }

        keys[lo + i - 1] = keys[lo + child - 1];
        i = child;
    }

    keys[lo + i - 1] = d;
}

fn swap_if_greater<T, F>(keys: &mut [T], cmp: &F, a: usize, b: usize)
where
    F: Fn(&T, &T) -> Ordering,
{
    if a != b && cmp(&keys[a], &keys[b]).is_gt() {
        keys.swap(a, b);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn heap_sort_fallback() {
        let mut keys: Vec<_> = (0..200).rev().collect();
        heap_sort(&mut keys, 0, 199, &i32::cmp);

        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    proptest! {
        #[test]
        fn sorts_like_std(mut keys in prop::collection::vec(0_i32..50, 0..300)) {
            let mut expected = keys.clone();
            expected.sort_unstable();

            osu_legacy(&mut keys, i32::cmp);

            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn sorts_by_key_only(mut keys in prop::collection::vec((0_i32..20, 0_u8..255), 0..300)) {
            osu_legacy(&mut keys, |a, b| a.0.cmp(&b.0));

            prop_assert!(keys.windows(2).all(|w| w[0].0 <= w[1].0));
        }
    }
}
