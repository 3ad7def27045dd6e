//! Deterministic coin-tossing (DCT) compression.
//!
//! Rewrites `right`'s bit representation as "where, and how, do I first
//! differ from `left`" so the next level's parser can compare cores by
//! plain integer magnitude instead of re-scanning symbols.

use crate::core::Core;

/// Compress `right` relative to `left`. `left` is read-only; only `right`
/// (its `bit_rep`, `bit_size`, and `start`) is mutated.
pub fn compress(left: &Core, right: &mut Core) {
    if left.is_level1() {
        let left_3 = left.bit_rep & 3;
        let left_2 = (left.bit_rep >> 2) & 3;
        let left_middle = left.middle_count();
        let left_1 = (left.bit_rep >> 4) & 3;

        let right_3 = right.bit_rep & 3;
        let right_2 = (right.bit_rep >> 2) & 3;
        let right_middle = right.middle_count();
        let right_1 = (right.bit_rep >> 4) & 3;

        if left_3 != right_3 {
            right.bit_rep = if (left_3 & 1) != (right_3 & 1) {
                right_3 & 1
            } else {
                2 + ((right_3 >> 1) & 1)
            };
            right.bit_size = 2;
        } else if left_2 != right_2 {
            right.bit_rep = if (left_2 & 1) != (right_2 & 1) {
                4 + (right_2 & 1)
            } else {
                6 + ((right_2 >> 1) & 1)
            };
            right.bit_size = 64 - right.bit_rep.leading_zeros();
        } else if left_middle != right_middle {
            right.bit_rep = if left_middle < right_middle {
                if (left_1 & 1) != (right_2 & 1) {
                    4 * (left_middle + 1) + (right_2 & 1)
                } else {
                    2 * (2 * (left_middle + 1) + 1) + ((right_2 >> 1) & 1)
                }
            } else if (left_2 & 1) != (right_1 & 1) {
                4 * (right_middle + 1) + (right_1 & 1)
            } else {
                2 * (2 * (right_middle + 1) + 1) + ((right_1 >> 1) & 1)
            };
            right.bit_size = 64 - right.bit_rep.leading_zeros();
        } else if left_1 != right_1 {
            right.bit_rep = if (left_1 & 1) != (right_1 & 1) {
                4 * (left_middle + 1) + (right_1 & 1)
            } else {
                2 * (2 * (left_middle + 1) + 1) + ((right_1 >> 1) & 1)
            };
            right.bit_size = 64 - right.bit_rep.leading_zeros();
        } else {
            right.bit_rep = 2 * right.bit_size as u64;
            right.bit_size = 64 - right.bit_rep.leading_zeros();
        }
    } else {
        let first_differing_index = if left.bit_rep != right.bit_rep {
            (left.bit_rep ^ right.bit_rep).trailing_zeros()
        } else {
            right.bit_size
        };
        let first_differing_index = first_differing_index.min(left.bit_size.min(right.bit_size));
        right.bit_rep = 2 * first_differing_index as u64 + ((right.bit_rep >> first_differing_index) & 1);
        right.bit_size = if right.bit_rep == 0 { 2 } else { 64 - right.bit_rep.leading_zeros() };
        right.bit_size = right.bit_size.max(2);
    }

    // the compressed core is now dependent on its left neighbour, so its
    // coverage logically spans towards the left
    right.start = left.start;
}
