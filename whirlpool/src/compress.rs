use crate::consts::{C0, RC};

/// Applies substitution, row shift and MDS diffusion to an 8x8 byte matrix
/// stored as eight big-endian row words.
#[inline(always)]
fn round(k: &[u64; 8]) -> [u64; 8] {
    let mut l = [0u64; 8];
    for (i, v) in l.iter_mut().enumerate() {
        // column `t` reads byte `t` of row `i - t`
        *v = (0..8).fold(0, |acc, t| {
            let b = (k[(i + 8 - t) % 8] >> (56 - 8 * t)) & 0xff;
            acc ^ C0[b as usize].rotate_right(8 * t as u32)
        });
    }
    l
}

/// Whirlpool compression function.
///
/// Runs the 10-round block cipher `W` keyed by `state` over `block` and
/// folds the result back in Miyaguchi-Preneel fashion:
/// `state = W_state(block) ^ state ^ block`.
pub fn compress(state: &mut [u64; 8], block: &[u8; 64]) {
    let mut m = [0u64; 8];
    for (v, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *v = u64::from_be_bytes(buf);
    }

    let mut key = *state;
    let mut cipher = [0u64; 8];
    for i in 0..8 {
        cipher[i] = m[i] ^ key[i];
    }

    for rc in RC.iter() {
        key = round(&key);
        key[0] ^= rc;
        let l = round(&cipher);
        for i in 0..8 {
            cipher[i] = l[i] ^ key[i];
        }
    }

    for i in 0..8 {
        state[i] ^= cipher[i] ^ m[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SBOX;

    const E: [u8; 16] = [
        0x1, 0xb, 0x9, 0xc, 0xd, 0x6, 0xf, 0x3, 0xe, 0x8, 0x7, 0x4, 0xa, 0x2, 0x5, 0x0,
    ];
    const R: [u8; 16] = [
        0x7, 0xc, 0xb, 0xd, 0xe, 0x4, 0x9, 0xf, 0x6, 0x3, 0x8, 0xa, 0x2, 0x5, 0x1, 0x0,
    ];

    fn gf_mul(mut a: u8, mut b: u8) -> u8 {
        let mut p = 0;
        while b != 0 {
            if b & 1 != 0 {
                p ^= a;
            }
            let hi = a & 0x80;
            a <<= 1;
            if hi != 0 {
                a ^= 0x1d;
            }
            b >>= 1;
        }
        p
    }

    #[test]
    fn sbox_matches_mini_boxes() {
        let mut e_inv = [0u8; 16];
        for (i, &v) in E.iter().enumerate() {
            e_inv[v as usize] = i as u8;
        }
        for x in 0..256usize {
            let a = E[x >> 4];
            let b = e_inv[x & 0xf];
            let r = R[(a ^ b) as usize];
            let s = (E[(a ^ r) as usize] << 4) | e_inv[(b ^ r) as usize];
            assert_eq!(SBOX[x], s, "S-box entry {:#04x}", x);
        }
    }

    #[test]
    fn sbox_is_a_permutation() {
        let mut seen = [false; 256];
        for &s in SBOX.iter() {
            assert!(!seen[s as usize]);
            seen[s as usize] = true;
        }
    }

    #[test]
    fn c0_is_sbox_times_mds_row() {
        let row = [1u8, 1, 4, 1, 8, 5, 2, 9];
        for x in 0..256usize {
            let expected = row
                .iter()
                .fold(0u64, |acc, &c| (acc << 8) | gf_mul(SBOX[x], c) as u64);
            assert_eq!(C0[x], expected, "C0 entry {:#04x}", x);
        }
    }

    #[test]
    fn round_constants() {
        assert_eq!(RC[0], 0x1823c6e887b8014f);
        assert_eq!(RC[4], 0x157737e59ff04ada);
        assert_eq!(RC[9], 0xca2dbf07ad5a8333);
        for (r, &rc) in RC.iter().enumerate() {
            assert_eq!((rc >> 56) as u8, SBOX[8 * r]);
            assert_eq!(rc as u8, SBOX[8 * r + 7]);
        }
    }

    #[test]
    fn round_of_zero_matrix() {
        // every byte becomes S(0) = 0x18, so each row is C0[0x00]
        // recombined across all eight columns
        let l = round(&[0u64; 8]);
        let expected = (0..8).fold(0, |acc, t| acc ^ C0[0].rotate_right(8 * t));
        assert!(l.iter().all(|&v| v == expected));
    }

    #[test]
    fn compress_is_deterministic_and_stateful() {
        let block = [0x61u8; 64];
        let mut a = [0u64; 8];
        let mut b = [0u64; 8];
        compress(&mut a, &block);
        compress(&mut b, &block);
        assert_eq!(a, b);
        assert_ne!(a, [0u64; 8]);

        compress(&mut a, &block);
        assert_ne!(a, b);
    }
}
