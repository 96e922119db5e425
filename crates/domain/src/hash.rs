// crates/domain/src/hash.rs
use word_count_ports::hashing::KeyHasher;

pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1: multiply, then xor in the next byte.
///
/// See <http://www.isthe.com/chongo/tech/comp/fnv/index.html>.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fnv1Hasher;

impl KeyHasher for Fnv1Hasher {
    fn name(&self) -> &'static str {
        "fnv1"
    }

    #[inline]
    fn hash32(&self, key: &[u8]) -> u32 {
        key.iter()
            .fold(FNV_OFFSET_BASIS, |h, &b| h.wrapping_mul(FNV_PRIME) ^ u32::from(b))
    }
}
