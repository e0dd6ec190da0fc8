pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Derives the generator seed for the `nonce`-th instance drawn from `rand_hash`.
pub fn seed_from_str(rand_hash: &str, nonce: u64) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(rand_hash.as_bytes());
    hasher.update(&nonce.to_le_bytes());
    hasher.finalize().into()
}
