use upskill_utils::{seed_from_str, u8s_from_str};

#[test]
fn test_u8s_from_str_is_blake3() {
    assert_eq!(u8s_from_str("abc"), <[u8; 32]>::from(blake3::hash(b"abc")));
}

#[test]
fn test_seed_from_str_depends_on_nonce() {
    assert_eq!(seed_from_str("round", 1), seed_from_str("round", 1));
    assert_ne!(seed_from_str("round", 1), seed_from_str("round", 2));
    assert_ne!(seed_from_str("round", 1), seed_from_str("other", 1));
}
