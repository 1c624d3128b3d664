use hashlab::hash::{Algorithm, sha512};

#[test]
fn test_fips_vector_empty_message() {
    assert_eq!(
        sha512::hex_digest(b""),
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
         47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    );
}

#[test]
fn test_fips_vector_abc() {
    assert_eq!(
        sha512::hex_digest(b"abc"),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn test_fips_vector_two_blocks() {
    let message = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn\
                    hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";
    assert_eq!(
        sha512::hex_digest(message),
        "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018\
         501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909"
    );
}

#[test]
fn test_digest_output_shape() {
    let digest = sha512::digest(b"shape check");
    assert_eq!(digest.len(), sha512::DIGEST_SIZE);
    let hexed = sha512::hex_digest(b"shape check");
    assert_eq!(hexed.len(), 128);
    assert!(hexed.bytes().all(|b| b.is_ascii_hexdigit()));
    assert_eq!(hexed, hexed.to_ascii_lowercase());
}

#[test]
fn test_matches_reference_across_block_boundaries() {
    use sha2::{Digest, Sha512};

    // 111/112 straddle the single-block padding limit, 127/128 the block
    // size itself; a few larger sizes cover the multi-block loop.
    for len in [0, 1, 3, 55, 63, 64, 111, 112, 113, 127, 128, 129, 255, 256, 1000] {
        let message: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let reference = hex::encode(Sha512::digest(&message));
        assert_eq!(sha512::hex_digest(&message), reference, "len {}", len);
    }
}

#[test]
fn test_determinism() {
    let message = b"same input, same output";
    assert_eq!(sha512::digest(message), sha512::digest(message));
    // hashing a digest is just another message
    let once = sha512::digest(&sha512::digest(message));
    let twice = sha512::digest(&sha512::digest(message));
    assert_eq!(once, twice);
}

#[test]
fn test_algorithm_dispatch_agrees_with_primitive() {
    let via_enum = Algorithm::Sha512.digest(b"dispatch").unwrap();
    assert_eq!(via_enum, sha512::digest(b"dispatch").to_vec());
}
