use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dhchap_crypto::{
    extract_key, generate_secret, parse_encoded_secret, transform_key, AuthError,
};
use hex_literal::hex;

const HOSTNQN: &str = "nqn.2014-08.org.nvmexpress:uuid:4c4c4544-0035-5910-804b-b2c04f444d31";

#[test]
fn fixed_secret_extracts_to_known_key() {
    // 32-byte key from RFC 7748 §6.1 (reused here as a stable test vector),
    // framed as a DHHC-1 secret by the provisioning helper.
    let key_bytes = hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    let mut payload = key_bytes.to_vec();
    payload.extend_from_slice(&crc32fast::hash(&key_bytes).to_le_bytes());
    let secret = format!("DHHC-1:00:{}:", STANDARD.encode(payload));

    let (hash_id, b64) = parse_encoded_secret(&secret).expect("well-formed");
    assert_eq!(hash_id, 0);
    let key = extract_key(b64, hash_id).expect("valid CRC");
    assert_eq!(key.as_bytes(), key_bytes);
    assert_eq!(key.hash(), 0);

    // hash id 0 passes through the transform untouched.
    let transformed = transform_key(&key, HOSTNQN).expect("identity transform");
    assert_eq!(transformed.as_bytes(), key_bytes);
}

#[test]
fn generated_secrets_cover_all_hash_ids() {
    for hash_id in 0u8..=3 {
        let secret = generate_secret(hash_id, 32).expect("generate");
        assert!(secret.starts_with("DHHC-1:"));
        assert!(secret.ends_with(':'));
        let (parsed, payload) = parse_encoded_secret(&secret).expect("parse");
        assert_eq!(parsed, hash_id);
        assert_eq!(extract_key(payload, parsed).expect("extract").len(), 32);
    }
}

#[test]
fn truncated_payload_is_an_invalid_length_not_a_crc_error() {
    // 40 decoded bytes: plausible-looking but not a legal payload size.
    let err = extract_key(&STANDARD.encode([0u8; 40]), 1).unwrap_err();
    assert!(matches!(err, AuthError::InvalidLength(40)));
}
