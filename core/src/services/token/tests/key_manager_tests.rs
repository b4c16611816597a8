//! Tests for RSA key loading

use crate::errors::KeyError;
use crate::services::token::RsaKeyPair;
use crate::testing::{
    test_keys_dir, EC_PRIVATE_KEY_PEM, EC_PUBLIC_KEY_PEM, OTHER_PUBLIC_KEY_PEM,
    TEST_PRIVATE_KEY_PEM, TEST_PRIVATE_KEY_PKCS1_PEM, TEST_PUBLIC_KEY_PEM,
};

#[test]
fn test_load_pkcs8_pair_from_pem() {
    let keys = RsaKeyPair::from_pem(TEST_PRIVATE_KEY_PEM.as_bytes(), TEST_PUBLIC_KEY_PEM.as_bytes())
        .unwrap();
    assert!(keys.can_sign());
    assert!(keys.probe().is_ok());
}

#[test]
fn test_load_pkcs1_private_key() {
    let keys = RsaKeyPair::from_pem(
        TEST_PRIVATE_KEY_PKCS1_PEM.as_bytes(),
        TEST_PUBLIC_KEY_PEM.as_bytes(),
    )
    .unwrap();
    assert!(keys.probe().is_ok());
}

#[test]
fn test_load_from_files() {
    let dir = test_keys_dir();
    let keys = RsaKeyPair::from_files(
        dir.join("test_private_key.pem"),
        dir.join("test_public_key.pem"),
    )
    .unwrap();

    assert!(keys.probe().is_ok());
    let debug = format!("{:?}", keys);
    assert!(debug.contains("test_public_key.pem"));
    assert!(!debug.contains("BEGIN"));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = test_keys_dir();
    let result = RsaKeyPair::from_files(dir.join("absent.pem"), dir.join("test_public_key.pem"));
    assert!(matches!(result, Err(KeyError::Read { .. })));
}

#[test]
fn test_garbage_is_format_error() {
    let result = RsaKeyPair::from_pem(b"not a key", TEST_PUBLIC_KEY_PEM.as_bytes());
    assert!(matches!(result, Err(KeyError::Format { .. })));

    let result = RsaKeyPair::from_pem(TEST_PRIVATE_KEY_PEM.as_bytes(), b"");
    assert!(matches!(result, Err(KeyError::Format { .. })));
}

#[test]
fn test_non_rsa_keys_are_rejected() {
    let result = RsaKeyPair::from_pem(EC_PRIVATE_KEY_PEM.as_bytes(), TEST_PUBLIC_KEY_PEM.as_bytes());
    assert!(matches!(result, Err(KeyError::Format { .. })));

    let result = RsaKeyPair::verify_only_from_pem(EC_PUBLIC_KEY_PEM.as_bytes());
    assert!(matches!(result, Err(KeyError::Format { .. })));
}

#[test]
fn test_probe_detects_mismatched_halves() {
    let keys = RsaKeyPair::from_pem(TEST_PRIVATE_KEY_PEM.as_bytes(), OTHER_PUBLIC_KEY_PEM.as_bytes())
        .unwrap();
    assert!(matches!(keys.probe(), Err(KeyError::Format { .. })));
}

#[test]
fn test_verify_only_pair() {
    let keys = RsaKeyPair::verify_only_from_pem(TEST_PUBLIC_KEY_PEM.as_bytes()).unwrap();
    assert!(!keys.can_sign());
    assert!(keys.encoding_key().is_none());
    assert!(keys.probe().is_ok());

    let from_file =
        RsaKeyPair::verify_only_from_file(test_keys_dir().join("test_public_key.pem")).unwrap();
    assert!(!from_file.can_sign());
}
