//! Loading chain configuration from disk

use std::io::Write;
use tempfile::NamedTempFile;
use vesta_core::{ChainConfig, ConfigError};
use vesta_primitives::Address;
use vesta_types::Signer;

#[test]
fn test_load_chain_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    let json = r#"{
        "chain_id": 1,
        "homestead_block": 1150000,
        "dao_fork_block": 1920000,
        "dao_fork_support": true,
        "dao": {
            "drain_list": [
                "0xd4fe7bc31cedb7bfb8a345f31e668033056b2728",
                "0xb3fb0e5aba0e20e5c49d252dfd30e102b171a425"
            ],
            "refund_contract": "0xbf4ed7b27f1d666546e30d74d50d173d20bca754"
        },
        "eip158_block": 2675000,
        "byzantium_block": 4370000
    }"#;
    file.write_all(json.as_bytes()).unwrap();

    let config = ChainConfig::from_file(file.path()).unwrap();
    assert_eq!(config.dao.drain_list.len(), 2);
    assert_eq!(
        config.dao.refund_contract,
        Address::from_hex("0xbf4ed7b27f1d666546e30d74d50d173d20bca754").unwrap()
    );
    assert!(config.is_dao_fork(1_920_000));
    assert!(!config.is_eip158(2_674_999));
    assert!(config.is_eip158(2_675_000));
    assert!(config.is_byzantium(4_370_000));
    assert_eq!(config.signer(1_149_999), Signer::Frontier);
    assert_eq!(config.signer(1_150_000), Signer::Homestead);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ChainConfig::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ \"chain_id\": ").unwrap();
    let err = ChainConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
