use anyhow::Result;
use apisign_core::{Config, RequestSigner, SignatureAlgorithm};
use apisign_verify::{MemoryNonceStore, Verifier, VerifyError};
use log::debug;
use std::sync::Arc;

fn init() -> (Config, Verifier) {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::builder()
        .access_key("e2e-access")
        .secret_key("e2e-secret")
        .build()
        .expect("config must build");
    let verifier = Verifier::new(
        "e2e-access",
        "e2e-secret",
        Arc::new(MemoryNonceStore::new()),
    );

    (config, verifier)
}

#[test]
fn test_sign_then_verify() -> Result<()> {
    let (config, verifier) = init();

    let params = vec![
        ("action".to_string(), "listUsers".to_string()),
        ("page".to_string(), "1".to_string()),
        ("filter".to_string(), "name has space/slash".to_string()),
    ];
    let signer = RequestSigner::new(config, params.clone())?;
    let query = signer.signed_query();
    debug!("signed query: {query}");

    let verified = verifier.verify(&query).expect("verify must succeed");
    assert_eq!(verified.params, params);

    Ok(())
}

#[test]
fn test_replay_is_rejected() -> Result<()> {
    let (config, verifier) = init();

    let signer = RequestSigner::new(config, vec![("a".to_string(), "1".to_string())])?;
    let query = signer.signed_query();

    verifier.verify(&query).expect("first delivery must succeed");
    let err = verifier.verify(&query).unwrap_err();
    assert!(matches!(err, VerifyError::NonceReplayed), "{err}");

    Ok(())
}

#[test]
fn test_fresh_signers_are_independent() -> Result<()> {
    let (config, verifier) = init();

    // Same parameters, fresh signer per request: new nonce, both accepted.
    let params = vec![("a".to_string(), "1".to_string())];
    let first = RequestSigner::new(config.clone(), params.clone())?;
    let second = RequestSigner::new(config, params)?;
    assert_ne!(first.nonce(), second.nonce());

    verifier.verify(&first.signed_query()).expect("first");
    verifier.verify(&second.signed_query()).expect("second");

    Ok(())
}

#[test]
fn test_tampered_query_is_rejected() -> Result<()> {
    let (config, verifier) = init();

    let signer = RequestSigner::new(config, vec![("amount".to_string(), "10".to_string())])?;
    let query = signer.signed_query().replace("amount=10", "amount=9999");

    let err = verifier.verify(&query).unwrap_err();
    assert!(matches!(err, VerifyError::SignatureMismatch), "{err}");

    Ok(())
}

#[test]
fn test_legacy_md5_end_to_end() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::builder()
        .access_key("e2e-access")
        .secret_key("e2e-secret")
        .algorithm(SignatureAlgorithm::LegacyMd5)
        .build()?;
    let verifier = Verifier::new(
        "e2e-access",
        "e2e-secret",
        Arc::new(MemoryNonceStore::new()),
    )
    .with_algorithm(SignatureAlgorithm::LegacyMd5);

    let signer = RequestSigner::new(config, vec![("name".to_string(), "hello".to_string())])?;
    assert_eq!(signer.signature().len(), 32);
    verifier
        .verify(&signer.signed_query())
        .expect("legacy digest must verify");

    Ok(())
}
