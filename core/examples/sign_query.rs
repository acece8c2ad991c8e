//! Sign a parameter set and print the client-sendable query string.
//!
//! ```shell
//! cargo run --example sign_query
//! ```

use apisign_core::{Config, RequestSigner, Result, SignatureAlgorithm};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::builder()
        .access_key("demo-access")
        .secret_key("demo-secret")
        .build()?;

    let params = vec![
        ("action".to_string(), "listUsers".to_string()),
        ("page".to_string(), "1".to_string()),
    ];

    let signer = RequestSigner::new(config.clone(), params.clone())?;
    println!("signature: {}", signer.signature());
    println!("query:     {}", signer.signed_query());

    // The legacy digest for peers still on the MD5 construction.
    let legacy = Config::builder()
        .access_key("demo-access")
        .secret_key("demo-secret")
        .algorithm(SignatureAlgorithm::LegacyMd5)
        .build()?;
    let signer = RequestSigner::new(legacy, params)?;
    println!("legacy:    {}", signer.signature());

    Ok(())
}
