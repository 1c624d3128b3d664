//! HMAC command-line tool
//!
//! Thin JSON adapter over [`hashlab::hmac::HmacEngine`]. Mirrors the
//! historical argument convention: the third positional argument is an
//! algorithm name if it matches one, otherwise it is an expected tag
//! and the tool switches to verification mode.
//!
//! ```text
//! hmac "Hello World" "secret_key"                      # generate, sha256
//! hmac "Hello World" "secret_key" "" "sha512"          # generate, sha512
//! hmac "Hello World" "secret_key" sha512               # generate, sha512
//! hmac "Hello World" "secret_key" <expected> [algo]    # verify
//! ```

use clap::Parser;
use hashlab::hash::Algorithm;
use hashlab::hmac::HmacEngine;
use hashlab::provider::OpensslProvider;
use serde_json::json;

#[derive(Parser)]
#[command(name = "hmac")]
#[command(about = "HMAC generator and verifier with step-by-step output", long_about = None)]
struct Cli {
    /// List the supported algorithm identifiers and exit
    #[arg(long)]
    list_algorithms: bool,

    /// The message to authenticate
    message: Option<String>,

    /// The secret key
    key: Option<String>,

    /// Expected HMAC (enables verification) or an algorithm name
    expected_or_algorithm: Option<String>,

    /// Hash algorithm: md5, sha1, sha224, sha256, sha384, sha512
    algorithm: Option<String>,
}

enum Mode {
    Generate(Algorithm),
    Verify { expected: String, algorithm: Algorithm },
}

/// Applies the historical third-argument disambiguation rule.
///
/// An explicit fourth argument always selects the algorithm (unknown
/// names fall back to the documented sha256 default). A third argument
/// that names an algorithm selects it and stays in generation mode;
/// any other non-empty third argument is an expected tag.
fn resolve_mode(third: Option<&str>, fourth: Option<&str>) -> Mode {
    let algorithm = match fourth {
        Some(name) => Algorithm::parse_or_default(name),
        None => third
            .and_then(Algorithm::parse)
            .unwrap_or(Algorithm::Sha256),
    };

    match third {
        Some(tag) if !tag.is_empty() && Algorithm::parse(tag).is_none() => Mode::Verify {
            expected: tag.to_string(),
            algorithm,
        },
        _ => Mode::Generate(algorithm),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_algorithms {
        for algo in Algorithm::ALL {
            println!("{}", algo);
        }
        return Ok(());
    }

    let (Some(message), Some(key)) = (cli.message, cli.key) else {
        anyhow::bail!(
            "usage: hmac <message> <key> [expected_hmac] [algorithm]\n\
             algorithms: md5, sha1, sha224, sha256, sha384, sha512 (default: sha256)"
        );
    };

    let engine = HmacEngine::with_provider(Box::new(OpensslProvider::new()));
    let mode = resolve_mode(cli.expected_or_algorithm.as_deref(), cli.algorithm.as_deref());

    match mode {
        Mode::Generate(algorithm) => {
            let doc = match engine.generate(message.as_bytes(), key.as_bytes(), algorithm) {
                Ok(out) => json!({
                    "success": true,
                    "hmac": out.tag,
                    "implementation": "rust",
                    "steps": out.steps,
                }),
                Err(err) => json!({
                    "success": false,
                    "error": err.to_string(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Mode::Verify { expected, algorithm } => {
            let valid = engine.verify(message.as_bytes(), key.as_bytes(), &expected, algorithm);
            println!("{}", json!({ "valid": valid }));
        }
    }

    Ok(())
}
