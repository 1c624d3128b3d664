//! Bare SHA-512 digest tool
//!
//! Hashes its argument (or standard input with `--stdin`) with the
//! from-scratch primitive and prints the 128-character lowercase hex
//! digest.

use std::io::Read;

use clap::Parser;
use hashlab::hash::sha512;

#[derive(Parser)]
#[command(name = "sha512")]
#[command(about = "SHA-512 digest of a message", long_about = None)]
struct Cli {
    /// Read the message from standard input instead of an argument
    #[arg(long)]
    stdin: bool,

    /// The message to hash
    message: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let message = if cli.stdin {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        match cli.message {
            Some(m) => m.into_bytes(),
            None => anyhow::bail!("usage: sha512 <message> (or --stdin)"),
        }
    };

    println!("{}", sha512::hex_digest(&message));
    Ok(())
}
