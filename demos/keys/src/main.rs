//! Generate secp256r1 key pairs, sign messages, and verify signatures.
//!
//! Keys, messages, and signatures are passed and printed as hex. Private keys are the raw
//! 32-byte scalar, public keys the raw 64-byte `X || Y`, and signatures the raw 64-byte `R || S`.
//!
//! # Usage
//!
//! ## Generate a Key Pair
//!
//! ```sh
//! cargo run --release --bin tack-keys -- generate --seed 1
//! ```
//!
//! Omit `--seed` to draw from the operating system's random source.
//!
//! ## Sign a Message
//!
//! ```sh
//! cargo run --release --bin tack-keys -- sign --private-key <hex> --public-key <hex> --message 68656c6c6f
//! ```
//!
//! ## Verify a Signature
//!
//! ```sh
//! cargo run --release --bin tack-keys -- verify --public-key <hex> --message 68656c6c6f --signature <hex>
//! ```
//!
//! The process exits with a non-zero status if the signature is invalid.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::{rngs::StdRng, SeedableRng};
use std::process::ExitCode;
use tack_cryptography::{
    secp256r1::{KeyPairFactory, PrivateKey, PublicKey, Signature},
    Error, Signer, Verifier,
};
use tack_utils::{from_hex_formatted, hex};
use tracing::{error, info, Level};

fn hex_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(String))
}

/// Decodes a required hex argument.
fn decode(matches: &ArgMatches, name: &str) -> Option<Vec<u8>> {
    let value = matches.get_one::<String>(name)?;
    let decoded = from_hex_formatted(value);
    if decoded.is_none() {
        error!(arg = name, "not well-formed hex");
    }
    decoded
}

fn generate(matches: &ArgMatches) -> Result<(PublicKey, PrivateKey), Error> {
    match matches.get_one::<u64>("seed") {
        Some(seed) => KeyPairFactory::new(StdRng::seed_from_u64(*seed)).generate(),
        None => KeyPairFactory::default().generate(),
    }
}

fn sign(private_key: &[u8], public_key: &[u8], message: &[u8]) -> Result<Signature, Error> {
    PrivateKey::from_raw(private_key, public_key)?.sign(message)
}

fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool, Error> {
    let public_key = PublicKey::try_from(public_key)?;
    let signature = Signature::try_from(signature)?;
    Ok(public_key.verify(message, &signature))
}

/// Builds the command line parser.
fn command() -> Command {
    Command::new("tack-keys")
        .about("generate secp256r1 key pairs and sign or verify messages")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("generate").about("generate a key pair").arg(
                Arg::new("seed")
                    .long("seed")
                    .required(false)
                    .value_parser(value_parser!(u64))
                    .help("Derive the key pair from a seed (insecure, for testing only)"),
            ),
        )
        .subcommand(
            Command::new("sign")
                .about("sign a message")
                .arg(hex_arg("private-key"))
                .arg(hex_arg("public-key"))
                .arg(hex_arg("message")),
        )
        .subcommand(
            Command::new("verify")
                .about("verify a signature over a message")
                .arg(hex_arg("public-key"))
                .arg(hex_arg("message"))
                .arg(hex_arg("signature")),
        )
}

/// Prints the verdict and returns whether the signature is valid.
fn report_verification(result: Result<bool, Error>) -> bool {
    match result {
        Ok(true) => {
            println!("valid");
            true
        }
        Ok(false) => {
            println!("invalid");
            false
        }
        Err(err) => {
            info!(?err, "malformed input");
            println!("invalid");
            false
        }
    }
}

/// Runs the selected subcommand, returning whether it succeeded.
fn run(matches: &ArgMatches) -> bool {
    match matches.subcommand() {
        Some(("generate", matches)) => match generate(matches) {
            Ok((public_key, private_key)) => {
                println!("private key: {}", hex(private_key.raw_key()));
                println!("public key: {}", hex(public_key.raw_key()));
                true
            }
            Err(err) => {
                error!(?err, "unable to generate key pair");
                false
            }
        },
        Some(("sign", matches)) => {
            let (Some(private_key), Some(public_key), Some(message)) = (
                decode(matches, "private-key"),
                decode(matches, "public-key"),
                decode(matches, "message"),
            ) else {
                return false;
            };
            match sign(&private_key, &public_key, &message) {
                Ok(signature) => {
                    println!("signature: {signature}");
                    true
                }
                Err(err) => {
                    error!(?err, "unable to sign message");
                    false
                }
            }
        }
        Some(("verify", matches)) => {
            let (Some(public_key), Some(message), Some(signature)) = (
                decode(matches, "public-key"),
                decode(matches, "message"),
                decode(matches, "signature"),
            ) else {
                return false;
            };
            report_verification(verify(&public_key, &message, &signature))
        }
        _ => false,
    }
}

fn main() -> ExitCode {
    // Parse arguments
    let matches = command().get_matches();

    // Create logger
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    if run(&matches) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
