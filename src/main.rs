use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use serde_json::Value;
use std::error::Error;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use compact_token::types::Output;
use compact_token::{CodecConfig, TokenCodec, TokenError};

mod helpers;
use helpers::print_output::print_output;

const SECRET_ENV: &str = "COMPACT_TOKEN_SECRET";

fn token_arg() -> Arg<'static, 'static> {
    Arg::with_name("token")
        .help("The token to process")
        .required(true)
        .index(1)
}

fn secret_arg() -> Arg<'static, 'static> {
    Arg::with_name("secret")
        .help("Shared HMAC secret")
        .short("s")
        .long("secret")
        .takes_value(true)
        .env(SECRET_ENV)
        .hide_env_values(true)
}

fn secret<'a>(matches: &'a ArgMatches) -> Result<&'a str, Box<dyn Error>> {
    matches
        .value_of("secret")
        .ok_or_else(|| format!("no secret given; pass --secret or set {}", SECRET_ENV).into())
}

fn error_output(err: &TokenError) -> Output {
    let mut output = Output::new("error", err.to_string());
    output.kind = Some(err.kind().to_string());
    output
}

fn usage_error(kind: &str, detail: String) -> Output {
    let mut output = Output::new("error", detail);
    output.kind = Some(kind.to_string());
    output
}

fn parse_claims(raw: &str) -> Result<Value, Output> {
    serde_json::from_str(raw)
        .map_err(|e| usage_error("invalid_claims", format!("Claims are not valid JSON: {}", e)))
}

fn parse_ttl(raw: &str) -> Result<i64, Output> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| usage_error("invalid_ttl", format!("TTL '{}' is not an integer: {}", raw, e)))
}

// Each command yields its report and the process exit code.
fn run_encode(codec: &TokenCodec, matches: &ArgMatches) -> Result<(Output, i32), Box<dyn Error>> {
    let claims = match parse_claims(matches.value_of("claims").unwrap_or("{}")) {
        Ok(claims) => claims,
        Err(output) => return Ok((output, 2)),
    };
    let secret = secret(matches)?;

    let result = if matches.is_present("no-expiry") {
        codec.encode_non_expiring(&claims, secret)
    } else {
        let ttl = match matches.value_of("ttl").map(parse_ttl) {
            Some(Ok(ttl)) => ttl,
            Some(Err(output)) => return Ok((output, 2)),
            None => codec.config().default_ttl_seconds,
        };
        codec.encode(&claims, ttl, secret)
    };

    Ok(match result {
        Ok(token) => {
            let mut output = Output::new("issued", "Token issued");
            output.token = Some(token);
            (output, 0)
        }
        Err(e) => (error_output(&e), 2),
    })
}

fn run_verify(codec: &TokenCodec, matches: &ArgMatches) -> Result<(Output, i32), Box<dyn Error>> {
    let token = matches.value_of("token").unwrap_or_default();
    let secret = secret(matches)?;
    Ok(match codec.verify(token, secret) {
        Ok(true) => {
            let mut output = Output::new("valid", "Signature is valid");
            output.verified = Some(true);
            (output, 0)
        }
        Ok(false) => {
            let mut output = Output::new("invalid", "Signature does not match");
            output.verified = Some(false);
            (output, 1)
        }
        Err(e) => (error_output(&e), 2),
    })
}

fn run_decode(codec: &TokenCodec, matches: &ArgMatches) -> (Output, i32) {
    let token = matches.value_of("token").unwrap_or_default();
    match codec.decode(token) {
        Ok(claims) => {
            let mut output = Output::new("decoded", "Signature not checked; use `verify`");
            output.claims = Some(Value::Object(claims));
            (output, 0)
        }
        Err(e) => (error_output(&e), 2),
    }
}

fn run_inspect(codec: &TokenCodec, matches: &ArgMatches) -> (Output, i32) {
    let token = matches.value_of("token").unwrap_or_default();
    match codec.inspect(token) {
        Ok((header, claims)) => {
            let mut output = Output::new("inspected", "");
            output.header = Some(header);
            output.claims = Some(claims);
            (output, 0)
        }
        Err(e) => (error_output(&e), 2),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = App::new("compact-token")
        .version("1.0")
        .about("Issues, verifies and decodes HMAC-signed compact tokens")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("format")
                .help("The output format (text, json)")
                .short("f")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .default_value("text")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Signs a JSON object of claims into a token")
                .arg(
                    Arg::with_name("claims")
                        .help("Claims as a JSON object")
                        .short("c")
                        .long("claims")
                        .takes_value(true)
                        .default_value("{}"),
                )
                .arg(
                    Arg::with_name("ttl")
                        .help("Lifetime in seconds (may be zero or negative)")
                        .short("t")
                        .long("ttl")
                        .takes_value(true)
                        .allow_hyphen_values(true)
                        .conflicts_with("no-expiry"),
                )
                .arg(
                    Arg::with_name("no-expiry")
                        .help("Issue a token without an expiration")
                        .long("no-expiry"),
                )
                .arg(secret_arg()),
        )
        .subcommand(
            SubCommand::with_name("verify")
                .about("Checks a token's signature")
                .arg(token_arg())
                .arg(secret_arg()),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("Prints the claims of an unexpired token")
                .arg(token_arg()),
        )
        .subcommand(
            SubCommand::with_name("inspect")
                .about("Prints header and claims without any checks")
                .arg(token_arg()),
        )
        .get_matches();

    let format = matches
        .subcommand()
        .1
        .and_then(|sub| sub.value_of("format"))
        .or_else(|| matches.value_of("format"))
        .unwrap_or("text");
    let codec = TokenCodec::new().with_config(CodecConfig::from_env());

    let (output, code) = match matches.subcommand() {
        ("encode", Some(sub)) => run_encode(&codec, sub)?,
        ("verify", Some(sub)) => run_verify(&codec, sub)?,
        ("decode", Some(sub)) => run_decode(&codec, sub),
        ("inspect", Some(sub)) => run_inspect(&codec, sub),
        _ => unreachable!("clap requires a subcommand"),
    };

    print_output(format, &output);
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
