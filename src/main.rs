// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Courier CLI - issue one request from the command line

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use courier::http::auth::bearer_token;
use courier::utils::json::{iso8601_reviver, reviver};
use courier::{Body, Client, DataType, Error, Overrides, Reply};
use reqwest::Method;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("courier=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_usage();
        return ExitCode::from(1);
    }

    match args[0].as_str() {
        "get" | "delete" | "post" | "put" => match Invocation::parse(&args) {
            Ok(invocation) => run(invocation).await,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::from(1)
            }
        },
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("courier {}", courier::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Courier - Promise-style HTTP requests

USAGE:
    courier <COMMAND> [OPTIONS]

COMMANDS:
    get <url>               Send a GET request
    delete <url>            Send a DELETE request
    post <url> <body>       Send a POST request
    put <url> <body>        Send a PUT request
    help                    Show this help message
    version                 Show version information

OPTIONS:
    --text                  Keep the response as raw text
    --reject                Fail on statuses outside 200..=399
    --data-only             Print only the response data
    --timeout <ms>          Abort after the given milliseconds
    --header <name:value>   Add a request header (repeatable)
    --bearer <token>        Send a bearer token
    --iso-dates             Decode ISO-8601 strings as dates

EXAMPLES:
    courier get https://example.com/api/users/1 --iso-dates
    courier post https://example.com/api/users '{{"name":"test"}}' --reject
    courier delete https://example.com/api/users/1 --timeout 5000
"#
    );
}

/// One parsed command line
#[derive(Debug)]
struct Invocation {
    method: Method,
    url: String,
    body: Option<String>,
    overrides: Overrides,
}

impl Invocation {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let (method, takes_body) = match args[0].as_str() {
            "get" => (Method::GET, false),
            "delete" => (Method::DELETE, false),
            "post" => (Method::POST, true),
            "put" => (Method::PUT, true),
            cmd => bail!("Unknown command: {}", cmd),
        };

        let mut positional = Vec::new();
        let mut overrides = Overrides::new();
        let mut rest = args[1..].iter();

        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--text" => overrides = overrides.data_type(DataType::Text),
                "--reject" => overrides = overrides.reject_on_status_code(true),
                "--data-only" => overrides = overrides.data_only(true),
                "--iso-dates" => overrides = overrides.json_reviver(reviver(iso8601_reviver)),
                "--timeout" => {
                    let ms = rest
                        .next()
                        .and_then(|v| v.parse::<u64>().ok())
                        .context("--timeout expects milliseconds")?;
                    overrides = overrides.timeout(Duration::from_millis(ms));
                }
                "--header" => {
                    let (name, value) = rest
                        .next()
                        .and_then(|v| v.split_once(':'))
                        .context("--header expects name:value")?;
                    overrides = overrides.header(name.trim(), value.trim().to_string());
                }
                "--bearer" => {
                    let token = rest.next().context("--bearer expects a token")?;
                    overrides = overrides.before_send_hook(bearer_token(token.as_str()));
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                _ => positional.push(arg.clone()),
            }
        }

        let mut positional = positional.into_iter();
        let url = positional
            .next()
            .ok_or_else(|| anyhow!("Usage: courier {} <url>", args[0]))?;
        let body = if takes_body {
            Some(
                positional
                    .next()
                    .ok_or_else(|| anyhow!("Usage: courier {} <url> <body>", args[0]))?,
            )
        } else {
            None
        };

        if let Some(extra) = positional.next() {
            bail!("Unexpected argument: {}", extra);
        }

        Ok(Self {
            method,
            url,
            body,
            overrides,
        })
    }
}

async fn run(invocation: Invocation) -> ExitCode {
    let client = Client::new();
    let body = invocation.body.map(Body::from);

    match client
        .send(&invocation.url, invocation.method, body, Some(&invocation.overrides))
        .await
    {
        Ok(reply) => {
            print_reply(&reply);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            exit_code(&e)
        }
    }
}

fn print_reply(reply: &Reply) {
    if let Some(response) = reply.response() {
        println!("Status: {} {}", response.status, response.status_text);
        if let Some(content_type) = response.header("content-type") {
            println!("Content-Type: {}", content_type);
        }
        println!();
    }

    match reply.data() {
        courier::Value::String(text) => println!("{}", text),
        data => match serde_json::to_string_pretty(&data.to_json()) {
            Ok(pretty) => println!("{}", pretty),
            Err(e) => eprintln!("Failed to render data: {}", e),
        },
    }
}

fn exit_code(error: &Error) -> ExitCode {
    if error.is_status() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_get_with_flags() {
        let invocation =
            Invocation::parse(&args("get https://example.com --reject --timeout 250")).unwrap();

        assert_eq!(invocation.method, Method::GET);
        assert_eq!(invocation.url, "https://example.com");
        assert!(invocation.body.is_none());

        let resolved = courier::RequestOptions::default().resolve(Some(&invocation.overrides));
        assert!(resolved.reject_on_status_code);
        assert_eq!(resolved.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_parse_post_requires_body() {
        assert!(Invocation::parse(&args("post https://example.com")).is_err());

        let invocation = Invocation::parse(&args(r#"post https://example.com {"a":1}"#)).unwrap();
        assert_eq!(invocation.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_parse_header() {
        let invocation =
            Invocation::parse(&args("get https://example.com --header X-Trace:abc")).unwrap();
        let resolved = courier::RequestOptions::default().resolve(Some(&invocation.overrides));

        let value = resolved.headers.get("x-trace").and_then(|h| h.resolve(&resolved));
        assert_eq!(value.as_deref(), Some("abc"));
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(Invocation::parse(&args("get https://example.com --nope")).is_err());
        assert!(Invocation::parse(&args("get https://example.com --timeout soon")).is_err());
    }
}
