//! Calculator JSON-RPC Example
//!
//! Reads one JSON-RPC request per line from stdin and writes each response to
//! stdout. Notifications produce no output.
//!
//! ```text
//! echo '{"jsonrpc":"2.0","method":"add","params":[2,3],"id":1}' | cargo run --example calculator
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use jsonrpc_server_core::prelude::*;
use serde_json::json;
use tracing::info;

#[derive(Parser)]
#[command(name = "calculator", about = "Line-oriented JSON-RPC 2.0 calculator")]
struct Args {
    /// Skip JSON-RPC schema validation
    #[arg(long)]
    no_schema: bool,

    /// Accept camelCase method and argument names
    #[arg(long)]
    camel_case: bool,

    /// Reply with errors to failed notifications
    #[arg(long)]
    notification_errors: bool,
}

fn calculator() -> Result<Methods> {
    let mut methods = Methods::new();

    methods.register_fn("add", MethodSignature::required(["a", "b"]), |args| {
        let a: f64 = args.get_as("a")?;
        let b: f64 = args.get_as("b")?;
        Ok(json!(a + b))
    })?;

    methods.register_fn("subtract", MethodSignature::required(["a", "b"]), |args| {
        let a: f64 = args.get_as("a")?;
        let b: f64 = args.get_as("b")?;
        Ok(json!(a - b))
    })?;

    methods.register_fn("divide", MethodSignature::required(["dividend", "divisor"]), |args| {
        let dividend: f64 = args.get_as("dividend")?;
        let divisor: f64 = args.get_as("divisor")?;
        if divisor == 0.0 {
            return Err(RpcError::server_error(-32001, "Division by zero", None));
        }
        Ok(json!(dividend / divisor))
    })?;

    methods.register_fn(
        "sum",
        MethodSignature::new().with_variadic_positional(),
        |args| {
            let mut total = 0.0;
            for value in args.extra_positional() {
                total += value
                    .as_f64()
                    .ok_or_else(|| RpcError::InvalidParams(format!("{value} is not a number")))?;
            }
            Ok(json!(total))
        },
    )?;

    methods.register_fn("round_to", MethodSignature::required(["value"]).with_optional(["places"]), |args| {
        let value: f64 = args.get_as("value")?;
        let places: i32 = args.get_optional("places")?.unwrap_or(0);
        let factor = 10f64.powi(places);
        Ok(json!((value * factor).round() / factor))
    })?;

    methods.register_fn("ping", MethodSignature::new(), |_| {
        info!("ping received");
        Ok(json!("pong"))
    })?;

    Ok(methods)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = ProcessorConfig::default()
        .with_schema_validation(!args.no_schema)
        .with_convert_camel_case(args.camel_case)
        .with_notification_errors(args.notification_errors);

    let methods = calculator()?;
    info!(methods = ?methods.method_names(), "Calculator ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatch_str(&methods, &line, config);
        if let Some(body) = response.to_json_string() {
            writeln!(stdout, "{}", body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
