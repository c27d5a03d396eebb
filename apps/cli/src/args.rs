use std::env;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

fn parse_from(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_string())?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--host" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --host".to_string())?;
                parsed.host = Some(value);
            }
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --port".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port value: {value}"))?;
                parsed.port = Some(port);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "Email Tracker\n\n\
Usage:\n  email-tracker [--config <path>] [--host <host>] [--port <port>]\n\n\
Options:\n  --config <path>  Read this TOML file instead of email-tracker[.production].toml\n  --host <host>    Override the configured listen host\n  --port <port>    Override the configured listen port\n  -h, --help       Show this help message\n\n\
Environment:\n  ENVIRONMENT=production selects email-tracker.production.toml\n  STORE_URI, STORE_DB, STORE_COLLECTION, TRACKER_HOST, TRACKER_PORT override the file\n  RUST_LOG sets the log filter (default info)\n"
    );
}
