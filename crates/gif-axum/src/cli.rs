//! Command-line interface for the `gif-server` binary.

use clap::Parser;

/// Run the GiF HTTP API.
///
/// Everything except the listen address comes from environment variables
/// (a `.env` file in the working directory is loaded first).
#[derive(Debug, Parser)]
#[command(name = "gif-server")]
#[command(about = "GiF (Growing is Fun) API server")]
#[command(version)]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_address_args() {
        let cli = Cli::parse_from(["gif-server", "--host", "127.0.0.1", "-p", "9000"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 9000);
    }
}
