use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct LedgerCli {
    /// Base URL of the depreciation service
    #[arg(long, env = "LEDGER_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Deadline for each request to the service, in seconds
    #[arg(long, env = "LEDGER_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// How long status messages stay on screen, in seconds
    #[arg(long, env = "LEDGER_STATUS_TTL_SECS", default_value = "5")]
    pub status_ttl_secs: u64,

    /// Directory the xlsx reports are written to
    #[arg(long, env = "LEDGER_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = LedgerCli::try_parse_from(["ledger"]).unwrap();
        assert_eq!(cli.status_ttl_secs, 5);
        assert_eq!(cli.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_flags() {
        let cli = LedgerCli::try_parse_from([
            "ledger",
            "--api-url",
            "http://ledger.internal:9000/",
            "--request-timeout-secs",
            "15",
            "--export-dir",
            "/tmp/reports",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://ledger.internal:9000/");
        assert_eq!(cli.request_timeout_secs, Some(15));
        assert_eq!(cli.export_dir, PathBuf::from("/tmp/reports"));
    }
}
