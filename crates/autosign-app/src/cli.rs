use clap::Parser;
use std::path::PathBuf;

/// Automated daily check-in for cookie-authenticated API accounts.
#[derive(Debug, Parser)]
#[command(name = "autosign", version, about)]
pub struct Cli {
    /// Skip the headed browser attempt and run headless only
    #[arg(long)]
    pub headless: bool,

    /// Path of the balance history snapshot file
    #[arg(long, value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Compose the report but skip notification delivery
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["autosign"]);
        assert!(!cli.headless);
        assert!(!cli.dry_run);
        assert!(cli.history_file.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["autosign", "--headless", "--history-file", "/tmp/b.json"]);
        assert!(cli.headless);
        assert_eq!(cli.history_file.unwrap().to_str().unwrap(), "/tmp/b.json");
    }
}
