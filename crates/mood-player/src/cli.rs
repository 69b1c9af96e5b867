//! Command line parsing

use clap::Parser;
use std::path::PathBuf;

/// Replay a recorded landmark session through the mood detection service
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mood-player", version)]
pub struct Args {
    /// Config file, defaults to the platform config location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// YAML list of tracks to ingest before detection starts
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Recorded landmark session to replay
    #[arg(long)]
    pub session: PathBuf,

    /// Replay the session forever instead of stopping at its end
    #[arg(long = "loop")]
    pub looping: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("mood-player").chain(args.iter().copied()))
    }

    #[test]
    fn test_full_command_line() {
        let args = parse(&[
            "--config", "c.yaml", "--manifest", "tracks.yaml", "--session", "s.yaml", "--loop",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("c.yaml")));
        assert_eq!(args.manifest, Some(PathBuf::from("tracks.yaml")));
        assert_eq!(args.session, PathBuf::from("s.yaml"));
        assert!(args.looping);
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--session", "s.yaml"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.manifest, None);
        assert!(!args.looping);
    }

    #[test]
    fn test_session_required() {
        let err = parse(&["--manifest", "tracks.yaml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_missing_value() {
        assert!(parse(&["--session"]).is_err());
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&["--session", "s.yaml", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
