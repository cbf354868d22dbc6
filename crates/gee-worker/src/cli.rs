//! Command line of the `gee-worker` binary.

use clap::{Parser, Subcommand};

use crate::retrieval::BatchRequest;

#[derive(Parser, Debug)]
#[command(name = "gee-worker")]
#[command(about = "Locate recorded frames and extract person regions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Extract person regions from one or more frames
    Extract {
        /// Shot id and frame offset pairs: <shot-id> <offset> [<shot-id> <offset> ...]
        #[arg(required = true, num_args = 2.., value_name = "SHOT_ID OFFSET")]
        pairs: Vec<String>,
    },
    /// List every recorded video shot
    Shots,
    /// List the person shots of a query
    PersonShots {
        /// Query identifier
        query_id: String,
    },
}

/// Turn `<shot-id> <offset>` pairs into batch requests.
pub fn parse_pairs(pairs: &[String]) -> Result<Vec<BatchRequest>, String> {
    if pairs.is_empty() {
        return Err("expected at least one <shot-id> <offset> pair".to_string());
    }
    if pairs.len() % 2 != 0 {
        return Err(format!(
            "shot '{}' has no frame offset",
            pairs[pairs.len() - 1]
        ));
    }

    pairs
        .chunks_exact(2)
        .map(|pair| {
            let offset = pair[1]
                .parse::<u64>()
                .map_err(|e| format!("invalid frame offset '{}' for shot '{}': {}", pair[1], pair[0], e))?;
            Ok(BatchRequest::new(pair[0].clone(), offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_pairs_parse() {
        let cli = Cli::try_parse_from(["gee-worker", "extract", "abc", "4", "def", "10"]).unwrap();
        let Command::Extract { pairs } = cli.command else {
            panic!("expected extract");
        };
        let requests = parse_pairs(&pairs).unwrap();
        assert_eq!(
            requests,
            vec![BatchRequest::new("abc", 4), BatchRequest::new("def", 10)]
        );
    }

    #[test]
    fn test_extract_requires_a_pair() {
        assert!(Cli::try_parse_from(["gee-worker", "extract"]).is_err());
        assert!(Cli::try_parse_from(["gee-worker", "extract", "abc"]).is_err());
    }

    #[test]
    fn test_odd_pairs_rejected() {
        let err = parse_pairs(&strings(&["abc", "4", "def"])).unwrap_err();
        assert!(err.contains("def"));
    }

    #[test]
    fn test_bad_offset_rejected() {
        let err = parse_pairs(&strings(&["abc", "-1"])).unwrap_err();
        assert!(err.contains("-1"));
        assert!(parse_pairs(&strings(&["abc", "four"])).is_err());
        assert!(parse_pairs(&[]).is_err());
    }

    #[test]
    fn test_other_commands() {
        let cli = Cli::try_parse_from(["gee-worker", "shots"]).unwrap();
        assert_eq!(cli.command, Command::Shots);

        let cli = Cli::try_parse_from(["gee-worker", "person-shots", "q1"]).unwrap();
        assert_eq!(
            cli.command,
            Command::PersonShots {
                query_id: "q1".to_string()
            }
        );

        assert!(Cli::try_parse_from(["gee-worker", "person-shots"]).is_err());
        assert!(Cli::try_parse_from(["gee-worker", "unknown"]).is_err());
    }
}
