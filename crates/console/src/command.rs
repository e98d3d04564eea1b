//! Argument parsing for the `leadflow` console.

use clap::{Parser, Subcommand};
use leadflow_core::types::DbId;

#[derive(Debug, Parser)]
#[command(name = "leadflow")]
#[command(about = "Command-line access to the CRM lead-assignment API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List all assignment rules
    Rules,
    /// List active rules in evaluation order
    ActiveRules,
    /// Team workload with load ratios
    Workload,
    /// Assignment counters
    Stats,
    /// Assignment history, optionally for one lead
    History { lead_id: Option<DbId> },
    /// Check a conditions object locally
    Validate {
        /// Conditions as a JSON object
        conditions: String,
    },
    /// Assign one lead
    Assign {
        lead_id: DbId,
        user_id: DbId,
        #[arg(default_value = "")]
        reason: String,
    },
    /// Assign comma-separated lead ids to one user
    BulkAssign {
        user_id: DbId,
        #[arg(value_delimiter = ',', num_args = 1, required = true, action = clap::ArgAction::Set)]
        lead_ids: Vec<DbId>,
        #[arg(default_value = "")]
        reason: String,
    },
    /// Rule-based assignment of comma-separated lead ids
    AutoAssign {
        #[arg(value_delimiter = ',', required = true)]
        lead_ids: Vec<DbId>,
    },
    /// Rebalance leads across the team
    Redistribute,
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("leadflow").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn parses_bulk_assign() {
        assert_eq!(
            parse(&["bulk-assign", "4", "1,2,3", "Q3 territory"]).unwrap(),
            Command::BulkAssign {
                user_id: 4,
                lead_ids: vec![1, 2, 3],
                reason: "Q3 territory".into(),
            }
        );
    }

    #[test]
    fn reason_is_optional() {
        assert_eq!(
            parse(&["assign", "9", "2"]).unwrap(),
            Command::Assign {
                lead_id: 9,
                user_id: 2,
                reason: String::new(),
            }
        );
        assert_eq!(
            parse(&["bulk-assign", "4", "7"]).unwrap(),
            Command::BulkAssign {
                user_id: 4,
                lead_ids: vec![7],
                reason: String::new(),
            }
        );
    }

    #[test]
    fn history_takes_optional_lead() {
        assert_eq!(parse(&["history"]).unwrap(), Command::History { lead_id: None });
        assert_eq!(
            parse(&["history", "12"]).unwrap(),
            Command::History { lead_id: Some(12) }
        );
    }

    #[test]
    fn auto_assign_splits_ids() {
        assert_eq!(
            parse(&["auto-assign", "5,6"]).unwrap(),
            Command::AutoAssign { lead_ids: vec![5, 6] }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert_eq!(
            parse(&["launch"]).unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert_eq!(
            parse(&["assign", "x", "2"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["auto-assign", "1,x"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["validate"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["auto-assign"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
    }
}
