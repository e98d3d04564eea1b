//! `leadflow` -- command-line access to the CRM lead-assignment API.
//!
//! Prints JSON to stdout and exits non-zero on failure.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default                     | Description                  |
//! |----------------------------|----------|-----------------------------|------------------------------|
//! | `CRM_API_URL`              | no       | `http://localhost:5000/api` | API root                     |
//! | `CRM_API_TOKEN`            | no       | --                          | Bearer token                 |
//! | `CRM_REQUEST_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout          |

mod command;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadflow_client::assignments::HistoryQuery;
use leadflow_client::cache::CachingBackend;
use leadflow_client::{ClientConfig, ClientError, CrmClient};
use leadflow_core::conditions::validate_rule_conditions;
use leadflow_core::rules::sort_by_evaluation_order;
use leadflow_workflow::workload::WorkloadView;
use leadflow_workflow::WorkflowError;

use command::{Cli, Command};

#[derive(Debug, thiserror::Error)]
enum ConsoleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadflow_console=info,leadflow_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::debug!(?config, "Configuration loaded");

    let client = CrmClient::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    match run(&client, cli.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render output");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}

async fn run(client: &CrmClient, command: Command) -> Result<Value, ConsoleError> {
    let output = match command {
        Command::Rules => serde_json::to_value(client.rules().list().await?)?,
        Command::ActiveRules => {
            let mut rules = client.rules().list_active().await?;
            sort_by_evaluation_order(&mut rules);
            serde_json::to_value(rules)?
        }
        Command::Workload => {
            let mut view = WorkloadView::new(CachingBackend::new(client.clone()));
            view.open().await?;
            json!({
                "rows": view.rows(),
                "totals": view.totals(),
                "stats": view.stats(),
            })
        }
        Command::Stats => serde_json::to_value(client.assignments().get_assignment_stats().await?)?,
        Command::History { lead_id } => {
            let ops = client.assignments();
            let rows = match lead_id {
                Some(id) => ops.get_lead_assignment_history(id).await?,
                None => ops.get_assignment_history(&HistoryQuery::default()).await?,
            };
            serde_json::to_value(rows)?
        }
        Command::Validate { conditions } => {
            let parsed: Value = serde_json::from_str(&conditions)?;
            serde_json::to_value(validate_rule_conditions(&parsed))?
        }
        Command::Assign {
            lead_id,
            user_id,
            reason,
        } => serde_json::to_value(
            client
                .assignments()
                .assign_lead(lead_id, user_id, &reason)
                .await?,
        )?,
        Command::BulkAssign {
            user_id,
            lead_ids,
            reason,
        } => serde_json::to_value(
            client
                .assignments()
                .bulk_assign_leads(&lead_ids, user_id, &reason)
                .await?,
        )?,
        Command::AutoAssign { lead_ids } => serde_json::to_value(
            client
                .assignments()
                .process_bulk_auto_assignment(&lead_ids)
                .await?,
        )?,
        Command::Redistribute => {
            let mut view = WorkloadView::new(CachingBackend::new(client.clone()));
            let summary = view.redistribute().await?;
            json!({
                "summary": summary,
                "rows": view.rows(),
            })
        }
    };
    Ok(output)
}
