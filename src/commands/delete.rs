use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::error::{classify, ClientError, FailureClass};
use crate::prompt::{self, Decision};
use crate::report;
use crate::repository::RepositoryConnection;

/// Result of attempting to delete one asset, carrying the identifier the
/// attempt was made with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted { id: String },
    NotFound { id: String },
    ConnectionFailed { id: String },
    ServerError { id: String },
    DeletionFailed { id: String, reason: String },
}

impl DeleteOutcome {
    pub fn id(&self) -> &str {
        match self {
            DeleteOutcome::Deleted { id }
            | DeleteOutcome::NotFound { id }
            | DeleteOutcome::ConnectionFailed { id }
            | DeleteOutcome::ServerError { id }
            | DeleteOutcome::DeletionFailed { id, .. } => id,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// Deletes the given assets and fails with an aggregate error if any of
/// them could not be deleted.
pub async fn execute<C, R, W>(
    connection: &C,
    ids: &[String],
    prompts: bool,
    input: &mut R,
    output: &mut W,
) -> Result<(), ClientError>
where
    C: RepositoryConnection,
    R: BufRead,
    W: Write,
{
    let outcomes = delete_all(connection, ids, prompts, input, output).await?;
    ensure_all_deleted(&outcomes)
}

/// Attempts to delete each asset in input order: fetch, optionally
/// confirm, delete. A failure on one identifier never stops the rest of
/// the batch; every identifier gets its status line printed as it is
/// processed. Declined confirmations record no outcome.
pub async fn delete_all<C, R, W>(
    connection: &C,
    ids: &[String],
    prompts: bool,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<DeleteOutcome>, ClientError>
where
    C: RepositoryConnection,
    R: BufRead,
    W: Write,
{
    info!("deleting {} asset(s)", ids.len());
    let mut outcomes = Vec::with_capacity(ids.len());

    for id in ids {
        let asset = match connection.get_asset(id).await {
            Ok(asset) => asset,
            Err(err) => {
                warn!("failed to fetch asset {}: {}", id, err);
                let outcome = match classify(&err) {
                    FailureClass::NotFound => DeleteOutcome::NotFound { id: id.clone() },
                    FailureClass::Connection => DeleteOutcome::ConnectionFailed { id: id.clone() },
                    FailureClass::Server | FailureClass::Deletion => {
                        DeleteOutcome::ServerError { id: id.clone() }
                    }
                };
                report::write_outcome(output, &outcome)?;
                outcomes.push(outcome);
                continue;
            }
        };

        if prompts {
            let question = format!("Delete asset {} {} (y/N)?", asset.display_name(), id);
            if prompt::ask(&question, input, output)? == Decision::No {
                info!("deletion of asset {} declined", id);
                continue;
            }
        }

        let outcome = match connection.delete_asset(&asset).await {
            Ok(()) => DeleteOutcome::Deleted { id: id.clone() },
            Err(err) => {
                warn!("failed to delete asset {}: {}", id, err);
                match classify(&err) {
                    FailureClass::Connection => DeleteOutcome::ConnectionFailed { id: id.clone() },
                    FailureClass::NotFound => DeleteOutcome::NotFound { id: id.clone() },
                    _ => DeleteOutcome::DeletionFailed {
                        id: id.clone(),
                        reason: err.to_string(),
                    },
                }
            }
        };
        report::write_outcome(output, &outcome)?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Raises the aggregate failure once the whole batch has been reported.
pub fn ensure_all_deleted(outcomes: &[DeleteOutcome]) -> Result<(), ClientError> {
    let failed = outcomes.iter().filter(|o| !o.is_deleted()).count();
    if failed > 0 {
        return Err(ClientError::NotAllDeleted {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
