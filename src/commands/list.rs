use std::io::Write;

use tracing::info;

use crate::error::{fatal, ClientError};
use crate::report;
use crate::repository::RepositoryConnection;

/// Lists every asset in the repository as an aligned table. A backend
/// failure here aborts the run; there is nothing partial to report.
pub async fn execute<C, W>(connection: &C, output: &mut W) -> Result<(), ClientError>
where
    C: RepositoryConnection,
    W: Write,
{
    let assets = connection.all_assets().await.map_err(fatal)?;
    info!("repository holds {} asset(s)", assets.len());
    write!(output, "{}", report::format_table(&assets))?;
    Ok(())
}
