use std::io::{BufRead, Write};

use tracing::info;

use crate::commands::delete;
use crate::error::{fatal, ClientError};
use crate::report;
use crate::repository::RepositoryConnection;

/// What to do with search matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    /// Render the matches as a listing.
    ListOnly,
    /// Feed each match into the delete workflow.
    Delete,
}

/// Searches the repository and either lists the matches or deletes them.
/// The search itself is unfiltered: no product or type restrictions and
/// default visibility. In delete mode each match is re-fetched by its ID
/// before deletion, so stale search results surface as per-asset failures
/// rather than deleting the wrong thing.
pub async fn execute<C, R, W>(
    connection: &C,
    query: &str,
    mode: FindMode,
    prompts: bool,
    input: &mut R,
    output: &mut W,
) -> Result<(), ClientError>
where
    C: RepositoryConnection,
    R: BufRead,
    W: Write,
{
    info!("searching repository for {:?}", query);
    let matches = connection
        .find_assets(query, &[], &[], None)
        .await
        .map_err(fatal)?;
    info!("search matched {} asset(s)", matches.len());

    match mode {
        FindMode::ListOnly => {
            write!(output, "{}", report::format_table(&matches))?;
            Ok(())
        }
        FindMode::Delete => {
            let ids: Vec<String> = matches
                .iter()
                .map(|asset| asset.display_id().to_string())
                .collect();
            let outcomes = delete::delete_all(connection, &ids, prompts, input, output).await?;
            delete::ensure_all_deleted(&outcomes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::repository::{Asset, AssetType, MockRepositoryConnection};

    #[tokio::test]
    async fn test_find_and_delete_refetches_each_match() {
        let mut connection = MockRepositoryConnection::new();
        connection
            .expect_find_assets()
            .times(1)
            .returning(|_, _, _, _| Ok(vec![Asset::new().with_id("1234".to_string())]));
        connection
            .expect_get_asset()
            .times(1)
            .returning(|id| Ok(Asset::new().with_id(id.to_string())));
        connection.expect_delete_asset().times(1).returning(|_| Ok(()));

        let mut output = Vec::new();
        execute(
            &connection,
            "admin",
            FindMode::Delete,
            false,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Deleted asset 1234"));
    }

    #[tokio::test]
    async fn test_find_and_delete_partial_match_uses_placeholder() {
        let mut connection = MockRepositoryConnection::new();
        connection
            .expect_find_assets()
            .returning(|_, _, _, _| Ok(vec![Asset::new()]));
        connection.expect_get_asset().returning(|_| Ok(Asset::new()));
        connection.expect_delete_asset().times(1).returning(|_| Ok(()));

        let mut output = Vec::new();
        execute(
            &connection,
            "admin",
            FindMode::Delete,
            false,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Deleted asset null"));
    }

    #[tokio::test]
    async fn test_find_list_only_renders_table() {
        let mut connection = MockRepositoryConnection::new();
        connection.expect_find_assets().returning(|_, _, _, _| {
            Ok(vec![Asset::new()
                .with_id("1".to_string())
                .with_name("A name".to_string())
                .with_type(AssetType::Feature)])
        });
        connection.expect_get_asset().times(0);
        connection.expect_delete_asset().times(0);

        let mut output = Vec::new();
        execute(
            &connection,
            "admin",
            FindMode::ListOnly,
            false,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("A name"));
        assert!(text.contains("Feature"));
    }

    #[tokio::test]
    async fn test_find_list_only_no_matches() {
        let mut connection = MockRepositoryConnection::new();
        connection
            .expect_find_assets()
            .returning(|_, _, _, _| Ok(vec![]));

        let mut output = Vec::new();
        execute(
            &connection,
            "nothing",
            FindMode::ListOnly,
            false,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No assets found in repository\n"
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_fatal() {
        let mut connection = MockRepositoryConnection::new();
        connection
            .expect_find_assets()
            .returning(|_, _, _, _| Err(RepositoryError::Connection("refused".to_string())));

        let mut output = Vec::new();
        let err = execute(
            &connection,
            "admin",
            FindMode::Delete,
            false,
            &mut &b""[..],
            &mut output,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::ConnectionProblem));
    }
}
