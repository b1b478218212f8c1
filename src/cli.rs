use clap::Parser;

use crate::error::ClientError;

/// Flag surface. All flags are optional at the parser level; the
/// dispatcher does the usage validation so that every usage failure is
/// reported on standard output with the right error kind.
#[derive(Parser, Debug)]
#[command(
    name = "assetctl",
    about = "Manage assets held in a remote asset repository.",
    disable_version_flag = true
)]
pub struct Cli {
    /// Delete the assets with the given IDs
    #[arg(long)]
    pub delete: bool,

    /// Search the repository and delete every match
    #[arg(long = "findAndDelete")]
    pub find_and_delete: bool,

    /// Search the repository and list the matches
    #[arg(long)]
    pub find: bool,

    /// List every asset in the repository
    #[arg(long = "listAll")]
    pub list_all: bool,

    /// Repository location, e.g. https://example.com/repository
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Never ask for confirmation before deleting
    #[arg(long = "noPrompts")]
    pub no_prompts: bool,

    /// Asset IDs (delete) or search terms (find modes)
    #[arg(value_name = "ID|TERM")]
    pub targets: Vec<String>,
}

/// The one operation a single invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Delete,
    FindAndDelete,
    Find,
    ListAll,
}

impl Cli {
    /// Resolves the operation flags to exactly one operation.
    pub fn operation(&self) -> Result<Operation, ClientError> {
        let selected = [
            (self.delete, Operation::Delete),
            (self.find_and_delete, Operation::FindAndDelete),
            (self.find, Operation::Find),
            (self.list_all, Operation::ListAll),
        ];
        let mut operations = selected.iter().filter(|(set, _)| *set).map(|(_, op)| *op);

        match (operations.next(), operations.next()) {
            (Some(operation), None) => Ok(operation),
            (None, _) => Err(ClientError::NoOperation),
            (Some(_), Some(_)) => Err(ClientError::TooManyOperations),
        }
    }
}
