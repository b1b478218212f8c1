//! Argument-driven dispatch: validates the invocation, opens the one
//! repository connection, and hands off to a workflow.

use std::io::{BufRead, Write};

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use reqwest::Url;
use tracing::debug;

use crate::cli::{Cli, Operation};
use crate::commands::{delete, find, list};
use crate::error::{ClientError, INVALID_URL};
use crate::repository::RepositoryConnection;

/// The client, bound to an input stream (confirmation answers) and an
/// output stream (everything the user sees; nothing goes to stderr).
pub struct App<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs one invocation. `connect` is called at most once, after the
    /// URL has been validated, to obtain the repository connection.
    pub async fn run<C, F>(&mut self, args: &[String], connect: F) -> Result<(), ClientError>
    where
        C: RepositoryConnection,
        F: FnOnce(Url) -> C,
    {
        let argv = std::iter::once("assetctl".to_string()).chain(args.iter().cloned());
        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                self.print_help()?;
                return Ok(());
            }
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                self.print_help()?;
                return Err(ClientError::InvalidArguments(err.to_string()));
            }
        };

        // The URL is validated before anything else.
        let url_value = match cli.url {
            Some(ref url) => url.clone(),
            None => {
                self.print_help()?;
                return Err(ClientError::MissingUrl);
            }
        };
        let url = match Url::parse(&url_value) {
            Ok(url) => url,
            Err(_) => {
                writeln!(self.output, "{}{}", INVALID_URL, url_value)?;
                return Err(ClientError::InvalidUrl(url_value));
            }
        };

        let operation = match cli.operation() {
            Ok(operation) => operation,
            Err(err) => {
                self.print_help()?;
                return Err(err);
            }
        };

        debug!("running {:?} against {}", operation, url);
        let connection = connect(url);

        match operation {
            Operation::Delete => {
                if cli.targets.is_empty() {
                    self.print_help()?;
                    return Err(ClientError::NoIdentifiers);
                }
                delete::execute(
                    &connection,
                    &cli.targets,
                    false,
                    &mut self.input,
                    &mut self.output,
                )
                .await
            }
            Operation::FindAndDelete => {
                let query = self.search_query(&cli.targets)?;
                find::execute(
                    &connection,
                    &query,
                    find::FindMode::Delete,
                    !cli.no_prompts,
                    &mut self.input,
                    &mut self.output,
                )
                .await
            }
            Operation::Find => {
                let query = self.search_query(&cli.targets)?;
                find::execute(
                    &connection,
                    &query,
                    find::FindMode::ListOnly,
                    false,
                    &mut self.input,
                    &mut self.output,
                )
                .await
            }
            Operation::ListAll => list::execute(&connection, &mut self.output).await,
        }
    }

    fn search_query(&mut self, targets: &[String]) -> Result<String, ClientError> {
        if targets.is_empty() {
            self.print_help()?;
            return Err(ClientError::NoSearchTerm);
        }
        Ok(targets.join(" "))
    }

    fn print_help(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "{}", Cli::command().render_help())
    }
}
