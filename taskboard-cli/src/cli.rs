use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskboard::Provider;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// External login providers accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ProviderArg {
    Google,
    Facebook,
    Github,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Google => Provider::Google,
            ProviderArg::Facebook => Provider::Facebook,
            ProviderArg::Github => Provider::Github,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "A kanban task board in your terminal")]
#[command(long_about = "
taskboard keeps tasks in four columns (To Do, In Progress, Review, Done)
and signs you in against a mock identity provider.

Example usage:
  taskboard login --email bob@example.com --password secret
  taskboard login --provider github
  taskboard status --format json
  taskboard board < commands.txt
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for commands that support it
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with an email and password, or through a provider
    Login {
        #[arg(long, conflicts_with = "provider", requires = "password")]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long, value_enum)]
        provider: Option<ProviderArg>,
    },
    /// Sign out and forget the stored user
    Logout,
    /// Show who is signed in
    Status,
    /// List the label catalog
    Labels,
    /// Edit a board interactively, one command per line on stdin
    #[command(long_about = "
Reads commands from stdin, one per line:

  add <title> [field=value]   create a task in To Do
  move <task> <column>        move to todo, in-progress, review or done
  edit <task> <title>         retitle a task
  describe <task> <text>      replace the description
  set <task> field=value ...  change task fields; an empty value clears
  comment <task> <text>       comment as the signed-in user
  filter <field>=<value> ...  assignee, client, ticket, labels, from, to
  clear-filter                show every task again
  show                        print the board
  quit                        stop reading

Task fields: assignee, client, labels (comma separated), ticket,
priority (low, medium, high) and due (YYYY-MM-DD).

<task> is a task id or any unique suffix of one.
")]
    Board,
}
