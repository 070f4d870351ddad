use crate::commands::{
    run_interests, run_parse, run_resolve, InterestsArgs, ParseArgs, ResolveArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hyresdesk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "hyresdesk",
    about = "Resolve free-text apartment addresses and order interest registrations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Parse raw address strings and print their lookup keys
    Parse(ParseArgs),
    /// Resolve raw address strings against apartment and tenant exports
    Resolve(ResolveArgs),
    /// Sort, group and review interest registrations
    Interests(InterestsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Parse(args) => run_parse(args),
        Command::Resolve(args) => run_resolve(args),
        Command::Interests(args) => run_interests(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_requires_both_exports() {
        let error = Cli::try_parse_from(["hyresdesk", "resolve", "--apartments", "a.json", "Storgatan 5"])
            .expect_err("tenants flag missing");
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn interests_accepts_grouping_flags() {
        let cli = Cli::try_parse_from([
            "hyresdesk",
            "interests",
            "--interests",
            "interests.json",
            "--group",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Interests(args)) => {
                assert!(args.group);
                assert!(args.apartments.is_none());
            }
            other => panic!("expected interests command, got {other:?}"),
        }
    }
}
