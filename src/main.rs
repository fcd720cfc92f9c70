use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use colored::Colorize;
use is_terminal::IsTerminal;
use minus::{Pager, page_all};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::artifacts::core::error::RepositoryError;

/// Tracing filter, in `EnvFilter` syntax
const LOG_ENV: &str = "TWIG_LOG";

/// When set, history output is never paged
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny content-addressed version-control system",
    long_about = "Twig tracks snapshots of a working directory in a content-addressed object store, \
    with branches, a staging area and three-way merges. \
    It keeps its state in a .twig directory under the current directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .twig directory in the current directory, \
        with a master branch pointing at the initial commit."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "This command snapshots the working copy of a file into the staging area. \
        A file identical to the version in the current commit is unstaged instead."
    )]
    Add {
        #[arg(index = 1, help = "The path of the file, relative to the repository root")]
        file: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stop tracking it",
        long_about = "This command drops a pending addition, or marks a file tracked by the \
        current commit for removal and deletes it from the working directory."
    )]
    Rm {
        #[arg(index = 1, help = "The path of the file, relative to the repository root")]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged snapshot as a new commit on the current branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current commit",
        long_about = "This command prints the current commit and its first-parent ancestors, newest first."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made",
        long_about = "This command prints every commit in the object store, newest first."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Find commits by message",
        long_about = "This command prints the ids of all commits with exactly the given message."
    )]
    Find {
        #[arg(index = 1, help = "The commit message to look for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists the branches, the staged and removed files, \
        unstaged modifications and untracked files."
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore files",
        long_about = "checkout <branch> switches to a branch; checkout -- <file> restores a file from \
        the current commit; checkout <commit> -- <file> restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to, or the commit to restore from")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(
        name = "branch",
        about = "Create a new branch",
        long_about = "This command creates a branch pointing at the current commit without switching to it."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(
        name = "rm-branch",
        about = "Delete a branch",
        long_about = "This command deletes a branch pointer; the commits it pointed to are kept."
    )]
    RmBranch {
        #[arg(index = 1, help = "The name of the branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Reset the current branch to a commit",
        long_about = "This command checks out all files of a commit and moves the current branch to it. \
        The commit id may be abbreviated."
    )]
    Reset {
        #[arg(index = 1, help = "The commit id or an unambiguous prefix of it")]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current branch",
        long_about = "This command merges the given branch into the current one, fast-forwarding \
        when possible and marking conflicting files otherwise."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
            && std::io::stdout().is_terminal()
            && std::env::var_os(NO_PAGER_ENV).is_none()
    }
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: &Commands, repository: &mut Repository) -> anyhow::Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Rm { file } => repository.rm(file),
        Commands::Commit { message } => repository.commit(message).map(|_| ()),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (target, Some(file)) => repository.checkout_file(target.as_deref(), file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "checkout needs a branch, or -- followed by a file",
                )
                .exit(),
        },
        Commands::Branch { name } => repository.create_branch(name),
        Commands::RmBranch { name } => repository.delete_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch).map(|_| ()),
    }
}

fn report(error: anyhow::Error) -> ExitCode {
    match error.downcast_ref::<RepositoryError>() {
        Some(repository_error) if repository_error.is_usage_error() => {
            eprintln!("{repository_error}");
            ExitCode::FAILURE
        }
        Some(repository_error) => {
            println!("{repository_error}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("{} {error:#}", "fatal:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    if cli.command.is_paged() {
        let pager = Pager::new();
        let writer = PagerWriter::new(pager.clone());
        let mut repository = Repository::new(&pwd, Box::new(writer))?;

        run(&cli.command, &mut repository)?;
        page_all(pager)?;
    } else {
        let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

        run(&cli.command, &mut repository)?;
        repository.writer().flush()?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}
