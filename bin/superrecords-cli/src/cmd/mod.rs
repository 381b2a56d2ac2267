pub mod check;
pub mod diff;
pub mod fetch;

use argh::FromArgs;

/// Inspect names and records managed through Superchain Records
#[derive(FromArgs, PartialEq, Debug)]
pub struct TopLevel {
    #[argh(subcommand)]
    pub cmd: Commands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Commands {
    Check(check::CheckArgs),
    Fetch(fetch::FetchArgs),
    Diff(diff::DiffArgs),
}
