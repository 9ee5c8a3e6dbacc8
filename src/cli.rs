use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "lawmd",
    version,
    about = "Normalize Chinese statute documents into Markdown and maintain the law catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Parse(ParseArgs),
    Update(UpdateArgs),
    Validate(ValidateArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long, default_value = ".cache/lawmd")]
    pub cache_root: PathBuf,

    #[arg(long, default_value = "laws")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub summary_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(long, default_value = "laws")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "laws")]
    pub output_root: PathBuf,

    #[arg(long, default_value_t = false)]
    pub fix: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/lawmd")]
    pub cache_root: PathBuf,

    #[arg(long, default_value = "laws")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}
