use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"
{about}

{usage-heading} {usage}

{all-args}

{after-help}"#;

#[derive(Parser, Debug)]
#[command(name = "taxtree")]
#[command(author, version)]
#[command(about = "Taxonomic subtree listing for NCBI taxonomy dumps")]
#[command(after_help = "Examples:
  taxtree list --ids 9606                      Indented subtree of Homo sapiens
  taxtree list --ids 9606 -n -r --indent \"    \" With names and ranks
  taxtree list --ids 9606 --indent \"\"          Flat list of descendant taxids
  taxtree list --ids 9605,9606 --json          Nested JSON for several roots

Data files (nodes.dmp, names.dmp, delnodes.dmp, merged.dmp) are read from
--data-dir, the TAXTREE_DB environment variable, or ~/.taxonkit.")]
#[command(help_template = HELP_TEMPLATE)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory containing nodes.dmp, names.dmp, delnodes.dmp and merged.dmp
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of worker threads used while loading the dump files
    #[arg(short = 'j', long, global = true, default_value_t = 4)]
    pub threads: usize,

    /// Output file ("-" for stdout, ".gz" suffix for gzip)
    #[arg(short = 'o', long, global = true, default_value = "-", value_name = "FILE")]
    pub out_file: String,

    /// Flush output after every line
    #[arg(long, global = true)]
    pub line_buffered: bool,

    /// Print progress information to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the taxonomic tree below the given taxids
    #[command(visible_alias = "l")]
    List(ListArgs),
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
#[command(after_help = "EXAMPLES:
    taxtree list --ids 9606 -n -r --indent \"    \"
    9606 [species] Homo sapiens
        63221 [subspecies] Homo sapiens neanderthalensis
        741158 [subspecies] Homo sapiens subsp. 'Denisova'

    taxtree list --ids 9606 --indent \"\"
    9606
    63221
    741158")]
pub struct ListArgs {
    /// Taxids to list, separated by commas
    #[arg(long, value_delimiter = ',', required = true, value_name = "TAXIDS")]
    pub ids: Vec<i32>,

    /// Indentation repeated once per tree level
    #[arg(long, default_value = "  ")]
    pub indent: String,

    /// Output rank
    #[arg(short = 'r', long)]
    pub show_rank: bool,

    /// Output scientific name
    #[arg(short = 'n', long)]
    pub show_name: bool,

    /// Output one JSON object with a key per requested taxid
    #[arg(long)]
    pub json: bool,

    /// Ignored; the list command reads only the dump files
    #[arg(hide = true)]
    pub files: Vec<String>,
}
