//! Command-line interface implementation for mkt.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for mkt.
#[derive(Parser, Debug)]
#[command(author, version, about = "mkt: make a template into a destination tree", long_about = None)]
pub struct Args {
    /// Path to the template file
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Option names to execute after population, in the order given
    #[arg(value_name = "OPTIONS")]
    pub options: Vec<String>,

    /// Directory the populated tree is created under; the template's
    /// `title` macro names the root inside it
    #[arg(short = 'd', long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Overwrite the destination if it exists
    #[arg(short, long)]
    pub overwrite: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
