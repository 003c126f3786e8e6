//! mkt's main application entry point and orchestration logic.
//! Reads the template, parses it once, populates the destination tree, and
//! executes the selected options inside it.

use std::fs;
use std::path::Path;

use mkt::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    logger::init_logger,
    parser,
    populate::populate,
    runner::run_options,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Reads and parses the template file
/// 2. Populates the destination tree (the `title` macro names its root)
/// 3. Executes the requested options inside the populated tree
fn run(args: Args) -> Result<()> {
    let text = fs::read_to_string(&args.template)?;
    let (template, macros) = parser::parse(&text)?;
    // parent() of a bare filename is Some(""), which is unwalkable
    let template_dir = match args.template.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let populated =
        populate(&template, &macros, template_dir, &args.output_dir, args.overwrite)?;
    run_options(&template, &args.options, &populated)?;

    println!("Template populated successfully in {}.", populated.display());
    Ok(())
}
