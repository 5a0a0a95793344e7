use clap::Parser as ClapParser;
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};
use xqr::{
    OutputOptions, Query,
    ast::is_identifier,
    cli::{self, CliError, RunOptions},
    parse_query,
};

#[derive(ClapParser)]
#[command(name = "xqr")]
#[command(about = "xqr - select, filter and order XML elements with an SQL-like query")]
#[command(
    after_help = "Query format:\n  SELECT element [LIMIT n] FROM [element|element.attribute|ROOT]\n  [WHERE condition] [ORDER BY element|element.attribute ASC|DESC]"
)]
#[command(version)]
struct Cli {
    /// XML input file (reads from stdin if not provided)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file (writes to stdout if not provided)
    #[arg(long)]
    output: Option<PathBuf>,

    /// The query to execute
    #[arg(long, conflicts_with = "qf", required_unless_present = "qf")]
    query: Option<String>,

    /// File containing the query
    #[arg(long)]
    qf: Option<PathBuf>,

    /// Do not emit the XML declaration
    #[arg(short = 'n')]
    no_declaration: bool,

    /// Element wrapping all results
    #[arg(long)]
    root: Option<String>,

    /// Print the parsed query as JSON instead of running it
    #[arg(long)]
    explain: bool,
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn read_query(cli: &Cli) -> Result<String, CliError> {
    match (&cli.query, &cli.qf) {
        (Some(query), _) => Ok(query.clone()),
        (None, Some(path)) => fs::read_to_string(path).map_err(CliError::QueryFile),
        (None, None) => Err(CliError::Args(
            "neither --query nor --qf was given".to_string(),
        )),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<Option<String>, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map(Some).map_err(CliError::Input),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Input)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn write_output(path: Option<&PathBuf>, text: &str) -> Result<(), CliError> {
    match path {
        Some(path) => fs::write(path, text).map_err(CliError::Output),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(CliError::Output),
    }
}

fn explain(query: &Query) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(&cli::query_to_json(query))?;
    Ok(json + "\n")
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(root) = &cli.root {
        if !is_identifier(root) {
            return Err(CliError::Args(format!("'{}' is not a valid root element name", root)));
        }
    }

    let query = read_query(&cli)?;

    if cli.explain {
        let parsed = parse_query(&query)?;
        return write_output(cli.output.as_ref(), &explain(&parsed)?);
    }

    let options = RunOptions {
        query,
        input: read_input(cli.input.as_ref())?,
        output: OutputOptions {
            declaration: !cli.no_declaration,
            root: cli.root.clone(),
        },
    };

    let document = cli::execute(&options)?;
    write_output(cli.output.as_ref(), &document)
}
