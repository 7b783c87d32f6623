use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tagtree::{Config, Element, Input};

#[derive(Debug, Parser)]
#[command(
    name = "tagtree",
    version,
    about = "Reformat XML or pull the text out of one element"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Spaces per nesting level when re-encoding
    #[arg(long, default_value_t = 1, conflicts_with = "compact")]
    indent: usize,
    /// Re-encode without indentation
    #[arg(long)]
    compact: bool,
    /// Print the text content of the first element with this tag name
    #[arg(long, value_name = "NAME")]
    tag: Option<String>,
    /// Log decoding details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = read_input(&args.input)?;
    let filename = args.input.as_ref().map(|path| path.display().to_string());
    let mut input = Input::from_str(&source);
    if let Some(name) = filename.as_deref() {
        input = input.with_filename(name);
    }

    let tree = tagtree::from_input(input, Config::default()).context("failed to decode document")?;
    info!(root = %tree.name(), "decoded document");

    let rendered = match &args.tag {
        Some(tag) => extract(&tree, tag)?,
        None => render(&tree, &args)?,
    };

    write_output(&args.output, rendered.as_bytes())?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn extract(tree: &Element, tag: &str) -> Result<String> {
    let Some(found) = tree.get_by_tag_name(tag) else {
        bail!("no element named <{tag}> in document");
    };
    debug!(tag, children = found.n_children(), "matched element");
    Ok(format!("{}\n", found.content()))
}

fn render(tree: &Element, args: &Args) -> Result<String> {
    let encoded = if args.compact {
        tagtree::to_string(tree)
    } else {
        tagtree::to_string_pretty(tree, &" ".repeat(args.indent))
    };
    let mut xml = encoded.context("failed to encode document")?;
    xml.push('\n');
    Ok(xml)
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
