use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "csslayout", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a scene and write the resulting geometry as JSON.
    Layout(LayoutArgs),
    /// Lay out a scene and print the indented geometry tree.
    Tree(TreeArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when absent).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct TreeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Tree(args) => cmd_tree(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_and_layout(path: &Path) -> anyhow::Result<(csslayout::LayoutTree, csslayout::NodeId)> {
    let scene = csslayout::Scene::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))?;
    scene.validate()?;

    let mut tree = csslayout::LayoutTree::new();
    let root = scene.build(&mut tree)?;
    let stats = tree.calculate_layout(root)?;
    tracing::info!(
        nodes = tree.len(),
        laid_out = stats.nodes_laid_out,
        measure_calls = stats.measure_calls,
        "laid out scene"
    );
    Ok((tree, root))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let (tree, root) = load_and_layout(&args.in_path)?;
    let dump = csslayout::LayoutDump::capture(&tree, root)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&dump)
    } else {
        serde_json::to_string(&dump)
    }
    .context("serialize layout JSON")?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(&out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            writeln!(w, "{json}").with_context(|| format!("write '{}'", out.display()))?;
            w.flush()
                .with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_tree(args: TreeArgs) -> anyhow::Result<()> {
    let (tree, root) = load_and_layout(&args.in_path)?;
    println!("{}", tree.debug_tree(root)?);
    Ok(())
}
