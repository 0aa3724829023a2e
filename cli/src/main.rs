//! mdview CLI - Markdown to presentation tree tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use mdview::render::{outline, to_json};
use mdview::{
    parser, JsonFormat, ParseOptions, PresentationTree, RenderOptions, StyleTable, SyntaxTree,
};

#[derive(Parser)]
#[command(name = "mdview")]
#[command(version)]
#[command(about = "Render Markdown into presentation trees", long_about = None)]
struct Cli {
    /// Enable debug diagnostics
    #[arg(long, global = true, env = "MDVIEW_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown (or a JSON syntax tree) to a presentation tree
    Render {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is a JSON syntax tree instead of Markdown
        #[arg(long)]
        tree: bool,

        /// Parse in inline mode (no paragraphs)
        #[arg(long)]
        inline: bool,

        /// Limit text blocks to a single line
        #[arg(long)]
        render_inline: bool,

        /// Start from an empty style table
        #[arg(long)]
        no_default_styles: bool,

        /// JSON file with style overrides
        #[arg(long, value_name = "JSON")]
        styles: Option<PathBuf>,

        /// Print an indented outline instead of JSON
        #[arg(long)]
        outline: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the syntax tree of a Markdown file as JSON
    Parse {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Parse in inline mode (no paragraphs)
        #[arg(long)]
        inline: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the resolved style table
    Styles {
        /// JSON file with style overrides
        #[arg(long, value_name = "JSON")]
        styles: Option<PathBuf>,

        /// Start from an empty style table
        #[arg(long)]
        no_default_styles: bool,
    },

    /// Show document statistics
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is a JSON syntax tree instead of Markdown
        #[arg(long)]
        tree: bool,
    },
}

/// Options shared by the render command.
struct RenderArgs {
    tree: bool,
    inline: bool,
    render_inline: bool,
    no_default_styles: bool,
    styles: Option<PathBuf>,
    outline: bool,
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_module("mdview", log::LevelFilter::Debug);
    }
    logger.init();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            tree,
            inline,
            render_inline,
            no_default_styles,
            styles,
            outline,
            compact,
            output,
        }) => cmd_render(
            &input,
            output.as_deref(),
            RenderArgs {
                tree,
                inline,
                render_inline,
                no_default_styles,
                styles,
                outline,
                compact,
            },
            cli.debug,
        ),
        Some(Commands::Parse {
            input,
            inline,
            compact,
        }) => cmd_parse(&input, inline, compact),
        Some(Commands::Styles {
            styles,
            no_default_styles,
        }) => cmd_styles(styles.as_deref(), no_default_styles),
        Some(Commands::Info { input, tree }) => cmd_info(&input, tree),
        None => {
            println!("{}", "Usage: mdview render <FILE>".yellow());
            println!("       mdview --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_overrides(path: Option<&Path>) -> mdview::Result<StyleTable> {
    match path {
        Some(path) => StyleTable::from_path(path),
        None => Ok(StyleTable::new()),
    }
}

fn load_tree(input: &Path, is_tree: bool, inline: bool) -> mdview::Result<SyntaxTree> {
    if is_tree {
        return SyntaxTree::from_path(input);
    }
    let source = fs::read_to_string(input)?;
    log::debug!("Parsing {} ({} bytes)", input.display(), source.len());
    Ok(parser::parse(&source, &ParseOptions::new().with_inline(inline)))
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: RenderArgs,
    debug: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = RenderOptions::new()
        .with_debug(debug)
        .with_parse_inline(args.inline)
        .with_render_inline(args.render_inline)
        .with_default_styles(!args.no_default_styles)
        .with_styles(load_overrides(args.styles.as_deref())?);

    let tree = load_tree(input, args.tree, options.parse_inline)?;
    let rendered = mdview::render_tree(&tree, &options);

    let text = if args.outline {
        outline(&rendered)
    } else {
        to_json(&rendered, json_format(args.compact))?
    };

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_parse(input: &Path, inline: bool, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(input, false, inline)?;
    let json = if compact {
        serde_json::to_string(&tree)?
    } else {
        tree.to_json()?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_styles(
    overrides: Option<&Path>,
    no_default_styles: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = load_overrides(overrides)?;
    let styles = StyleTable::resolve_with_defaults(!no_default_styles, &overrides);
    println!("{}", styles.to_json()?);
    Ok(())
}

fn cmd_info(input: &Path, is_tree: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_tree(input, is_tree, false)?;
    let rendered: PresentationTree = mdview::render_tree(&tree, &RenderOptions::default());
    let stats = rendered.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}",
        "Format".bold(),
        if is_tree { "JSON syntax tree" } else { "Markdown" }
    );
    println!("{}: {}", "Top-level nodes".bold(), tree.len());
    println!("{}: {}", "Syntax depth".bold(), tree.depth());

    println!();
    println!("{}", "Presentation Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = rendered.plain_text();
    println!("{}: {}", "Nodes".bold(), stats.node_count());
    println!("{}: {}", "Text runs".bold(), stats.text_count);
    println!("{}: {}", "Containers".bold(), stats.container_count);
    println!("{}: {}", "Pressables".bold(), stats.pressable_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Media".bold(), stats.media_count);
    println!("{}: {}", "Depth".bold(), stats.max_depth);
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}
