use anyhow::{Context, Result, bail};
use clap::Parser;
use markdown_highlight_config::Config;
use markdown_highlight_engine::{
    Delimiter, HighlightPlugin, HtmlRenderer, Processor, highlight_handler, io,
};
use std::path::{Path, PathBuf};
use std::process;

const TREE_FILE: &str = "mdast-output.json";
const HTML_FILE: &str = "html-output.html";

/// Rewrite !!marked!! spans in a Markdown file into highlight nodes, then
/// write the rewritten tree as JSON and the rendered HTML.
#[derive(Parser, Debug)]
#[command(name = "markdown-highlight", version, about)]
struct Cli {
    /// Markdown file to process
    input: PathBuf,

    /// Directory for the output files (defaults to the input's directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.config/markdown-highlight/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Marker character, doubled on each side of a span
    #[arg(long)]
    marker: Option<char>,

    /// Inline CSS for rendered highlights
    #[arg(long)]
    style: Option<String>,

    /// Pass raw HTML from the Markdown through to the output
    #[arg(long)]
    allow_html: bool,

    /// Only write the tree dump, skip HTML output
    #[arg(long)]
    no_html: bool,

    /// Save the effective marker, style and output directory to the config file
    #[arg(long)]
    write_config: bool,
}

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, PartialEq)]
struct Settings {
    style: String,
    out_dir: PathBuf,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Self {
        Self {
            style: config.style,
            out_dir: config
                .output_dir
                .unwrap_or_else(|| input_dir(&cli.input)),
        }
    }
}

#[derive(Debug)]
struct Outputs {
    tree_path: PathBuf,
    html_path: Option<PathBuf>,
    html: String,
}

fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Flags win over values from the config file.
fn merge(cli: &Cli, config: Config) -> Config {
    Config {
        marker: cli.marker.unwrap_or(config.marker),
        style: cli.style.clone().unwrap_or(config.style),
        output_dir: cli.out_dir.clone().or(config.output_dir),
    }
}

fn save_config(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    config
        .save_to_path(&path)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(path)
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None if cli.write_config => Ok(Config::default()),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn run(cli: &Cli, config: Config) -> Result<Outputs> {
    let config = merge(cli, config);
    let plugin = HighlightPlugin::new(Delimiter::new(config.marker)?);

    if cli.write_config {
        let path = save_config(cli, &config)?;
        log::info!("Config written to {}", path.display());
    }

    let settings = Settings::resolve(cli, config);
    log::info!(
        "Highlighting {} spans in {}",
        plugin.delimiter().fence(),
        cli.input.display()
    );

    let markdown = io::read_markdown(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let processor = Processor::new().use_stage(HighlightPlugin::NAME, plugin);
    let tree = processor.run_source(&markdown);

    let tree_path = settings.out_dir.join(TREE_FILE);
    let json = serde_json::to_string_pretty(&tree).context("Failed to serialize tree")?;
    io::write_output(&tree_path, &json)
        .with_context(|| format!("Failed to write {}", tree_path.display()))?;
    log::info!("Tree written to {}", tree_path.display());

    let renderer = HtmlRenderer::new()
        .with_handler(HighlightPlugin::NAME, highlight_handler(settings.style))
        .allow_dangerous_html(cli.allow_html);
    let html = renderer.render(&tree);

    let html_path = if cli.no_html {
        None
    } else {
        let path = settings.out_dir.join(HTML_FILE);
        io::write_output(&path, &html)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("HTML written to {}", path.display());
        Some(path)
    };

    Ok(Outputs {
        tree_path,
        html_path,
        html,
    })
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let result = load_config(&cli).and_then(|config| run(&cli, config));

    match result {
        Ok(outputs) => {
            log::debug!(
                "Outputs: tree={} html={:?}",
                outputs.tree_path.display(),
                outputs.html_path
            );
            print!("{}", outputs.html);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
