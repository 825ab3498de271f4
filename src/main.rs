use clap::{Parser, Subcommand};
use makesite::config::{self, FailurePolicy};
use makesite::generate::Generator;
use makesite::{batch, output, template};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "makesite")]
#[command(version, about = "Turn text and markdown files into HTML pages")]
#[command(long_about = "\
Turn text and markdown files into HTML pages

Each source file is rendered through one shared template and written next
to itself with an .html extension:

  template.tmpl                               # shared page template
  posts/
  ├── first-post.txt   →  first-post.html     # plain text, escaped by the template
  └── second-post.md   →  second-post.html    # markdown, converted to HTML

The title is the first line of the file. For markdown the heading marker and
trailing punctuation are dropped: '# Hello, World!' → 'Hello, World'.

Template variables: TextFilePath, TextFileName, HTMLPagePath, Content,
Title, IsMarkdown. Use '{{ Content | html }}' to embed markdown output.

Run 'makesite gen-template' for a starter template and 'makesite gen-config'
for a documented makesite.toml.")]
struct Cli {
    /// Process exactly one source file
    #[arg(long, value_name = "PATH", conflicts_with = "dir")]
    file: Option<PathBuf>,

    /// Process every .txt and .md file directly inside a directory
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Page template (overrides the config file)
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Config file; missing is fine
    #[arg(long, value_name = "PATH", default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// In directory mode, skip failed files instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Don't echo rendered HTML
    #[arg(short, long)]
    quiet: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a makesite.toml with all options documented
    GenConfig,
    /// Print the stock page template
    GenTemplate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    makesite::init_tracing(cli.verbose);

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Some(Command::GenTemplate) => {
            print!("{}", template::STOCK_TEMPLATE);
            return Ok(());
        }
        None => {}
    }

    let mut site_config = config::load_config(&cli.config)?;
    if let Some(template) = cli.template {
        site_config.template = template;
    }
    if cli.keep_going {
        site_config.on_error = FailurePolicy::Continue;
    }
    if cli.quiet {
        site_config.echo_html = false;
    }
    site_config.validate()?;
    tracing::debug!(?site_config, "Resolved configuration");

    let generator = Generator::from_config(&site_config)?;
    let mut preview = io::stdout().lock();

    match cli.dir {
        Some(dir) => {
            let report = batch::run(&generator, &dir, site_config.on_error, &mut preview)?;
            output::print_summary(&report);
            report.ensure_complete()?;
        }
        None => {
            let source = cli.file.unwrap_or(site_config.default_file);
            generator.generate_page(&source, &mut preview)?;
        }
    }

    Ok(())
}
