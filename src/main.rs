use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vmdoc::config::{self, NavMode, VmdocConfig};
use vmdoc::diagnostics::Diagnostics;
use vmdoc::generate::{self, GenerateOptions};
use vmdoc::matcher::PathMatcher;
use vmdoc::monorepo::MonorepoMerger;
use vmdoc::site::SiteGenerator;
use vmdoc::{output, scaffold};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "vmdoc")]
#[command(about = "Generate MkDocs pages from tagged source comments")]
#[command(long_about = "\
Generate MkDocs pages from tagged source comments

Text between tag markers in source files becomes a documentation page. Each
documented file gets a page and a raw copy of the source next to it:

  src/net/http.py:
      \"\"\"
      [vmdoc:description]
      HTTP helpers
      [vmdoc:enddescription]
      [vmdoc:start]
      ## fetch(url)
      Downloads `url`. Lines marked [vmdoc:skip_line] are dropped.
      [vmdoc:end]
      \"\"\"

  docs/
  ├── mkdocs.yml                       # nav section 'files' managed by vmdoc
  ├── vmdoc.toml                       # optional settings
  └── docs/
      ├── index.md
      └── vmdoc/
          ├── vmdocs.md                # overview of every documented file
          ├── http.py_<hash>.md        # generated page
          └── http.py_<hash>.txt       # raw source

Source selection uses gitignore syntax (last matching rule wins). By default
every file is excluded, then common code extensions are re-included.

Run 'vmdoc gen-config' to generate a documented vmdoc.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source tree to scan
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Docs project root (holds mkdocs.yml)
    #[arg(long, default_value = "docs", global = true)]
    docs: PathBuf,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum NavModeArg {
    Overview,
    Section,
}

impl From<NavModeArg> for NavMode {
    fn from(arg: NavModeArg) -> Self {
        match arg {
            NavModeArg::Overview => NavMode::Overview,
            NavModeArg::Section => NavMode::Section,
        }
    }
}

/// Shared flags for commands that scan sources.
#[derive(clap::Args, Clone)]
struct PatternArgs {
    /// Read include/exclude rules from FILE instead of the config
    #[arg(long, value_name = "FILE")]
    patterns: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract tagged docs, write pages, and update the nav
    Generate {
        #[command(flatten)]
        patterns: PatternArgs,
        /// How generated pages appear in the nav
        #[arg(long, value_enum)]
        nav_mode: Option<NavModeArg>,
        /// Delete pages left over from files no longer documented
        #[arg(long)]
        prune: bool,
        /// Build the site afterwards
        #[arg(long)]
        build: bool,
    },
    /// List the files that would be scanned for tags
    Scan(PatternArgs),
    /// Create a default docs project if none exists
    Init {
        /// site_name for the new project
        #[arg(long)]
        name: Option<String>,
    },
    /// Build the site with the external generator
    Build,
    /// Serve the site with the external generator
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,
    },
    /// Merge docs projects into a combined site
    Merge {
        /// Combined site root
        #[arg(long)]
        into: PathBuf,
        /// Projects to merge, as PATH=NAME
        #[arg(required = true, value_parser = parse_project)]
        projects: Vec<(PathBuf, String)>,
    },
    /// Print a stock vmdoc.toml with all options documented
    GenConfig,
}

fn parse_project(s: &str) -> Result<(PathBuf, String), String> {
    match s.rsplit_once('=') {
        Some((path, name)) if !path.is_empty() && !name.is_empty() => {
            Ok((PathBuf::from(path), name.to_string()))
        }
        _ => Err(format!("expected PATH=NAME, got '{s}'")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            patterns,
            nav_mode,
            prune,
            build,
        } => {
            let mut config = load_config(&cli.docs, &patterns)?;
            if let Some(mode) = nav_mode {
                config.output.nav_mode = mode.into();
            }
            let site = SiteGenerator::new(&config.site.generator);
            if build {
                site.preflight()?;
            }

            let report = generate::generate(
                &config,
                GenerateOptions {
                    source: cli.source.clone(),
                    docs_root: cli.docs.clone(),
                    prune,
                },
            )?;
            output::print_generate_output(&report, &config.output.nav_section);

            if build {
                println!("==> Building site in {}", cli.docs.display());
                site.build(&cli.docs)?;
            }
        }
        Command::Scan(patterns) => {
            let config = load_config(&cli.docs, &patterns)?;
            let mut diags = Diagnostics::new();
            let matcher = PathMatcher::parse(config.patterns.effective(), &mut diags);
            let files = matcher.matching_files(&cli.source, &mut diags)?;
            output::print_scan_output(&files, &cli.source, diags.warnings());
        }
        Command::Init { name } => {
            let config = config::load_config(&cli.docs)?;
            let name = name.unwrap_or_else(|| config.site.name.clone());
            if scaffold::default_project(&cli.docs, &name, &config.output)? {
                println!("Created docs project in {}", cli.docs.display());
            } else {
                println!("{} already exists", cli.docs.join("mkdocs.yml").display());
            }
        }
        Command::Build => {
            let config = config::load_config(&cli.docs)?;
            let site = SiteGenerator::new(&config.site.generator);
            site.preflight()?;
            site.build(&cli.docs)?;
            println!("==> Site built in {}", cli.docs.join("site").display());
        }
        Command::Serve { addr } => {
            let config = config::load_config(&cli.docs)?;
            let site = SiteGenerator::new(&config.site.generator);
            site.preflight()?;
            println!("==> Serving {} on http://{addr}", cli.docs.display());
            site.serve(&cli.docs, &addr)?;
        }
        Command::Merge { into, projects } => {
            let mut merger = MonorepoMerger::new(&into);
            for (path, name) in &projects {
                if !merger.add_project(path, name)? {
                    println!("Skipping {}: not a docs project", path.display());
                }
            }
            let mut diags = Diagnostics::new();
            let report = merger.merge(&mut diags)?;
            output::print_merge_output(&report, diags.warnings());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` raises the default level to info; `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load `vmdoc.toml` from the docs root and apply a `--patterns` file.
fn load_config(
    docs_root: &Path,
    patterns: &PatternArgs,
) -> Result<VmdocConfig, Box<dyn std::error::Error>> {
    let mut config = config::load_config(docs_root)?;
    if let Some(path) = &patterns.patterns {
        config.patterns.rules = Some(std::fs::read_to_string(path)?);
    }
    Ok(config)
}
