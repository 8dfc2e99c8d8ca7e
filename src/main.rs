use std::{
    fs::{self, create_dir_all, remove_dir_all},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use hashsite::{
    page::{render_container, render_page},
    subpage::EmbedKind,
    router::normalize,
    QueuedLoader, RouteMatch, Session, Site,
};
use url::Url;
use log::{info, warn};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "hashsite")]
#[command(author, version, about = "Hash-routed single-page site renderer", long_about = None)]
struct Args {
    /// Site directory holding config.toml, templates/ and static/
    #[arg(short, long, default_value = ".")]
    path: String,
    /// Point base_url at the local preview server
    #[arg(short, long)]
    local: bool,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the page shown for a fragment such as `#/foam/fps-energy`
    Render {
        fragment: String,
        /// Print the content container without the layout
        #[arg(long)]
        bare: bool,
    },
    /// Pre-render every route and sub-page into a static tree
    Build {
        #[arg(default_value = "public")]
        output_dir: String,
    },
    /// Check that the root route and every route have a template
    Check,
    /// List routes and sub-pages
    Routes,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let _ = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
}

/// Navigates a fresh session to `fragment` and settles its script loads the
/// way a browser would once the tags are on the page. `current_url` is only
/// used by the layout.
fn render_fragment(
    site: &Site,
    fragment: &str,
    current_url: &Url,
    bare: bool,
) -> anyhow::Result<String> {
    let mut session = Session::new(&site.router, QueuedLoader::default());
    session.navigate(fragment);

    for request in session.loader_mut().drain() {
        session.settle(request.ticket, Ok(()));
    }

    if bare {
        render_container(site.router.templates(), &site.config, session.container())
    } else {
        render_page(
            site.router.templates(),
            &site.config,
            session.container(),
            current_url,
        )
    }
}

fn output_path(fragment: &str) -> PathBuf {
    let path = fragment.trim_matches('/');
    if path.is_empty() {
        PathBuf::from("index.html")
    } else {
        Path::new(path).join("index.html")
    }
}

fn clean_output_dir(output_dir: &Path) -> anyhow::Result<()> {
    if output_dir.exists() {
        remove_dir_all(output_dir)?;
    }
    create_dir_all(output_dir)?;
    Ok(())
}

fn write_to_output(output_dir: &Path, path: &Path, contents: &str) -> anyhow::Result<()> {
    let output = output_dir.join(path);

    output.parent().map(create_dir_all).transpose()?;

    fs::write(output, contents)?;

    Ok(())
}

fn copy_static_files(site: &Site, output_dir: &Path) -> anyhow::Result<()> {
    let static_dir = site.absolute("static");

    if !static_dir.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(&static_dir) {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        info!("copying {} to output", site.relative(entry.path())?.display());

        let output = output_dir.join(entry.path().strip_prefix(&static_dir)?);
        output.parent().map(create_dir_all).transpose()?;
        fs::copy(entry.path(), output)?;
    }

    Ok(())
}

fn build(site: &Site, output_dir: &Path) -> anyhow::Result<()> {
    clean_output_dir(output_dir)?;
    copy_static_files(site, output_dir)?;

    let fragments = site.fragments();

    for fragment in &fragments {
        let path = output_path(fragment);
        let permalink = site.config.make_permalink(&path.to_string_lossy())?;
        info!("rendering #{fragment} to {permalink}");

        let contents = render_fragment(site, fragment, &permalink, false)?;
        write_to_output(output_dir, &path, &contents)?;
    }

    println!(
        "built {} pages into {}",
        fragments.len(),
        output_dir.display()
    );

    Ok(())
}

fn check(site: &Site) -> anyhow::Result<()> {
    let missing = site.router.missing_templates();

    for (key, id) in &missing {
        warn!("route '{key}' points at missing template '{id}'");
    }

    if site.router.resolve("/") == RouteMatch::NotFound {
        return Err(anyhow!("root route '/' has no template"));
    }

    if !missing.is_empty() {
        return Err(anyhow!("{} route(s) have no template", missing.len()));
    }

    let subpages = site
        .router
        .sections()
        .map(|(_, section)| section.subpages.len())
        .sum::<usize>();

    println!(
        "site ok: {} routes, {} sub-pages",
        site.router.routes().count(),
        subpages
    );

    Ok(())
}

fn list_routes(site: &Site) {
    for (key, id) in site.router.routes() {
        println!("{key}\t{id}");

        let Some(section) = site.router.section(key) else {
            continue;
        };

        for (slug, entry) in &section.subpages {
            let kind = match entry.kind {
                EmbedKind::Embed => "embed",
                EmbedKind::Script => "script",
                EmbedKind::Link => "link",
            };
            println!("  {key}/{slug}\t{kind}\t{}", entry.target);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    info!("running with {args:?}");

    let home = PathBuf::from_str(&args.path)?;
    let site = Site::load(home, args.local)?;

    match &args.command {
        Command::Render { fragment, bare } => {
            let current_url = site.config.fragment_url(normalize(fragment));
            println!("{}", render_fragment(&site, fragment, &current_url, *bare)?);
        }
        Command::Build { output_dir } => {
            let output_dir = site.absolute(output_dir);
            build(&site, &output_dir)?;
        }
        Command::Check => check(&site)?,
        Command::Routes => list_routes(&site),
    }

    Ok(())
}
