use clap::Parser;
use mixview::{ActionRuntime, MixviewError, RenderingBuilder, StaticPage, StaticRequestContext, render_page};
use std::env;
use std::path::PathBuf;

// Use Mimalloc: rendering is dominated by many small tree allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Renders one template route through the typical view and prints the page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Web root directory, searched first
    #[arg(long)]
    root: Option<PathBuf>,

    /// Packaged resources directory, searched second
    #[arg(long)]
    packaged: Option<PathBuf>,

    /// Route of the template, e.g. /member/member_list.html
    #[arg(long)]
    route: String,

    /// Context path prefixed to resolved links
    #[arg(long, default_value = "")]
    context_path: String,

    /// JSON rendering configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the version query to css/js paths
    #[arg(long, default_value_t = false)]
    version_query: bool,
}

fn main() -> Result<(), MixviewError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "mixview=info,mixview_core=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let mut builder = RenderingBuilder::new();
    if let Some(config) = &args.config {
        builder = builder.with_config_file(config)?;
    }
    if let Some(root) = &args.root {
        builder = builder.with_web_root(root);
    }
    if let Some(packaged) = &args.packaged {
        builder = builder.with_packaged(packaged);
    }
    if args.version_query {
        builder = builder.with_version_query(true);
    }
    let provider = builder.build()?;

    let request = StaticRequestContext::new(args.context_path.as_str());
    let runtime = ActionRuntime::new("mixview", "render");
    let html = render_page(&provider, &request, &runtime, &args.route, StaticPage)?;
    log::info!("Rendered {} ({} bytes)", args.route, html.len());
    println!("{html}");
    Ok(())
}
