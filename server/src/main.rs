#[macro_use] extern crate rocket;

use std::path::PathBuf;

use argh::FromArgs;
use rocket::{Build, Rocket};
use tracing::{error, info};

mod config;
mod files;

use config::SServerConfig;
use files::SSiteRoot;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "serve")]
#[argh(description = "Serve the generated site over HTTP.")]
struct SArghsServe {
    #[argh(option)]
    #[argh(description = "directory holding the generated site, overrides the stored config.")]
    site_dir: Option<PathBuf>,

    #[argh(option)]
    #[argh(description = "port to listen on, overrides the stored config.")]
    port: Option<u16>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "set_site_dir")]
#[argh(description = "Store the directory holding the generated site.")]
struct SArghsSetSiteDir {
    #[argh(positional)]
    site_dir: PathBuf,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum EArghsSubcommands {
    Serve(SArghsServe),
    SetSiteDir(SArghsSetSiteDir),
}

#[derive(FromArgs)]
#[argh(description = "swumeta static site server")]
struct SArghs {
    #[argh(subcommand)]
    subcommand: EArghsSubcommands,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

pub fn build_rocket(cfg: &SServerConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", cfg.address.clone()))
        .merge(("port", cfg.port));

    rocket::custom(figment)
        .manage(SSiteRoot(cfg.site_dir.clone()))
        .mount("/", routes![
            files::serve_file,
            files::reject_post,
            files::reject_put,
            files::reject_delete,
            files::reject_patch,
            files::reject_head,
            files::reject_options,
        ])
        .register("/", catchers![files::not_found])
}

async fn serve(args: SArghsServe) -> Result<(), String> {
    let cfg = SServerConfig::load()?
        .site_dir(args.site_dir)
        .port(args.port);

    if !cfg.site_dir.is_dir() {
        return Err(format!("Site directory {} does not exist", cfg.site_dir.display()));
    }

    info!("Serving {}", cfg.site_dir.display());
    info!("Listening on port: {}", cfg.port);

    build_rocket(&cfg).launch().await
        .map_err(|e| format!("Failed to serve resources on port {} with: {}", cfg.port, e))?;

    Ok(())
}

fn set_site_dir(args: SArghsSetSiteDir) -> Result<(), String> {
    let cfg = SServerConfig::load()?.site_dir(Some(args.site_dir));
    cfg.store()?;

    info!("Stored site directory {}", cfg.site_dir.display());
    Ok(())
}

#[rocket::main]
async fn main() {
    init_tracing();

    let arghs: SArghs = argh::from_env();
    let result = match arghs.subcommand {
        EArghsSubcommands::Serve(args) => serve(args).await,
        EArghsSubcommands::SetSiteDir(args) => set_site_dir(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
