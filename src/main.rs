//! restaurant server entry point

use std::env;
use std::path::Path;
use std::str::FromStr;
use anyhow::Context;
use derive_more::Display;
use log::info;
use restaurant_pos::server;
use restaurant_pos::server::config::ServerConfig;

const DEV_DOTENV_PATH: &str = ".env.dev";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_env = load_env()?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_lookup(|key| env::var(key).ok()).context("invalid server configuration")?;
    info!(
        "restaurant server starting, env={} storage={} pool_size={} admin_seed={}",
        app_env,
        config.storage,
        config.pool_size,
        config.admin.is_some()
    );

    server::run(config).await
}

/// `APP_ENV` picks where variables come from, dev reads them from a dotenv file.
fn load_env() -> anyhow::Result<AppEnv> {
    let app_env = env::var("APP_ENV")
        .ok()
        .map(|v| v.parse::<AppEnv>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(AppEnv::Dev);

    if let AppEnv::Dev = app_env {
        dotenvy::from_path(Path::new(DEV_DOTENV_PATH))
            .with_context(|| format!("failed to load envs from {}", DEV_DOTENV_PATH))?;
    }
    Ok(app_env)
}

#[derive(Debug, Display, Clone, Copy)]
enum AppEnv {
    #[display("dev")]
    Dev,
    #[display("stg")]
    Stg,
    #[display("prod")]
    Prod,
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid APP_ENV: {s}")),
        }
    }
}
