//! main file for the server

pub mod config;
pub(crate) mod controller;
pub(crate) mod database;
pub mod repository;
pub mod security;
pub mod state;
pub(crate) mod util;

use std::net::TcpListener;
use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{anyhow, Error};
use log::info;
use crate::model::Role;
use crate::server::config::{AdminSeed, ServerConfig, Storage};
use crate::server::state::AppState;

pub use controller::routes;

/// Run the server
pub async fn run(config: ServerConfig) -> Result<(), Error> {
    let state = match config.storage {
        Storage::Postgres => AppState::postgres(&config).await?,
        Storage::Memory => AppState::in_memory(),
    };
    info!("storage={} ready", config.storage);
    if let Some(admin) = &config.admin {
        bootstrap_admin(&state, admin).await?;
    }
    let listener = TcpListener::bind(config.addr)?;
    info!("listening on {}", config.addr);
    serve(listener, state)?.await?;
    Ok(())
}

/// Build the HTTP server on an already bound listener.
pub fn serve(listener: TcpListener, state: AppState) -> std::io::Result<Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes)
    })
    .listen(listener)?
    .run())
}

/// Create the admin account when its username is free.
pub async fn bootstrap_admin(state: &AppState, admin: &AdminSeed) -> Result<(), Error> {
    if state.users().find_by_username(&admin.username).await?.is_some() {
        info!("admin user={} already present", admin.username);
        return Ok(());
    }
    let hash = state
        .passwords()
        .encode(&admin.password)
        .map_err(|e| anyhow!("failed to hash admin password, {}", e))?;
    state.users().insert(&admin.username, &hash, Role::Admin).await?;
    info!("admin user={} created", admin.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn bootstrap_is_idempotent() {
        let state = AppState::in_memory();
        let seed = AdminSeed { username: "root".to_string(), password: "toor".to_string() };
        bootstrap_admin(&state, &seed).await.unwrap();
        bootstrap_admin(&state, &seed).await.unwrap();

        let users = state.users().find_all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert!(state.passwords().matches("toor", &users[0].password_hash));
    }
}
