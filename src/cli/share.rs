//! `sandpen share`: print a share link for the workspace buffers.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use url::Url;

use crate::{config::PenConfig, persist::share_url, workspace::read_project};

/// Build the share link. Without `base`, it points at the local server.
pub fn share_link(config: &PenConfig, base: Option<&str>) -> Result<String> {
    let state = read_project(config.workspace(), &config.editor.file_names())
        .context("Workspace is incomplete, run `sandpen init` first")?;
    let base = match base {
        Some(base) => Url::parse(base).with_context(|| format!("Invalid base URL '{base}'"))?,
        None => default_base(config)?,
    };
    Ok(share_url(&base, &state))
}

/// Print the share link on stdout.
pub fn print_share_link(config: &PenConfig, base: Option<&str>) -> Result<()> {
    println!("{}", share_link(config, base)?);
    Ok(())
}

fn default_base(config: &PenConfig) -> Result<Url> {
    let addr = SocketAddr::new(config.serve.interface, config.serve.port);
    Url::parse(&format!("http://{addr}/")).with_context(|| format!("Invalid address {addr}"))
}
