// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Layered config discovery.  Every TOML file found is overlaid on the ones
//! before it, table by table, and the result is checked against [`Config`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};
use tracing::debug;

use crate::Config;

/// Where a config layer came from, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    System,
    User,
    Project,
    Explicit,
}

fn discovered_layers() -> Vec<(Origin, PathBuf)> {
    let mut layers = vec![(Origin::System, PathBuf::from("/etc/docchat/config.toml"))];

    let user_dirs = [
        dirs::home_dir().map(|h| h.join(".config")),
        dirs::config_dir(),
    ];
    for dir in user_dirs.into_iter().flatten() {
        let file = dir.join("docchat").join("config.toml");
        if !layers.iter().any(|(_, p)| *p == file) {
            layers.push((Origin::User, file));
        }
    }

    layers.push((Origin::Project, PathBuf::from(".docchat/config.toml")));
    layers.push((Origin::Project, PathBuf::from("docchat.toml")));
    layers
}

/// Build the effective configuration.  `explicit` (the `--config` flag) is
/// applied last and, unlike discovered files, must exist.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut effective = Value::Table(Map::new());

    let present = discovered_layers().into_iter().filter(|(_, p)| p.is_file());
    let chosen = explicit.map(|p| (Origin::Explicit, p.to_path_buf()));
    for (origin, path) in present.chain(chosen) {
        debug!(?origin, path = %path.display(), "applying config layer");
        overlay(&mut effective, parse_file(&path)?);
    }

    effective
        .try_into()
        .context("merged configuration does not match the schema")
}

fn parse_file(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Tables merge key by key; any other value in `upper` replaces `base`.
fn overlay(base: &mut Value, upper: Value) {
    let upper_table = match upper {
        Value::Table(t) => t,
        other => {
            *base = other;
            return;
        }
    };
    match base {
        Value::Table(base_table) => {
            for (key, value) in upper_table {
                match base_table.get_mut(&key) {
                    Some(existing) => overlay(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        other => *other = Value::Table(upper_table),
    }
}
