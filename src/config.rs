use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;

use precheck_engine::pipeline::EMPTY_SOURCE_CODE;
use precheck_engine::{Pipeline, RuleRegistry};

use crate::gate::{Gate, GatePolicy};

pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Rule ids removed from the pipeline.
    pub disabled_rules: Vec<String>,
    /// Which diagnostics block a submission.
    pub gate: GatePolicy,
    /// Inputs longer than this are not analysed.
    pub max_input_bytes: usize,
    /// Globs for paths skipped while walking directories.
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            gate: GatePolicy::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Built-in rules minus the disabled ones.
    pub fn registry(&self) -> RuleRegistry {
        let mut registry = RuleRegistry::builtin();

        for id in &self.disabled_rules {
            if id == EMPTY_SOURCE_CODE {
                log::warn!("Rule {EMPTY_SOURCE_CODE} cannot be disabled");
            } else if registry.get(id).is_none() {
                log::warn!("Unknown rule in disabled_rules: {id}");
            }
        }

        let removed = registry.disable(&self.disabled_rules);
        log::debug!("Disabled {removed} rule(s)");
        registry
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.registry())
    }

    pub fn gate(&self) -> Gate {
        Gate::new(self.gate)
    }

    pub fn exceeds_input_limit(&self, source: &str) -> bool {
        source.len() > self.max_input_bytes
    }

    pub fn exclude_set(&self) -> io::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid exclude pattern {pattern:?}: {e}"),
                )
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn disable_rule(mut self, id: impl Into<String>) -> Self {
        self.config.disabled_rules.push(id.into());
        self
    }

    pub fn gate(mut self, policy: GatePolicy) -> Self {
        self.config.gate = policy;
        self
    }

    pub fn max_input_bytes(mut self, limit: usize) -> Self {
        self.config.max_input_bytes = limit;
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude.push(pattern.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

const CANDIDATE_NAMES: &[&str] = &[".precheck.toml", "precheck.toml"];

fn parse_config_str(s: &str, path: &Path) -> io::Result<Config> {
    toml::from_str::<Config>(s).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid config {}: {e}", path.display()),
        )
    })
}

fn read_config(path: &Path) -> io::Result<Config> {
    log::debug!("Reading config from: {}", path.display());
    let s = fs::read_to_string(path)?;
    let config = parse_config_str(&s, path)?;
    log::info!("Loaded config from: {}", path.display());
    Ok(config)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

fn user_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    let p = base.join("precheck").join("config.toml");
    p.is_file().then_some(p)
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .precheck.toml, precheck.toml
/// 3) $XDG_CONFIG_HOME/precheck/config.toml, else the platform config dir
/// 4) default config
pub fn load(explicit: Option<&Path>, start_dir: &Path) -> io::Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    if let Some(p) = user_config_path() {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring {}: {e}", p.display()),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
