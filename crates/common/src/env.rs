//! Layered environment lookup
//!
//! Values are resolved from an ordered chain of sources, first non-empty wins:
//! 1. the runtime-provided environment map (loaded once at startup)
//! 2. the process environment (read at lookup time)
//! 3. values captured at build time
//!
//! The chain is read-only after construction and safe to share across requests.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::Error;

/// Key of the GitHub bearer token in every layer.
pub const GITHUB_TOKEN_KEY: &str = "GITHUB_TOKEN";

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvLayer {
    Runtime,
    Process,
    BuildTime,
}

impl fmt::Display for EnvLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvLayer::Runtime => write!(f, "runtime"),
            EnvLayer::Process => write!(f, "process"),
            EnvLayer::BuildTime => write!(f, "build-time"),
        }
    }
}

/// A single lookup function in the chain
pub type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// GitHub bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Ordered fallback chain of environment sources
#[derive(Clone)]
pub struct LayeredEnv {
    layers: Vec<(EnvLayer, Lookup)>,
}

impl fmt::Debug for LayeredEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredEnv")
            .field(
                "layers",
                &self.layers.iter().map(|(layer, _)| *layer).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LayeredEnv {
    /// Runtime map, then process environment, then build-time values.
    pub fn standard(runtime: HashMap<String, String>) -> Self {
        Self::from_layers(vec![
            (
                EnvLayer::Runtime,
                Arc::new(move |key: &str| runtime.get(key).cloned()) as Lookup,
            ),
            (
                EnvLayer::Process,
                Arc::new(|key: &str| std::env::var(key).ok()) as Lookup,
            ),
            (EnvLayer::BuildTime, Arc::new(build_time_lookup) as Lookup),
        ])
    }

    /// Compose a chain from explicit layers, consulted in order.
    pub fn from_layers(layers: Vec<(EnvLayer, Lookup)>) -> Self {
        Self { layers }
    }

    /// A chain backed only by the given map. Convenient for tests and mocks.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self::from_layers(vec![(
            EnvLayer::Runtime,
            Arc::new(move |key: &str| values.get(key).cloned()) as Lookup,
        )])
    }

    /// A chain that never resolves anything.
    pub fn empty() -> Self {
        Self::from_layers(Vec::new())
    }

    /// First non-blank value for `key`, with the layer that supplied it.
    pub fn get(&self, key: &str) -> Option<(EnvLayer, String)> {
        self.layers.iter().find_map(|(layer, lookup)| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| (*layer, value))
        })
    }

    /// Resolve the GitHub bearer token.
    pub fn github_token(&self) -> Result<Credential, Error> {
        match self.get(GITHUB_TOKEN_KEY) {
            Some((layer, token)) => {
                tracing::debug!(%layer, "Resolved GitHub credential");
                Ok(Credential::new(token))
            }
            None => Err(Error::Configuration(format!(
                "{} is not set in any environment layer",
                GITHUB_TOKEN_KEY
            ))),
        }
    }
}

#[mutants::skip] // Depends on the compile-time environment of the build
fn build_time_lookup(key: &str) -> Option<String> {
    match key {
        GITHUB_TOKEN_KEY => option_env!("GITHUB_TOKEN").map(str::to_string),
        _ => None,
    }
}

/// Read a dotenv-format file into the runtime environment map.
///
/// A missing or unreadable file yields an empty map.
pub fn load_runtime_map(path: impl AsRef<Path>) -> HashMap<String, String> {
    let path = path.as_ref();
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Runtime environment file unavailable");
            return HashMap::new();
        }
    };

    let mut values = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping malformed runtime environment entry");
            }
        }
    }

    tracing::info!(path = %path.display(), entries = values.len(), "Loaded runtime environment");
    values
}
