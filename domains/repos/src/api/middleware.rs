//! Repos domain state

use pit_common::LayeredEnv;
use pit_github::GitHubService;
use std::sync::Arc;

/// Application state for the Repos domain
#[derive(Clone)]
pub struct ReposState {
    pub github: Arc<dyn GitHubService>,
    pub env: Arc<LayeredEnv>,
}
