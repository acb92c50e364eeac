//! Published artifacts, shared by every client of this process.
//!
//! Records are keyed `deployment_{id}` and never evicted; they live until the
//! process exits. Ids are random and not checked for collisions.

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use std::collections::HashMap;

use crate::models::{Deployment, DeploymentStatus, PublishedArtifact};

/// Sandbox tokens for rendering generated HTML: scripts run, but in an opaque
/// origin (no `allow-same-origin`).
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-forms allow-popups";

const ID_PREFIX: &str = "deploy_";
const ID_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{ID_PREFIX}{suffix}")
}

pub fn storage_key(id: &str) -> String {
    format!("deployment_{id}")
}

#[derive(Default)]
pub struct ArtifactStore {
    entries: RwLock<HashMap<String, PublishedArtifact>>,
}

impl ArtifactStore {
    pub fn new() -> Self { Self::default() }

    /// Stores `html` under a fresh id and returns the stored record.
    pub fn publish(&self, html: String, display_name: String, project_id: Option<String>) -> PublishedArtifact {
        let artifact = PublishedArtifact {
            id: generate_id(),
            project_id,
            display_name,
            html,
            created_at: Utc::now(),
        };
        self.entries.write().insert(storage_key(&artifact.id), artifact.clone());
        tracing::info!("📦 Published '{}' as {} ({} chars)", artifact.display_name, artifact.id, artifact.html.len());
        artifact
    }

    pub fn get(&self, id: &str) -> Option<PublishedArtifact> {
        self.entries.read().get(&storage_key(id)).cloned()
    }

    pub fn lookup(&self, id: &str) -> Option<String> {
        self.entries.read().get(&storage_key(id)).map(|a| a.html.clone())
    }

    /// All records, newest first.
    pub fn list(&self) -> Vec<PublishedArtifact> {
        let mut all: Vec<_> = self.entries.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn len(&self) -> usize { self.entries.read().len() }
}

pub fn viewing_url(public_base_url: &str, id: &str) -> String {
    format!("{}/published/{}", public_base_url.trim_end_matches('/'), id)
}

pub fn to_deployment(artifact: &PublishedArtifact, public_base_url: &str) -> Deployment {
    Deployment {
        id: artifact.id.clone(),
        project_id: artifact.project_id.clone(),
        display_name: artifact.display_name.clone(),
        url: viewing_url(public_base_url, &artifact.id),
        status: DeploymentStatus::Live,
        deployed_at: artifact.created_at,
    }
}
