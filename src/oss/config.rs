//! Storage profile management
//!
//! Profiles pair a service endpoint with credentials and are selected by
//! index. Each profile carries two endpoint variants: the public one and an
//! intranet one for hosts inside the provider network. The store persists
//! as JSON in the platform-specific config folder:
//! - Linux: ~/.config/oss-client/profiles.json
//! - Windows: %APPDATA%/oss-client/profiles.json
//! - macOS: ~/Library/Application Support/oss-client/profiles.json

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::oss::error::OssError;

/// Which of a profile's two endpoints to connect through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointKind {
    /// Public endpoint, reachable from anywhere
    External,
    /// Intranet endpoint, reachable only from inside the provider network
    Internal,
}

/// A preconfigured endpoint/credential pair
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OssProfile {
    pub name: String,

    /// Public endpoint URL
    pub endpoint: String,

    /// Intranet endpoint URL; falls back to `endpoint` when absent
    #[serde(default)]
    pub internal_endpoint: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// Use path-style addressing (required by MinIO and some self-hosted stores)
    #[serde(default)]
    pub path_style: bool,

    pub access_key_id: String,
    pub access_key_secret: String,
}

impl OssProfile {
    /// Resolve the endpoint URL for the requested network
    pub fn endpoint_for(&self, kind: EndpointKind) -> &str {
        match kind {
            EndpointKind::External => &self.endpoint,
            EndpointKind::Internal => self.internal_endpoint.as_deref().unwrap_or(&self.endpoint),
        }
    }
}

/// Ordered collection of storage profiles, selected by index
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileStore {
    #[serde(default)]
    profiles: Vec<OssProfile>,
}

impl ProfileStore {
    /// Build a store from an in-memory profile list
    pub fn from_profiles(profiles: Vec<OssProfile>) -> Self {
        Self { profiles }
    }

    /// Load the store from the default config location, returning an empty
    /// store if no profiles file exists yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::profiles_path()?)
    }

    /// Load the store from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Profiles file not found, starting empty");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profiles from {:?}", path))?;

        let store: ProfileStore = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse profiles from {:?}", path))?;

        tracing::info!(count = store.profiles.len(), "Loaded storage profiles");

        Ok(store)
    }

    /// Save the store to the default config location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::profiles_path()?)
    }

    /// Save the store to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create profiles directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize profiles")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write profiles to {:?}", path))?;

        tracing::debug!("Saved profiles to {:?}", path);

        Ok(())
    }

    /// Get the path to the profiles file
    fn profiles_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "ihawk", "oss-client")
            .context("Failed to determine profiles directory")?;

        Ok(proj_dirs.config_dir().join("profiles.json"))
    }

    /// Select a profile by index
    pub fn get(&self, index: usize) -> std::result::Result<&OssProfile, OssError> {
        self.profiles.get(index).ok_or(OssError::ProfileNotFound(index))
    }

    /// Append a profile to the store
    pub fn push(&mut self, profile: OssProfile) {
        self.profiles.push(profile);
    }

    pub fn profiles(&self) -> &[OssProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_profile(name: &str) -> OssProfile {
        OssProfile {
            name: name.to_string(),
            endpoint: format!("https://{}.example.com", name),
            internal_endpoint: Some(format!("https://{}-internal.example.com", name)),
            region: None,
            path_style: false,
            access_key_id: "AKID".to_string(),
            access_key_secret: "SECRET".to_string(),
        }
    }

    #[test]
    fn test_store_default_is_empty() {
        let store = ProfileStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_get_by_index() {
        let store = ProfileStore::from_profiles(vec![make_profile("first"), make_profile("second")]);

        assert_eq!(store.get(0).unwrap().name, "first");
        assert_eq!(store.get(1).unwrap().name, "second");
    }

    #[test]
    fn test_get_out_of_range_is_typed_error() {
        let store = ProfileStore::from_profiles(vec![make_profile("only")]);

        let err = store.get(5).unwrap_err();
        assert!(matches!(err, OssError::ProfileNotFound(5)));
    }

    #[test]
    fn test_endpoint_for_external_and_internal() {
        let profile = make_profile("prod");
        assert_eq!(
            profile.endpoint_for(EndpointKind::External),
            "https://prod.example.com"
        );
        assert_eq!(
            profile.endpoint_for(EndpointKind::Internal),
            "https://prod-internal.example.com"
        );
    }

    #[test]
    fn test_endpoint_for_internal_falls_back() {
        let mut profile = make_profile("prod");
        profile.internal_endpoint = None;
        assert_eq!(
            profile.endpoint_for(EndpointKind::Internal),
            "https://prod.example.com"
        );
    }

    #[test]
    fn test_store_serialization_roundtrip() {
        let store = ProfileStore::from_profiles(vec![make_profile("roundtrip")]);

        let json = serde_json::to_string(&store).unwrap();
        let parsed: ProfileStore = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get(0).unwrap().name, "roundtrip");
        assert_eq!(
            parsed.get(0).unwrap().internal_endpoint,
            store.get(0).unwrap().internal_endpoint
        );
    }

    #[test]
    fn test_profile_partial_deserialization() {
        // Optional fields may be absent from the profiles file
        let json = r#"{
            "name": "minimal",
            "endpoint": "https://oss.example.com",
            "access_key_id": "AKID",
            "access_key_secret": "SECRET"
        }"#;
        let profile: OssProfile = serde_json::from_str(json).unwrap();

        assert!(profile.internal_endpoint.is_none());
        assert!(profile.region.is_none());
        assert!(!profile.path_style);
    }

    #[test]
    fn test_unknown_json_fields_are_ignored() {
        // Profiles files written by newer versions may carry extra keys
        let json = r#"{
            "profiles": [
                {
                    "name": "forward-compat",
                    "endpoint": "https://oss.example.com",
                    "access_key_id": "AKID",
                    "access_key_secret": "SECRET",
                    "comment": "edited by hand",
                    "quota_gb": 500
                }
            ],
            "schema_version": 2
        }"#;
        let store: ProfileStore = serde_json::from_str(json).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "forward-compat");
    }

    #[test]
    fn test_save_to_and_load_from() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("profiles.json");

        let mut store = ProfileStore::default();
        store.push(make_profile("persisted"));
        store.save_to(&path).unwrap();

        let loaded = ProfileStore::load_from(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(0).unwrap().name, "persisted");
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("does-not-exist.json");

        let store = ProfileStore::load_from(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_from_empty_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles.json");
        fs::write(&path, "{}").unwrap();

        let store = ProfileStore::load_from(&path).unwrap();
        assert!(store.is_empty());
    }
}
