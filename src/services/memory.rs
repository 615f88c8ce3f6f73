// SPDX-License-Identifier: MIT
//! In-memory CMS service backend.
//!
//! Backs the CMS-entity checks when sitecheck runs outside the CMS process:
//! the CLI hydrates it from a JSON snapshot of exported entities, and the
//! test suite constructs it directly. Mutating fixes update the in-memory
//! state only — the snapshot file on disk is never rewritten.

use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{HealthCheckError, Result};
use crate::services::{
    ContentService, ContentType, ContentTypeService, DataType, DataTypeService, MediaItem,
    MediaService, MediaType, MediaTypeService, RedirectUrl, RedirectUrlService, Section,
    SectionService, User, UserGroup, UserService,
};

/// Serializable snapshot of the CMS entities the checks consume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSnapshot {
    pub sections: Vec<Section>,
    pub user_groups: Vec<UserGroup>,
    pub users: Vec<User>,
    pub content_types: Vec<ContentType>,
    pub media_types: Vec<MediaType>,
    pub data_types: Vec<DataType>,
    pub media: Vec<MediaItem>,
    /// Item ids currently in the content recycle bin.
    pub content_recycle_bin: Vec<i64>,
    /// Item ids currently in the media recycle bin.
    pub media_recycle_bin: Vec<i64>,
    pub redirect_urls: Vec<RedirectUrl>,
}

pub struct MemoryCms {
    state: RwLock<CmsSnapshot>,
}

impl MemoryCms {
    pub fn new(snapshot: CmsSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    pub fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| HealthCheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot =
            serde_json::from_slice(&bytes).map_err(|source| HealthCheckError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(snapshot))
    }

    /// Clone of the current state, for assertions after mutating fixes.
    pub fn snapshot(&self) -> CmsSnapshot {
        self.read().clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CmsSnapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CmsSnapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl UserService for MemoryCms {
    fn get_all_user_groups(&self) -> Vec<UserGroup> {
        self.read().user_groups.clone()
    }

    fn save_user_group(&self, group: UserGroup) {
        let mut state = self.write();
        match state.user_groups.iter_mut().find(|g| g.alias == group.alias) {
            Some(existing) => *existing = group,
            None => state.user_groups.push(group),
        }
    }

    fn get_by_username(&self, username: &str) -> Option<User> {
        self.read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }
}

impl SectionService for MemoryCms {
    fn get_sections(&self) -> Vec<Section> {
        self.read().sections.clone()
    }
}

impl ContentTypeService for MemoryCms {
    fn get_all(&self) -> Vec<ContentType> {
        self.read().content_types.clone()
    }
}

impl MediaTypeService for MemoryCms {
    fn get_all(&self) -> Vec<MediaType> {
        self.read().media_types.clone()
    }

    fn save(&self, media_type: MediaType) {
        let mut state = self.write();
        match state
            .media_types
            .iter_mut()
            .find(|m| m.alias == media_type.alias)
        {
            Some(existing) => *existing = media_type,
            None => state.media_types.push(media_type),
        }
    }
}

impl DataTypeService for MemoryCms {
    fn get_by_editor_alias(&self, editor_alias: &str) -> Vec<DataType> {
        self.read()
            .data_types
            .iter()
            .filter(|d| d.editor_alias == editor_alias)
            .cloned()
            .collect()
    }
}

impl MediaService for MemoryCms {
    fn get_root_media(&self) -> Vec<MediaItem> {
        self.get_by_level(1)
    }

    fn get_by_level(&self, level: u32) -> Vec<MediaItem> {
        self.read()
            .media
            .iter()
            .filter(|m| m.level == level)
            .cloned()
            .collect()
    }

    fn recycle_bin_count(&self) -> usize {
        self.read().media_recycle_bin.len()
    }

    fn empty_recycle_bin(&self, user_id: i64) {
        tracing::debug!(user_id, "emptying media recycle bin");
        self.write().media_recycle_bin.clear();
    }
}

impl ContentService for MemoryCms {
    fn recycle_bin_count(&self) -> usize {
        self.read().content_recycle_bin.len()
    }

    fn empty_recycle_bin(&self, user_id: i64) {
        tracing::debug!(user_id, "emptying content recycle bin");
        self.write().content_recycle_bin.clear();
    }
}

impl RedirectUrlService for MemoryCms {
    fn get_all_redirect_urls(&self) -> Vec<RedirectUrl> {
        self.read().redirect_urls.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_user_group_upserts_by_alias() {
        let cms = MemoryCms::new(CmsSnapshot::default());
        cms.save_user_group(UserGroup {
            name: "Marketing".into(),
            alias: "marketing".into(),
            allowed_sections: vec![],
        });
        cms.save_user_group(UserGroup {
            name: "Marketing".into(),
            alias: "marketing".into(),
            allowed_sections: vec!["content".into()],
        });

        let groups = cms.get_all_user_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].allowed_sections, ["content"]);
    }

    #[test]
    fn recycle_bins_are_independent() {
        let cms = MemoryCms::new(CmsSnapshot {
            content_recycle_bin: vec![1, 2],
            media_recycle_bin: vec![3],
            ..Default::default()
        });

        ContentService::empty_recycle_bin(&cms, 0);
        assert_eq!(ContentService::recycle_bin_count(&cms), 0);
        assert_eq!(MediaService::recycle_bin_count(&cms), 1);
    }
}
