// SPDX-License-Identifier: MIT
//! Narrow interfaces onto the CMS the checks inspect.
//!
//! Each check receives only the service traits it needs at construction —
//! no ambient locator — so its external dependencies are visible in its
//! constructor and independently mockable. The record types are plain data;
//! the CMS's own internals are never modeled here.

pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ─── Records ──────────────────────────────────────────────────────────────────

/// A back-office section (content, media, settings, …).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub alias: String,
    pub name: String,
}

/// A user-role group and the section aliases it may access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub allowed_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// A content-type definition (document type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    pub alias: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub editor_alias: String,
}

/// A media-type definition and its properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaType {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyType>,
}

/// A property editor definition (e.g. a plain text box).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    pub editor_alias: String,
    pub name: String,
}

/// A media item. `level` is the hierarchy depth (1 = directly under the
/// media root); `properties` maps property alias to its stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    pub name: String,
    /// Name of the media type this item was created from.
    pub content_type: String,
    pub level: u32,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// A tracked redirect from a moved/renamed content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrl {
    pub id: i64,
    pub url: String,
    pub content_id: i64,
}

// ─── Service traits ───────────────────────────────────────────────────────────

pub trait UserService: Send + Sync {
    fn get_all_user_groups(&self) -> Vec<UserGroup>;
    /// Insert or replace a group, keyed by alias.
    fn save_user_group(&self, group: UserGroup);
    fn get_by_username(&self, username: &str) -> Option<User>;
}

pub trait SectionService: Send + Sync {
    fn get_sections(&self) -> Vec<Section>;
}

pub trait ContentTypeService: Send + Sync {
    fn get_all(&self) -> Vec<ContentType>;
}

pub trait MediaTypeService: Send + Sync {
    fn get_all(&self) -> Vec<MediaType>;
    /// Insert or replace a media type, keyed by alias.
    fn save(&self, media_type: MediaType);
}

pub trait DataTypeService: Send + Sync {
    fn get_by_editor_alias(&self, editor_alias: &str) -> Vec<DataType>;
}

pub trait MediaService: Send + Sync {
    /// Media items directly under the media root.
    fn get_root_media(&self) -> Vec<MediaItem>;
    /// Media items at the given hierarchy level (1-based).
    fn get_by_level(&self, level: u32) -> Vec<MediaItem>;
    fn recycle_bin_count(&self) -> usize;
    /// Permanently delete everything in the media recycle bin, attributed
    /// to the given user.
    fn empty_recycle_bin(&self, user_id: i64);
}

pub trait ContentService: Send + Sync {
    fn recycle_bin_count(&self) -> usize;
    fn empty_recycle_bin(&self, user_id: i64);
}

pub trait RedirectUrlService: Send + Sync {
    fn get_all_redirect_urls(&self) -> Vec<RedirectUrl>;
}

/// Bundle of every service interface the CMS-entity checks consume, for
/// callers that wire a whole backend at once. Individual checks still take
/// only the traits they need.
#[derive(Clone)]
pub struct CmsServices {
    pub users: Arc<dyn UserService>,
    pub sections: Arc<dyn SectionService>,
    pub content_types: Arc<dyn ContentTypeService>,
    pub media_types: Arc<dyn MediaTypeService>,
    pub data_types: Arc<dyn DataTypeService>,
    pub media: Arc<dyn MediaService>,
    pub content: Arc<dyn ContentService>,
    pub redirects: Arc<dyn RedirectUrlService>,
}

impl CmsServices {
    /// Every interface backed by the same in-memory store.
    pub fn from_memory(cms: Arc<memory::MemoryCms>) -> Self {
        Self {
            users: cms.clone(),
            sections: cms.clone(),
            content_types: cms.clone(),
            media_types: cms.clone(),
            data_types: cms.clone(),
            media: cms.clone(),
            content: cms.clone(),
            redirects: cms,
        }
    }
}
