use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SiteId = u64;
pub type PostId = u64;

/// Social-feed entry attached to a site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "site")]
    pub site_id: SiteId,
    pub author: PostAuthor,
    pub body: String,
    pub like_count: i64,
    pub has_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Flips the like flag and moves the count by one in the same direction.
    pub fn toggle_like(&mut self) {
        self.has_liked = !self.has_liked;
        self.like_count += if self.has_liked { 1 } else { -1 };
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PostAuthor {
    pub id: u64,
    pub username: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    #[serde(rename = "site")]
    pub site_id: SiteId,
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Announcement {
    pub id: u64,
    pub body: String,
    pub link: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: u64,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub facebook_link: Option<String>,
    pub instagram_link: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Asset {
    pub asset: String,
}

/// Translated label as served by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteType {
    pub id: u64,
    pub en: String,
    pub fr: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TreeType {
    pub id: u64,
    pub en: String,
    pub fr: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteTreeSpecies {
    pub id: u64,
    pub quantity: u32,
    pub en: String,
    pub fr: String,
}

/// Site as shown on its social page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSocial {
    pub id: SiteId,
    pub name: String,
    pub description: Option<String>,
    pub research_partnership: bool,
    pub site_type: SiteType,
    pub image: Option<Asset>,
    pub announcement: Option<Announcement>,
    pub contact: Option<Contact>,
}

/// Entry of the site listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SiteName {
    pub id: SiteId,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub dms_latitude: Option<String>,
    pub dms_longitude: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteDetail {
    pub id: SiteId,
    pub name: String,
    pub description: Option<String>,
    /// Decimal area, serialized as a string by the backend.
    pub size: String,
    pub research_partnership: bool,
    pub visible_map: bool,
    pub site_type: SiteType,
    pub image: Option<Asset>,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub site_tree_species: Vec<SiteTreeSpecies>,
}

/// Body of a site create or update.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSite {
    pub name: String,
    pub site_type: Option<u64>,
    pub dms_latitude: String,
    pub dms_longitude: String,
    pub description: Option<String>,
    pub size: Option<f64>,
    pub species: Vec<SiteTreeSpecies>,
    pub research_partnership: bool,
    pub visible_map: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInvitation {
    pub email: String,
    pub site_ids: Vec<SiteId>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInvitation {
    pub code: String,
    pub email: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    MegaAdmin,
    SiteManager,
    User,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub admin_site_ids: Vec<SiteId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub id: u64,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: SiteId,
    pub name: String,
    #[serde(default)]
    pub batches: Vec<BatchSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchAnalytics {
    pub id: u64,
    pub name: String,
}
