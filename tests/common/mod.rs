#![allow(dead_code)]

use canopeum_feed::{api::ApiClient, config::ApiConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

pub fn api(server: &MockServer) -> ApiClient {
    api_with_token(server, None)
}

pub fn api_with_token(server: &MockServer, token: Option<&str>) -> ApiClient {
    ApiClient::new(&ApiConfig { base_url: server.uri(), token: token.map(String::from), timeout_secs: Some(5) }).unwrap()
}

pub fn post_json(id: u64, site_id: u64) -> Value {
    json!({
        "id": id,
        "site": site_id,
        "author": { "id": 1, "username": "ada" },
        "body": format!("post {}", id),
        "likeCount": 0,
        "hasLiked": false,
        "createdAt": "2024-04-01T10:00:00Z",
        "updatedAt": "2024-04-01T10:00:00Z"
    })
}

pub fn site_type_json() -> Value {
    json!({ "id": 2, "en": "Park", "fr": "Parc" })
}

pub fn site_social_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": "Parc Jarry",
        "description": "Urban canopy project",
        "researchPartnership": true,
        "siteType": site_type_json(),
        "image": { "asset": "/media/jarry.png" },
        "announcement": { "id": 1, "body": "Planting day on Saturday", "link": null },
        "contact": {
            "id": 1,
            "address": null,
            "email": "jarry@canopeum.org",
            "phone": null,
            "facebookLink": null,
            "instagramLink": null
        }
    })
}

pub fn site_detail_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": "Parc Jarry",
        "description": "Urban canopy project",
        "size": "12.5",
        "researchPartnership": false,
        "visibleMap": true,
        "siteType": site_type_json(),
        "image": { "asset": "/media/jarry.png" },
        "coordinate": { "dmsLatitude": "45°32'1.5\"N", "dmsLongitude": "73°37'40.2\"W" },
        "siteTreeSpecies": [{ "id": 4, "quantity": 120, "en": "Sugar maple", "fr": "Érable à sucre" }]
    })
}
