mod common;

use canopeum_feed::{
    dialogs::{AdminInvitationDialog, DmsCoordinate, InvitationError, SiteModal},
    validators::InputValidationError,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn mount_sites(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/analytics/sites/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Parc Jarry" },
            { "id": 2, "name": "Mont Royal" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn invitation_link_is_built_from_code() {
    let server = MockServer::start().await;
    mount_sites(&server).await;
    Mock::given(method("POST"))
        .and(path("/users/invitations/"))
        .and(body_json(json!({ "email": "new@canopeum.org", "siteIds": [2] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "code": "abc123", "email": "new@canopeum.org", "expiresAt": null })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut dialog = AdminInvitationDialog::new(&api, "https://canopeum.test/");
    dialog.open().await.unwrap();
    assert_eq!(dialog.site_options().len(), 2);
    assert_eq!(dialog.site_options()[1].display_text, "Mont Royal");

    dialog.set_email("new@canopeum.org");
    dialog.set_site_ids(vec![2]);
    let link = dialog.generate_link().await.unwrap();

    assert_eq!(link, "https://canopeum.test/register?code=abc123");
    assert_eq!(dialog.invitation_link(), Some(link.as_str()));
    assert!(dialog.generate_link_error().is_none());
}

#[tokio::test]
async fn taken_email_shows_specific_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/invitations/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("\"email_taken\""))
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut dialog = AdminInvitationDialog::new(&api, "https://canopeum.test");
    dialog.set_email("taken@example.com");

    let err = dialog.generate_link().await.unwrap_err();

    assert!(matches!(err, InvitationError::EmailTaken));
    assert_eq!(dialog.generate_link_error(), Some("This email is already used by another account"));
    assert!(dialog.invitation_link().is_none());
}

#[tokio::test]
async fn other_failures_show_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/invitations/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut dialog = AdminInvitationDialog::new(&api, "https://canopeum.test");
    dialog.set_email("someone@example.com");

    assert!(matches!(dialog.generate_link().await, Err(InvitationError::Failed(_))));
    assert_eq!(dialog.generate_link_error(), Some("An error occurred while generating the invitation link"));
}

#[tokio::test]
async fn invalid_email_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/invitations/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut dialog = AdminInvitationDialog::new(&api, "https://canopeum.test");

    let err = dialog.generate_link().await.unwrap_err();
    assert!(matches!(err, InvitationError::Validation(InputValidationError::Required)));

    dialog.set_email("nope");
    assert!(!dialog.validate_email());
    assert_eq!(dialog.email_error(), Some(InputValidationError::Email));

    dialog.close();
    assert!(dialog.email_error().is_none());
}

#[tokio::test]
async fn site_modal_edits_existing_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trees/species/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 4, "en": "Sugar maple", "fr": "Érable à sucre" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/siteTypes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([common::site_type_json()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/sites/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::site_detail_json(3)))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/analytics/sites/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::site_detail_json(3)))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut modal = SiteModal::new(&api);
    modal.open(Some(3)).await.unwrap();

    assert_eq!(modal.available_species().len(), 1);
    assert_eq!(modal.available_site_types()[0].en, "Park");

    let site = modal.site();
    assert_eq!(site.site_name.as_deref(), Some("Parc Jarry"));
    assert_eq!(site.site_type, Some(2));
    assert_eq!(site.size, Some(12.5));
    assert_eq!(site.dms_latitude, DmsCoordinate::parse("45°32'1.5\"N"));
    assert_eq!(site.dms_longitude.cardinal, Some('W'));
    assert_eq!(site.image_url.as_deref(), Some(format!("{}/media/jarry.png", server.uri()).as_str()));
    assert!(!site.research_partner);

    modal.site_mut().presentation = Some("Now with more maples".into());
    let saved = modal.save().await.unwrap();
    assert_eq!(saved.id, 3);

    modal.cancel();
    assert!(modal.site().site_name.is_none());
    assert!(modal.site_id().is_none());
}

#[tokio::test]
async fn site_modal_creates_new_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trees/species/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/analytics/siteTypes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/analytics/sites/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::site_detail_json(9)))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::api(&server);
    let mut modal = SiteModal::new(&api);
    modal.open(None).await.unwrap();
    assert_eq!(modal.site().dms_latitude.cardinal, Some('N'));

    modal.site_mut().site_name = Some("Parc Jarry".into());
    let saved = modal.save().await.unwrap();

    assert_eq!(saved.id, 9);
    assert_eq!(modal.site_id(), Some(9));
}
