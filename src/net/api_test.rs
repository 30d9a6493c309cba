use futures::executor::block_on;

use super::*;
use crate::config::ApiConfig;
use crate::net::http::Method;
use crate::net::types::GenerationStatus;
use crate::testing::ScriptedTransport;

fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::new(ApiConfig::new("http://api.test").unwrap(), transport.clone())
}

#[test]
fn endpoint_helpers_format_ids() {
    assert_eq!(generation_endpoint(42), "/api/generations/42");
    assert_eq!(template_endpoint(3), "/api/templates/3");
    assert_eq!(whatsapp_number_endpoint(9), "/api/whatsapp/numbers/9");
}

#[test]
fn generation_list_request_skips_blank_search() {
    let query = GenerationQuery {
        page: Some(2),
        limit: Some(12),
        status: Some(GenerationStatus::Completed),
        search: Some("   ".to_owned()),
    };
    let request = generation_list_request(&query);
    assert_eq!(
        request.query,
        vec![
            ("page".to_owned(), "2".to_owned()),
            ("limit".to_owned(), "12".to_owned()),
            ("status".to_owned(), "completed".to_owned()),
        ]
    );
}

#[test]
fn login_posts_form_credentials() {
    let transport = ScriptedTransport::default();
    transport.respond(200, serde_json::json!({"access_token": "t1", "user": {"id": 1}}));

    let resp = block_on(client(&transport).login("joao@x.com", "Secret123")).unwrap();

    assert_eq!(resp.access_token, "t1");
    let sent = transport.last_sent();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "http://api.test/api/auth/login");
    assert_eq!(sent.body.as_deref(), Some("username=joao%40x.com&password=Secret123"));
}

#[test]
fn register_posts_json_payload() {
    let transport = ScriptedTransport::default();
    transport.respond(201, serde_json::json!({"access_token": "t2", "user": {"id": 2}}));
    let data = RegisterData { email: "ana@x.com".to_owned(), ..RegisterData::default() };

    block_on(client(&transport).register(&data)).unwrap();

    let sent = transport.last_sent();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "ana@x.com");
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
}

#[test]
fn set_template_favorite_puts_flag() {
    let transport = ScriptedTransport::default();
    transport.respond(200, serde_json::json!({"success": true}));

    block_on(client(&transport).set_template_favorite(5, true)).unwrap();

    let sent = transport.last_sent();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "http://api.test/api/templates/5/favorite");
    assert_eq!(sent.body.as_deref(), Some(r#"{"favorite":true}"#));
}

#[test]
fn list_templates_passes_category_filter() {
    let transport = ScriptedTransport::default();
    transport.respond(200, serde_json::json!([{"id": 1, "name": "Promo", "category": "food"}]));

    let templates = block_on(client(&transport).list_templates(Some("food"))).unwrap();

    assert_eq!(templates.len(), 1);
    assert_eq!(transport.last_sent().url, "http://api.test/api/templates?category=food");
}

#[test]
fn generation_stats_sends_period() {
    let transport = ScriptedTransport::default();
    transport.respond(200, serde_json::json!({"total": 4}));

    let stats = block_on(client(&transport).generation_stats(StatsPeriod::Week)).unwrap();

    assert_eq!(stats["total"], 4);
    assert_eq!(transport.last_sent().url, "http://api.test/api/stats/generations?period=week");
}

#[test]
fn disconnect_whatsapp_uses_delete() {
    let transport = ScriptedTransport::default();
    transport.respond(200, serde_json::json!({"success": true}));

    block_on(client(&transport).disconnect_whatsapp(9)).unwrap();

    let sent = transport.last_sent();
    assert_eq!(sent.method, Method::Delete);
    assert_eq!(sent.url, "http://api.test/api/whatsapp/numbers/9");
}
