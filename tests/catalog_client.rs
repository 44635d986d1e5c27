use price_verifier::api::CatalogClient;
use price_verifier::catalog::{ProductId, ProductPayload};
use price_verifier::config::ApiConfig;
use price_verifier::errors::VerifierError;
use price_verifier::forms::Credentials;

fn client_for(server: &mockito::Server) -> CatalogClient {
    CatalogClient::new(&ApiConfig { base_url: server.url(), timeout_ms: 2000 }).unwrap()
}

fn credentials() -> Credentials {
    Credentials { email: "ana@shop.mx".into(), password: "secret".into() }
}

#[tokio::test]
async fn login_cookie_is_replayed_on_later_requests() {
    let mut server = mockito::Server::new_async().await;

    let _m_login = server
        .mock("POST", "/login")
        .match_body(mockito::Matcher::Json(serde_json::json!({"email": "ana@shop.mx", "password": "secret"})))
        .with_status(200)
        .with_header("set-cookie", "token=abc123; Path=/; HttpOnly")
        .with_header("content-type", "application/json")
        .with_body(r#"{"mensaje":"ok"}"#)
        .expect(1)
        .create_async()
        .await;

    let _m_list = server
        .mock("GET", "/productos")
        .match_header("cookie", mockito::Matcher::Regex("token=abc123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"_id":"a1","nombre":"Pan dulce","codigoBarras":"7501","cantidad":"3","precio":12.5,"codigo":"P1"},
                {"id":7,"nombre":null,"precio":"8","codigo":"P2"}
            ]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.login(&credentials()).await.unwrap();
    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::from("a1"));
    assert_eq!(products[0].name.as_deref(), Some("Pan dulce"));
    assert_eq!(products[0].quantity, Some(3.0));
    assert_eq!(products[1].id, ProductId::from("7"));
    assert_eq!(products[1].name, None);
    assert_eq!(products[1].price, 8.0);
}

#[tokio::test]
async fn server_error_message_is_passed_through() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/login")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Credenciales incorrectas"}"#)
        .create_async()
        .await;

    let err = client_for(&server).login(&credentials()).await.unwrap_err();
    assert!(matches!(err, VerifierError::Api { status: 400, .. }));
    assert_eq!(err.user_message(), "Credenciales incorrectas");
}

#[tokio::test]
async fn missing_error_body_falls_back_to_a_generic_message() {
    let mut server = mockito::Server::new_async().await;
    let _m = server.mock("POST", "/crear-usuario").with_status(500).with_body("boom").create_async().await;

    let err = client_for(&server).register(&credentials()).await.unwrap_err();
    assert_eq!(err.user_message(), "Registration failed");
}

#[tokio::test]
async fn expired_session_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/productos")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"No autorizado"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(matches!(client.list_products().await, Err(VerifierError::Unauthorized)));
    assert!(!client.check_session().await);
}

#[tokio::test]
async fn session_probe_succeeds_on_2xx() {
    let mut server = mockito::Server::new_async().await;
    let _m = server.mock("GET", "/productos").with_status(200).with_body("[]").create_async().await;
    assert!(client_for(&server).check_session().await);
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    // Port 9 (discard) is closed on any sane test host.
    let client = CatalogClient::new(&ApiConfig { base_url: "http://127.0.0.1:9".into(), timeout_ms: 500 }).unwrap();
    let err = client.profile().await.unwrap_err();
    assert!(matches!(err, VerifierError::Http(_)));
    assert_eq!(err.user_message(), "Could not connect to the server");
}

#[tokio::test]
async fn lookup_encodes_the_code_segment() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/precio/A%20B%2F1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"nombre":"Refresco","codigo":"A B/1","precio":18}"#)
        .expect(1)
        .create_async()
        .await;

    let quote = client_for(&server).lookup_price(" A B/1 ").await.unwrap();
    assert_eq!(quote.name.as_deref(), Some("Refresco"));
    assert_eq!(quote.price, 18.0);
}

#[tokio::test]
async fn blank_lookup_code_is_rejected_locally() {
    let server = mockito::Server::new_async().await;
    let err = client_for(&server).lookup_price("   ").await.unwrap_err();
    assert!(matches!(err, VerifierError::Validation(_)));
}

#[tokio::test]
async fn product_writes_use_wire_field_names() {
    let mut server = mockito::Server::new_async().await;
    let payload = ProductPayload {
        name: "Leche".into(),
        barcode: String::new(),
        code: "L1".into(),
        quantity: None,
        price: 24.0,
    };
    let expected = serde_json::json!({
        "nombre": "Leche", "codigoBarras": "", "codigo": "L1", "cantidad": null, "precio": 24.0
    });

    let m_create = server
        .mock("POST", "/producto")
        .match_body(mockito::Matcher::Json(expected.clone()))
        .with_status(201)
        .create_async()
        .await;
    let m_update = server
        .mock("PUT", "/producto/a1")
        .match_body(mockito::Matcher::Json(expected))
        .with_status(200)
        .create_async()
        .await;
    let m_delete = server.mock("DELETE", "/producto/a1").with_status(200).create_async().await;

    let client = client_for(&server);
    let id = ProductId::from("a1");
    client.create_product(&payload).await.unwrap();
    client.update_product(&id, &payload).await.unwrap();
    client.delete_product(&id).await.unwrap();

    m_create.assert_async().await;
    m_update.assert_async().await;
    m_delete.assert_async().await;
}
