mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["routes"]["status"], "ok");
    assert_eq!(json["checks"]["routes"]["count"], 5);
    assert_eq!(json["checks"]["routes"]["message"], "5 routes registered");
    assert_eq!(json["checks"]["schemas"]["message"], "4 schemas registered");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::create_test_server();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("routes").is_some());
    assert!(json["checks"].get("schemas").is_some());
}
