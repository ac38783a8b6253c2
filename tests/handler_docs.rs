mod common;

use serde_json::Value;

#[tokio::test]
async fn test_openapi_document() {
    let server = common::create_test_server();

    let response = server.get("/swagger.json").await;

    response.assert_status_ok();

    let doc = response.json::<Value>();
    assert_eq!(doc["openapi"], "3.0.0");
    assert_eq!(doc["info"]["title"], "Top Coding SAP API");
    assert_eq!(doc["info"]["contact"]["name"], "Todor Vasilev");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");

    let paths = doc["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths["/v1/users"].get("get").is_some());
    assert!(paths["/v1/users"].get("post").is_some());
    assert!(paths["/v1/users/{id}"].get("get").is_some());
    assert!(paths["/v1/users/{id}"].get("put").is_some());
    assert!(paths["/v1/users/{id}"].get("delete").is_some());
}

#[tokio::test]
async fn test_openapi_describes_create_body() {
    let server = common::create_test_server();

    let doc = server.get("/swagger.json").await.json::<Value>();
    let post = &doc["paths"]["/v1/users"]["post"];

    assert_eq!(post["operationId"], "createUser");
    let schema = &post["requestBody"]["content"]["application/json"]["schema"];
    assert_eq!(
        schema["required"],
        serde_json::json!(["name", "email", "password"])
    );
    assert_eq!(schema["properties"]["email"]["format"], "email");
    assert!(post["responses"].get("201").is_some());
    assert!(post["responses"].get("400").is_some());
}

#[tokio::test]
async fn test_swagger_page_renders() {
    let server = common::create_test_server();

    let response = server.get("/swagger").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Top Coding SAP API"));
    assert!(html.contains("/swagger.json"));
}
