//! Tests for the process-wide default client
//!
//! Everything runs inside one test so the shared client only ever sees a
//! single runtime.

use futures::future::join_all;
use serde::Deserialize;
use wrex::{Context, ErrorKind, Method, Opts};

#[derive(Debug, Default, Deserialize, PartialEq)]
struct Echo {
    id: usize,
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_default_client() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();
    let ctx = Context::background();

    // Concurrent GETs against distinct endpoints must not see each other's data
    const CALLS: usize = 32;
    let mut mocks = Vec::with_capacity(CALLS);
    for id in 0..CALLS {
        mocks.push(
            server
                .mock("GET", format!("/items/{}", id).as_str())
                .match_header("x-call", id.to_string().as_str())
                .with_status(200)
                .with_body(format!(r#"{{"id":{}}}"#, id))
                .create_async()
                .await,
        );
    }

    let calls = (0..CALLS).map(|id| {
        let ctx = ctx.clone();
        let opts = Opts::new(format!("{}/items/{}", base, id)).header("X-Call", id.to_string());
        tokio::spawn(async move { (id, wrex::get(&ctx, opts).await) })
    });

    for joined in join_all(calls).await {
        let (id, result) = joined.expect("task should not panic");
        let response = result.expect("GET should succeed");
        let echo: Echo = response.json().expect("valid json");
        assert_eq!(echo.id, id);
    }
    for mock in &mocks {
        mock.assert_async().await;
    }

    // JSON helpers decode through the same client
    let json_mock = server
        .mock("POST", "/record")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_body(r#"{"id":7}"#)
        .create_async()
        .await;
    let mut echo = Echo::default();
    wrex::post_json(&ctx, Opts::new(format!("{}/record", base)), Some(&mut echo))
        .await
        .expect("POST JSON should succeed");
    assert_eq!(echo, Echo { id: 7 });
    json_mock.assert_async().await;

    // Remaining verbs forward to the same client
    let put_mock = server
        .mock("PUT", "/record")
        .with_status(204)
        .create_async()
        .await;
    let delete_mock = server
        .mock("DELETE", "/record")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let response = wrex::put(&ctx, Opts::new(format!("{}/record", base)))
        .await
        .expect("PUT should succeed");
    assert_eq!(response.status_code(), 204);

    let err = wrex::request(&ctx, Method::Delete, Opts::new(format!("{}/record", base)))
        .await
        .expect_err("500 is rejected");
    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.response().map(|r| r.text()).as_deref(), Some("boom"));

    put_mock.assert_async().await;
    delete_mock.assert_async().await;

    // Relative paths need a base URL the default client does not have
    let err = wrex::get(&ctx, Opts::new("/relative"))
        .await
        .expect_err("no base URL");
    assert_eq!(err.kind(), ErrorKind::Serialization);
}
