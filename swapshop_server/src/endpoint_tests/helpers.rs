use actix_web::{
    http::StatusCode,
    test::{call_service, init_service, read_body, TestRequest},
    web::ServiceConfig,
    App,
};
use serde::Serialize;

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, String)
where
    F: FnOnce(&mut ServiceConfig),
{
    let app = init_service(App::new().configure(configure)).await;
    let req = TestRequest::get().uri(path).to_request();
    let res = call_service(&app, req).await;
    let status = res.status();
    let body = read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn post_request<B, F>(path: &str, body: &B, configure: F) -> (StatusCode, String)
where
    B: Serialize,
    F: FnOnce(&mut ServiceConfig),
{
    let app = init_service(App::new().configure(configure)).await;
    let req = TestRequest::post().uri(path).set_json(body).to_request();
    let res = call_service(&app, req).await;
    let status = res.status();
    let body = read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}
