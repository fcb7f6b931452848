use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/message")]
async fn message() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Hello from the server!" }))
}
