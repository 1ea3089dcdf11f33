use super::data::{FromWeb, IntoWeb, NewRecordResponse, RecordPayload, RecordWeb};
use super::error::{Error, Result};
use super::ErrorResponse;
use crate::data::RecordFilter;
use crate::service::{self, ServiceContext};
use log::error;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{post, Response, State};
use std::io::Cursor;

fn decode_payload(body: &str) -> Result<RecordPayload> {
    let payload = serde_json::from_str(body)?;
    Ok(payload)
}

#[utoipa::path(
    tag = "Records",
    path = "/record/add",
    description = "Add a new record; the phone number is normalized before storage",
    request_body = RecordPayload,
    responses(
        (status = 200, description = "The assigned record id", body = NewRecordResponse)
    )
)]
#[post("/add", data = "<body>")]
pub async fn add_record(
    state: &State<ServiceContext>,
    body: String,
) -> Result<Json<NewRecordResponse>> {
    let payload = decode_payload(&body)?;
    let id = state
        .record_service
        .add_record(
            payload.name.as_deref().unwrap_or_default(),
            payload.phone.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(NewRecordResponse { id }))
}

#[utoipa::path(
    tag = "Records",
    path = "/records/get",
    description = "Return all records matching the set fields of the given filter",
    request_body = RecordPayload,
    responses(
        (status = 200, description = "The matching records", body = Vec<RecordWeb>)
    )
)]
#[post("/get", data = "<body>")]
pub async fn get_records(
    state: &State<ServiceContext>,
    body: String,
) -> Result<Json<Vec<RecordWeb>>> {
    let payload = decode_payload(&body)?;
    let records = state
        .record_service
        .get_records(RecordFilter::from_web(payload))
        .await?;
    Ok(Json(records.into_iter().map(|r| r.into_web()).collect()))
}

#[utoipa::path(
    tag = "Records",
    path = "/record/update",
    description = "Rewrite the record selected by id, or by phone if no id is given",
    request_body = RecordPayload,
    responses(
        (status = 200, description = "The record was updated")
    )
)]
#[post("/update", data = "<body>")]
pub async fn update_record(state: &State<ServiceContext>, body: String) -> Result<Status> {
    let payload = decode_payload(&body)?;
    state
        .record_service
        .update_record(
            payload.id,
            payload.name.as_deref().unwrap_or_default(),
            payload.phone.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Status::Ok)
}

#[utoipa::path(
    tag = "Records",
    path = "/record/delete",
    description = "Delete the record(s) stored under the given phone number",
    request_body = RecordPayload,
    responses(
        (status = 200, description = "The record was deleted")
    )
)]
#[post("/delete", data = "<body>")]
pub async fn delete_record(state: &State<ServiceContext>, body: String) -> Result<Status> {
    let payload = decode_payload(&body)?;
    state
        .record_service
        .delete_record_by_phone(payload.phone.as_deref().unwrap_or_default())
        .await?;
    Ok(Status::Ok)
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> rocket::response::Result<'o> {
        match self {
            Error::Json(e) => {
                let body = ErrorResponse::new("bad_request", e.to_string(), 400).to_json_string();
                Response::build()
                    .status(Status::BadRequest)
                    .header(ContentType::JSON)
                    .sized_body(body.len(), Cursor::new(body))
                    .ok()
            }
            Error::Service(e) => ServiceError(e).respond_to(req),
        }
    }
}

pub struct ServiceError(service::Error);

impl<'r, 'o: 'r> Responder<'r, 'o> for ServiceError {
    fn respond_to(self, req: &rocket::Request) -> rocket::response::Result<'o> {
        match self.0 {
            // reported as a server error, not a validation failure
            service::Error::PhoneNormalization(e) => {
                error!("{e}");
                Status::InternalServerError.respond_to(req)
            }
            service::Error::Persistence(e) => {
                error!("{e}");
                Status::InternalServerError.respond_to(req)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::persistence::db::get_memory_db;
    use crate::persistence::{DbContext, SurrealRecordStore};
    use crate::service::create_service_context;
    use crate::web::rocket_main;
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn get_client() -> Client {
        let mem_db = get_memory_db("test", "web")
            .await
            .expect("could not create memory db");
        let context = create_service_context(DbContext {
            record_store: Arc::new(SurrealRecordStore::new(mem_db)),
        });
        let conf = Config {
            http_address: String::from("127.0.0.1"),
            http_port: 8080,
            surreal_db_connection: String::from("mem://"),
            db_namespace: String::from("test"),
            db_database: String::from("web"),
        };
        Client::tracked(rocket_main(conf, context))
            .await
            .expect("valid rocket instance")
    }

    async fn add(client: &Client, name: &str, phone: &str) -> i64 {
        let response = client
            .post("/record/add")
            .body(json!({ "name": name, "phone": phone }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.expect("json response");
        body["id"].as_i64().expect("an integer id")
    }

    async fn get_all(client: &Client, filter: Value) -> Vec<Value> {
        let response = client
            .post("/records/get")
            .body(filter.to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.expect("json response");
        body.as_array().expect("a json array").clone()
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_bad_request_on_every_endpoint() {
        let client = get_client().await;
        for route in [
            "/record/add",
            "/records/get",
            "/record/update",
            "/record/delete",
        ] {
            let response = client.post(route).body("this is not json").dispatch().await;
            assert_eq!(response.status(), Status::BadRequest);
        }
        // nothing was persisted along the way
        assert!(get_all(&client, json!({})).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_returns_the_assigned_id() {
        let client = get_client().await;
        let first = add(&client, "Alice", "+1 (555) 123-4567").await;
        let second = add(&client, "Bob", "8 (912) 345-67-89").await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_add_with_bad_phone_is_a_server_error_and_persists_nothing() {
        let client = get_client().await;
        let response = client
            .post("/record/add")
            .body(json!({ "name": "Alice", "phone": "abc" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::InternalServerError);
        assert!(get_all(&client, json!({})).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_without_phone_is_a_server_error() {
        let client = get_client().await;
        let response = client
            .post("/record/add")
            .body(json!({ "name": "Alice" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::InternalServerError);
    }

    #[tokio::test]
    async fn test_added_record_is_found_under_its_canonical_phone() {
        let client = get_client().await;
        let id = add(&client, "Alice", "+1 (555) 123-4567").await;
        let found = get_all(&client, json!({ "phone": "+15551234567" })).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["id"].as_i64(), Some(id));
        assert_eq!(found[0]["name"], "Alice");
        assert_eq!(found[0]["phone"], "+15551234567");
    }

    #[tokio::test]
    async fn test_empty_filter_fields_do_not_filter() {
        let client = get_client().await;
        add(&client, "Alice", "+1 (555) 123-4567").await;
        add(&client, "Bob", "8 (912) 345-67-89").await;
        let found = get_all(&client, json!({ "name": "", "phone": "" })).await;
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_update_by_raw_phone_is_visible_under_the_canonical_one() {
        let client = get_client().await;
        let id = add(&client, "Alice", "+1 (555) 123-4567").await;

        let response = client
            .post("/record/update")
            .body(
                json!({ "id": id, "name": "Alice Smith", "phone": "+1 (555) 123-4567" })
                    .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert!(response
            .into_string()
            .await
            .unwrap_or_default()
            .is_empty());

        let found = get_all(&client, json!({ "phone": "+15551234567" })).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Alice Smith");
    }

    #[tokio::test]
    async fn test_update_without_id_matches_by_phone() {
        let client = get_client().await;
        add(&client, "Alice", "89123456789").await;

        let response = client
            .post("/record/update")
            .body(json!({ "name": "Alice Smith", "phone": "+79123456789" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let found = get_all(&client, json!({ "phone": "+79123456789" })).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Alice Smith");
    }

    #[tokio::test]
    async fn test_delete_removes_the_record_for_its_phone() {
        let client = get_client().await;
        add(&client, "Alice", "+79123456789").await;
        add(&client, "Bob", "+79234567890").await;

        // the raw phone is normalized before the lookup
        let response = client
            .post("/record/delete")
            .body(json!({ "phone": "8 (912) 345-67-89" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert!(response
            .into_string()
            .await
            .unwrap_or_default()
            .is_empty());

        assert!(get_all(&client, json!({ "phone": "+79123456789" }))
            .await
            .is_empty());
        let remaining = get_all(&client, json!({})).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["name"], "Bob");
    }

    #[tokio::test]
    async fn test_delete_with_bad_phone_is_a_server_error() {
        let client = get_client().await;
        let response = client
            .post("/record/delete")
            .body(json!({ "phone": "abc" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::InternalServerError);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let client = get_client().await;
        let response = client.post("/record/unknown").body("{}").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }
}
