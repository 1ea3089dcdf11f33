use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(description = "Address book record API"),
    paths(
        crate::web::handlers::add_record,
        crate::web::handlers::get_records,
        crate::web::handlers::update_record,
        crate::web::handlers::delete_record,
    ),
    components(schemas(
        crate::web::data::RecordPayload,
        crate::web::data::RecordWeb,
        crate::web::data::NewRecordResponse,
    ))
)]
pub struct ApiDocs;
