use axum::{
    body::{Bytes, HttpBody},
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::Json,
    routing::get,
    BoxError, Router,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError, to_server_error};
use crate::persons::command::add_person_cmd::{AddPersonCommand, AddPersonCommandRequest};
use crate::persons::command::get_person_cmd::{GetPersonCommand, GetPersonCommandRequest};
use crate::persons::command::list_persons_cmd::{ListPersonsCommand, ListPersonsCommandRequest};
use crate::persons::command::remove_person_cmd::{RemovePersonCommand, RemovePersonCommandRequest};
use crate::persons::command::update_person_cmd::{UpdatePersonCommand, UpdatePersonCommandRequest};
use crate::persons::dto::PersonDto;

// The body type differs per runtime: hyper's for the plain listener, lambda_http's on Lambda.
pub fn router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/person",
               get(find_all_persons).post(add_person).put(update_person))
        .route("/person/:id",
               get(find_person_by_id).delete(remove_person))
        .with_state(state)
}

pub async fn add_person(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<PersonDto>), ServerError> {
    let req: AddPersonCommandRequest = serde_json::from_slice(&body).map_err(|err| json_to_server_error(err, &uri))?;
    let res = AddPersonCommand::new(state.person_service).execute(req).await
        .map_err(|err| to_server_error(err, &uri))?;
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), res.person.id.as_deref().unwrap_or_default());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(res.person)))
}

pub async fn find_person_by_id(
    State(state): State<AppState>,
    uri: Uri,
    Path(person_id): Path<String>) -> Result<Json<PersonDto>, ServerError> {
    let req = GetPersonCommandRequest { person_id };
    let res = GetPersonCommand::new(state.person_service).execute(req).await
        .map_err(|err| to_server_error(err, &uri))?;
    Ok(Json(res.person))
}

pub async fn find_all_persons(
    State(state): State<AppState>,
    uri: Uri) -> Result<Json<Vec<PersonDto>>, ServerError> {
    let res = ListPersonsCommand::new(state.person_service).execute(ListPersonsCommandRequest::default()).await
        .map_err(|err| to_server_error(err, &uri))?;
    Ok(Json(res.persons))
}

pub async fn update_person(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes) -> Result<Json<PersonDto>, ServerError> {
    let req: UpdatePersonCommandRequest = serde_json::from_slice(&body).map_err(|err| json_to_server_error(err, &uri))?;
    let res = UpdatePersonCommand::new(state.person_service).execute(req).await
        .map_err(|err| to_server_error(err, &uri))?;
    Ok(Json(res.person))
}

pub async fn remove_person(
    State(state): State<AppState>,
    uri: Uri,
    Path(person_id): Path<String>) -> Result<StatusCode, ServerError> {
    let req = RemovePersonCommandRequest { person_id };
    let _ = RemovePersonCommand::new(state.person_service).execute(req).await
        .map_err(|err| to_server_error(err, &uri))?;
    Ok(StatusCode::NO_CONTENT)
}
