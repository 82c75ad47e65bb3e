use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use domain::sensor::{
    SensorDataQuery, SensorDataRepository, SensorReading, SensorTypeRepository,
};
use domain::{
    ControllerRepository, PlantChange, PlantGroupChange, PlantGroupRepository, PlantRepository,
    PlantsFilter,
};
use infrastructure::{
    SqliteControllerRepository, SqlitePlantGroupRepository, SqlitePlantRepository,
    SqliteSensorDataRepository, SqliteSensorTypeRepository,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::state::AppState;

type ApiResult = Result<Response, ApiError>;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/plants", get(get_plants))
        .route("/v1/plants/overview", get(get_plants_overview))
        .route("/v1/plant", post(create_plant))
        .route(
            "/v1/plant/{id}",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
        .route("/v1/plant-groups", get(get_plant_groups))
        .route("/v1/plant-groups/overview", get(get_plant_groups_overview))
        .route("/v1/plant-group", post(create_plant_group))
        .route(
            "/v1/plant-group/{id}",
            get(get_plant_group)
                .put(update_plant_group)
                .delete(delete_plant_group),
        )
        .route("/v1/sensor-data", get(get_sensor_data).post(post_sensor_data))
        .route("/v1/sensor-types", get(get_sensor_types))
        .route("/v1/controllers", get(get_controllers))
        .route("/v1/controller/{uuid}", get(get_controller))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn created(location: String, body: impl serde::Serialize) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response()
}

// Plants

async fn get_plants(
    State(state): State<Arc<AppState>>,
    QueryParams(filter): QueryParams<PlantsFilter>,
) -> ApiResult {
    let mut session = state.session().await?;
    let ids = SqlitePlantRepository::new(&mut session)?
        .get_all(filter)
        .await?;
    session.close();
    Ok(Json(json!({ "plants": ids })).into_response())
}

async fn get_plants_overview(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut session = state.session().await?;
    let plants = SqlitePlantRepository::new(&mut session)?
        .get_all_overview()
        .await?;
    session.close();
    Ok(Json(json!({ "plants": plants })).into_response())
}

async fn get_plant(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut session = state.session().await?;
    let plant = SqlitePlantRepository::new(&mut session)?.get_by_id(id).await?;
    session.close();
    Ok(Json(plant).into_response())
}

async fn create_plant(
    State(state): State<Arc<AppState>>,
    JsonBody(change): JsonBody<PlantChange>,
) -> ApiResult {
    let mut session = state.session().await?;
    let plant = SqlitePlantRepository::new(&mut session)?
        .create(&change)
        .await?;
    session.close();
    Ok(created(format!("/v1/plant/{}", plant.id), plant))
}

async fn update_plant(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
    JsonBody(change): JsonBody<PlantChange>,
) -> ApiResult {
    let mut session = state.session().await?;
    let plant = SqlitePlantRepository::new(&mut session)?
        .update(id, &change)
        .await?;
    session.close();
    Ok(Json(plant).into_response())
}

async fn delete_plant(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut session = state.session().await?;
    SqlitePlantRepository::new(&mut session)?
        .delete_by_id(id)
        .await?;
    session.close();
    Ok(StatusCode::NO_CONTENT.into_response())
}

// Plant groups

async fn get_plant_groups(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut session = state.session().await?;
    let ids = SqlitePlantGroupRepository::new(&mut session)?
        .get_all()
        .await?;
    session.close();
    Ok(Json(json!({ "plantGroups": ids })).into_response())
}

async fn get_plant_groups_overview(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut session = state.session().await?;
    let groups = SqlitePlantGroupRepository::new(&mut session)?
        .get_all_overview()
        .await?;
    session.close();
    Ok(Json(json!({ "plantGroups": groups })).into_response())
}

async fn get_plant_group(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut session = state.session().await?;
    let group = SqlitePlantGroupRepository::new(&mut session)?
        .get_by_id(id)
        .await?;
    session.close();
    Ok(Json(group).into_response())
}

async fn create_plant_group(
    State(state): State<Arc<AppState>>,
    JsonBody(change): JsonBody<PlantGroupChange>,
) -> ApiResult {
    let mut session = state.session().await?;
    let group = SqlitePlantGroupRepository::new(&mut session)?
        .create(&change)
        .await?;
    session.close();
    Ok(created(format!("/v1/plant-group/{}", group.id), group))
}

async fn update_plant_group(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
    JsonBody(change): JsonBody<PlantGroupChange>,
) -> ApiResult {
    let mut session = state.session().await?;
    let group = SqlitePlantGroupRepository::new(&mut session)?
        .update(id, &change)
        .await?;
    session.close();
    Ok(Json(group).into_response())
}

async fn delete_plant_group(
    PathParam(id): PathParam<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut session = state.session().await?;
    SqlitePlantGroupRepository::new(&mut session)?
        .delete(id)
        .await?;
    session.close();
    Ok(StatusCode::NO_CONTENT.into_response())
}

// Sensor data

async fn get_sensor_data(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<SensorDataQuery>,
) -> ApiResult {
    let filter = query.into_filter(Utc::now())?;

    let mut session = state.session().await?;
    let data = SqliteSensorDataRepository::new(&mut session)?
        .get_all(&filter)
        .await?;
    session.close();
    Ok(Json(json!({ "data": data })).into_response())
}

#[derive(Deserialize)]
struct SensorDataUpload {
    data: Vec<SensorReading>,
}

async fn post_sensor_data(
    State(state): State<Arc<AppState>>,
    JsonBody(upload): JsonBody<SensorDataUpload>,
) -> ApiResult {
    let total = upload.data.len();

    let mut session = state.session().await?;
    let errors = SqliteSensorDataRepository::new(&mut session)?
        .save_all(upload.data)
        .await;
    session.close();

    if errors.is_empty() {
        info!("Stored {} sensor readings", total);
        return Ok(Json(json!({ "saved": total })).into_response());
    }

    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Ok((
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": format!("{} of {} readings were rejected", errors.len(), total),
            "errors": messages,
        })),
    )
        .into_response())
}

async fn get_sensor_types(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut session = state.session().await?;
    let types = SqliteSensorTypeRepository::new(&mut session)?
        .get_all()
        .await?;
    session.close();
    Ok(Json(json!({ "types": types })).into_response())
}

// Controllers

async fn get_controllers(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut session = state.session().await?;
    let uuids = SqliteControllerRepository::new(&mut session)?
        .get_all_uuids()
        .await?;
    session.close();
    Ok(Json(json!({ "controllers": uuids })).into_response())
}

async fn get_controller(
    PathParam(uuid): PathParam<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult {
    let mut session = state.session().await?;
    let controller = SqliteControllerRepository::new(&mut session)?
        .get_by_uuid(&uuid)
        .await?;
    session.close();
    Ok(Json(controller).into_response())
}
