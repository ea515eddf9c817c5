// src/test_support.rs
//! In-process fake of the inventory backend for client and handler tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api_client::BackendClient;
use crate::config::{BackendConfig, Config};
use crate::monitoring::Metrics;
use crate::AppState;

pub struct FakeState {
    pub collections: HashMap<String, Vec<Value>>,
    pub reject_saves: Option<String>,
    pub hazards: (u16, Value),
    pub ai_search: Value,
    pub lookup: Value,
    /// "METHOD /path" of every request received.
    pub requests: Vec<String>,
    next_id: i64,
}

impl FakeState {
    pub fn empty() -> Self {
        Self {
            collections: HashMap::new(),
            reject_saves: None,
            hazards: (200, json!({"safe": true})),
            ai_search: json!({"match_ids": [], "explanation": null}),
            lookup: json!({}),
            requests: Vec::new(),
            next_id: 100,
        }
    }

    pub fn seeded() -> Self {
        let mut state = Self::empty();
        state.collections.insert("locations".into(), vec![
            json!({"id": 1, "name": "Shelf A"}),
            json!({"id": 2, "name": "Cold Room"}),
        ]);
        state.collections.insert("chemicals".into(), vec![
            json!({"id": 1, "name": "Acetone", "cas_number": "67-64-1", "quantity": "2500.00",
                   "unit": "mL", "location_id": 1, "location_name": "Shelf A",
                   "expiry_date": null, "safety_notes": "Highly flammable"}),
            json!({"id": 2, "name": "Sodium Azide", "cas_number": "26628-22-8", "quantity": 10,
                   "unit": "g", "location_id": 2, "expiry_date": null, "safety_notes": null}),
            json!({"id": 3, "name": "Nitric Acid", "cas_number": "7697-37-2", "quantity": 400,
                   "unit": "mL", "location_id": null, "expiry_date": "2020-01-01", "safety_notes": null}),
        ]);
        state.collections.insert("equipments".into(), vec![
            json!({"id": 1, "name": "Centrifuge", "manufacturer": "Eppendorf", "model_number": "5424R",
                   "serial_number": "EP-001", "quantity": 1, "status": "Operational", "location_id": 1}),
            json!({"id": 2, "name": "Fume Hood", "manufacturer": "Labconco", "model_number": "Protector",
                   "serial_number": null, "quantity": 2, "status": "Maintenance", "location_id": 2,
                   "next_maintenance_date": "2025-01-15T00:00:00"}),
        ]);
        state.collections.insert("orders".into(), vec![
            json!({"id": 1, "po_number": "PO-1", "supplier": "Sigma", "order_date": "2024-04-01",
                   "items": "Acetone", "total_cost": "100.50", "status": "Pending"}),
            json!({"id": 2, "po_number": "PO-2", "supplier": "Merck", "order_date": null,
                   "items": "Gloves", "total_cost": 0, "status": "Received"}),
            json!({"id": 3, "po_number": "PO-3", "supplier": "VWR", "order_date": "2024-05-10",
                   "items": "Beakers", "total_cost": 49.5, "status": "Shipped"}),
        ]);
        state
    }

    fn collection(&mut self, name: &str) -> &mut Vec<Value> {
        self.collections.entry(name.to_string()).or_default()
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedState = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: SharedState,
}

impl FakeBackend {
    pub fn client(&self) -> BackendClient {
        let config = BackendConfig {
            base_url: self.base_url.clone(),
            ..BackendConfig::default()
        };
        BackendClient::new(&config).expect("client")
    }

    pub fn collection_len(&self, name: &str) -> usize {
        self.state.lock().unwrap().collections.get(name).map_or(0, Vec::len)
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

pub fn app_state(backend: &FakeBackend) -> Arc<AppState> {
    let mut config = Config::default();
    config.backend.base_url = backend.base_url.clone();
    Arc::new(AppState::new(backend.client(), config))
}

/// The console's routes, talking to `backend`.
pub fn console_app(
    backend: &FakeBackend,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(app_state(backend)))
        .app_data(web::Data::new(Metrics::new()))
        .configure(crate::configure_routes)
}

pub async fn start(state: FakeState) -> FakeBackend {
    let state: SharedState = Arc::new(Mutex::new(state));
    let data = web::Data::new(state.clone());

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake backend");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    FakeBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/ai-search", web::post().to(ai_search))
        .route("/api/ai-lookup", web::post().to(ai_lookup))
        .route("/api/check-hazards", web::get().to(check_hazards))
        .route("/api/orders/{id}", web::put().to(update_order))
        .route("/api/{resource}", web::get().to(list))
        .route("/api/{resource}", web::post().to(save))
        .route("/api/{resource}/{id}", web::get().to(get_one))
        .route("/api/{resource}/{id}", web::delete().to(delete_one));
}

fn log_request(state: &SharedState, line: String) {
    state.lock().unwrap().requests.push(line);
}

async fn list(state: web::Data<SharedState>, path: web::Path<String>) -> HttpResponse {
    let resource = path.into_inner();
    log_request(&state, format!("GET /api/{}", resource));
    let mut guard = state.lock().unwrap();
    HttpResponse::Ok().json(guard.collection(&resource).clone())
}

async fn get_one(state: web::Data<SharedState>, path: web::Path<(String, i64)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    log_request(&state, format!("GET /api/{}/{}", resource, id));
    let mut guard = state.lock().unwrap();
    match guard.collection(&resource).iter().find(|v| v["id"] == json!(id)) {
        Some(found) => {
            // single-record endpoint does not join the location name
            let mut found = found.clone();
            if let Some(obj) = found.as_object_mut() {
                obj.remove("location_name");
            }
            HttpResponse::Ok().json(found)
        }
        None => HttpResponse::NotFound().json(json!({"error": "Not found"})),
    }
}

async fn save(
    state: web::Data<SharedState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let resource = path.into_inner();
    log_request(&state, format!("POST /api/{}", resource));
    let mut guard = state.lock().unwrap();
    if let Some(message) = guard.reject_saves.clone() {
        return HttpResponse::InternalServerError().json(json!({"error": message}));
    }

    let mut record = body.into_inner();
    let existing_id = record.get("id").and_then(Value::as_i64);
    match existing_id {
        Some(id) => {
            let collection = guard.collection(&resource);
            if let Some(slot) = collection.iter_mut().find(|v| v["id"] == json!(id)) {
                *slot = record;
            }
            HttpResponse::Created().json(json!({"message": "Success"}))
        }
        None => {
            let id = guard.allocate_id();
            record["id"] = json!(id);
            guard.collection(&resource).push(record);
            HttpResponse::Created().json(json!({"message": "Success", "id": id}))
        }
    }
}

async fn update_order(
    state: web::Data<SharedState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    let id = path.into_inner();
    log_request(&state, format!("PUT /api/orders/{}", id));
    let mut guard = state.lock().unwrap();
    if let Some(message) = guard.reject_saves.clone() {
        return HttpResponse::InternalServerError().json(json!({"error": message}));
    }
    let orders = guard.collection("orders");
    match orders.iter_mut().find(|v| v["id"] == json!(id)) {
        Some(slot) => {
            if let (Some(target), Some(fields)) = (slot.as_object_mut(), body.as_object()) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            HttpResponse::Ok().json(json!({"message": "Order updated successfully"}))
        }
        None => HttpResponse::Ok().json(json!({"message": "Order updated successfully"})),
    }
}

async fn delete_one(state: web::Data<SharedState>, path: web::Path<(String, i64)>) -> HttpResponse {
    let (resource, id) = path.into_inner();
    log_request(&state, format!("DELETE /api/{}/{}", resource, id));
    let mut guard = state.lock().unwrap();
    guard.collection(&resource).retain(|v| v["id"] != json!(id));
    HttpResponse::Ok().json(json!({"message": "Deleted successfully"}))
}

async fn ai_search(state: web::Data<SharedState>, body: web::Json<Value>) -> HttpResponse {
    log_request(&state, format!("POST /api/ai-search {}", body["query"]));
    let response = state.lock().unwrap().ai_search.clone();
    HttpResponse::Ok().json(response)
}

async fn ai_lookup(state: web::Data<SharedState>, body: web::Json<Value>) -> HttpResponse {
    log_request(&state, format!("POST /api/ai-lookup {}", body["query"]));
    let response = state.lock().unwrap().lookup.clone();
    HttpResponse::Ok().json(response)
}

async fn check_hazards(state: web::Data<SharedState>) -> HttpResponse {
    log_request(&state, "GET /api/check-hazards".to_string());
    let (status, body) = state.lock().unwrap().hazards.clone();
    let status = actix_web::http::StatusCode::from_u16(status)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(body)
}
