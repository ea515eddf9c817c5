// src/inventory_handlers.rs
//! Dashboard, table fragment, detail panel, delete and form handlers, written
//! once and instantiated for chemicals and equipment.

use actix_web::http::header;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::forms::{parse_id, EntityForm};
use crate::inventory::{ListFilter, UNKNOWN_DETAIL_LOCATION};
use crate::views::components::error_alert;
use crate::views::{error_page, render, render_with_status, DashboardContext, InventoryView};
use crate::AppState;

// ==================== QUERY STRUCTURES ====================

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    /// `ai` switches the chemical dashboard to natural-language search.
    pub mode: Option<String>,
}

impl DashboardQuery {
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            q: self.q.clone(),
            location: self.location.clone(),
        }
    }

    pub fn ai_mode(&self) -> bool {
        self.mode.as_deref() == Some("ai")
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub id: Option<String>,
}

// ==================== DASHBOARD ====================

/// Full page: list and locations fetched concurrently, cache replaced.
pub async fn dashboard_page<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let session = &app_state.session;
    let fetched = futures::try_join!(session.client.list::<V>(), session.refresh_locations());

    let (items, locations) = match fetched {
        Ok(pair) => pair,
        Err(err) => {
            log::error!("Failed to load {} dashboard: {}", V::RESOURCE, err);
            return render_with_status(err.status_code(), error_page(V::PAGE, &err));
        }
    };

    let index = crate::inventory::LocationIndex::from_locations(&locations);
    let filter = query.filter();
    let ctx = DashboardContext {
        locations: &locations,
        index: &index,
        filter: &filter,
        ai_mode: query.ai_mode(),
        now: Utc::now(),
    };

    log::debug!("Rendering {} dashboard with {} records", V::RESOURCE, items.len());
    render(V::dashboard(&items, &ctx))
}

/// Rows only; re-requested on every keystroke and filter change.
pub async fn table_fragment<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<ListFilter>,
) -> HttpResponse {
    let session = &app_state.session;
    match futures::try_join!(session.client.list::<V>(), session.location_index()) {
        Ok((items, index)) => {
            let visible = query.apply(&items);
            render(V::table_rows(&visible, &index))
        }
        Err(err) => {
            log::warn!("Failed to refresh {} table: {}", V::RESOURCE, err);
            render(V::table_error(&err))
        }
    }
}

// ==================== DETAIL / DELETE ====================

pub async fn detail_panel<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let session = &app_state.session;
    let id = path.into_inner();

    let item = match session.client.get::<V>(id).await {
        Ok(item) => item,
        Err(err) => {
            log::warn!("Failed to load {} {}: {}", V::LABEL, id, err);
            return render(error_alert(&err));
        }
    };

    let location = match item.joined_location_name() {
        Some(name) => name.to_string(),
        None => match session.location_index().await {
            Ok(index) => index.resolve_or(&item, UNKNOWN_DETAIL_LOCATION).to_string(),
            Err(err) => {
                log::warn!("Location lookup failed for {} {}: {}", V::LABEL, id, err);
                UNKNOWN_DETAIL_LOCATION.to_string()
            }
        },
    };

    render(item.detail_panel(&location))
}

/// Success asks htmx to reload the page; failure leaves everything as it was.
pub async fn delete_entity<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match app_state.session.client.delete::<V>(id).await {
        Ok(()) => {
            log::info!("Deleted {} {}", V::LABEL, id);
            HttpResponse::Ok().insert_header(("HX-Refresh", "true")).finish()
        }
        Err(err) => {
            log::warn!("Failed to delete {} {}: {}", V::LABEL, id, err);
            render(error_alert(&err))
        }
    }
}

// ==================== FORM ====================

/// Create form, or edit form pre-filled from the record named by `?id=`.
pub async fn form_page<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<FormQuery>,
) -> HttpResponse {
    let session = &app_state.session;

    let locations = match session.refresh_locations().await {
        Ok(locations) => locations,
        Err(err) => {
            log::warn!("Failed to load locations for {} form: {}", V::LABEL, err);
            return render(V::form_page(&V::Form::default(), &[], Some(&err.to_string())));
        }
    };

    let record: ConsoleResult<Option<V>> = async {
        match parse_id(query.id.as_deref().unwrap_or_default(), "id")? {
            Some(id) => Ok(Some(session.client.get::<V>(id).await?)),
            None => Ok(None),
        }
    }
    .await;

    match record {
        Ok(Some(item)) => render(V::form_page(&V::Form::from_record(&item), &locations, None)),
        Ok(None) => render(V::form_page(&V::Form::default(), &locations, None)),
        Err(err) => {
            log::warn!("Failed to load {} for editing: {}", V::LABEL, err);
            render(V::form_page(&V::Form::default(), &locations, Some(&err.to_string())))
        }
    }
}

/// Save, then 303 to the listing. A rejected save re-renders the form with
/// the submitted values and the backend's message.
pub async fn submit_form<V: InventoryView>(
    app_state: web::Data<Arc<AppState>>,
    form: web::Form<V::Form>,
) -> HttpResponse {
    let session = &app_state.session;
    let form = form.into_inner();

    let saved = async {
        let draft = form.to_draft()?;
        session.client.save(&draft).await
    }
    .await;

    match saved {
        Ok(receipt) => {
            session.locations.invalidate().await;
            log::info!(
                "Saved {} ({}): {}",
                V::LABEL,
                if form.is_edit() { "update" } else { "create" },
                receipt.message.as_deref().unwrap_or("ok")
            );
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, V::LIST_PATH))
                .finish()
        }
        Err(err) => {
            log::warn!("Failed to save {}: {}", V::LABEL, err);
            let locations = session.locations().await.unwrap_or_default();
            render_with_status(
                err.status_code(),
                V::form_page(&form, &locations, Some(&err.to_string())),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{self, FakeState};
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::test;

    async fn body_of<B: MessageBody>(resp: ServiceResponse<B>) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_rt::test]
    async fn test_dashboard_renders_summary() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Chemical Inventory"));
        assert!(body.contains("Low Stock: Sodium Azide"));
        assert!(body.contains("Expired: Nitric Acid"));
        assert!(body.contains("Cold Room"));
    }

    #[actix_rt::test]
    async fn test_table_fragment_filters_by_location() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::get().uri("/fragments/chemicals/table?q=&location=2").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Sodium Azide"));
        assert!(!body.contains("Acetone"));
        assert!(!body.contains("<html"));

        let req = test::TestRequest::get().uri("/fragments/equipment/table?q=eppendorf").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Centrifuge"));
        assert!(!body.contains("Fume Hood"));
    }

    #[actix_rt::test]
    async fn test_detail_resolves_location_from_cache() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        // single-record endpoint drops location_name, so the name comes from the locations list
        let req = test::TestRequest::get().uri("/fragments/chemicals/1").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Shelf A"));
        assert!(body.contains("Highly flammable"));

        let req = test::TestRequest::get().uri("/fragments/chemicals/999").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Chemical not found"));
    }

    fn location_fetches(backend: &test_support::FakeBackend) -> usize {
        backend.requests().iter().filter(|r| *r == "GET /api/locations").count()
    }

    #[actix_rt::test]
    async fn test_detail_reuses_cached_locations() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        for _ in 0..3 {
            let req = test::TestRequest::get().uri("/fragments/chemicals/2").to_request();
            let body = body_of(test::call_service(&app, req).await).await;
            assert!(body.contains("Cold Room"));
        }
        assert_eq!(location_fetches(&backend), 1);

        // a dashboard load always refetches and leaves the cache warm
        let req = test::TestRequest::get().uri("/").to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::get().uri("/fragments/equipment/1").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Shelf A"));
        assert_eq!(location_fetches(&backend), 2);
    }

    #[actix_rt::test]
    async fn test_save_invalidates_location_cache() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::get().uri("/fragments/chemicals/2").to_request();
        test::call_service(&app, req).await;
        assert_eq!(location_fetches(&backend), 1);

        let req = test::TestRequest::post()
            .uri("/form.html")
            .set_form([("chem_id", "2"), ("name", "Sodium Azide"), ("quantity", "12"), ("location_id", "2")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let req = test::TestRequest::get().uri("/fragments/chemicals/2").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Cold Room"));
        assert_eq!(location_fetches(&backend), 2);
    }

    #[actix_rt::test]
    async fn test_detail_without_location() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::get().uri("/fragments/chemicals/3").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Nitric Acid"));
        assert!(body.contains("Unknown Location"));
    }

    #[actix_rt::test]
    async fn test_dashboard_tolerates_null_columns() {
        let mut state = FakeState::seeded();
        state.collections.get_mut("chemicals").unwrap().push(serde_json::json!({
            "id": 4, "name": "Legacy Buffer", "cas_number": null, "quantity": "5",
            "unit": null, "location_id": 1, "expiry_date": null, "safety_notes": null
        }));
        let backend = test_support::start(state).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Acetone"));
        assert!(body.contains("Legacy Buffer"));
    }

    #[actix_rt::test]
    async fn test_delete_refreshes_page() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::post().uri("/equipment/2/delete").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("HX-Refresh").unwrap(), "true");
        assert_eq!(backend.collection_len("equipments"), 1);
    }

    #[actix_rt::test]
    async fn test_create_then_update_via_form() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::post()
            .uri("/form.html")
            .set_form([("chem_id", ""), ("name", "Toluene"), ("cas_number", "108-88-3"),
                       ("quantity", "2"), ("unit", "L"), ("location_id", "1")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/");
        assert_eq!(backend.collection_len("chemicals"), 4);

        let req = test::TestRequest::post()
            .uri("/form.html")
            .set_form([("chem_id", "1"), ("name", "Acetone (HPLC)"), ("quantity", "abc")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(backend.collection_len("chemicals"), 4);
    }

    #[actix_rt::test]
    async fn test_rejected_save_rerenders_form() {
        let mut state = FakeState::seeded();
        state.reject_saves = Some("Missing required fields".to_string());
        let backend = test_support::start(state).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::post()
            .uri("/equipment/form")
            .set_form([("item_id", ""), ("name", "Autoclave"), ("quantity", "1")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_ne!(resp.status(), StatusCode::SEE_OTHER);
        let body = body_of(resp).await;
        assert!(body.contains("Missing required fields"));
        assert!(body.contains(r#"value="Autoclave""#));
    }

    #[actix_rt::test]
    async fn test_edit_form_prefills() {
        let backend = test_support::start(FakeState::seeded()).await;
        let app = test::init_service(test_support::console_app(&backend)).await;

        let req = test::TestRequest::get().uri("/equipment/form?id=2").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Edit Equipment"));
        assert!(body.contains(r#"value="2025-01-15""#));
    }
}
