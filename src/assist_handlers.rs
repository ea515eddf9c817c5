// src/assist_handlers.rs
//! AI search, hazard scan and chemical lookup fragments.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::models::Chemical;
use crate::views::assist::{ai_error_row, ai_rows, hazard_error, hazard_panel, lookup_hint, lookup_panel};
use crate::views::components::error_alert;
use crate::views::render;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub name: String,
}

/// Rows for a natural-language query. Matches keep inventory order; ids the
/// backend returns that are not in the current list are ignored. A blank
/// query leaves the table untouched.
pub async fn ai_search_fragment(
    app_state: web::Data<Arc<AppState>>,
    form: web::Form<SearchForm>,
) -> HttpResponse {
    let query = form.q.trim();
    if query.is_empty() {
        return HttpResponse::NoContent().finish();
    }

    let session = &app_state.session;
    let fetched = futures::try_join!(
        session.client.list::<Chemical>(),
        session.client.ai_search(query),
        session.location_index(),
    );

    match fetched {
        Ok((chemicals, response, index)) => {
            let matches: Vec<&Chemical> = chemicals
                .iter()
                .filter(|c| response.match_ids.contains(&c.id))
                .collect();
            log::info!("AI search '{}' matched {} chemicals", query, matches.len());
            render(ai_rows(&matches, response.explanation.as_deref(), &index))
        }
        Err(err) => {
            log::warn!("AI search '{}' failed: {}", query, err);
            render(ai_error_row(&err))
        }
    }
}

pub async fn hazard_fragment(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    match app_state.session.client.check_hazards().await {
        Ok(scan) => {
            log::info!("Hazard scan finished: {} hazards", scan.hazards.len());
            render(hazard_panel(&scan))
        }
        Err(err) => {
            log::warn!("Hazard scan failed: {}", err);
            render(hazard_error(&err))
        }
    }
}

pub async fn lookup_fragment(
    app_state: web::Data<Arc<AppState>>,
    form: web::Form<LookupForm>,
) -> HttpResponse {
    let name = form.name.trim();
    if name.is_empty() {
        return render(lookup_hint("Enter a chemical name first."));
    }

    match app_state.session.client.ai_lookup(name).await {
        Ok(suggestion) => render(lookup_panel(name, &suggestion)),
        Err(err) => {
            log::warn!("AI lookup for '{}' failed: {}", name, err);
            render(error_alert(&err))
        }
    }
}
