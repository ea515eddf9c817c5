// src/views/layout.rs
use maud::{html, Markup, DOCTYPE};

use super::components::error_alert;
use crate::error::ConsoleError;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css";
const HTMX_JS: &str = "https://unpkg.com/htmx.org@2.0.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentPage {
    Chemicals,
    Equipment,
    Orders,
}

pub struct PageConfig<'a> {
    pub title: &'a str,
    pub current_page: CurrentPage,
}

pub fn base(config: &PageConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (config.title) " | Lab Inventory" }
                link rel="stylesheet" href=(BOOTSTRAP_CSS);
                link rel="stylesheet" href=(FONT_AWESOME_CSS);
                link rel="stylesheet" href="/static/console.css";
                script src=(HTMX_JS) {}
            }
            body {
                (navbar(config.current_page))
                main id="main-content" class="container-fluid py-4" {
                    (content)
                }
                script src=(BOOTSTRAP_JS) {}
            }
        }
    }
}

/// Full page for a failure that left nothing else to show.
pub fn error_page(current_page: CurrentPage, err: &ConsoleError) -> Markup {
    let config = PageConfig { title: "Error", current_page };
    base(&config, html! {
        div class="row justify-content-center" {
            div class="col-lg-8" {
                (error_alert(err))
                a class="btn btn-outline-secondary" href="" { i class="fa-solid fa-rotate-right me-1" {} "Retry" }
            }
        }
    })
}

fn navbar(current: CurrentPage) -> Markup {
    let links = [
        ("/", "fa-flask", "Chemicals", CurrentPage::Chemicals),
        ("/equipment", "fa-microscope", "Equipment", CurrentPage::Equipment),
        ("/orders", "fa-file-invoice", "Orders", CurrentPage::Orders),
    ];

    html! {
        nav class="navbar navbar-expand navbar-dark bg-dark px-3" {
            a class="navbar-brand" href="/" {
                i class="fa-solid fa-vials me-2" {}
                "Lab Inventory"
            }
            ul class="navbar-nav" {
                @for (href, icon, label, page) in links {
                    li class="nav-item" {
                        a.nav-link.active[page == current] href=(href) {
                            i class={ "fa-solid me-1 " (icon) } {}
                            (label)
                        }
                    }
                }
            }
        }
    }
}
