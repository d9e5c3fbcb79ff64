pub mod state;

use crate::shared::api_utils::api_url;
use contracts::domain::common::ApiEnvelope;
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos_router::components::A;
use serde::{Deserialize, Serialize};
use state::{create_state, PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RfqListRow {
    pub rfq_id: i64,
    pub rfq_name: String,
    pub client_id: i64,
    pub client_name: String,
    pub status: String,
}

async fn fetch_all() -> Result<Vec<RfqListRow>, String> {
    // Cache buster so a finalized RFQ shows up right after the redirect.
    let url = api_url(&format!("/rfq/getall?ts={}", js_sys::Date::now() as u64));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<Vec<RfqListRow>> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    envelope.into_result()
}

#[component]
pub fn RfqListPage() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal(Option::<String>::None);

    Effect::new(move |_| {
        if state.get_untracked().is_loaded {
            return;
        }
        leptos::task::spawn_local(async move {
            match fetch_all().await {
                Ok(items) => {
                    state.update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log::error!("Failed to load RFQ list: {e}");
                    set_error.set(Some(e));
                    state.update(|s| s.is_loaded = true);
                }
            }
        });
    });

    let sort_header = move |field: &'static str, label: &'static str| {
        let indicator = move || {
            let s = state.get();
            if s.sort_field == field {
                if s.sort_ascending {
                    " ▲"
                } else {
                    " ▼"
                }
            } else {
                ""
            }
        };
        view! {
            <th
                style="padding: 8px 12px; text-align: left; cursor: pointer; border-bottom: 2px solid #dee2e6;"
                on:click=move |_| state.update(|s| s.toggle_sort(field))
            >
                {label}
                {indicator}
            </th>
        }
    };

    view! {
        <div style="padding: 20px; max-width: 1100px; margin: 0 auto;">
            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;">
                <h2 style="margin: 0;">"Requests for Quote"</h2>
                <A
                    href="/rfq/create"
                    attr:style="padding: 8px 16px; background: #0d6efd; color: white; border-radius: 4px; text-decoration: none;"
                >
                    "+ Create RFQ"
                </A>
            </div>

            <input
                type="text"
                placeholder="Search by RFQ or client name..."
                style="width: 300px; padding: 6px 10px; margin-bottom: 12px; border: 1px solid #ced4da; border-radius: 4px;"
                prop:value=move || state.get().search_query
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| {
                        s.search_query = value;
                        s.page = 0;
                    });
                }
            />

            <Show when=move || error.get().is_some()>
                <div style="padding: 10px; margin-bottom: 12px; background: #f8d7da; color: #842029; border-radius: 4px;">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            <Show
                when=move || state.get().is_loaded
                fallback=|| view! { <p>"Loading..."</p> }
            >
                <table style="width: 100%; border-collapse: collapse; background: white;">
                    <thead>
                        <tr style="background: #f8f9fa;">
                            {sort_header("rfq_id", "Id")}
                            {sort_header("rfq_name", "RFQ name")}
                            {sort_header("client_name", "Client")}
                            {sort_header("status", "Status")}
                            <th style="padding: 8px 12px; border-bottom: 2px solid #dee2e6;"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = state.get().visible();
                            if rows.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan="5" style="padding: 16px; text-align: center; color: #6c757d;">
                                            "No RFQs found"
                                        </td>
                                    </tr>
                                }
                                    .into_any()
                            } else {
                                rows.into_iter()
                                    .map(|row| {
                                        let edit_href = format!(
                                            "/rfq/{}/edit?client={}",
                                            row.rfq_id,
                                            row.client_id,
                                        );
                                        view! {
                                            <tr style="border-bottom: 1px solid #dee2e6;">
                                                <td style="padding: 8px 12px;">{row.rfq_id}</td>
                                                <td style="padding: 8px 12px;">{row.rfq_name}</td>
                                                <td style="padding: 8px 12px;">{row.client_name}</td>
                                                <td style="padding: 8px 12px;">{row.status}</td>
                                                <td style="padding: 8px 12px; text-align: right;">
                                                    <A
                                                        href=edit_href
                                                        attr:style="color: #0d6efd; text-decoration: none;"
                                                    >
                                                        "Edit"
                                                    </A>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </tbody>
                </table>

                <div style="display: flex; gap: 8px; align-items: center; margin-top: 12px;">
                    <button
                        style="padding: 4px 10px;"
                        disabled=move || state.get().page == 0
                        on:click=move |_| {
                            state.update(|s| s.page = s.page.saturating_sub(1))
                        }
                    >
                        "Prev"
                    </button>
                    <span>
                        {move || {
                            let s = state.get();
                            format!("Page {} of {}", s.page + 1, s.total_pages())
                        }}
                    </span>
                    <button
                        style="padding: 4px 10px;"
                        disabled=move || {
                            let s = state.get();
                            s.page + 1 >= s.total_pages()
                        }
                        on:click=move |_| state.update(|s| s.page += 1)
                    >
                        "Next"
                    </button>
                    <span style="color: #6c757d; margin-left: auto;">
                        {move || {
                            format!(
                                "{} total, {} per page",
                                state.get().filtered_count(),
                                PAGE_SIZE,
                            )
                        }}
                    </span>
                </div>
            </Show>
        </div>
    }
}
