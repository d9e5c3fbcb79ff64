use super::model;
use crate::shared::date_utils::format_datetime;
use crate::shared::download::save_blob;
use contracts::domain::a004_document::{accept_attr, is_allowed_filename, RfqDocument};
use leptos::prelude::*;

fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Upload, list, download and delete attachments of a saved RFQ.
/// `on_count_changed` reports the list length after every refresh so the
/// host page can gate its own actions on it.
#[component]
pub fn DocumentsPanel(
    #[prop(into)] rfq_id: Signal<i64>,
    on_count_changed: Callback<usize>,
) -> impl IntoView {
    let documents = RwSignal::new(Vec::<RfqDocument>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (is_busy, set_is_busy) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let refresh = move || {
        let id = rfq_id.get_untracked();
        leptos::task::spawn_local(async move {
            match model::fetch_documents(id).await {
                Ok(items) => {
                    on_count_changed.run(items.len());
                    documents.set(items);
                }
                Err(e) => {
                    log::error!("Failed to load documents: {e}");
                    set_error.set(Some(e));
                }
            }
        });
    };

    Effect::new(move |_| {
        if rfq_id.get() > 0 {
            refresh();
        }
    });

    let on_upload = move |_| {
        let Some(element) = input_ref.get_untracked() else {
            return;
        };
        let Some(file) = element.files().and_then(|list| list.get(0)) else {
            set_error.set(Some("Please choose a file first.".to_string()));
            return;
        };

        if !is_allowed_filename(&file.name()) {
            set_error.set(Some(format!(
                "File type is not allowed. Accepted: {}",
                accept_attr()
            )));
            return;
        }

        let id = rfq_id.get_untracked();
        set_error.set(None);
        set_is_busy.set(true);
        leptos::task::spawn_local(async move {
            match model::upload_document(id, &file).await {
                Ok(()) => {
                    element.set_value("");
                    refresh();
                }
                Err(e) => {
                    log::error!("Upload failed: {e}");
                    set_error.set(Some(e));
                }
            }
            set_is_busy.set(false);
        });
    };

    let on_download = move |doc: RfqDocument| {
        let id = rfq_id.get_untracked();
        leptos::task::spawn_local(async move {
            match model::download_document(id, doc.id).await {
                Ok(blob) => {
                    if let Err(e) = save_blob(&blob, &doc.original_name) {
                        log::error!("Failed to save file: {e}");
                        set_error.set(Some(e));
                    }
                }
                Err(e) => {
                    log::error!("Download failed: {e}");
                    set_error.set(Some(e));
                }
            }
        });
    };

    let on_delete = move |doc_id: i64| {
        let id = rfq_id.get_untracked();
        set_is_busy.set(true);
        leptos::task::spawn_local(async move {
            match model::delete_document(id, doc_id).await {
                Ok(()) => refresh(),
                Err(e) => {
                    log::error!("Delete failed: {e}");
                    set_error.set(Some(e));
                }
            }
            set_is_busy.set(false);
        });
    };

    view! {
        <div style="border: 1px solid #dee2e6; border-radius: 6px; padding: 16px; background: white;">
            <h4 style="margin: 0 0 12px 0;">"Documents"</h4>

            <div style="display: flex; gap: 8px; align-items: center; margin-bottom: 12px;">
                <input type="file" node_ref=input_ref accept=accept_attr() />
                <button
                    style="padding: 6px 14px; background: #0d6efd; color: white; border: none; border-radius: 4px; cursor: pointer;"
                    disabled=move || is_busy.get()
                    on:click=on_upload
                >
                    {move || if is_busy.get() { "Working..." } else { "Upload" }}
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <div style="padding: 8px; margin-bottom: 10px; background: #f8d7da; color: #842029; border-radius: 4px;">
                    {move || error.get().unwrap_or_default()}
                </div>
            </Show>

            {move || {
                let items = documents.get();
                if items.is_empty() {
                    view! {
                        <p style="color: #6c757d; margin: 0;">"No documents uploaded yet."</p>
                    }
                        .into_any()
                } else {
                    view! {
                        <table style="width: 100%; border-collapse: collapse;">
                            <thead>
                                <tr style="background: #f8f9fa;">
                                    <th style="padding: 6px 10px; text-align: left;">"Name"</th>
                                    <th style="padding: 6px 10px; text-align: left;">"Size"</th>
                                    <th style="padding: 6px 10px; text-align: left;">"Uploaded"</th>
                                    <th style="padding: 6px 10px;"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {items
                                    .into_iter()
                                    .map(|doc| {
                                        let doc_id = doc.id;
                                        let size = format_size(doc.file_size);
                                        let name = doc.original_name.clone();
                                        let uploaded = format_datetime(&doc.stored_at);
                                        view! {
                                            <tr style="border-top: 1px solid #dee2e6;">
                                                <td style="padding: 6px 10px;">{name}</td>
                                                <td style="padding: 6px 10px;">{size}</td>
                                                <td style="padding: 6px 10px;">{uploaded}</td>
                                                <td style="padding: 6px 10px; text-align: right; white-space: nowrap;">
                                                    <button
                                                        style="margin-right: 8px; padding: 4px 10px; cursor: pointer;"
                                                        on:click={
                                                            let doc = doc.clone();
                                                            move |_| on_download(doc.clone())
                                                        }
                                                    >
                                                        "Download"
                                                    </button>
                                                    <button
                                                        style="padding: 4px 10px; color: #842029; cursor: pointer;"
                                                        disabled=move || is_busy.get()
                                                        on:click=move |_| on_delete(doc_id)
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::format_size;

    #[test]
    fn sizes_are_humanized() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3_145_728), "3.0 MB");
    }
}
