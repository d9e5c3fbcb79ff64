use super::model;
use contracts::domain::a001_client::{ClientDto, ClientRef};
use contracts::domain::common::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn field_error(errors: RwSignal<FieldErrors>, field: &'static str) -> impl Fn() -> Option<AnyView> {
    move || {
        errors.get().get(field).map(|message| {
            view! {
                <div style="color: #c00; font-size: 12px; margin-top: 2px;">{message.to_string()}</div>
            }
            .into_any()
        })
    }
}

/// Client selector with an inline "add client" form for the RFQ wizard.
///
/// Holds only the read-only `{id, label}` projection; full client editing
/// happens on the client screens, not here.
#[component]
pub fn ClientPicker(
    selected: RwSignal<Option<i64>>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let (clients, set_clients) = signal(Vec::<ClientRef>::new());
    let (load_error, set_load_error) = signal(Option::<String>::None);
    let (show_add, set_show_add) = signal(false);
    let (is_saving, set_is_saving) = signal(false);
    let draft = RwSignal::new(ClientDto::default());
    let draft_errors = RwSignal::new(FieldErrors::new());

    let load_clients = move |select_id: Option<i64>| {
        spawn_local(async move {
            match model::fetch_all().await {
                Ok(list) => {
                    set_clients.set(list);
                    if let Some(id) = select_id {
                        selected.set(Some(id));
                    }
                    set_load_error.set(None);
                }
                Err(e) => set_load_error.set(Some(format!("Failed to load clients: {e}"))),
            }
        });
    };

    Effect::new(move || {
        load_clients(None);
    });

    let on_save_client = move |_| {
        let dto = draft.get();
        if let Err(errors) = dto.validate() {
            draft_errors.set(errors);
            return;
        }
        draft_errors.set(FieldErrors::new());
        set_is_saving.set(true);
        spawn_local(async move {
            match model::save(&dto).await {
                Ok(id) => {
                    draft.set(ClientDto::default());
                    set_show_add.set(false);
                    load_clients(Some(id));
                }
                Err(e) => set_load_error.set(Some(e)),
            }
            set_is_saving.set(false);
        });
    };

    view! {
        <div>
            <select
                style="width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px;"
                prop:disabled=move || disabled.get()
                on:change=move |ev| {
                    selected.set(event_target_value(&ev).parse::<i64>().ok().filter(|id| *id > 0));
                }
            >
                <option value="0" prop:selected=move || selected.get().is_none()>
                    "-- Select client --"
                </option>
                {move || {
                    clients
                        .get()
                        .into_iter()
                        .map(|client| {
                            let id = client.id;
                            view! {
                                <option
                                    value=id.to_string()
                                    prop:selected=move || selected.get() == Some(id)
                                >
                                    {client.label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>

            <button
                style="margin-top: 6px; padding: 4px 10px; font-size: 12px; background: none; border: 1px solid #007bff; color: #007bff; border-radius: 4px; cursor: pointer;"
                prop:disabled=move || disabled.get()
                on:click=move |_| set_show_add.update(|v| *v = !*v)
            >
                {move || if show_add.get() { "Cancel" } else { "+ New client" }}
            </button>

            {move || {
                load_error
                    .get()
                    .map(|e| {
                        view! {
                            <div style="padding: 8px; background: #fee; border: 1px solid #fcc; border-radius: 4px; color: #c00; margin-top: 6px;">
                                {e}
                            </div>
                        }
                    })
            }}

            <Show when=move || show_add.get()>
                <div style="margin-top: 8px; padding: 10px; background: #f5f5f5; border-radius: 4px;">
                    <div style="margin-bottom: 6px;">
                        <input
                            type="text"
                            placeholder="Client name"
                            style="width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px;"
                            prop:value=move || draft.get().p_name
                            on:input=move |ev| draft.update(|d| d.p_name = event_target_value(&ev))
                        />
                        {field_error(draft_errors, "name")}
                    </div>
                    <div style="margin-bottom: 6px;">
                        <input
                            type="email"
                            placeholder="Email"
                            style="width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px;"
                            prop:value=move || draft.get().p_email
                            on:input=move |ev| draft.update(|d| d.p_email = event_target_value(&ev))
                        />
                        {field_error(draft_errors, "email")}
                    </div>
                    <div style="margin-bottom: 6px;">
                        <input
                            type="text"
                            placeholder="Phone"
                            style="width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px;"
                            prop:value=move || draft.get().p_phone
                            on:input=move |ev| draft.update(|d| d.p_phone = event_target_value(&ev))
                        />
                    </div>
                    <div style="margin-bottom: 6px;">
                        <input
                            type="text"
                            placeholder="Tax id"
                            style="width: 100%; padding: 6px; border: 1px solid #ddd; border-radius: 4px;"
                            prop:value=move || draft.get().p_tax_id
                            on:input=move |ev| draft.update(|d| d.p_tax_id = event_target_value(&ev))
                        />
                    </div>
                    <button
                        style="padding: 6px 14px; background: #007bff; color: white; border: none; border-radius: 4px; cursor: pointer;"
                        prop:disabled=move || is_saving.get()
                        on:click=on_save_client
                    >
                        {move || if is_saving.get() { "Saving..." } else { "Save client" }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
