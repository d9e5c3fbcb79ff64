use super::view_model::RfqPipelineViewModel;
use crate::domain::a001_client::ui::picker::ClientPicker;
use crate::domain::a002_raw_material::ui::model as raw_materials;
use crate::domain::a004_document::ui::panel::DocumentsPanel;
use crate::shared::session::SessionContext;
use contracts::domain::a002_raw_material::RawMaterial;
use contracts::domain::common::FieldErrors;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_create_rfq::{CreateRfq, PipelineStage, ProductType};
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

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

const INPUT_STYLE: &str = "width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px;";
const PRIMARY_BUTTON: &str = "padding: 8px 18px; background: #0d6efd; color: white; border: none; border-radius: 4px; cursor: pointer;";
const SECONDARY_BUTTON: &str = "padding: 8px 18px; background: none; border: 1px solid #6c757d; color: #6c757d; border-radius: 4px; cursor: pointer;";

#[component]
fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || {
            message
                .get()
                .map(|m| {
                    view! {
                        <div style="padding: 10px; margin-bottom: 12px; background: #f8d7da; color: #842029; border-radius: 4px;">
                            {m}
                        </div>
                    }
                })
        }}
    }
}

#[component]
fn StageIndicator(vm: RfqPipelineViewModel) -> impl IntoView {
    let label = move || match vm.pipeline.get().stage() {
        PipelineStage::EditingHeader => "Step 1: RFQ details",
        PipelineStage::ChoosingProductType => "Step 2: Product type",
        PipelineStage::EditingProducts => "Step 3: Bill of materials",
        PipelineStage::UploadingDocuments => "Step 4: Documents",
        PipelineStage::Finalized => "Done",
        PipelineStage::Failed => "Save failed",
    };
    view! { <div style="color: #6c757d; margin-bottom: 12px;">{label}</div> }
}

#[component]
fn HeaderStage(vm: RfqPipelineViewModel, selected_client: RwSignal<Option<i64>>) -> impl IntoView {
    let is_new_type = move || vm.pipeline.get().product_type() == ProductType::New;

    view! {
        <div>
            <ErrorBanner message=Signal::derive(move || {
                vm.pipeline.get().last_error().map(str::to_string)
            }) />

            <div style="margin-bottom: 12px;">
                <label style="display: block; margin-bottom: 4px; font-weight: 600;">"RFQ name"</label>
                <input
                    type="text"
                    style=INPUT_STYLE
                    prop:value=move || vm.pipeline.get().header.name.clone()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.pipeline.update(|p| p.header.name = value);
                    }
                />
                {field_error(vm.header_errors, "name")}
            </div>

            <div style="margin-bottom: 12px;">
                <label style="display: block; margin-bottom: 4px; font-weight: 600;">"Client"</label>
                <ClientPicker selected=selected_client disabled=Signal::derive(move || vm.is_submitting.get()) />
                {field_error(vm.header_errors, "client")}
            </div>

            <div style="margin-bottom: 12px;">
                <label style="display: block; margin-bottom: 4px; font-weight: 600;">"Product type"</label>
                <label style="margin-right: 16px;">
                    <input
                        type="radio"
                        name="product_type"
                        prop:checked=is_new_type
                        on:change=move |_| vm.choose_product_type(ProductType::New)
                    />
                    " New product"
                </label>
                <label>
                    <input
                        type="radio"
                        name="product_type"
                        prop:checked=move || !is_new_type()
                        on:change=move |_| vm.choose_product_type(ProductType::Existing)
                    />
                    " Existing product"
                </label>
            </div>

            <Show when=is_new_type>
                <SkuSection vm=vm />
            </Show>

            <button
                style=PRIMARY_BUTTON
                disabled=move || vm.is_submitting.get()
                on:click=move |_| vm.submit_header()
            >
                {move || {
                    if vm.is_submitting.get() {
                        "Saving..."
                    } else if vm.pipeline.get().is_update() {
                        "Update & continue"
                    } else {
                        "Save & continue"
                    }
                }}
            </button>
        </div>
    }
}

#[component]
fn SkuSection(vm: RfqPipelineViewModel) -> impl IntoView {
    view! {
        <div style="border: 1px solid #dee2e6; border-radius: 6px; padding: 12px; margin-bottom: 12px; background: #fdfdfd;">
            <h4 style="margin: 0 0 8px 0;">"SKUs"</h4>
            {field_error(vm.header_errors, "skus")}

            {move || {
                let skus = vm.pipeline.get().lines.skus().to_vec();
                if skus.is_empty() {
                    view! {
                        <p style="color: #6c757d; margin: 4px 0 10px 0;">"No SKUs added yet."</p>
                    }
                        .into_any()
                } else {
                    view! {
                        <table style="width: 100%; border-collapse: collapse; margin-bottom: 10px;">
                            <thead>
                                <tr style="background: #f8f9fa;">
                                    <th style="padding: 6px 10px; text-align: left;">"Name"</th>
                                    <th style="padding: 6px 10px; text-align: left;">"Qty"</th>
                                    <th style="padding: 6px 10px; text-align: left;">"Drawing no"</th>
                                    <th style="padding: 6px 10px; text-align: left;">"Size"</th>
                                    <th style="padding: 6px 10px;"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {skus
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, sku)| {
                                        view! {
                                            <tr style="border-top: 1px solid #dee2e6;">
                                                <td style="padding: 6px 10px;">{sku.name}</td>
                                                <td style="padding: 6px 10px;">{sku.quantity}</td>
                                                <td style="padding: 6px 10px;">{sku.drawing_no}</td>
                                                <td style="padding: 6px 10px;">{sku.size}</td>
                                                <td style="padding: 6px 10px; text-align: right;">
                                                    <button
                                                        style="padding: 2px 8px; color: #842029; cursor: pointer;"
                                                        on:click=move |_| vm.remove_sku(i)
                                                    >
                                                        "Remove"
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

            <div style="display: grid; grid-template-columns: repeat(5, 1fr); gap: 8px; margin-bottom: 8px;">
                <div>
                    <input
                        type="text"
                        placeholder="SKU name"
                        style=INPUT_STYLE
                        prop:value=move || vm.sku_draft.get().name
                        on:input=move |ev| vm.sku_draft.update(|d| d.name = event_target_value(&ev))
                    />
                    {field_error(vm.sku_errors, "name")}
                </div>
                <div>
                    <input
                        type="text"
                        placeholder="Quantity"
                        style=INPUT_STYLE
                        prop:value=move || vm.sku_draft.get().quantity
                        on:input=move |ev| vm.sku_draft.update(|d| d.quantity = event_target_value(&ev))
                    />
                    {field_error(vm.sku_errors, "quantity")}
                </div>
                <div>
                    <input
                        type="text"
                        placeholder="Description"
                        style=INPUT_STYLE
                        prop:value=move || vm.sku_draft.get().description
                        on:input=move |ev| {
                            vm.sku_draft.update(|d| d.description = event_target_value(&ev))
                        }
                    />
                    {field_error(vm.sku_errors, "description")}
                </div>
                <div>
                    <input
                        type="text"
                        placeholder="Drawing no"
                        style=INPUT_STYLE
                        prop:value=move || vm.sku_draft.get().drawing_no
                        on:input=move |ev| {
                            vm.sku_draft.update(|d| d.drawing_no = event_target_value(&ev))
                        }
                    />
                    {field_error(vm.sku_errors, "drawing_no")}
                </div>
                <div>
                    <input
                        type="text"
                        placeholder="Size"
                        style=INPUT_STYLE
                        prop:value=move || vm.sku_draft.get().size
                        on:input=move |ev| vm.sku_draft.update(|d| d.size = event_target_value(&ev))
                    />
                    {field_error(vm.sku_errors, "size")}
                </div>
            </div>
            <button style=SECONDARY_BUTTON on:click=move |_| vm.add_sku()>
                "+ Add SKU"
            </button>
        </div>
    }
}

#[component]
fn ProductTypeStage(vm: RfqPipelineViewModel) -> impl IntoView {
    view! {
        <div>
            <p>"The RFQ header is saved. Continue with the selected product type:"</p>
            <p style="font-weight: 600;">
                {move || match vm.pipeline.get().product_type() {
                    ProductType::New => "New product — enter the bill of materials next.",
                    ProductType::Existing => "Existing product — go straight to documents.",
                }}
            </p>
            <button style=PRIMARY_BUTTON on:click=move |_| vm.confirm_product_type()>
                "Continue"
            </button>
        </div>
    }
}

#[component]
fn ProductsStage(vm: RfqPipelineViewModel) -> impl IntoView {
    let (materials, set_materials) = signal(Vec::<RawMaterial>::new());

    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            match raw_materials::fetch_all().await {
                Ok(list) => set_materials.set(list),
                Err(e) => {
                    log::error!("Failed to load raw materials: {e}");
                    vm.banner.set(Some(format!("Failed to load raw materials: {e}")));
                }
            }
        });
    });

    let material_name = move |id: i64| {
        materials
            .get()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.raw_material_name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    };

    view! {
        <div>
            {move || {
                let pipeline = vm.pipeline.get();
                pipeline
                    .lines
                    .skus()
                    .to_vec()
                    .into_iter()
                    .enumerate()
                    .map(|(sku_index, sku)| {
                        view! {
                            <div style="border: 1px solid #dee2e6; border-radius: 6px; padding: 12px; margin-bottom: 12px; background: white;">
                                <h4 style="margin: 0 0 8px 0;">{format!("{} — products", sku.name)}</h4>
                                {if sku.products.is_empty() {
                                    view! {
                                        <p style="color: #6c757d; margin: 4px 0;">"No products yet."</p>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        <table style="width: 100%; border-collapse: collapse;">
                                            <thead>
                                                <tr style="background: #f8f9fa;">
                                                    <th style="padding: 6px 10px; text-align: left;">"Product"</th>
                                                    <th style="padding: 6px 10px; text-align: left;">"Qty/assembly"</th>
                                                    <th style="padding: 6px 10px; text-align: left;">"Material"</th>
                                                    <th style="padding: 6px 10px; text-align: left;">"Yield %"</th>
                                                    <th style="padding: 6px 10px; text-align: left;">"Cost/kg"</th>
                                                    <th style="padding: 6px 10px;"></th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {sku
                                                    .products
                                                    .iter()
                                                    .enumerate()
                                                    .map(|(row, product)| {
                                                        let name = product.product_name.clone();
                                                        view! {
                                                            <tr style="border-top: 1px solid #dee2e6;">
                                                                <td style="padding: 6px 10px;">{name}</td>
                                                                <td style="padding: 6px 10px;">{product.quantity_per_assembly}</td>
                                                                <td style="padding: 6px 10px;">{material_name(product.raw_material_id)}</td>
                                                                <td style="padding: 6px 10px;">{product.yield_percentage}</td>
                                                                <td style="padding: 6px 10px;">{product.bom_cost_per_kg}</td>
                                                                <td style="padding: 6px 10px; text-align: right; white-space: nowrap;">
                                                                    <button
                                                                        style="margin-right: 8px; padding: 2px 8px; cursor: pointer;"
                                                                        on:click=move |_| vm.start_product_edit(sku_index, row)
                                                                    >
                                                                        "Edit"
                                                                    </button>
                                                                    <button
                                                                        style="padding: 2px 8px; color: #842029; cursor: pointer;"
                                                                        on:click=move |_| vm.remove_product(sku_index, row)
                                                                    >
                                                                        "Remove"
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
                                }}
                            </div>
                        }
                    })
                    .collect_view()
            }}

            <div style="border: 1px solid #dee2e6; border-radius: 6px; padding: 12px; margin-bottom: 12px; background: #fdfdfd;">
                <h4 style="margin: 0 0 8px 0;">
                    {move || {
                        if vm.editing_product.get().is_some() {
                            "Edit product"
                        } else {
                            "Add product"
                        }
                    }}
                </h4>

                <div style="margin-bottom: 8px;">
                    <label style="display: block; margin-bottom: 4px;">"SKU"</label>
                    <select
                        style=INPUT_STYLE
                        prop:disabled=move || vm.editing_product.get().is_some()
                        on:change=move |ev| {
                            if let Ok(i) = event_target_value(&ev).parse::<usize>() {
                                vm.active_sku.set(i);
                            }
                        }
                    >
                        {move || {
                            vm.pipeline
                                .get()
                                .lines
                                .skus()
                                .iter()
                                .enumerate()
                                .map(|(i, sku)| {
                                    let name = sku.name.clone();
                                    view! {
                                        <option
                                            value=i.to_string()
                                            prop:selected=move || vm.active_sku.get() == i
                                        >
                                            {name}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>

                <div style="display: grid; grid-template-columns: repeat(5, 1fr); gap: 8px; margin-bottom: 8px;">
                    <div>
                        <input
                            type="text"
                            placeholder="Product name"
                            style=INPUT_STYLE
                            prop:value=move || vm.product_draft.get().product_name
                            on:input=move |ev| {
                                vm.product_draft.update(|d| d.product_name = event_target_value(&ev))
                            }
                        />
                        {field_error(vm.product_errors, "product_name")}
                    </div>
                    <div>
                        <input
                            type="text"
                            placeholder="Qty per assembly"
                            style=INPUT_STYLE
                            prop:value=move || vm.product_draft.get().quantity_per_assembly
                            on:input=move |ev| {
                                vm.product_draft
                                    .update(|d| d.quantity_per_assembly = event_target_value(&ev))
                            }
                        />
                        {field_error(vm.product_errors, "quantity_per_assembly")}
                    </div>
                    <div>
                        <select
                            style=INPUT_STYLE
                            on:change=move |ev| {
                                let id = event_target_value(&ev)
                                    .parse::<i64>()
                                    .ok()
                                    .filter(|id| *id > 0);
                                vm.product_draft.update(|d| d.raw_material_id = id);
                            }
                        >
                            <option
                                value="0"
                                prop:selected=move || vm.product_draft.get().raw_material_id.is_none()
                            >
                                "-- Raw material --"
                            </option>
                            {move || {
                                materials
                                    .get()
                                    .into_iter()
                                    .map(|m| {
                                        let id = m.id;
                                        view! {
                                            <option
                                                value=id.to_string()
                                                prop:selected=move || {
                                                    vm.product_draft.get().raw_material_id == Some(id)
                                                }
                                            >
                                                {m.raw_material_name}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                        {field_error(vm.product_errors, "raw_material_type")}
                    </div>
                    <div>
                        <input
                            type="text"
                            placeholder="Yield %"
                            style=INPUT_STYLE
                            prop:value=move || vm.product_draft.get().yield_percentage
                            on:input=move |ev| {
                                vm.product_draft
                                    .update(|d| d.yield_percentage = event_target_value(&ev))
                            }
                        />
                        {field_error(vm.product_errors, "yield_percentage")}
                    </div>
                    <div>
                        <input
                            type="text"
                            placeholder="BOM cost per kg"
                            style=INPUT_STYLE
                            prop:value=move || vm.product_draft.get().bom_cost_per_kg
                            on:input=move |ev| {
                                vm.product_draft
                                    .update(|d| d.bom_cost_per_kg = event_target_value(&ev))
                            }
                        />
                        {field_error(vm.product_errors, "bom_cost_per_kg")}
                    </div>
                </div>

                <button style=SECONDARY_BUTTON on:click=move |_| vm.save_product()>
                    {move || {
                        if vm.editing_product.get().is_some() {
                            "Update product"
                        } else {
                            "+ Add product"
                        }
                    }}
                </button>
                <Show when=move || vm.editing_product.get().is_some()>
                    <button
                        style="margin-left: 8px; padding: 8px 18px; background: none; border: none; color: #6c757d; cursor: pointer;"
                        on:click=move |_| vm.cancel_product_edit()
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>

            <button style=PRIMARY_BUTTON on:click=move |_| vm.proceed_to_documents()>
                "Continue to documents"
            </button>
        </div>
    }
}

#[component]
fn DocumentsStage(vm: RfqPipelineViewModel, on_done: Callback<()>) -> impl IntoView {
    let rfq_id = Signal::derive(move || vm.pipeline.get().rfq_id().unwrap_or(0));

    view! {
        <div>
            <DocumentsPanel
                rfq_id=rfq_id
                on_count_changed=Callback::new(move |count| vm.document_count_changed(count))
            />

            <div style="display: flex; gap: 8px; margin-top: 12px;">
                <Show when=move || vm.pipeline.get().product_type() == ProductType::New>
                    <button style=SECONDARY_BUTTON on:click=move |_| vm.back_to_products()>
                        "Back to products"
                    </button>
                </Show>
                <button
                    style=PRIMARY_BUTTON
                    disabled=move || vm.is_finalizing.get()
                    on:click=move |_| vm.finalize(on_done)
                >
                    {move || if vm.is_finalizing.get() { "Saving..." } else { "Save RFQ" }}
                </button>
            </div>
        </div>
    }
}

#[component]
fn RfqWizard(vm: RfqPipelineViewModel, selected_client: RwSignal<Option<i64>>) -> impl IntoView {
    let navigate = use_navigate();
    let on_done = Callback::new(move |_| navigate("/", Default::default()));

    // The picker owns the selection signal; the pipeline only sees the id.
    Effect::new(move |_| {
        let id = selected_client.get();
        vm.pipeline.update(|p| p.header.client_id = id);
    });

    view! {
        <div style="padding: 20px; max-width: 900px; margin: 0 auto;">
            <h2>
                {move || {
                    if vm.pipeline.get().is_update() {
                        "Edit RFQ"
                    } else {
                        CreateRfq::display_name()
                    }
                }}
            </h2>
            <StageIndicator vm=vm />
            <ErrorBanner message=Signal::derive(move || vm.banner.get()) />

            {move || {
                vm.success_banner
                    .get()
                    .map(|m| {
                        view! {
                            <div style="padding: 10px; margin-bottom: 12px; background: #d1e7dd; color: #0f5132; border-radius: 4px;">
                                {m}
                            </div>
                        }
                    })
            }}

            <Show
                when=move || !vm.is_loading.get()
                fallback=|| view! { <p>"Loading..."</p> }
            >
                {move || match vm.pipeline.get().stage() {
                    PipelineStage::EditingHeader => {
                        view! { <HeaderStage vm=vm selected_client=selected_client /> }.into_any()
                    }
                    PipelineStage::ChoosingProductType => {
                        view! { <ProductTypeStage vm=vm /> }.into_any()
                    }
                    PipelineStage::EditingProducts => {
                        view! { <ProductsStage vm=vm /> }.into_any()
                    }
                    PipelineStage::UploadingDocuments => {
                        view! { <DocumentsStage vm=vm on_done=on_done /> }.into_any()
                    }
                    PipelineStage::Finalized => {
                        view! {
                            <p style="color: #0f5132;">"RFQ saved. Returning to the list..."</p>
                        }
                            .into_any()
                    }
                    PipelineStage::Failed => {
                        view! {
                            <div>
                                <ErrorBanner message=Signal::derive(move || {
                                    vm.pipeline.get().last_error().map(str::to_string)
                                }) />
                                <button
                                    style=PRIMARY_BUTTON
                                    on:click=move |_| vm.retry_finalization()
                                >
                                    "Try again"
                                </button>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Show>
        </div>
    }
}

#[component]
pub fn CreateRfqPage() -> impl IntoView {
    let session = use_context::<SessionContext>().unwrap_or_default();
    let vm = RfqPipelineViewModel::new(session.pipeline_context());
    let selected_client = RwSignal::new(Option::<i64>::None);

    view! { <RfqWizard vm=vm selected_client=selected_client /> }
}

#[component]
pub fn EditRfqPage() -> impl IntoView {
    let session = use_context::<SessionContext>().unwrap_or_default();
    let params = use_params_map();
    let query = use_query_map();

    let vm = RfqPipelineViewModel::new(session.pipeline_context());
    let selected_client = RwSignal::new(Option::<i64>::None);

    let ctx = session.pipeline_context();
    Effect::new(move |_| {
        let rfq_id = params
            .get()
            .get("id")
            .and_then(|id| id.parse::<i64>().ok())
            .unwrap_or(0);
        let client_id = query
            .get()
            .get("client")
            .and_then(|id| id.parse::<i64>().ok())
            .unwrap_or(0);
        if rfq_id > 0 {
            vm.load_for_edit(ctx.clone(), rfq_id, client_id);
        } else {
            vm.banner.set(Some("Invalid RFQ id".to_string()));
        }
    });

    // Seed the picker once the RFQ has loaded.
    Effect::new(move |_| {
        if !vm.is_loading.get() {
            if let Some(id) = vm.pipeline.with_untracked(|p| p.header.client_id) {
                if selected_client.get_untracked().is_none() {
                    selected_client.set(Some(id));
                }
            }
        }
    });

    view! { <RfqWizard vm=vm selected_client=selected_client /> }
}
