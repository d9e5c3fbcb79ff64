use crate::routes::routes::AppRoutes;
use crate::shared::session::SessionContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Session (operator identity + notification wiring) is read from
    // browser storage exactly once and provided app-wide via context.
    provide_context(SessionContext::load());

    view! {
        <AppRoutes />
    }
}
