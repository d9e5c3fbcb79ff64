use crate::domain::a003_rfq::ui::list::RfqListPage;
use crate::usecases::u101_create_rfq::view::{CreateRfqPage, EditRfqPage};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

#[component]
fn TopNav() -> impl IntoView {
    view! {
        <nav style="display: flex; gap: 16px; padding: 12px 20px; border-bottom: 1px solid #ddd; background: #f8f9fa;">
            <strong>"RFQ Console"</strong>
            <A href="/">"RFQs"</A>
            <A href="/rfq/create">"New RFQ"</A>
        </nav>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <TopNav />
            <main>
                <Routes fallback=|| view! { <p style="padding: 20px;">"Page not found"</p> }>
                    <Route path=path!("/") view=RfqListPage />
                    <Route path=path!("/rfq/create") view=CreateRfqPage />
                    <Route path=path!("/rfq/:id/edit") view=EditRfqPage />
                </Routes>
            </main>
        </Router>
    }
}
