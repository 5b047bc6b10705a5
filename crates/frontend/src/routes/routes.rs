use crate::dashboards::{HarvestAnalyticsDashboard, OlapWizardPage, OverviewDashboard};
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::usecases::u100_chat_query::ChatbotPage;
use leptos::prelude::*;

/// Content of the active page; switching pages remounts it
#[component]
fn PageContent() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    move || match ctx.active.get() {
        Page::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        Page::Chatbot => view! { <ChatbotPage /> }.into_any(),
        Page::Olap => view! { <OlapWizardPage /> }.into_any(),
        Page::Analytics => view! { <HarvestAnalyticsDashboard /> }.into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <PageContent /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}
