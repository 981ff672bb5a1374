use crate::app_lib::{build_info, theme::Theme};
use leptos::prelude::*;

#[component]
pub fn ToolsPage() -> impl IntoView {
    let version = build_info::version();
    let commit = build_info::git_commit_hash();

    view! {
        <div class="space-y-6">
            <h1 class=Theme::HEADING>"Tools"</h1>
            <div class=format!("{} max-w-[38rem]", Theme::CARD)>
                <div class="text-sm font-semibold text-gray-500 uppercase tracking-wider mb-2">
                    "Build Version"
                </div>
                <pre class="text-center text-black dark:text-neutral-50">
                    {format!("{version} ({commit})")}
                </pre>
            </div>
        </div>
    }
}
