//! 解析中インジケータ

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(default = "Analyzing your resume...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="spinner-container" role="status">
            <div class="spinner" aria-hidden="true" />
            <p class="spinner-text">{label}</p>
        </div>
    }
}
