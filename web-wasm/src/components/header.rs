//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    // 入力と結果をすべて破棄してやり直す
    let on_new_analysis = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    };

    view! {
        <header class="header">
            <div>
                <h1>"Resume Score Engine"</h1>
                <p class="text-muted">"Check how well your resume matches a job before you apply."</p>
            </div>
            <button class="btn btn-secondary" on:click=on_new_analysis>
                "New Analysis"
            </button>
        </header>
    }
}
