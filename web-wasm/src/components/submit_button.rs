//! 解析ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn SubmitButton<F>(
    /// ファイルと職種名が揃っているか
    #[prop(into)] ready: Signal<bool>,
    #[prop(into)] is_loading: Signal<bool>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let disabled = move || is_loading.get() || !ready.get();

    view! {
        <div class="submit-row">
            <button
                class="btn btn-primary"
                disabled=disabled
                on:click=move |_| on_submit(())
            >
                {move || if is_loading.get() { "Analyzing..." } else { "Analyze Resume" }}
            </button>
        </div>
    }
}
