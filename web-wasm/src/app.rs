//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use resume_score_common::{DocumentKind, JobInput, Lifecycle, RequestState, Submission, ValidationError};
use crate::api::analyze_resume;
use crate::components::{
    file_upload::FileUpload,
    header::Header,
    job_details::JobDetails,
    results::Results,
    spinner::Spinner,
    submit_button::SubmitButton,
};
use crate::settings::AppSettings;

/// 選択中の履歴書
#[derive(Clone, Debug)]
pub struct SelectedDocument {
    pub name: String,
    pub kind: DocumentKind,
    pub file: web_sys::File,
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let settings = AppSettings::from_build_env();
    let thresholds = settings.thresholds;

    // web_sys::File は Send ではないのでローカルシグナルに置く
    let (document, set_document) = signal_local(None::<SelectedDocument>);
    let (job_title, set_job_title) = signal(String::new());
    let (job_description, set_job_description) = signal(String::new());
    let lifecycle = RwSignal::new(Lifecycle::new());
    // ファイル選択の拒否は送信状態とは別に表示する
    let (file_error, set_file_error) = signal(None::<String>);

    let file_name = Signal::derive(move || document.with(|d| d.as_ref().map(|d| d.name.clone())));
    let ready = Signal::derive(move || {
        document.with(Option::is_some) && job_title.with(|t| !t.trim().is_empty())
    });
    let is_loading = Signal::derive(move || lifecycle.with(|l| l.state().is_loading()));

    let on_file_selected = move |selected: SelectedDocument| {
        gloo::console::log!(format!("selected {} ({})", selected.name, selected.kind.mime_type()));
        set_file_error.set(None);
        set_document.set(Some(selected));
    };

    let on_file_rejected = move |e: ValidationError| {
        set_file_error.set(Some(e.to_string()));
    };

    let on_submit = move |_| {
        if !lifecycle.with_untracked(|l| l.state().can_submit()) {
            return;
        }

        let job = JobInput::new(job_title.get_untracked(), job_description.get_untracked());
        let submission = match Submission::validate(document.get_untracked(), &job) {
            Ok(submission) => submission,
            Err(e) => {
                lifecycle.update(|l| l.reject(e.to_string()));
                return;
            }
        };

        let Some(ticket) = lifecycle.try_update(|l| l.begin()) else {
            return;
        };

        let endpoint = settings.endpoint.clone();
        let schema = settings.schema;
        spawn_local(async move {
            let outcome = analyze_resume(&endpoint, &submission, schema).await;
            lifecycle.update(|l| {
                if !l.is_current(ticket) {
                    gloo::console::warn!("an earlier analysis finished after a newer one was started");
                }
                l.settle(ticket, outcome);
            });
        });
    };

    let error = move || lifecycle.with(|l| l.state().error().map(str::to_string));

    view! {
        <div class="container">
            <Header />

            <main class="layout">
                <section class="card form-panel">
                    <FileUpload
                        file_name=file_name
                        on_select=on_file_selected
                        on_reject=on_file_rejected
                    />

                    <JobDetails
                        job_title=job_title
                        set_job_title=set_job_title
                        job_description=job_description
                        set_job_description=set_job_description
                    />

                    {move || file_error.get().map(|message| view! {
                        <div class="error-banner" role="alert">{message}</div>
                    })}

                    {move || error().map(|message| view! {
                        <div class="error-banner" role="alert">{message}</div>
                    })}

                    <SubmitButton ready=ready is_loading=is_loading on_submit=on_submit />
                </section>

                <aside class="result-panel">
                    {move || match lifecycle.with(|l| l.state().clone()) {
                        RequestState::Loading => view! { <Spinner /> }.into_any(),
                        RequestState::Succeeded(result) => {
                            view! { <Results result=result thresholds=thresholds /> }.into_any()
                        }
                        RequestState::Idle | RequestState::Failed(_) => view! {
                            <div class="card placeholder">
                                <div class="placeholder-icon">"📊"</div>
                                <p class="text-muted">"Your results will appear here"</p>
                            </div>
                        }
                        .into_any(),
                    }}
                </aside>
            </main>
        </div>
    }
}
