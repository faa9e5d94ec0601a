//! 求人情報入力コンポーネント

use leptos::prelude::*;

#[component]
pub fn JobDetails(
    job_title: ReadSignal<String>,
    set_job_title: WriteSignal<String>,
    job_description: ReadSignal<String>,
    set_job_description: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div class="job-details">
            <div class="form-group">
                <label for="job-title">"Job Title"</label>
                <input
                    type="text"
                    id="job-title"
                    placeholder="e.g. Senior Backend Engineer"
                    prop:value=move || job_title.get()
                    on:input=move |ev| set_job_title.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="job-description">"Job Description (Optional)"</label>
                <textarea
                    id="job-description"
                    rows="8"
                    placeholder="Paste the job description here for a more accurate analysis."
                    prop:value=move || job_description.get()
                    on:input=move |ev| set_job_description.set(event_target_value(&ev))
                />
            </div>
        </div>
    }
}
