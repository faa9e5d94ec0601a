//! 解析結果表示コンポーネント

use leptos::prelude::*;
use resume_score_common::{AnalysisResult, ResultView, ScoreThresholds, ScoreTier, Tag, TagTone};

#[component]
pub fn Results(result: AnalysisResult, thresholds: ScoreThresholds) -> impl IntoView {
    let ResultView {
        score,
        tier,
        summary,
        keywords,
        missing_technical,
        missing_other,
        improvements,
    } = ResultView::from_result(&result, &thresholds);

    view! {
        <div class="card results">
            <div class="score-block">
                <p class="text-muted">"Overall Match Score"</p>
                <div class=format!("score {}", score_class(tier))>
                    {score.to_string()}
                    <span class="percent">"%"</span>
                </div>
            </div>

            <section class="result-section">
                <h3>"Summary"</h3>
                <p class="summary">{summary}</p>
            </section>

            {keywords.map(|tags| view! { <TagSection title="Keyword Analysis" tags=tags /> })}
            {missing_technical.map(|tags| view! { <TagSection title="Missing Technical Skills" tags=tags /> })}
            {missing_other.map(|tags| view! { <TagSection title="Missing Other Skills" tags=tags /> })}

            {improvements.map(|items| view! {
                <section class="result-section">
                    <h3>"Suggested Improvements"</h3>
                    <ul class="improvements">
                        {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                    </ul>
                </section>
            })}
        </div>
    }
}

#[component]
fn TagSection(title: &'static str, tags: Vec<Tag>) -> impl IntoView {
    view! {
        <section class="result-section">
            <h3>{title}</h3>
            <div class="tags">
                {tags
                    .into_iter()
                    .map(|tag| view! { <span class=tag_class(tag.tone)>{tag.label}</span> })
                    .collect_view()}
            </div>
        </section>
    }
}

pub fn score_class(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Positive => "score-positive",
        ScoreTier::Warning => "score-warning",
        ScoreTier::Negative => "score-negative",
    }
}

pub fn tag_class(tone: TagTone) -> &'static str {
    match tone {
        TagTone::Matched => "tag tag-matched",
        TagTone::Missing => "tag tag-missing",
        TagTone::Technical => "tag tag-technical",
        TagTone::Other => "tag tag-other",
    }
}
