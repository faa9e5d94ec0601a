//! 解析結果のターミナル表示

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use resume_score_common::{ResultView, ScoreTier, Tag, TagTone};
use std::fmt::Write;
use std::time::Duration;

/// 解析中スピナー
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn tier_style(tier: ScoreTier, color: bool) -> Style {
    let style = match tier {
        ScoreTier::Positive => Style::new().green(),
        ScoreTier::Warning => Style::new().yellow(),
        ScoreTier::Negative => Style::new().red(),
    };
    style.bold().force_styling(color)
}

fn tag_text(tag: &Tag, color: bool) -> String {
    let (marker, style) = match tag.tone {
        TagTone::Matched => ("✔ ", Style::new().green()),
        TagTone::Missing => ("✘ ", Style::new().red()),
        TagTone::Technical => ("", Style::new().yellow()),
        TagTone::Other => ("", Style::new().dim()),
    };
    style
        .force_styling(color)
        .apply_to(format!("{marker}{}", tag.label))
        .to_string()
}

fn heading(out: &mut String, title: &str, color: bool) {
    let style = Style::new().bold().underlined().force_styling(color);
    let _ = writeln!(out, "\n{}", style.apply_to(title));
}

fn tag_section(out: &mut String, title: &str, tags: &Option<Vec<Tag>>, color: bool) {
    let Some(tags) = tags else {
        return;
    };
    heading(out, title, color);
    let line = tags
        .iter()
        .map(|t| tag_text(t, color))
        .collect::<Vec<_>>()
        .join("   ");
    let _ = writeln!(out, "  {line}");
}

/// 表示用文字列を組み立てる（データのないセクションは出力しない）
pub fn render_report(view: &ResultView, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Overall Match Score");
    let _ = writeln!(
        out,
        "  {}",
        tier_style(view.tier, color).apply_to(format!("{}%", view.score))
    );

    heading(&mut out, "Summary", color);
    if view.summary.is_empty() {
        let _ = writeln!(out, "  -");
    } else {
        for line in view.summary.lines() {
            let _ = writeln!(out, "  {line}");
        }
    }

    if let Some(tags) = &view.keywords {
        let title = format!(
            "Keyword Analysis ({}/{} matched)",
            view.matched_keyword_count(),
            tags.len()
        );
        tag_section(&mut out, &title, &view.keywords, color);
    }
    tag_section(&mut out, "Missing Technical Skills", &view.missing_technical, color);
    tag_section(&mut out, "Missing Other Skills", &view.missing_other, color);

    if let Some(items) = &view.improvements {
        heading(&mut out, "Suggested Improvements", color);
        for item in items {
            let _ = writeln!(out, "  • {item}");
        }
    }

    out
}
