//! Review Detail
//!
//! Markup for the modal body: pull request header, review statistics, the
//! comment list and an optional error section. Every server-supplied string
//! is escaped before insertion.

use chrono::{DateTime, FixedOffset};

use crate::format::{escape_html, format_duration, format_relative, severity_badges, Locale};
use crate::model::{Comment, ReviewDetail};

/// Placeholder while a detail fetch is in flight
pub fn detail_loading_html(locale: Locale) -> String {
    format!(r#"<div class="loading">{}</div>"#, locale.messages().loading)
}

/// Replacement body after a failed detail fetch
pub fn detail_error_html(locale: Locale) -> String {
    format!(
        r#"<div class="error">{}</div>"#,
        locale.messages().detail_load_failed
    )
}

/// Render the modal body for one review
pub fn render_review_detail(
    detail: &ReviewDetail,
    now: DateTime<FixedOffset>,
    locale: Locale,
) -> String {
    let m = locale.messages();
    let pr = &detail.pull_request;

    let description = non_empty(pr.description.as_deref())
        .map(|text| format!(r#"<p class="pr-description">{}</p>"#, escape_html(text)))
        .unwrap_or_default();

    let commit = non_empty(detail.commit_sha.as_deref())
        .map(|sha| format!(r#" · <code>{}</code>"#, escape_html(short_sha(sha))))
        .unwrap_or_default();

    let stats = [
        format!("<li>{}: {}</li>", m.total_comments_label, detail.total_comments),
        format!(
            "<li>{}: {}</li>",
            m.processing_time_label,
            format_duration(detail.processing_time_ms, locale)
        ),
        format!(
            "<li>{}: {}</li>",
            m.ai_model_label,
            escape_html(non_empty(detail.ai_model.as_deref()).unwrap_or("N/A"))
        ),
        format!(
            "<li>{}: {}</li>",
            m.tokens_used_label,
            detail.tokens_used.unwrap_or(0)
        ),
    ];

    let comments = if detail.comments.is_empty() {
        format!(r#"<p class="loading">{}</p>"#, m.no_comments)
    } else {
        detail.comments.iter().map(render_comment).collect::<Vec<_>>().join("\n")
    };

    let error = non_empty(detail.error_message.as_deref())
        .map(|message| {
            format!(
                r#"<div class="review-detail-section error-section"><h3>{}</h3><p>{}</p></div>"#,
                m.error_heading,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<h2>{detail_title}</h2>
<div class="review-detail-section">
    <h3>{repo} · PR #{number}</h3>
    <p class="pr-title">{title}</p>
    <p class="pr-meta">{author_label}: {author} · {created}{commit} · <span class="badge">{status}</span></p>
    {description}
</div>
<div class="review-detail-section">
    <h3>{stats_heading}</h3>
    <ul>{stats}</ul>
    <div>{badges}</div>
</div>
<div class="review-detail-section">
    <h3>{comments_heading}</h3>
    {comments}
</div>
{error}"#,
        detail_title = m.detail_title,
        repo = escape_html(&format!(
            "{}/{}",
            detail.repository.owner, detail.repository.name
        )),
        number = pr.number,
        title = escape_html(&pr.title),
        author_label = m.author_label,
        author = escape_html(&pr.author),
        created = escape_html(&format_relative(detail.created_at.as_deref(), now, locale)),
        commit = commit,
        status = escape_html(&detail.review_status),
        description = description,
        stats_heading = m.review_stats_heading,
        stats = stats.join(""),
        badges = severity_badges(&detail.severity_counts),
        comments_heading = locale.comments_heading(detail.comments.len()),
        comments = comments,
        error = error,
    )
}

fn render_comment(comment: &Comment) -> String {
    let severity = comment.severity.as_str();
    let location = match comment.line_number {
        Some(line) => format!("{}:{}", comment.file_path, line),
        None => comment.file_path.clone(),
    };

    let suggestion = non_empty(comment.suggestion.as_deref())
        .map(|text| format!(r#"<div class="comment-suggestion">💡 {}</div>"#, escape_html(text)))
        .unwrap_or_default();

    let code = non_empty(comment.code_example.as_deref())
        .map(|code| format!(r#"<pre class="code-example"><code>{}</code></pre>"#, escape_html(code)))
        .unwrap_or_default();

    format!(
        r#"<div class="comment-item severity-{severity}">
    <div class="comment-header">
        <span class="badge badge-{severity}">{label}</span>
        <span class="badge">{category}</span>
        <span class="comment-file">{location}</span>
    </div>
    <div class="comment-message">{message}</div>
    {suggestion}
    {code}
</div>"#,
        severity = severity,
        label = comment.severity.label(),
        category = escape_html(&comment.category),
        location = escape_html(&location),
        message = escape_html(&comment.message),
        suggestion = suggestion,
        code = code,
    )
}

/// Empty strings are treated like missing values
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
