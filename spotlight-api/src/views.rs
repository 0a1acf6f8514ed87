//! HTML rendering for the page and its fragments
//!
//! Fragments are swapped into the page by htmx, so each render function
//! returns a self-contained snippet. All dynamic text goes through
//! [`escape`].

use std::fmt::Write;

use spotlight_core::{AnswerResult, ResultItem};

use crate::pipeline::{AnswerPage, CombinedPage, SearchPage, SimilarPage};

/// Characters of page text shown before the preview is cut
const TEXT_PREVIEW_CHARS: usize = 500;

const INDEX_HTML: &str = include_str!("../templates/index.html");

/// The full search page
pub fn index_page() -> &'static str {
    INDEX_HTML
}

/// Escape text for use in element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Error fragment with a single message
pub fn error_fragment(message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\"><strong>Error:</strong> {}</div>",
        escape(message)
    )
}

/// Results fragment for `/search`
pub fn results_fragment(page: &SearchPage) -> String {
    let mut html = String::from("<section class=\"results\">");
    let _ = write!(
        html,
        "<h2>Results for &ldquo;{}&rdquo;</h2>",
        escape(&page.query)
    );

    let mut filters = Vec::new();
    if !page.include_domains.is_empty() {
        filters.push(format!("only {}", escape(&page.include_domains.join(", "))));
    }
    if !page.exclude_domains.is_empty() {
        filters.push(format!("excluding {}", escape(&page.exclude_domains.join(", "))));
    }
    if page.recency_days > 0 {
        filters.push(format!("last {} days", page.recency_days));
    }
    if !filters.is_empty() {
        let _ = write!(html, "<p class=\"filters\">Filters: {}</p>", filters.join("; "));
    }

    push_result_list(&mut html, &page.results, "No results found.");
    html.push_str("</section>");
    html
}

/// Similar fragment for `/similar`
pub fn similar_fragment(page: &SimilarPage) -> String {
    let mut html = String::from("<section class=\"similar\">");
    let _ = write!(html, "<h3>Similar to {}</h3>", link(&page.url, &page.url));
    push_result_list(&mut html, &page.similar, "No similar pages found.");
    html.push_str("</section>");
    html
}

/// Answer fragment for `/answer`
pub fn answer_fragment(page: &AnswerPage) -> String {
    let mut html = String::from("<section class=\"answer\">");
    let _ = write!(html, "<h2>{}</h2>", escape(&page.question));
    push_answer_body(&mut html, &page.answer);
    html.push_str("</section>");
    html
}

/// Combined fragment for `/query`
///
/// Sections whose branch failed or came back empty are left out.
pub fn combined_fragment(page: &CombinedPage) -> String {
    let mut html = String::from("<div class=\"combined\">");

    if let Some(answer) = page
        .answer
        .as_ref()
        .filter(|a| a.answer_text.is_some() || !a.citations.is_empty())
    {
        html.push_str("<section class=\"answer\"><h2>Answer</h2>");
        push_answer_body(&mut html, answer);
        html.push_str("</section>");
    }

    html.push_str("<section class=\"results\"><h2>Search Results</h2>");
    push_result_list(&mut html, &page.results, "No results found.");
    html.push_str("</section>");

    if !page.similar.is_empty() {
        html.push_str("<section class=\"similar\"><h2>Similar Pages</h2>");
        push_result_list(&mut html, &page.similar, "");
        html.push_str("</section>");
    }

    if !page.related.is_empty() {
        html.push_str("<section class=\"related\"><h2>Related Questions</h2><ul>");
        for related in &page.related {
            let _ = write!(
                html,
                "<li><form hx-post=\"/query\" hx-target=\"#output\" hx-indicator=\"#loading\">\
                 <input type=\"hidden\" name=\"q\" value=\"{0}\">\
                 <button type=\"submit\">{0}</button></form></li>",
                escape(related)
            );
        }
        html.push_str("</ul></section>");
    }

    html.push_str("</div>");
    html
}

fn push_answer_body(html: &mut String, answer: &AnswerResult) {
    match &answer.answer_text {
        Some(text) => {
            let _ = write!(html, "<p class=\"answer-text\">{}</p>", escape(text));
        }
        None => html.push_str("<p class=\"empty\">No answer available.</p>"),
    }

    if !answer.citations.is_empty() {
        html.push_str("<h3>Sources</h3><ol class=\"citations\">");
        for citation in &answer.citations {
            let label = if citation.title.is_empty() {
                &citation.url
            } else {
                &citation.title
            };
            let _ = write!(html, "<li>{}</li>", link(&citation.url, label));
        }
        html.push_str("</ol>");
    }
}

fn push_result_list(html: &mut String, items: &[ResultItem], empty_message: &str) {
    if items.is_empty() {
        if !empty_message.is_empty() {
            let _ = write!(html, "<p class=\"empty\">{}</p>", escape(empty_message));
        }
        return;
    }

    html.push_str("<ol class=\"result-list\">");
    for item in items {
        push_result_card(html, item);
    }
    html.push_str("</ol>");
}

fn push_result_card(html: &mut String, item: &ResultItem) {
    let title = if item.title.is_empty() {
        &item.url
    } else {
        &item.title
    };

    html.push_str("<li class=\"result\">");
    html.push_str("<h3>");
    if let Some(favicon) = web_url(&item.favicon) {
        let _ = write!(
            html,
            "<img class=\"favicon\" src=\"{}\" alt=\"\" width=\"16\" height=\"16\"> ",
            escape(favicon)
        );
    }
    html.push_str(&link(&item.url, title));
    html.push_str("</h3>");

    let mut meta = Vec::new();
    let domain = display_domain(item);
    if !domain.is_empty() {
        meta.push(escape(&domain));
    }
    if !item.author.is_empty() {
        meta.push(escape(&item.author));
    }
    if !item.published_date.is_empty() {
        let date = item.published_date.get(..10).unwrap_or(&item.published_date);
        meta.push(escape(date));
    }
    if let Some(score) = item.score {
        meta.push(format!("score {:.2}", score));
    }
    if !meta.is_empty() {
        let _ = write!(html, "<p class=\"meta\">{}</p>", meta.join(" &middot; "));
    }

    if !item.summary.trim().is_empty() {
        let _ = write!(html, "<p class=\"summary\">{}</p>", escape(&item.summary));
    }

    if let Some(highlights) = item.highlights.as_ref().filter(|h| !h.is_empty()) {
        html.push_str("<ul class=\"highlights\">");
        for highlight in highlights {
            let _ = write!(html, "<li>{}</li>", escape(highlight));
        }
        html.push_str("</ul>");
    }

    if let Some(text) = item.text.as_deref().filter(|t| !t.trim().is_empty()) {
        let _ = write!(
            html,
            "<details class=\"text\"><summary>Page text</summary><p>{}</p></details>",
            escape(&preview(text))
        );
    }

    if web_url(&item.url).is_some() {
        let _ = write!(
            html,
            "<form class=\"similar-form\" hx-post=\"/similar\" hx-target=\"next .similar-slot\" hx-swap=\"innerHTML\">\
             <input type=\"hidden\" name=\"url\" value=\"{}\">\
             <button type=\"submit\">Find similar</button></form><div class=\"similar-slot\"></div>",
            escape(&item.url)
        );
    }

    html.push_str("</li>");
}

/// The URL itself when it is an absolute http(s) URL
fn web_url(raw: &str) -> Option<&str> {
    url::Url::parse(raw)
        .ok()
        .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .map(|_| raw)
}

/// Anchor to `url`, or plain text when the URL is not safe to link
fn link(url: &str, label: &str) -> String {
    match web_url(url) {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape(url),
            escape(label)
        ),
        None => format!("<span class=\"unlinked\">{}</span>", escape(label)),
    }
}

/// Reported domain, or the URL's host when the API left it out
fn display_domain(item: &ResultItem) -> String {
    if !item.domain.is_empty() {
        return item.domain.clone();
    }
    url::Url::parse(&item.url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_default()
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(TEXT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}
