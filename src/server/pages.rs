//! Minimal HTML shell
//!
//! Just enough markup to make the site navigable from a browser. Editing
//! happens through the JSON API.

use std::fmt::Write as _;

use folio::core::models::{ContentKind, EducationEntry, Project, Skill};
use folio::core::services::{AdminView, ContentStats, Route};
use folio::output::Summary;
use folio::site::{Section, Site};

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

/// Neutral page shown while the session is being checked
pub fn checking() -> String {
    layout(
        "Loading",
        "<meta http-equiv=\"refresh\" content=\"1\">\n<main><p>Checking session…</p></main>",
    )
}

/// Unknown path
pub fn not_found(path: &str) -> String {
    layout(
        "Not found",
        &format!("<main><h1>Not found</h1><p>{}</p><p><a href=\"/\">Home</a></p></main>", escape(path)),
    )
}

/// Render a route the guard allowed
pub fn render(site: &Site, route: &Route) -> String {
    match route {
        Route::Public { .. } => public(site),
        Route::Login => login(),
        Route::Admin { page } => admin(site, *page),
    }
}

fn items<K: ContentKind + Summary>(section: &Section<K>, with_ids: bool) -> String {
    let mut html = String::new();
    for partition in section.snapshot().partition() {
        if K::CATEGORIES.len() > 1 {
            let _ = write!(html, "<h3>{}</h3>", escape(partition.category));
        }
        html.push_str("<ul>");
        for entry in partition.entries {
            html.push_str("<li>");
            if with_ids {
                let _ = write!(html, "<code>{}</code> ", escape(entry.id.as_str()));
            }
            html.push_str(&escape(entry.item.title()));
            if let Some(detail) = entry.item.detail() {
                let _ = write!(html, " <small>{}</small>", escape(&detail));
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }
    html
}

fn public(site: &Site) -> String {
    let body = format!(
        "<nav><a href=\"#projects\">Projects</a> <a href=\"#skills\">Skills</a> \
         <a href=\"#education\">Education</a> <a href=\"#contact\">Contact</a></nav>\n\
         <main>\n\
         <section id=\"projects\"><h2>Projects</h2>{}</section>\n\
         <section id=\"skills\"><h2>Skills</h2>{}</section>\n\
         <section id=\"education\"><h2>Education</h2>{}</section>\n\
         <section id=\"contact\"><h2>Get In Touch</h2>\
         <p>POST <code>/api/contact</code> with <code>name</code>, <code>email</code> and \
         <code>message</code>.</p></section>\n\
         </main>",
        items::<Project>(&site.projects, false),
        items::<Skill>(&site.skills, false),
        items::<EducationEntry>(&site.education, false),
    );
    layout("Portfolio", &body)
}

fn login() -> String {
    layout(
        "Admin login",
        "<main><h1>Admin login</h1>\
         <p>POST <code>/api/login</code> with <code>email</code> and <code>password</code>, \
         then open <a href=\"/admin/dashboard\">the dashboard</a>.</p></main>",
    )
}

fn admin_nav() -> String {
    let mut nav = String::from("<nav>");
    for view in [AdminView::Dashboard, AdminView::Projects, AdminView::Skills, AdminView::Education] {
        let _ = write!(nav, "<a href=\"/admin/{0}\">{0}</a> ", view.slug());
    }
    nav.push_str("</nav>");
    nav
}

fn stats_table(stats: &ContentStats) -> String {
    let mut html = String::from("<table>");
    for (label, count) in stats.rows() {
        let _ = write!(html, "<tr><th>{label}</th><td>{count}</td></tr>");
    }
    html.push_str("</table>");
    html
}

fn admin(site: &Site, page: AdminView) -> String {
    let content = match page {
        AdminView::Dashboard => match site.stats() {
            Ok(stats) => stats_table(&stats),
            Err(e) => format!("<p>Could not load counts: {}</p>", escape(&e.to_string())),
        },
        AdminView::Projects => items::<Project>(&site.projects, true),
        AdminView::Skills => items::<Skill>(&site.skills, true),
        AdminView::Education => items::<EducationEntry>(&site.education, true),
    };
    let body = format!(
        "{}\n<main><h1>{}</h1>{content}</main>",
        admin_nav(),
        escape(page.slug())
    );
    layout("Admin", &body)
}
