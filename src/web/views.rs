//! Server-side HTML rendering.
//!
//! Pages are plain strings built with `write!`; every value coming from the
//! database or the request goes through [`escape`] first.

use std::fmt::Write;

use axum::http::StatusCode;

use crate::entities::{material_type, project, tag};
use crate::repositories::ProjectSort;
use crate::service::{PartWithSteps, ProjectDetail, ProjectListing};
use crate::utils::datetime::{format_created_at, format_ymd};

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:0 auto;padding:1rem}\
nav a{margin-right:1rem}.tag{background:#eee;border-radius:.5rem;padding:0 .4rem;margin-right:.3rem}\
.done{text-decoration:line-through;color:#888}form.inline{display:inline}\
.thumb{max-width:8rem;max-height:8rem}table{border-collapse:collapse}td,th{padding:.2rem .5rem}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - stitchlog</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Projects</a><a href=\"/project/new\">New project</a>\
         <a href=\"/materials\">Materials</a></nav>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn tag_list(tags: &[tag::Model]) -> String {
    tags.iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape(&t.name)))
        .collect()
}

fn thumbnail(project: &project::Model) -> String {
    match &project.thumbnail {
        Some(name) => format!(
            "<img class=\"thumb\" src=\"/uploads/{}\" alt=\"{}\">",
            escape(name),
            escape(&project.title)
        ),
        None => String::new(),
    }
}

/// A single-button POST form.
fn button_form(action: &str, label: &str, hidden: &[(&str, &str)]) -> String {
    let mut out = format!("<form class=\"inline\" method=\"post\" action=\"{}\">", escape(action));
    for (name, value) in hidden {
        let _ = write!(out, "<input type=\"hidden\" name=\"{name}\" value=\"{}\">", escape(value));
    }
    let _ = write!(out, "<button type=\"submit\">{}</button></form>", escape(label));
    out
}

/// Project listing with search box and sort selector.
pub fn index_page(listings: &[ProjectListing], search: &str, sort: ProjectSort) -> String {
    let mut body = String::from("<h1>Projects</h1>\n");
    let _ = write!(
        body,
        "<form method=\"get\" action=\"/\"><input type=\"search\" name=\"search\" value=\"{}\" \
         placeholder=\"Title or tag\"><select name=\"sort\">",
        escape(search)
    );
    for option in ProjectSort::ALL {
        let selected = if option == sort { " selected" } else { "" };
        let _ = write!(
            body,
            "<option value=\"{}\"{selected}>{}</option>",
            option.as_str(),
            option.label()
        );
    }
    body.push_str("</select><button type=\"submit\">Go</button></form>\n");

    if listings.is_empty() {
        body.push_str("<p>No projects yet.</p>\n");
        return layout("Projects", &body);
    }

    body.push_str("<ul>\n");
    for listing in listings {
        let project = &listing.project;
        let _ = writeln!(
            body,
            "<li>{}<a href=\"/project/{}\">{}</a> {} <small>round {}, made {}x, added {}</small></li>",
            thumbnail(project),
            project.id,
            escape(&project.title),
            tag_list(&listing.tags),
            project.current_round,
            project.made_count,
            format_created_at(project.created_at)
        );
    }
    body.push_str("</ul>\n");
    layout("Projects", &body)
}

/// Create form when `existing` is `None`, edit form otherwise.
pub fn project_form_page(existing: Option<(&project::Model, &[tag::Model])>) -> String {
    let (title, action, heading) = match existing {
        Some((project, _)) => (project.title.as_str(), format!("/project/{}/edit", project.id), "Edit project"),
        None => ("", "/project/new".to_string(), "New project"),
    };
    let link = existing.and_then(|(p, _)| p.external_link.as_deref()).unwrap_or_default();
    let notes = existing.and_then(|(p, _)| p.notes.as_deref()).unwrap_or_default();
    let tags = existing
        .map(|(_, tags)| tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", "))
        .unwrap_or_default();

    let mut body = format!("<h1>{heading}</h1>\n");
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{action}\" enctype=\"multipart/form-data\">\n\
         <p><label>Title <input name=\"title\" required value=\"{}\"></label></p>\n\
         <p><label>Pattern link <input name=\"external_link\" type=\"url\" value=\"{}\"></label></p>\n\
         <p><label>Notes<br><textarea name=\"notes\" rows=\"5\" cols=\"60\">{}</textarea></label></p>\n",
        escape(title),
        escape(link),
        escape(notes)
    );
    if existing.is_none() {
        let _ = write!(
            body,
            "<p><label>Tags <input name=\"tags\" value=\"{}\" placeholder=\"amigurumi, gift\"></label></p>\n",
            escape(&tags)
        );
    }
    body.push_str("<p><label>Thumbnail <input type=\"file\" name=\"thumbnail\" accept=\"image/*\"></label></p>\n");
    if let Some((project, _)) = existing.filter(|(p, _)| p.thumbnail.is_some()) {
        let _ = write!(
            body,
            "<p>{}<label><input type=\"checkbox\" name=\"remove_thumbnail\" value=\"1\"> Remove thumbnail</label></p>\n",
            thumbnail(project)
        );
    }
    body.push_str("<p><button type=\"submit\">Save</button></p>\n</form>\n");
    layout(heading, &body)
}

fn counter_section(project: &project::Model) -> String {
    let round_action = format!("/project/{}/update_round", project.id);
    let made_action = format!("/project/{}/update_made_count", project.id);
    format!(
        "<h2>Progress</h2>\n<p>Round <strong>{}</strong> {} {} {}\
         <form class=\"inline\" method=\"post\" action=\"{round_action}\">\
         <input type=\"hidden\" name=\"action\" value=\"set\"><input name=\"round_number\" size=\"4\">\
         <button type=\"submit\">Set</button></form></p>\n\
         <p>Made <strong>{}</strong> times {} {} {}</p>\n",
        project.current_round,
        button_form(&round_action, "+", &[("action", "increment")]),
        button_form(&round_action, "-", &[("action", "decrement")]),
        button_form(&round_action, "Reset", &[("action", "reset")]),
        project.made_count,
        button_form(&made_action, "+", &[("action", "increment")]),
        button_form(&made_action, "-", &[("action", "decrement")]),
        button_form(&made_action, "Reset", &[("action", "reset")]),
    )
}

fn part_section(entry: &PartWithSteps, is_first: bool, is_last: bool) -> String {
    let part = &entry.part;
    let mut out = format!(
        "<section>\n<h3>{} <small>{}/{} done</small></h3>\n<p>",
        escape(&part.name),
        entry.completed_count(),
        entry.steps.len()
    );
    let move_action = format!("/part/{}/move", part.id);
    if !is_first {
        out.push_str(&button_form(&move_action, "Up", &[("direction", "up")]));
    }
    if !is_last {
        out.push_str(&button_form(&move_action, "Down", &[("direction", "down")]));
    }
    let _ = write!(
        out,
        "<form class=\"inline\" method=\"post\" action=\"/part/{}/rename\"><input name=\"name\" value=\"{}\">\
         <button type=\"submit\">Rename</button></form>{}{}</p>\n<ol>\n",
        part.id,
        escape(&part.name),
        button_form(&format!("/part/{}/reset_steps", part.id), "Reset steps", &[]),
        button_form(&format!("/part/{}/delete", part.id), "Delete part", &[]),
    );

    for step in &entry.steps {
        let class = if step.completed { " class=\"done\"" } else { "" };
        let round = step.round_number.as_deref().unwrap_or_default();
        let _ = write!(
            out,
            "<li><span{class}>{}{}</span> {}\
             <form class=\"inline\" method=\"post\" action=\"/step/{}/edit\">\
             <input name=\"round_number\" size=\"5\" value=\"{}\"><input name=\"instructions\" value=\"{}\">\
             <button type=\"submit\">Save</button></form>{}</li>\n",
            if round.is_empty() { String::new() } else { format!("<b>{}</b> ", escape(round)) },
            escape(&step.instructions),
            button_form(&format!("/step/{}/toggle", step.id), if step.completed { "Undo" } else { "Done" }, &[]),
            step.id,
            escape(round),
            escape(&step.instructions),
            button_form(&format!("/step/{}/delete", step.id), "Delete", &[]),
        );
    }

    let _ = write!(
        out,
        "</ol>\n<form method=\"post\" action=\"/part/{}/add_step\">\
         <input name=\"round_number\" size=\"5\" placeholder=\"Rnd\">\
         <input name=\"instructions\" required placeholder=\"Instructions\">\
         <button type=\"submit\">Add step</button></form>\n</section>\n",
        part.id
    );
    out
}

/// Full project page: counters, tags, materials, parts and steps.
pub fn project_detail_page(detail: &ProjectDetail, catalog: &[material_type::Model]) -> String {
    let project = &detail.project;
    let mut body = format!("<h1>{}</h1>\n{}\n", escape(&project.title), thumbnail(project));
    if let Some(link) = &project.external_link {
        let _ = writeln!(body, "<p><a href=\"{0}\">{0}</a></p>", escape(link));
    }
    let _ = writeln!(
        body,
        "<p><a href=\"/project/{0}/edit\">Edit</a> {1}</p>",
        project.id,
        button_form(&format!("/project/{}/delete", project.id), "Delete project", &[])
    );

    body.push_str(&counter_section(project));

    let tag_names = detail.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ");
    let _ = write!(
        body,
        "<h2>Tags</h2>\n<p>{}</p>\n<form method=\"post\" action=\"/project/{}/update_tags\">\
         <input name=\"tags\" value=\"{}\"><button type=\"submit\">Save tags</button></form>\n",
        tag_list(&detail.tags),
        project.id,
        escape(&tag_names)
    );

    let _ = write!(
        body,
        "<h2>Notes</h2>\n<form method=\"post\" action=\"/project/{}/update_notes\">\
         <textarea name=\"notes\" rows=\"4\" cols=\"60\">{}</textarea><br>\
         <button type=\"submit\">Save notes</button></form>\n",
        project.id,
        escape(project.notes.as_deref().unwrap_or_default())
    );

    body.push_str("<h2>Materials</h2>\n<ul>\n");
    for line in &detail.materials {
        let description = match &line.material_type {
            Some(t) if t.brand.is_empty() => escape(&t.name),
            Some(t) => format!("{} {}", escape(&t.brand), escape(&t.name)),
            None => "(unknown material)".to_string(),
        };
        let _ = writeln!(
            body,
            "<li>{description} <form class=\"inline\" method=\"post\" action=\"/material/{0}/edit\">\
             <input name=\"quantity\" value=\"{1}\"><button type=\"submit\">Save</button></form>{2}</li>",
            line.material.id,
            escape(line.material.quantity.as_deref().unwrap_or_default()),
            button_form(&format!("/material/{}/delete", line.material.id), "Remove", &[])
        );
    }
    body.push_str("</ul>\n");
    if catalog.is_empty() {
        body.push_str("<p>Add entries to the <a href=\"/materials\">material catalog</a> first.</p>\n");
    } else {
        let _ = write!(
            body,
            "<form method=\"post\" action=\"/project/{}/add_material\"><select name=\"material_type_id\">",
            project.id
        );
        for t in catalog {
            let _ = write!(
                body,
                "<option value=\"{}\">{} {}</option>",
                t.id,
                escape(&t.brand),
                escape(&t.name)
            );
        }
        body.push_str(
            "</select><input name=\"quantity\" placeholder=\"Quantity\">\
             <button type=\"submit\">Add material</button></form>\n",
        );
    }

    let _ = writeln!(
        body,
        "<h2>Parts</h2>\n<p>{}</p>",
        button_form(&format!("/project/{}/reset_steps", project.id), "Reset all steps", &[])
    );
    let count = detail.parts.len();
    for (i, entry) in detail.parts.iter().enumerate() {
        body.push_str(&part_section(entry, i == 0, i + 1 == count));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/project/{}/add_part\"><input name=\"name\" required placeholder=\"Part name\">\
         <button type=\"submit\">Add part</button></form>\n",
        project.id
    );

    layout(&project.title, &body)
}

fn material_type_fields(existing: Option<&material_type::Model>) -> String {
    let brand = existing.map(|m| m.brand.as_str()).unwrap_or_default();
    let name = existing.map(|m| m.name.as_str()).unwrap_or_default();
    let description = existing.and_then(|m| m.description.as_deref()).unwrap_or_default();
    let link = existing.and_then(|m| m.external_link.as_deref()).unwrap_or_default();
    format!(
        "<p><label>Brand <input name=\"brand\" value=\"{}\"></label> \
         <label>Name <input name=\"name\" required value=\"{}\"></label></p>\n\
         <p><label>Description <input name=\"description\" value=\"{}\"></label> \
         <label>Link <input name=\"external_link\" type=\"url\" value=\"{}\"></label></p>\n",
        escape(brand),
        escape(name),
        escape(description),
        escape(link)
    )
}

/// Material catalog with the create form.
pub fn materials_page(catalog: &[material_type::Model]) -> String {
    let mut body = String::from("<h1>Material catalog</h1>\n");
    if catalog.is_empty() {
        body.push_str("<p>No materials yet.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>Brand</th><th>Name</th><th>Description</th><th>Added</th><th></th></tr>\n");
        for t in catalog {
            let name = match &t.external_link {
                Some(link) => format!("<a href=\"{}\">{}</a>", escape(link), escape(&t.name)),
                None => escape(&t.name),
            };
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{name}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"/materials/{}/edit\">Edit</a> {}</td></tr>",
                escape(&t.brand),
                escape(t.description.as_deref().unwrap_or_default()),
                format_ymd(t.created_at.date_naive()),
                t.id,
                button_form(&format!("/materials/{}/delete", t.id), "Delete", &[])
            );
        }
        body.push_str("</table>\n");
    }
    let _ = write!(
        body,
        "<h2>Add material</h2>\n<form method=\"post\" action=\"/materials/new\">\n{}\
         <p><button type=\"submit\">Add</button></p>\n</form>\n",
        material_type_fields(None)
    );
    layout("Materials", &body)
}

pub fn material_type_edit_page(material_type: &material_type::Model) -> String {
    let body = format!(
        "<h1>Edit material</h1>\n<form method=\"post\" action=\"/materials/{}/edit\">\n{}\
         <p><button type=\"submit\">Save</button></p>\n</form>\n",
        material_type.id,
        material_type_fields(Some(material_type))
    );
    layout("Edit material", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to projects</a></p>\n",
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_project() -> project::Model {
        project::Model {
            id: 3,
            title: "Bear <Mini>".to_string(),
            thumbnail: None,
            external_link: None,
            notes: Some("use \"soft\" yarn".to_string()),
            current_round: 4,
            made_count: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\" 'd'"), "a &lt; b &amp; &quot;c&quot; &#39;d&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_index_page_escapes_titles_and_marks_sort() {
        let listing = ProjectListing {
            project: sample_project(),
            tags: vec![tag::Model {
                id: 1,
                name: "gift".to_string(),
            }],
        };
        let html = index_page(&[listing], "be", ProjectSort::TitleAsc);

        assert!(html.contains("Bear &lt;Mini&gt;"));
        assert!(!html.contains("<Mini>"));
        assert!(html.contains("<option value=\"title_asc\" selected>"));
        assert!(html.contains("<span class=\"tag\">gift</span>"));
    }

    #[test]
    fn test_edit_form_prefills_values() {
        let project = sample_project();
        let no_tags: Vec<tag::Model> = Vec::new();
        let html = project_form_page(Some((&project, no_tags.as_slice())));

        assert!(html.contains("action=\"/project/3/edit\""));
        assert!(html.contains("use &quot;soft&quot; yarn"));
        assert!(!html.contains("name=\"tags\""));
    }

    #[test]
    fn test_error_page_shows_status() {
        let html = error_page(StatusCode::NOT_FOUND, "Project 9 not found");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("Project 9 not found"));
    }
}
