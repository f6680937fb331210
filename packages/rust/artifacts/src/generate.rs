//! Text generators for the files of a portfolio package.
//!
//! Every generator is a pure function of the preview and the chosen
//! template/scheme, so packages are reproducible for the same input.

use portfoliobuilder_shared::{ColorScheme, PreviewView, SectionKind, Template, TemplateLayout};

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Render `index.html` from a preview projection.
pub fn generate_index_html(view: &PreviewView, template: &Template, tool_version: &str) -> String {
    let mut body = String::new();

    for section in view.sections() {
        match section {
            SectionKind::Identity => {
                let id = &view.identity;
                push_line(&mut body, "    <header class=\"hero\">");
                push_line(&mut body, &format!("      <h1>{}</h1>", escape_html(&id.name)));
                push_line(
                    &mut body,
                    &format!("      <p class=\"subtitle\">{}</p>", escape_html(&id.title)),
                );
                if let Some(location) = &id.location {
                    push_line(
                        &mut body,
                        &format!("      <p class=\"location\">{}</p>", escape_html(location)),
                    );
                }
                push_line(&mut body, "    </header>");
            }
            SectionKind::About => {
                if let Some(about) = &view.about {
                    open_section(&mut body, section);
                    push_line(&mut body, &format!("      <p>{}</p>", escape_html(about)));
                    close_section(&mut body);
                }
            }
            SectionKind::Skills => {
                if let Some(skills) = &view.skills {
                    open_section(&mut body, section);
                    push_line(&mut body, "      <ul class=\"skills\">");
                    for skill in skills {
                        push_line(&mut body, &format!("        <li>{}</li>", escape_html(skill)));
                    }
                    push_line(&mut body, "      </ul>");
                    close_section(&mut body);
                }
            }
            SectionKind::Projects => {
                if let Some(projects) = &view.projects {
                    open_section(&mut body, section);
                    for card in projects {
                        push_line(&mut body, "      <article class=\"project\">");
                        push_line(&mut body, &format!("        <h3>{}</h3>", escape_html(&card.title)));
                        if let Some(description) = &card.description {
                            push_line(
                                &mut body,
                                &format!("        <p>{}</p>", escape_html(description)),
                            );
                        }
                        if let Some(url) = &card.live_demo {
                            push_line(&mut body, &format!("  {}", button(url, "Live Demo")));
                        }
                        if let Some(url) = &card.source {
                            push_line(&mut body, &format!("  {}", button(url, "GitHub")));
                        }
                        push_line(&mut body, "      </article>");
                    }
                    close_section(&mut body);
                }
            }
            SectionKind::Contact => {
                open_section(&mut body, section);
                if let Some(email) = &view.contact.email {
                    let email = escape_html(email);
                    push_line(
                        &mut body,
                        &format!(
                            "      <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>"
                        ),
                    );
                }
                if let Some(phone) = &view.contact.phone {
                    push_line(
                        &mut body,
                        &format!("      <p><strong>Phone:</strong> {}</p>", escape_html(phone)),
                    );
                }
                close_section(&mut body);
            }
            SectionKind::Connect => {
                if let Some(links) = &view.connect {
                    open_section(&mut body, section);
                    for link in links {
                        push_line(&mut body, &button(&link.url, &link.platform));
                    }
                    close_section(&mut body);
                }
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n\
         <!-- Generated by PortfolioBuilder v{tool_version} using the {template} template -->\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20 <meta charset=\"utf-8\">\n\
         \x20 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         \x20 <title>{title}</title>\n\
         \x20 <link rel=\"stylesheet\" href=\"styles.css\">\n\
         </head>\n\
         <body class=\"layout-{layout}\">\n\
         \x20 <main>\n\
         {body}\
         \x20 </main>\n\
         \x20 <script src=\"script.js\"></script>\n\
         </body>\n\
         </html>\n",
        template = template.name,
        title = escape_html(&view.identity.name),
        layout = layout_class(template.layout),
    )
}

fn push_line(body: &mut String, line: &str) {
    body.push_str(line);
    body.push('\n');
}

/// Indented link button; both `url` and `label` are escaped.
fn button(url: &str, label: &str) -> String {
    format!(
        "      <a class=\"button\" href=\"{}\">{}</a>",
        escape_html(url),
        escape_html(label)
    )
}

fn open_section(body: &mut String, kind: SectionKind) {
    let heading = kind.heading().unwrap_or_default();
    push_line(
        body,
        &format!("    <section id=\"{}\">", heading.to_lowercase().replace(' ', "-")),
    );
    push_line(body, &format!("      <h2>{heading}</h2>"));
}

fn close_section(body: &mut String) {
    push_line(body, "    </section>");
}

fn layout_class(layout: TemplateLayout) -> &'static str {
    match layout {
        TemplateLayout::SingleColumn => "single-column",
        TemplateLayout::TwoColumn => "two-column",
        TemplateLayout::Grid => "grid",
        TemplateLayout::Sidebar => "sidebar",
    }
}

/// Render `styles.css` with the scheme's three color tokens.
pub fn generate_styles_css(template: &Template, scheme: &ColorScheme) -> String {
    let columns = match template.layout {
        TemplateLayout::SingleColumn | TemplateLayout::Sidebar => "1fr",
        TemplateLayout::TwoColumn => "1fr 1fr",
        TemplateLayout::Grid => "repeat(auto-fit, minmax(16rem, 1fr))",
    };

    format!(
        "/* {name}: {scheme} */\n\
         :root {{\n\
         \x20 --primary: {primary};\n\
         \x20 --secondary: {secondary};\n\
         \x20 --accent: {accent};\n\
         }}\n\
         \n\
         body {{ margin: 0; font-family: system-ui, sans-serif; color: var(--secondary); }}\n\
         main {{ max-width: 60rem; margin: 0 auto; padding: 2rem; display: grid; gap: 2rem; }}\n\
         .hero {{ text-align: center; }}\n\
         .hero h1 {{ color: var(--primary); margin-bottom: 0.25rem; }}\n\
         h2 {{ color: var(--primary); }}\n\
         .skills {{ display: flex; flex-wrap: wrap; gap: 0.5rem; list-style: none; padding: 0; }}\n\
         .skills li {{ border: 1px solid var(--accent); border-radius: 999px; padding: 0.25rem 0.75rem; }}\n\
         #projects {{ display: grid; grid-template-columns: {columns}; gap: 1rem; }}\n\
         .button {{ display: inline-block; margin-right: 0.5rem; color: var(--accent); }}\n",
        name = template.name,
        scheme = scheme.name,
        primary = scheme.primary,
        secondary = scheme.secondary,
        accent = scheme.accent,
    )
}

/// Render `script.js`: smooth scrolling for in-page links.
pub fn generate_script_js() -> String {
    "document.querySelectorAll('a[href^=\"#\"]').forEach((link) => {\n\
     \x20 link.addEventListener('click', (event) => {\n\
     \x20   const target = document.querySelector(link.getAttribute('href'));\n\
     \x20   if (target) {\n\
     \x20     event.preventDefault();\n\
     \x20     target.scrollIntoView({ behavior: 'smooth' });\n\
     \x20   }\n\
     \x20 });\n\
     });\n"
        .to_string()
}

/// Render `README.md` with hosting instructions.
pub fn generate_readme(owner: &str, template: &Template, tool_version: &str) -> String {
    format!(
        "# {owner} Portfolio\n\
         \n\
         Generated by PortfolioBuilder v{tool_version} with the **{template}** template.\n\
         \n\
         ## Contents\n\
         \n\
         - `index.html`: your portfolio page\n\
         - `styles.css`: custom styling\n\
         - `script.js`: interactive features\n\
         - `assets/`: images and resources\n\
         \n\
         ## Hosting\n\
         \n\
         The package has no dependencies. Open `index.html` locally, or upload the\n\
         folder to any static host (GitHub Pages, Netlify, Vercel, S3, ...).\n",
        template = template.name,
    )
}
