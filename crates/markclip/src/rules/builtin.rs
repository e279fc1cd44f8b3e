//! Built-in conversion rule catalogue.
//!
//! Registration order is priority: the removal rules come first so injected
//! UI, hidden nodes and non-content tags never reach a content rule, and the
//! `pre` rule precedes the generic inline-code handling so code blocks are
//! not double-processed.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Filter, Rule};
use crate::node::{Node, NodeRef};
use crate::utilities::{clean_attribute, normalize_blank_lines, repeat};

/// Class name marking UI elements injected around the selection overlay.
/// Anything carrying it is stripped from output wherever it appears.
pub const INJECTED_UI_CLASS: &str = "html-to-markdown-extension-ui";

/// Tags with no textual representation at all
pub const NON_CONTENT_TAGS: &[&str] =
    &["script", "style", "noscript", "meta", "link", "head", "title"];

/// Tags preserved as raw markup because Markdown has no equivalent
pub const PRESERVED_TAGS: &[&str] =
    &["video", "audio", "iframe", "embed", "object", "canvas", "svg"];

static LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-(\S+)").expect("static pattern"));

/// Build the full catalogue, keyed by rule name, in priority order
pub fn builtin_rules() -> IndexMap<String, Rule> {
    let mut rules = IndexMap::new();
    let mut add = |name: &str, rule: Rule| {
        rules.insert(name.to_string(), rule);
    };

    add("injected-ui", injected_ui_rule());
    add("hidden", hidden_rule());
    add("non-content", non_content_rule());
    add("code-block", code_block_rule());
    add("inline-code", inline_code_rule());
    add("table", table_rule());
    add("blockquote", blockquote_rule());
    add("list", list_rule());
    add("horizontal-rule", horizontal_rule());
    add("definition-list", definition_list_rule());
    add("details", details_rule());
    add("highlight", highlight_rule());
    add("strikethrough", strikethrough_rule());
    add("subscript", subscript_rule());
    add("superscript", superscript_rule());
    add("keyboard", keyboard_rule());
    add("abbreviation", abbreviation_rule());
    add("image", image_rule());
    add("link", link_rule());
    add("figure", figure_rule());
    add("address", address_rule());
    add("time", time_rule());
    add("progress", progress_rule());
    add("meter", meter_rule());
    add("form-controls", form_controls_rule());
    add("preserved-html", preserved_html_rule());
    add("heading", heading_rule());
    add("paragraph", paragraph_rule());
    add("line-break", line_break_rule());
    add("emphasis", emphasis_rule());
    add("strong", strong_rule());

    rules
}

/// Attribute value with a default for both missing and empty
fn attr_or<'a>(node: &'a NodeRef<'a>, name: &str, default: &'a str) -> &'a str {
    match node.attr(name) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn injected_ui_rule() -> Rule {
    Rule::new(
        Filter::predicate(|node, _| Ok(node.is_element() && node.has_class(INJECTED_UI_CLASS))),
        |_, _, _| Ok(String::new()),
    )
}

fn hidden_rule() -> Rule {
    Rule::new(
        Filter::predicate(|node, _| {
            Ok(node.is_comment() || (node.is_element() && node.is_hidden()))
        }),
        |_, _, _| Ok(String::new()),
    )
}

fn non_content_rule() -> Rule {
    Rule::new(Filter::tags(NON_CONTENT_TAGS), |_, _, _| Ok(String::new()))
}

fn code_block_rule() -> Rule {
    Rule::for_tag("pre", |ctx, node, _| {
        let code = node.text_content();
        let language = node
            .children()
            .next()
            .filter(|c| c.is_element())
            .and_then(|c| c.attr("class"))
            .and_then(|class| LANGUAGE_RE.captures(class))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or("");

        let fence = &ctx.options().fence;
        Ok(format!(
            "\n\n{}{}\n{}\n{}\n\n",
            fence,
            language,
            code.trim(),
            fence
        ))
    })
}

fn inline_code_rule() -> Rule {
    Rule::new(
        Filter::predicate(|node, _| {
            Ok(node.is_element()
                && node.tag_name() == "code"
                && node.parent_tag() != Some("pre"))
        }),
        |_, node, _| {
            let code = node.text_content();
            if code.is_empty() {
                return Ok(String::new());
            }
            Ok(format!("`{}`", code))
        },
    )
}

fn table_rule() -> Rule {
    Rule::for_tag("table", |_, node, content| {
        let rows: Vec<&Node> = node
            .node
            .descendants()
            .filter(|n| n.is_element() && n.tag_name() == "tr")
            .collect();
        if rows.is_empty() {
            return Ok(content.to_string());
        }

        let has_header = rows
            .iter()
            .any(|row| row_cells(row).iter().any(|c| c.tag_name() == "th"));

        let mut markdown = String::from("\n\n");
        let mut separator_emitted = false;

        for (index, row) in rows.iter().enumerate() {
            let cells = row_cells(row);
            if cells.is_empty() {
                continue;
            }

            let is_header_row = cells.iter().any(|c| c.tag_name() == "th");
            let texts: Vec<String> = cells
                .iter()
                .map(|cell| {
                    cell.text_content()
                        .trim()
                        .replace('|', "\\|")
                        .replace('\n', " ")
                })
                .collect();

            markdown.push_str("| ");
            markdown.push_str(&texts.join(" | "));
            markdown.push_str(" |\n");

            // Exactly one separator: below the first header row, or below
            // row 0 for a table with no header cells anywhere.
            if !separator_emitted && (is_header_row || (index == 0 && !has_header)) {
                let separator = vec!["---"; cells.len()].join(" | ");
                markdown.push_str("| ");
                markdown.push_str(&separator);
                markdown.push_str(" |\n");
                separator_emitted = true;
            }
        }

        markdown.push('\n');
        Ok(markdown)
    })
}

/// The `th`/`td` cells of a table row, in document order
fn row_cells(row: &Node) -> Vec<&Node> {
    row.descendants()
        .filter(|n| n.is_element() && matches!(n.tag_name().as_str(), "th" | "td"))
        .collect()
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |_, _, content| {
        let content = normalize_blank_lines(content);
        let quoted: Vec<String> = content
            .trim()
            .lines()
            .map(|line| format!("> {}", line.trim()))
            .collect();
        Ok(format!("\n\n{}\n\n", quoted.join("\n")))
    })
}

fn list_rule() -> Rule {
    Rule::for_tags(&["ul", "ol"], |ctx, node, content| {
        let is_ordered = node.tag_name() == "ol";
        let items: Vec<&Node> = node
            .element_children()
            .filter(|c| c.tag_name() == "li")
            .collect();
        if items.is_empty() {
            return Ok(content.to_string());
        }

        let mut markdown = String::from("\n");
        for (index, item) in items.iter().enumerate() {
            let marker = if is_ordered {
                format!("{}. ", index + 1)
            } else {
                format!("{} ", ctx.options().bullet_marker)
            };

            // Each item re-enters the top-level converter so nested lists,
            // paragraphs and code blocks inside it come out fully formed.
            let item_content = ctx.convert_fragment(item)?;
            let mut lines = item_content.lines();

            markdown.push_str(&marker);
            markdown.push_str(lines.next().unwrap_or(""));
            markdown.push('\n');
            for line in lines {
                markdown.push_str("  ");
                markdown.push_str(line);
                markdown.push('\n');
            }
        }
        markdown.push('\n');
        Ok(markdown)
    })
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |_, _, _| Ok("\n\n---\n\n".to_string()))
}

fn definition_list_rule() -> Rule {
    Rule::for_tag("dl", |_, node, _| {
        let mut markdown = String::from("\n\n");
        for child in node.element_children() {
            match child.tag_name().as_str() {
                "dt" => {
                    markdown.push_str(&format!("**{}**\n", child.text_content().trim()));
                }
                "dd" => {
                    markdown.push_str(&format!(": {}\n\n", child.text_content().trim()));
                }
                _ => {}
            }
        }
        Ok(markdown)
    })
}

fn details_rule() -> Rule {
    Rule::for_tag("details", |_, node, content| {
        let summary_text = match node.node.find_tag("summary") {
            Some(summary) => summary.text_content().trim().to_string(),
            None => "Details".to_string(),
        };

        // The summary's text already flowed into the accumulated content;
        // strip its first occurrence so it is not duplicated in the body.
        let body = if summary_text.is_empty() {
            content.to_string()
        } else {
            content.replacen(summary_text.as_str(), "", 1)
        };

        Ok(format!(
            "\n\n<details>\n<summary>{}</summary>\n\n{}\n\n</details>\n\n",
            summary_text,
            body.trim()
        ))
    })
}

fn highlight_rule() -> Rule {
    Rule::for_tag("mark", |_, _, content| Ok(format!("=={}==", content)))
}

fn strikethrough_rule() -> Rule {
    Rule::for_tags(&["del", "s", "strike"], |_, _, content| {
        Ok(format!("~~{}~~", content))
    })
}

fn subscript_rule() -> Rule {
    Rule::for_tag("sub", |_, _, content| Ok(format!("~{}~", content)))
}

fn superscript_rule() -> Rule {
    Rule::for_tag("sup", |_, _, content| Ok(format!("^{}^", content)))
}

fn keyboard_rule() -> Rule {
    Rule::for_tag("kbd", |_, _, content| Ok(format!("<kbd>{}</kbd>", content)))
}

fn abbreviation_rule() -> Rule {
    Rule::for_tag("abbr", |_, node, content| {
        match node.attr("title").filter(|t| !t.is_empty()) {
            Some(title) => Ok(format!("{} ({})", content, title)),
            None => Ok(content.to_string()),
        }
    })
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |_, node, _| {
        let src = clean_attribute(node.attr("src"));
        if src.is_empty() {
            return Ok(String::new());
        }
        let alt = clean_attribute(node.attr("alt"));

        let mut markdown = format!("![{}]({}", alt, src);
        if let Some(title) = node.attr("title").filter(|t| !t.is_empty()) {
            markdown.push_str(&format!(" \"{}\"", title));
        }
        markdown.push(')');
        Ok(markdown)
    })
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |_, node, content| {
        let href = match node.attr("href").filter(|h| !h.is_empty()) {
            Some(href) => href,
            None => return Ok(content.to_string()),
        };

        let mut markdown = format!("[{}]({}", content, href);
        if let Some(title) = node.attr("title").filter(|t| !t.is_empty()) {
            markdown.push_str(&format!(" \"{}\"", title));
        }
        markdown.push(')');
        Ok(markdown)
    })
}

fn figure_rule() -> Rule {
    Rule::for_tag("figure", |_, node, content| {
        let caption = node
            .node
            .find_tag("figcaption")
            .map(|c| c.text_content().trim().to_string())
            .unwrap_or_default();

        if caption.is_empty() {
            Ok(format!("\n\n{}\n\n", content))
        } else {
            Ok(format!("\n\n{}\n\n*{}*\n\n", content, caption))
        }
    })
}

fn address_rule() -> Rule {
    Rule::for_tag("address", |_, _, content| {
        Ok(format!("\n\n*{}*\n\n", content.trim()))
    })
}

fn time_rule() -> Rule {
    Rule::for_tag("time", |_, node, content| {
        if let Some(datetime) = node.attr("datetime").filter(|d| !d.is_empty()) {
            if datetime != content.trim() {
                return Ok(format!("{} ({})", content, datetime));
            }
        }
        Ok(content.to_string())
    })
}

fn progress_rule() -> Rule {
    Rule::for_tag("progress", |_, node, _| {
        let value = attr_or(node, "value", "0");
        let max = attr_or(node, "max", "100");

        let v: f64 = value.parse().unwrap_or(0.0);
        let m: f64 = max.parse().unwrap_or(100.0);
        let percentage = if m == 0.0 {
            0.0
        } else {
            (v / m * 100.0).round()
        };

        Ok(format!("Progress: {}% ({}/{})", percentage as i64, value, max))
    })
}

fn meter_rule() -> Rule {
    Rule::for_tag("meter", |_, node, _| {
        let value = attr_or(node, "value", "0");
        let min = attr_or(node, "min", "0");
        let max = attr_or(node, "max", "1");
        Ok(format!("Meter: {} (range: {}-{})", value, min, max))
    })
}

fn form_controls_rule() -> Rule {
    Rule::for_tags(
        &["input", "textarea", "select", "option", "button", "form"],
        |_, node, content| {
            let tag = node.tag_name();
            match tag.as_str() {
                "input" => {
                    let input_type = attr_or(node, "type", "text").to_uppercase();
                    let value = node.attr("value").unwrap_or("");
                    let placeholder = node.attr("placeholder").unwrap_or("");

                    let mut markdown = format!("[{} INPUT", input_type);
                    if !value.is_empty() {
                        markdown.push_str(": ");
                        markdown.push_str(value);
                    }
                    if !placeholder.is_empty() {
                        markdown.push_str(" (");
                        markdown.push_str(placeholder);
                        markdown.push(')');
                    }
                    markdown.push(']');
                    Ok(markdown)
                }
                "textarea" => {
                    let value = node
                        .attr("value")
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| node.text_content());
                    Ok(format!("[TEXTAREA: {}]", value))
                }
                "select" => {
                    let selected = node
                        .node
                        .find_descendant(|n| {
                            n.is_element() && n.tag_name() == "option" && n.has_attr("selected")
                        })
                        .map(|option| option.text_content())
                        .unwrap_or_default();
                    if selected.is_empty() {
                        Ok("[SELECT]".to_string())
                    } else {
                        Ok(format!("[SELECT: {}]", selected))
                    }
                }
                "button" => Ok(format!("[BUTTON: {}]", node.text_content())),
                "form" => Ok(content.to_string()),
                other => Ok(format!("[{}]", other.to_uppercase())),
            }
        },
    )
}

fn preserved_html_rule() -> Rule {
    Rule::for_tags(PRESERVED_TAGS, |_, node, _| Ok(node.outer_html()))
}

fn heading_rule() -> Rule {
    Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], |_, node, content| {
        let tag = node.tag_name();
        let level: usize = tag[1..].parse().unwrap_or(1);

        let content = content.trim();
        if content.is_empty() {
            return Ok(String::new());
        }

        Ok(format!("\n\n{} {}\n\n", repeat("#", level), content))
    })
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |_, _, content| {
        Ok(format!("\n\n{}\n\n", content.trim()))
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _| Ok("  \n".to_string()))
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |ctx, _, content| {
        if content.trim().is_empty() {
            return Ok(String::new());
        }
        let delimiter = ctx.options().em_delimiter;
        Ok(format!("{}{}{}", delimiter, content, delimiter))
    })
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |ctx, _, content| {
        if content.trim().is_empty() {
            return Ok(String::new());
        }
        let delimiter = &ctx.options().strong_delimiter;
        Ok(format!("{}{}{}", delimiter, content, delimiter))
    })
}
