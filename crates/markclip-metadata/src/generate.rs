//! Preamble rendering.

use crate::record::PageMetadata;
use crate::templates::Language;

/// Render the provenance preamble for a page.
///
/// Pure and total: absent fields read as empty strings, unsupported
/// languages have already been folded to the default by
/// [`Language::from_code`], and the section order is fixed — title header,
/// source information, extraction details, scope and limitations, then the
/// SEO/social section only when the record carries any of keywords, author,
/// Open Graph title or Twitter card.
pub fn generate(meta: &PageMetadata, language: Language) -> String {
    let t = language.phrases();
    let field = |value: &Option<String>| value.as_deref().unwrap_or("").trim().to_string();

    let title = field(&meta.title);
    let url = field(&meta.url);
    let extracted_at = field(&meta.extracted_at);

    let mut out = String::new();

    // Title header and intro sentence
    out.push_str(&format!("# {}\n\n", t.content_context));
    out.push_str(t.intro);
    out.push(' ');
    out.push_str(&fill(
        t.page_sentence,
        &[("{title}", &title), ("{time}", &extracted_at)],
    ));
    out.push_str("\n\n");

    // Source information
    out.push_str(&format!("## {}\n\n", t.source_info));
    out.push_str(&format!("- **{}**: {}\n", t.original_title, title));
    out.push_str(&format!("- **{}**: {}\n", t.source_url, url));

    let canonical = field(&meta.canonical);
    if !canonical.is_empty() && canonical != url {
        out.push_str(&format!(
            "- **{}**: {} {}\n",
            t.canonical_url, canonical, t.canonical_note
        ));
    }

    let description = field(&meta.description);
    if !description.is_empty() {
        out.push_str(&format!("- **{}**: {}\n", t.page_description, description));
    }

    let page_lang = field(&meta.page_lang);
    out.push_str(&format!(
        "- **{}**: {}\n",
        t.language_label,
        if page_lang.is_empty() { "unknown" } else { page_lang.as_str() }
    ));
    out.push_str(&format!("- **{}**: {}\n\n", t.extracted_at_label, extracted_at));

    // Extraction details
    let element = field(&meta.element_description);
    let element = if element.is_empty() {
        t.default_element
    } else {
        element.as_str()
    };
    out.push_str(&format!("## {}\n\n", t.extraction_details));
    out.push_str(&fill(t.extraction_paragraph, &[("{element}", element)]));
    out.push_str("\n\n");

    // Scope and limitations
    out.push_str(&format!("## {}\n\n", t.scope_heading));
    for bullet in t.scope_bullets {
        out.push_str(&format!("- {}\n", bullet));
    }
    out.push('\n');

    // SEO / social context
    if meta.has_seo_context() {
        out.push_str(&format!("## {}\n\n", t.seo_heading));

        let keywords = field(&meta.keywords);
        if !keywords.is_empty() {
            out.push_str(&format!(
                "**{}**: {} - {}\n\n",
                t.keywords_label, keywords, t.keywords_note
            ));
        }

        let author = field(&meta.author);
        if !author.is_empty() {
            out.push_str(&format!(
                "**{}**: {} - {}\n\n",
                t.author_label, author, t.author_note
            ));
        }

        let og_title = field(&meta.og_title);
        let og_type = field(&meta.og_type);
        let og_image = field(&meta.og_image);
        let og_site_name = field(&meta.og_site_name);
        if !og_title.is_empty() || !og_type.is_empty() || !og_image.is_empty()
            || !og_site_name.is_empty()
        {
            out.push_str(&format!("**{}**: {}", t.og_label, t.og_lead));
            if !og_type.is_empty() {
                out.push_str(&fill(t.og_type_sentence, &[("{type}", &og_type)]));
            }
            if !og_site_name.is_empty() {
                out.push_str(&fill(t.og_site_sentence, &[("{site}", &og_site_name)]));
            }
            out.push_str("\n\n");
        }

        let twitter_card = field(&meta.twitter_card);
        if !twitter_card.is_empty() {
            out.push_str(&format!(
                "**{}**: {}",
                t.twitter_label,
                fill(t.twitter_sentence, &[("{card}", &twitter_card)])
            ));
            let twitter_site = field(&meta.twitter_site);
            if !twitter_site.is_empty() {
                out.push_str(&fill(t.twitter_site_sentence, &[("{account}", &twitter_site)]));
            }
            out.push_str("\n\n");
        }
    }

    out.push_str("---\n\n");
    out
}

/// Substitute `{placeholder}` markers in a phrase template
fn fill(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (marker, value) in pairs {
        out = out.replace(marker, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PageMetadata {
        PageMetadata {
            title: Some("Example Domain".into()),
            url: Some("https://example.com/".into()),
            description: Some("An example page".into()),
            canonical: Some("https://example.com/canonical".into()),
            page_lang: Some("en".into()),
            extracted_at: Some("2025/03/14 09:30".into()),
            element_description: Some("article#post.entry".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let out = generate(&sample(), Language::English);
        let context = out.find("# Content Context").unwrap();
        let source = out.find("## Source Information").unwrap();
        let details = out.find("## Extraction Details").unwrap();
        let scope = out.find("## Content Scope and Limitations").unwrap();
        assert!(context < source && source < details && details < scope);
        assert!(out.ends_with("---\n\n"));
    }

    #[test]
    fn test_names_the_selected_element() {
        let out = generate(&sample(), Language::English);
        assert!(out.contains("\"article#post.entry\""));
    }

    #[test]
    fn test_seo_section_absent_without_any_seo_field() {
        let out = generate(&sample(), Language::English);
        assert!(!out.contains("SEO and Social Media Context"));
    }

    #[test]
    fn test_seo_section_present_with_any_one_field() {
        let setters: [fn(&mut PageMetadata); 4] = [
            |m| m.keywords = Some("rust, markdown".into()),
            |m| m.author = Some("A. Writer".into()),
            |m| m.og_title = Some("Shared Title".into()),
            |m| m.twitter_card = Some("summary".into()),
        ];
        for set in setters {
            let mut meta = sample();
            set(&mut meta);
            let out = generate(&meta, Language::English);
            assert!(out.contains("## SEO and Social Media Context"));
        }
    }

    #[test]
    fn test_open_graph_paragraph_mentions_type_and_site() {
        let meta = PageMetadata {
            og_title: Some("Shared Title".into()),
            og_type: Some("article".into()),
            og_site_name: Some("Example".into()),
            ..sample()
        };
        let out = generate(&meta, Language::English);
        assert!(out.contains("The content type is \"article\"."));
        assert!(out.contains("The site name is \"Example\"."));
    }

    #[test]
    fn test_twitter_paragraph() {
        let meta = PageMetadata {
            twitter_card: Some("summary_large_image".into()),
            twitter_site: Some("@example".into()),
            ..sample()
        };
        let out = generate(&meta, Language::English);
        assert!(out.contains("set to \"summary_large_image\""));
        assert!(out.contains("Related Twitter account: @example"));
    }

    #[test]
    fn test_canonical_suppressed_when_equal_to_url() {
        let mut meta = sample();
        meta.canonical = meta.url.clone();
        let out = generate(&meta, Language::English);
        assert!(!out.contains("Canonical URL"));

        let out = generate(&sample(), Language::English);
        assert!(out.contains("**Canonical URL**: https://example.com/canonical"));
    }

    #[test]
    fn test_missing_page_lang_reads_unknown() {
        let mut meta = sample();
        meta.page_lang = None;
        let out = generate(&meta, Language::English);
        assert!(out.contains("**Language**: unknown"));
    }

    #[test]
    fn test_empty_record_never_panics() {
        let out = generate(&PageMetadata::default(), Language::English);
        assert!(out.starts_with("# Content Context"));
        assert!(out.ends_with("---\n\n"));
    }

    #[test]
    fn test_japanese_localizes_every_section() {
        let out = generate(&sample(), Language::Japanese);
        assert!(out.contains("# コンテンツコンテキスト"));
        assert!(out.contains("## ソース情報"));
        assert!(out.contains("## 抽出詳細"));
        assert!(out.contains("## コンテンツの範囲と制限"));
        assert!(out.contains("「Example Domain」"));
    }

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        let out = generate(&sample(), Language::from_code("fr"));
        assert!(out.starts_with("# Content Context"));
    }
}
