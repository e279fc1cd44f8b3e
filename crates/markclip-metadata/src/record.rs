//! The page metadata record.

/// Everything the preamble can mention about a page, all optional.
///
/// Populated once per conversion request by whoever can see the document
/// (see `markclip-session`), consumed exactly once by [`crate::generate`],
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Document title
    pub title: Option<String>,
    /// Address the page was loaded from
    pub url: Option<String>,
    /// `meta[name="description"]`, falling back to `og:description`
    pub description: Option<String>,
    /// `link[rel="canonical"]` target
    pub canonical: Option<String>,
    /// Root element's `lang` attribute
    pub page_lang: Option<String>,
    /// Human-readable extraction timestamp, preformatted by the caller
    pub extracted_at: Option<String>,
    /// `meta[name="keywords"]`
    pub keywords: Option<String>,
    /// `meta[name="author"]`
    pub author: Option<String>,
    /// `meta[property="og:title"]`
    pub og_title: Option<String>,
    /// `meta[property="og:type"]`
    pub og_type: Option<String>,
    /// `meta[property="og:image"]`
    pub og_image: Option<String>,
    /// `meta[property="og:site_name"]`
    pub og_site_name: Option<String>,
    /// `meta[name="twitter:card"]`
    pub twitter_card: Option<String>,
    /// `meta[name="twitter:site"]`
    pub twitter_site: Option<String>,
    /// Selector-like label of the converted element (`div#main.article`)
    pub element_description: Option<String>,
}

impl PageMetadata {
    /// True when at least one SEO/social field is set, which is what gates
    /// the preamble's SEO section
    pub fn has_seo_context(&self) -> bool {
        let set = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
        set(&self.keywords) || set(&self.author) || set(&self.og_title) || set(&self.twitter_card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_no_seo_context() {
        assert!(!PageMetadata::default().has_seo_context());
    }

    #[test]
    fn test_any_single_field_enables_seo_context() {
        let setters: [fn(&mut PageMetadata); 4] = [
            |m| m.keywords = Some("rust".into()),
            |m| m.author = Some("someone".into()),
            |m| m.og_title = Some("a title".into()),
            |m| m.twitter_card = Some("summary".into()),
        ];
        for set in setters {
            let mut meta = PageMetadata::default();
            set(&mut meta);
            assert!(meta.has_seo_context());
        }
    }

    #[test]
    fn test_blank_values_do_not_count() {
        let meta = PageMetadata {
            keywords: Some(String::new()),
            ..Default::default()
        };
        assert!(!meta.has_seo_context());
    }
}
