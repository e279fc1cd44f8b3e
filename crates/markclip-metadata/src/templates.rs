//! Per-language phrase tables for the preamble.
//!
//! Sentences that interpolate a value carry `{placeholder}` markers filled
//! by the generator; everything else is used verbatim. Both languages
//! localize every section.

/// Supported preamble languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
}

impl Language {
    /// Map a settings-store language code to a language.
    ///
    /// Unknown or unsupported codes fall back to English; this never fails.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ja" => Language::Japanese,
            _ => Language::English,
        }
    }

    /// The canonical code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    pub(crate) fn phrases(&self) -> &'static Phrases {
        match self {
            Language::English => &EN,
            Language::Japanese => &JA,
        }
    }
}

pub(crate) struct Phrases {
    pub content_context: &'static str,
    pub intro: &'static str,
    pub page_sentence: &'static str,
    pub source_info: &'static str,
    pub original_title: &'static str,
    pub source_url: &'static str,
    pub canonical_url: &'static str,
    pub canonical_note: &'static str,
    pub page_description: &'static str,
    pub language_label: &'static str,
    pub extracted_at_label: &'static str,
    pub extraction_details: &'static str,
    pub extraction_paragraph: &'static str,
    pub default_element: &'static str,
    pub scope_heading: &'static str,
    pub scope_bullets: [&'static str; 4],
    pub seo_heading: &'static str,
    pub keywords_label: &'static str,
    pub keywords_note: &'static str,
    pub author_label: &'static str,
    pub author_note: &'static str,
    pub og_label: &'static str,
    pub og_lead: &'static str,
    pub og_type_sentence: &'static str,
    pub og_site_sentence: &'static str,
    pub twitter_label: &'static str,
    pub twitter_sentence: &'static str,
    pub twitter_site_sentence: &'static str,
}

static EN: Phrases = Phrases {
    content_context: "Content Context",
    intro: "This Markdown document was extracted from a web page using HTML-to-Markdown conversion.",
    page_sentence: "The original page is \"{title}\" and was extracted on {time}.",
    source_info: "Source Information",
    original_title: "Original Page Title",
    source_url: "Source URL",
    canonical_url: "Canonical URL",
    canonical_note: "(Different canonical URL is set)",
    page_description: "Page Description",
    language_label: "Language",
    extracted_at_label: "Extracted At",
    extraction_details: "Extraction Details",
    extraction_paragraph: "This content was converted from HTML to Markdown by a browser extension. The conversion target was the \"{element}\" element; only the selected portion of the page, not the whole document, is included.",
    default_element: "selected HTML",
    scope_heading: "Content Scope and Limitations",
    scope_bullets: [
        "This Markdown represents only a portion of the original web page",
        "Surrounding content such as navigation menus, sidebars, and footers is not included",
        "Content generated dynamically by JavaScript and interactive elements may be missing",
        "Only the static HTML content at the time of conversion is preserved",
    ],
    seo_heading: "SEO and Social Media Context",
    keywords_label: "Keywords",
    keywords_note: "Indicates the primary topics and SEO target keywords of this page.",
    author_label: "Author",
    author_note: "Identifies the creator of this content.",
    og_label: "Open Graph",
    og_lead: "This page is designed for sharing on social media.",
    og_type_sentence: " The content type is \"{type}\".",
    og_site_sentence: " The site name is \"{site}\".",
    twitter_label: "Twitter Card",
    twitter_sentence: "The Twitter display format is set to \"{card}\".",
    twitter_site_sentence: " Related Twitter account: {account}",
};

static JA: Phrases = Phrases {
    content_context: "コンテンツコンテキスト",
    intro: "このMarkdown文書は、Webページの一部をHTML-to-Markdown変換によって抽出したものです。",
    page_sentence: "元のページは「{title}」で、{time}に取得されました。",
    source_info: "ソース情報",
    original_title: "元ページタイトル",
    source_url: "ソースURL",
    canonical_url: "正規URL",
    canonical_note: "(元URLとは異なる正規URLが設定されています)",
    page_description: "ページ説明",
    language_label: "言語",
    extracted_at_label: "抽出日時",
    extraction_details: "抽出詳細",
    extraction_paragraph: "このコンテンツは、ブラウザ拡張機能を使用してHTMLからMarkdownに変換されました。変換対象は「{element}」要素で、ページ全体ではなく選択された部分のみが含まれています。",
    default_element: "HTML",
    scope_heading: "コンテンツの範囲と制限",
    scope_bullets: [
        "このMarkdownは元のWebページの一部分のみを表現しています",
        "ナビゲーションメニュー、サイドバー、フッターなどの周辺コンテンツは含まれていません",
        "JavaScriptによって動的に生成されるコンテンツや、インタラクティブな要素は失われている可能性があります",
        "変換時点での静的なHTMLコンテンツのみが保持されています",
    ],
    seo_heading: "SEO・ソーシャルメディアコンテキスト",
    keywords_label: "キーワード",
    keywords_note: "このページの主要トピックやSEO対象キーワードを示しています。",
    author_label: "著者",
    author_note: "このコンテンツの作成者情報です。",
    og_label: "Open Graph情報",
    og_lead: "このページはソーシャルメディアでの共有を想定して設計されています。",
    og_type_sentence: " コンテンツタイプは「{type}」として分類されています。",
    og_site_sentence: " サイト名は「{site}」です。",
    twitter_label: "Twitter Card",
    twitter_sentence: "Twitter上での表示形式として「{card}」が設定されています。",
    twitter_site_sentence: " 関連Twitterアカウント: {account}",
};
