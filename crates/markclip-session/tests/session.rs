//! End-to-end session tests: request handling, state transitions, clipboard
//! delivery, preamble assembly.

use markclip::{ConvertService, Node};
use markclip_session::{
    ClipboardSink, ConversionMode, ConversionSession, MemoryClipboard, ResolvedSettings,
    SessionError, SessionState,
};

const URL: &str = "https://example.com/post";
const EXTRACTED_AT: &str = "2025/03/14 09:30";

/// A sink whose writes always fail
struct RejectingSink {
    attempts: usize,
}

impl ClipboardSink for RejectingSink {
    fn write(&mut self, _text: &str) -> bool {
        self.attempts += 1;
        false
    }
}

fn sample_document() -> Node {
    let mut title = Node::element("title");
    title.add_child(Node::text("Example Post"));

    let mut head = Node::element("head");
    head.add_child(title);
    head.add_child(Node::element_with_attrs(
        "meta",
        vec![("name", "description"), ("content", "A worked example")],
    ));

    let mut p = Node::element("p");
    p.add_child(Node::text("Hello world"));
    let mut main = Node::element("main");
    main.add_child(p);

    let mut nav = Node::element("nav");
    nav.add_child(Node::text("menu"));

    let mut body = Node::element("body");
    body.add_child(nav);
    body.add_child(main);

    let mut html = Node::element_with_attrs("html", vec![("lang", "en")]);
    html.add_child(head);
    html.add_child(body);

    let mut document = Node::document();
    document.add_child(html);
    document
}

fn session(include_metadata: bool) -> ConversionSession {
    ConversionSession::new(
        ConvertService::new(),
        ResolvedSettings {
            include_metadata,
            language: "en".to_string(),
        },
    )
}

#[test]
fn full_page_without_metadata_converts_content_root() {
    let document = sample_document();
    let mut session = session(false);
    let mut clipboard = MemoryClipboard::default();

    let outcome = session
        .convert_full_page(&document, URL, EXTRACTED_AT, &mut clipboard)
        .unwrap();

    assert!(outcome.copied);
    assert_eq!(outcome.markdown, "Hello world");
    assert_eq!(clipboard.contents(), Some("Hello world"));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn full_page_with_metadata_prepends_preamble() {
    let document = sample_document();
    let mut session = session(true);
    let mut clipboard = MemoryClipboard::default();

    let outcome = session
        .convert_full_page(&document, URL, EXTRACTED_AT, &mut clipboard)
        .unwrap();

    assert!(outcome.markdown.starts_with("# Content Context"));
    assert!(outcome.markdown.contains("**Original Page Title**: Example Post"));
    assert!(outcome.markdown.contains("**Source URL**: https://example.com/post"));
    assert!(outcome.markdown.contains("A worked example"));
    assert!(outcome.markdown.ends_with("Hello world"));
}

#[test]
fn sink_receives_exactly_one_write() {
    let document = sample_document();
    let mut session = session(true);
    let mut clipboard = MemoryClipboard::default();

    session
        .convert_full_page(&document, URL, EXTRACTED_AT, &mut clipboard)
        .unwrap();
    assert_eq!(clipboard.writes(), 1);
}

#[test]
fn clipboard_failure_is_reported_not_fatal() {
    let document = sample_document();
    let mut session = session(false);
    let mut sink = RejectingSink { attempts: 0 };

    let outcome = session
        .convert_full_page(&document, URL, EXTRACTED_AT, &mut sink)
        .unwrap();

    assert!(!outcome.copied);
    assert_eq!(outcome.markdown, "Hello world");
    // No retry: one attempt, and the session is reusable afterwards.
    assert_eq!(sink.attempts, 1);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn selection_flow_converts_clicked_element() {
    let document = sample_document();
    let mut session = session(false);
    let mut clipboard = MemoryClipboard::default();

    session.begin_selection().unwrap();
    assert_eq!(session.state(), SessionState::Selecting);

    // The user clicks the <p> inside <main>.
    let html = document.children().next().unwrap();
    let body = html.children().nth(1).unwrap();
    let main = body.children().nth(1).unwrap();
    let p = main.children().next().unwrap();

    let outcome = session
        .complete_selection(&document, p, URL, EXTRACTED_AT, &mut clipboard)
        .unwrap();

    assert_eq!(outcome.markdown, "Hello world");
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn selection_names_the_element_in_the_preamble() {
    let mut article = Node::element_with_attrs("article", vec![("id", "post")]);
    let mut p = Node::element("p");
    p.add_child(Node::text("Body"));
    article.add_child(p);
    let mut body = Node::element("body");
    body.add_child(article);
    let mut document = Node::document();
    document.add_child(body);

    let mut session = session(true);
    let mut clipboard = MemoryClipboard::default();

    session.begin_selection().unwrap();
    let article_node = document.children().next().unwrap().children().next().unwrap();
    let outcome = session
        .complete_selection(&document, article_node, URL, EXTRACTED_AT, &mut clipboard)
        .unwrap();

    assert!(outcome.markdown.contains("\"article#post\""));
}

#[test]
fn busy_session_rejects_new_requests() {
    let mut session = session(false);
    session.begin_selection().unwrap();

    match session.begin_selection() {
        Err(SessionError::Busy { state }) => assert_eq!(state, SessionState::Selecting),
        other => panic!("expected Busy, got {:?}", other.err()),
    }

    let document = sample_document();
    let mut clipboard = MemoryClipboard::default();
    assert!(matches!(
        session.convert_full_page(&document, URL, EXTRACTED_AT, &mut clipboard),
        Err(SessionError::Busy { .. })
    ));
}

#[test]
fn completing_without_arming_is_an_error() {
    let document = sample_document();
    let mut session = session(false);
    let mut clipboard = MemoryClipboard::default();

    let p = Node::element("p");
    assert!(matches!(
        session.complete_selection(&document, &p, URL, EXTRACTED_AT, &mut clipboard),
        Err(SessionError::NotSelecting)
    ));
}

#[test]
fn cancel_returns_to_idle() {
    let mut session = session(false);
    session.begin_selection().unwrap();
    session.cancel();
    assert_eq!(session.state(), SessionState::Idle);

    // And the session is usable again.
    session.begin_selection().unwrap();
    assert_eq!(session.state(), SessionState::Selecting);
}

#[test]
fn handle_request_dispatches_by_mode() {
    let document = sample_document();
    let mut session = session(false);
    let mut clipboard = MemoryClipboard::default();

    let armed = session
        .handle_request(
            ConversionMode::Selection,
            &document,
            URL,
            EXTRACTED_AT,
            &mut clipboard,
        )
        .unwrap();
    assert!(armed.is_none());
    assert_eq!(session.state(), SessionState::Selecting);

    session.cancel();
    let outcome = session
        .handle_request(
            ConversionMode::FullPage,
            &document,
            URL,
            EXTRACTED_AT,
            &mut clipboard,
        )
        .unwrap()
        .unwrap();
    assert_eq!(outcome.markdown, "Hello world");
}

#[test]
fn failed_conversion_restores_idle() {
    // Nest past the recursion ceiling so the engine errors out.
    let mut deep = Node::element("p");
    deep.add_child(Node::text("bottom"));
    for _ in 0..(markclip::MAX_DEPTH + 10) {
        let mut wrapper = Node::element("div");
        wrapper.add_child(deep);
        deep = wrapper;
    }
    let mut body = Node::element("body");
    body.add_child(deep);
    let mut document = Node::document();
    document.add_child(body);

    let mut session = session(false);
    let mut clipboard = MemoryClipboard::default();

    let result = session.convert_full_page(&document, URL, EXTRACTED_AT, &mut clipboard);
    assert!(matches!(result, Err(SessionError::Conversion(_))));
    // Nothing was written and the session recovered.
    assert_eq!(clipboard.writes(), 0);
    assert_eq!(session.state(), SessionState::Idle);
}
