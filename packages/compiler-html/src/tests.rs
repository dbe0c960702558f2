use crate::{
    compose, compose_standalone, compose_with_options, ComposeOptions, FrameMode, PreviewFrame,
    SandboxPolicy,
};
use swatch_common::Fragments;

fn fancy_card() -> Fragments {
    Fragments::new("<div>A</div>", ".a{color:red}", "")
}

#[test]
fn test_compose_preview_document() {
    let doc = compose(&fancy_card());

    let expected = concat!(
        "<!DOCTYPE html>\n",
        "<html>\n",
        "  <head>\n",
        "    <style>.a{color:red}</style>\n",
        "  </head>\n",
        "  <body>\n",
        "<div>A</div>\n",
        "    <script></script>\n",
        "  </body>\n",
        "</html>\n",
    );

    assert_eq!(doc.as_str(), expected);
}

#[test]
fn test_compose_is_deterministic() {
    let fragments = Fragments::new(
        "<button id=\"b\">Go</button>",
        "button { color: red; }",
        "document.getElementById('b').onclick = () => alert(1);",
    );

    let first = compose(&fragments);
    let second = compose(&fragments);
    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
}

#[test]
fn test_compose_orders_style_body_script() {
    let doc = compose(&Fragments::new("<p>markup</p>", "p{}", "run()"));
    let markup = doc.as_str();

    let style = markup.find("<style>p{}</style>").unwrap();
    let body = markup.find("<p>markup</p>").unwrap();
    let script = markup.find("<script>run()</script>").unwrap();
    assert!(style < body);
    assert!(body < script);
}

#[test]
fn test_compose_does_not_escape_fragments() {
    let fragments = Fragments::new(
        "<img src=x onerror=\"go('&')\">",
        "a::after { content: \"<>\"; }",
        "if (a < b && c > d) {}",
    );

    let doc = compose(&fragments);
    assert!(doc.as_str().contains("<img src=x onerror=\"go('&')\">"));
    assert!(doc.as_str().contains("<style>a::after { content: \"<>\"; }</style>"));
    assert!(doc.as_str().contains("<script>if (a < b && c > d) {}</script>"));
}

#[test]
fn test_compose_keeps_multiline_fragments_verbatim() {
    let html = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>";
    let css = "li {\n  color: blue;\n}\n";
    let doc = compose(&Fragments::new(html, css, ""));

    assert!(doc.as_str().contains(html));
    assert!(doc.as_str().contains(&format!("<style>{}</style>", css)));
}

#[test]
fn test_compose_empty_fragments() {
    let doc = compose(&Fragments::default());
    assert!(doc.as_str().contains("<style></style>"));
    assert!(doc.as_str().contains("<script></script>"));
}

#[test]
fn test_compose_without_pretty_print() {
    let options = ComposeOptions {
        pretty: false,
        ..Default::default()
    };
    let doc = compose_with_options(&fancy_card(), &options);

    assert_eq!(
        doc.as_str(),
        "<!DOCTYPE html><html><head><style>.a{color:red}</style></head><body><div>A</div><script></script></body></html>"
    );
}

#[test]
fn test_compose_standalone_document() {
    let doc = compose_standalone("Fancy Card", &fancy_card());
    let markup = doc.as_str();

    assert!(markup.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
    assert!(markup.contains("<meta charset=\"UTF-8\">"));
    assert!(markup.contains("<title>Fancy Card</title>"));
    assert!(markup.contains("<style>.a{color:red}</style>"));
    assert!(markup.contains("<div>A</div>"));
}

#[test]
fn test_compose_standalone_escapes_title_only() {
    let doc = compose_standalone("Cards & <Buttons>", &fancy_card());

    assert!(doc.as_str().contains("<title>Cards &amp; &lt;Buttons&gt;</title>"));
    assert!(doc.as_str().contains("<div>A</div>"));
}

#[test]
fn test_compose_standalone_default_title() {
    let doc = compose_standalone("   ", &fancy_card());
    assert!(doc.as_str().contains("<title>Template</title>"));
}

#[test]
fn test_sandbox_policy_values() {
    let policy = SandboxPolicy::default();
    assert_eq!(policy.iframe_attribute(), "allow-scripts");
    assert_eq!(policy.content_security_policy(), "sandbox allow-scripts");

    let locked = SandboxPolicy {
        allow_scripts: false,
    };
    assert_eq!(locked.iframe_attribute(), "");
    assert_eq!(locked.content_security_policy(), "sandbox");
}

#[test]
fn test_live_frame_embeds_escaped_document() {
    let frame = PreviewFrame::live(compose(&fancy_card()), "Live Preview");
    let iframe = frame.to_iframe_html();

    assert!(iframe.starts_with("<iframe srcdoc=\"&lt;!DOCTYPE html&gt;"));
    assert!(iframe.contains("sandbox=\"allow-scripts\""));
    assert!(iframe.contains("title=\"Live Preview\""));
    assert!(!iframe.contains("pointer-events"));
}

#[test]
fn test_thumbnail_frame_leaves_document_untouched() {
    let live = compose(&fancy_card());
    let frame = PreviewFrame::thumbnail(compose(&fancy_card()), "Fancy Card");

    assert_eq!(frame.document, live);
    assert_eq!(frame.mode, FrameMode::Thumbnail { scale: 0.6 });
    assert_eq!(frame.title, "Preview of Fancy Card");

    let style = frame.frame_style();
    assert!(style.contains("pointer-events: none"));
    assert!(style.contains("transform: scale(0.6)"));
    assert!(style.contains("overflow: hidden"));
}
