// slipclean-core/tests/sanitize_properties_tests.rs
use slipclean_core::{sanitize, sanitize_and_validate, Rejection, TagPolicy};
use slipclean_markup::{TokenKind, Tokenizer};

/// Re-lexes sanitizer output and checks that every tag in it is an allowed
/// start or end tag, and that they pair up.
fn assert_safe_and_balanced(output: &str) {
    let policy = TagPolicy::default();
    let mut open: Vec<String> = Vec::new();
    for token in Tokenizer::new(output) {
        match token.kind() {
            TokenKind::Text => {
                assert!(!token.raw().contains('<'), "raw '<' in text of {output:?}");
            }
            TokenKind::StartTag => {
                let name = token.tag_name().into_owned();
                assert!(policy.allows_tag(&name), "disallowed <{name}> in {output:?}");
                open.push(name);
            }
            TokenKind::EndTag => {
                let name = token.tag_name();
                assert_eq!(open.pop().as_deref(), Some(&*name), "unbalanced </{name}> in {output:?}");
            }
            other => panic!("unexpected {other:?} token in {output:?}"),
        }
    }
    assert!(open.is_empty(), "unclosed {open:?} in {output:?}");
}

const HOSTILE_INPUTS: &[&str] = &[
    "<b>hi</b>",
    "<b><i>x</b></i>",
    "<i><b>x</i></b>",
    "<<b>>",
    "</b><b>",
    "<a href=x><a href=y>z</a></a>",
    "<b>a<script>b</script>c</b>",
    "<tt><em><u><s>deep",
    "http://x.y <B>http://z.w/p/</b>",
    "<!-- <b> -->",
    "<b/>",
    "a < b > c & d",
    "</>",
    "<b>",
    "<u>x</u></u></u>",
    "<title><b>x</b></title>",
    "<img src=x onerror=alert(1)>",
    "<a href=\"javascript:alert(1)\" onclick=\"x\">t</a>",
    "<svg><script>alert(1)</script></svg>",
    "<b\0>x</b\x7f>",
];

#[test]
fn scripts_are_neutralized() {
    assert_eq!(
        sanitize("<script>alert(1)</script>"),
        "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
}

#[test]
fn allowed_formatting_survives() {
    assert_eq!(sanitize("<b>hi</b>"), "<b>hi</b>");
}

#[test]
fn mismatched_nesting_is_repaired() {
    let out = sanitize("<b><i>x</b></i>");
    assert_eq!(out, "<b>&lt;i&gt;x</b>&lt;/i&gt;");
    assert_safe_and_balanced(&out);
}

#[test]
fn bare_urls_are_autolinked() {
    assert_eq!(
        sanitize("see http://example.com/a now"),
        r#"see <a href="http://example.com/a">[url]</a> now"#
    );
}

#[test]
fn validation_rejects_empty_and_timestamps() {
    assert_eq!(sanitize_and_validate(""), Err(Rejection::Empty));

    let rejection = sanitize_and_validate("2024-01-02T03:04:05").unwrap_err();
    assert_eq!(rejection.rule(), Some("timestamp"));
    assert_eq!(rejection.to_string(), "disallowed timestamp-like content");

    assert_eq!(sanitize_and_validate("posted at 2024-01-02 03:04"), Ok("posted at 2024-01-02 03:04".to_string()));
    assert_eq!(sanitize_and_validate("hello"), Ok(sanitize("hello")));
}

#[test]
fn timestamps_split_by_markup_are_still_seen_after_sanitizing() {
    assert!(sanitize_and_validate("<b>2024-01-02T03:04:05</b>").is_err());
}

#[test]
fn control_characters_are_removed_and_nothing_else() {
    assert_eq!(sanitize("a\0b\x7fc"), "abc");
    assert_eq!(sanitize("line\none\ttab\r"), "lineonetab");
    assert_eq!(sanitize("héllo ✓ \u{80}"), "héllo ✓ \u{80}");
}

#[test]
fn escaping_is_total_and_ampersand_first() {
    assert_eq!(sanitize("a & b"), "a &amp; b");
    assert_eq!(sanitize("&lt;"), "&amp;lt;");
    assert_eq!(sanitize("1 > 0"), "1 &gt; 0");
}

#[test]
fn hostile_inputs_yield_safe_balanced_output() {
    for input in HOSTILE_INPUTS {
        assert_safe_and_balanced(&sanitize(input));
    }
}

#[test]
fn sanitizing_twice_is_still_safe() {
    for input in HOSTILE_INPUTS {
        assert_safe_and_balanced(&sanitize(&sanitize(input)));
    }
}

#[test]
fn concurrent_callers_need_no_coordination() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let input = format!("<b>{i}</b><i>open");
                (sanitize(&input), format!("<b>{i}</b>&lt;i&gt;open"))
            })
        })
        .collect();

    for handle in handles {
        let (got, want) = handle.join().unwrap();
        assert_eq!(got, want);
    }
}

#[test]
fn adversarial_nesting_and_stray_end_tags_scale() {
    let n = 100_000;

    let nested = format!("{}x{}", "<b>".repeat(n), "</b>".repeat(n));
    assert_eq!(sanitize(&nested), nested);

    let unclosed = "<i>".repeat(n);
    assert_eq!(sanitize(&unclosed), "&lt;i&gt;".repeat(n));

    let stray = format!("<b></b>{}", "x</b>".repeat(n));
    assert_eq!(sanitize(&stray), format!("<b></b>{}", "x&lt;/b&gt;".repeat(n)));
}
