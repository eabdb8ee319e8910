use super::{bracket_keys, dotted_prefix, extension_of, find_ci, has_brackets, replace_all_ci};

#[test]
fn test_extension_from_last_dot() {
    assert_eq!(extension_of("dist/app.js"), ".js");
    assert_eq!(extension_of("dist/app.min.js"), ".js");
    assert_eq!(extension_of("styles/site.css"), ".css");
    assert_eq!(extension_of("README"), "");
}

#[test]
fn test_find_ci_matches_any_case() {
    let html = "<body><!-- SINTER:concat --></body>";
    assert_eq!(find_ci(html, "<!-- sinter:", 0), Some(6));
    assert_eq!(find_ci(html, "<!-- sinter:", 7), None);
    assert_eq!(find_ci(html, "", 0), None);
}

#[test]
fn test_replace_all_ci_is_global() {
    let out = replace_all_ci("abXabxAB", "ab", "-");
    assert_eq!(out, "-X-x-");
}

#[test]
fn test_replace_all_ci_leaves_non_matches() {
    let out = replace_all_ci("nothing here", "<!-- x -->", "tag");
    assert_eq!(out, "nothing here");
}

#[test]
fn test_bracket_detection_and_extraction() {
    assert!(has_brackets("concat.app[files][dist/app.js]"));
    assert!(!has_brackets("concat.app.src"));

    assert_eq!(dotted_prefix("concat.app[files][dist/app.js]"), "concat.app");
    assert_eq!(dotted_prefix("concat.app.src"), "concat.app.src");

    let keys = bracket_keys("concat.app[files][dist/app.js]");
    assert_eq!(keys, vec!["files".to_string(), "dist/app.js".to_string()]);
    assert!(bracket_keys("concat.app.src").is_empty());
}

#[test]
fn test_unclosed_bracket_ends_scan() {
    assert_eq!(bracket_keys("concat.app[files][oops"), vec!["files".to_string()]);
}
