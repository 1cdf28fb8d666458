//! Tests for the tag cleaning pipeline and the vendor rules.

use tagsheet_model::{NormalizationContext, TagNote};
use tagsheet_transform::{clean, macro_dialect, vendor_rules, RuleGate};

fn plain() -> NormalizationContext {
    NormalizationContext::new()
}

fn kids() -> NormalizationContext {
    NormalizationContext::new().with_kids_compliance(true)
}

#[test]
fn end_to_end_timestamp_tag() {
    let cleaned = clean("http://x.com/ad?cb=[timestamp]", &plain());
    assert_eq!(cleaned.cleaned_tag, "http://x.com/ad?cb=%%CACHEBUSTER%%");
    assert_eq!(cleaned.notes.to_string(), "Macros updated");
}

#[test]
fn img_wrapper_any_casing() {
    for wrapper in [
        r#"<img src="https://ad.example.com/pixel?id=1">"#,
        r#"<IMG src="https://ad.example.com/pixel?id=1">"#,
        r#"<Img src="https://ad.example.com/pixel?id=1" width="1" height="1"/>"#,
    ] {
        let cleaned = clean(wrapper, &plain());
        assert_eq!(cleaned.cleaned_tag, "https://ad.example.com/pixel?id=1");
        assert!(cleaned.notes.contains(TagNote::HtmlImgWrapperRemoved));
        assert!(!cleaned.notes.contains(TagNote::MacrosUpdated));
    }
}

#[test]
fn img_without_src_is_left_alone() {
    let tag = r#"<img border="0" alt="ad">"#;
    let cleaned = clean(tag, &plain());
    assert_eq!(cleaned.cleaned_tag, tag);
    assert_eq!(cleaned.notes.to_string(), "Macros updated");
}

#[test]
fn vast_wrapper_is_decoded_before_macros() {
    let cleaned = clean(
        "https://vast.example.com/v?_vast=https%3A%2F%2Fad.example.com%2Fx%3Fcb%3D%5Bord%5D",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://vast.example.com/v?_vast=https://ad.example.com/x?cb=%%CACHEBUSTER%%"
    );
}

#[test]
fn percent_escapes_without_vast_marker_are_kept() {
    let tag = "https://a.com/x?u=https%3A%2F%2Fb.com";
    assert_eq!(clean(tag, &plain()).cleaned_tag, tag);
}

#[test]
fn kids_compliance_rewrites_doubleclick_only_when_enabled() {
    let tag = "https://ad.doubleclick.net/ddm/adj/N123.site/B1;sz=1x1;tfua=0;tag_for_child_directed_treatment=0;ord=[timestamp]?";

    let on = clean(tag, &kids());
    assert!(on.cleaned_tag.contains("tfua=1;"));
    assert!(on.cleaned_tag.contains("tag_for_child_directed_treatment=1;"));
    assert!(on.cleaned_tag.ends_with("ord=%%CACHEBUSTER%%?"));
    assert_eq!(on.notes.to_string(), "Kids compliance applied");

    let off = clean(tag, &plain());
    assert!(off.cleaned_tag.contains("tfua=0;"));
    assert!(off.cleaned_tag.contains("tag_for_child_directed_treatment=0;"));
    assert_eq!(off.notes.to_string(), "Macros updated");
}

#[test]
fn kids_compliance_ignores_other_hosts() {
    let tag = "https://ads.example.com/x?tfua=0";
    let cleaned = clean(tag, &kids());
    assert_eq!(cleaned.cleaned_tag, tag);
    assert!(!cleaned.notes.contains(TagNote::KidsComplianceApplied));
}

#[test]
fn kids_compliance_notes_even_without_parameters() {
    let cleaned = clean("https://track.dcm.net/p?x=1", &kids());
    assert_eq!(cleaned.cleaned_tag, "https://track.dcm.net/p?x=1");
    assert!(cleaned.notes.contains(TagNote::KidsComplianceApplied));
}

#[test]
fn sizmek_caret_is_encoded() {
    let cleaned = clean(
        "https://bs.serving-sys.com/Serving/adServer.bs?c=8&cn=display&pli=1^2&ord=[ord]",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://bs.serving-sys.com/Serving/adServer.bs?c=8&cn=display&pli=1%5E2&ord=%%CACHEBUSTER%%"
    );
    assert_eq!(
        cleaned.notes.to_string(),
        "Replaced ^ with %5E for Sizmek compliance; Sizmek tag cleaned"
    );
}

#[test]
fn mediamind_and_sizmek_hosts_share_the_rule() {
    for host in ["bs.mediamind.com", "ads.sizmek.com", "BS.Serving-Sys.com"] {
        let cleaned = clean(&format!("https://{host}/a"), &plain());
        assert_eq!(cleaned.notes.to_string(), "Sizmek tag cleaned", "host {host}");
    }
}

#[test]
fn nielsen_quotes_are_stripped() {
    let cleaned = clean(
        "\"https://secure-gl.imrworldwide.com/cgi-bin/m?ci=nlsn&cg=0&rnd=[random]\"",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://secure-gl.imrworldwide.com/cgi-bin/m?ci=nlsn&cg=0&rnd=%%RANDOM%%"
    );
    assert_eq!(cleaned.notes.to_string(), "Nielsen tag cleaned");
}

#[test]
fn flashtalking_cachebuster_is_canonical() {
    let cleaned = clean(
        "https://servedby.flashtalking.com/imp/8/1;[CACHEBUSTER]",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://servedby.flashtalking.com/imp/8/1;%%CACHEBUSTER%%"
    );
    assert_eq!(cleaned.notes.to_string(), "Flashtalking macros updated");
}

#[test]
fn extreme_reach_notes_once() {
    let cleaned = clean(
        "https://ads.extremereach.io/v?cb=[timestamp]&t=[TIMESTAMP]",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://ads.extremereach.io/v?cb=%%CACHEBUSTER%%&t=%%CACHEBUSTER%%"
    );
    assert_eq!(cleaned.notes.to_string(), "Extreme Reach macros updated");
}

#[test]
fn independent_vendor_rules_all_fire() {
    let cleaned = clean(
        "\"https://ad.doubleclick.net/x;tfua=0?r=https://bs.serving-sys.com/^\"",
        &kids(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "\"https://ad.doubleclick.net/x;tfua=1?r=https://bs.serving-sys.com/%5E\""
    );
    assert_eq!(
        cleaned.notes.to_string(),
        "Kids compliance applied; Replaced ^ with %5E for Sizmek compliance; Sizmek tag cleaned"
    );
}

#[test]
fn broken_cachebusters_are_repaired() {
    let cleaned = clean(
        "https://a.com/x?a={INSERT_CACHEBREAKER_HERE}&b=INSERT CACHEBUSTER&c=%REPLACE-TIMESTAMP-MACRO%",
        &plain(),
    );
    assert_eq!(
        cleaned.cleaned_tag,
        "https://a.com/x?a=%%CACHEBUSTER%%&b=%%CACHEBUSTER%%&c=%%CACHEBUSTER%%"
    );
}

#[test]
fn replace_timestamp_token_next_to_percent() {
    let cleaned = clean("https://a.com/c?r=x%REPLACE-TIMESTAMP-MACRO%%26y=1", &plain());
    assert_eq!(cleaned.cleaned_tag, "https://a.com/c?r=x%%CACHEBUSTER%%%26y=1");

    let once = clean("%REPLACE-TIMESTAMP-MACRO%REPLACE-TIMESTAMP-MACRO%", &plain());
    assert_eq!(once.cleaned_tag, "%%CACHEBUSTER%%%CACHEBUSTER%%");
    assert_eq!(clean(&once.cleaned_tag, &plain()), once);
}

#[test]
fn encoded_img_wrapper_in_vast_tag_cleans_once() {
    let once = clean(
        "https://a.com/v?_vast=%3Cimg%20src%3D%22https%3A%2F%2Fb.com%2Fp%3Ford%3D[ord]%22%3E",
        &plain(),
    );
    assert_eq!(once.cleaned_tag, "https://b.com/p?ord=%%CACHEBUSTER%%");
    assert_eq!(once.notes.to_string(), "HTML img wrapper removed");

    let twice = clean(&once.cleaned_tag, &plain());
    assert_eq!(twice.cleaned_tag, once.cleaned_tag);
}

#[test]
fn macro_chain_in_vast_tag_is_stable() {
    let once = clean("https://a.com/v?_vast=1&cb=[ord]REPLACE-TIMESTAMP-MACRO%%41", &plain());
    assert_eq!(
        once.cleaned_tag,
        "https://a.com/v?_vast=1&cb=%%CACHEBUSTER%%%CACHEBUSTER%%%41"
    );
    assert_eq!(clean(&once.cleaned_tag, &plain()), once);
}

#[test]
fn cleaning_is_deterministic_across_contexts() {
    let tag = "https://ad.doubleclick.net/x;tfua=0;ord=[ord]";
    assert_eq!(clean(tag, &kids()), clean(tag, &kids()));
    assert_ne!(clean(tag, &kids()), clean(tag, &plain()));
}

#[test]
fn rule_tables_are_listed_in_order() {
    let vendors: Vec<&str> = vendor_rules().iter().map(|rule| rule.vendor).collect();
    assert_eq!(
        vendors,
        ["Nielsen", "Flashtalking", "Google Campaign Manager", "Extreme Reach", "Sizmek"]
    );
    assert_eq!(
        vendor_rules()
            .iter()
            .filter(|rule| rule.gate == RuleGate::KidsCompliance)
            .count(),
        1
    );
    assert_eq!(macro_dialect().first().map(|entry| entry.token), Some("[timestamp]"));
    assert!(macro_dialect()
        .iter()
        .all(|entry| entry.canonical.starts_with("%%") && entry.canonical.ends_with("%%")));
}

#[test]
fn macro_dialect_listing() {
    let listing: Vec<String> = macro_dialect()
        .iter()
        .map(|entry| format!("{} -> {}", entry.token, entry.canonical))
        .collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    [timestamp] -> %%CACHEBUSTER%%
    [ord] -> %%CACHEBUSTER%%
    [correlator] -> %%CACHEBUSTER%%
    [cachebuster] -> %%CACHEBUSTER%%
    [random] -> %%RANDOM%%
    [campaignid] -> %%CAMPAIGN_ID%%
    [device] -> %%DEVICE%%
    [placement] -> %%PLACEMENT%%
    [user_id] -> %%USER_ID%%
    [gdid] -> %%GDID%%
    [adid] -> %%AD_ID%%
    [INSERT_CACHEBUSTER_HERE] -> %%CACHEBUSTER%%
    INSERT CACHEBUSTER -> %%CACHEBUSTER%%
    %REPLACE-TIMESTAMP-MACRO% -> %%CACHEBUSTER%%
    ");
}
