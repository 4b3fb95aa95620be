use anyhow::Result;
use link_miner::{find_target_site_link, normalize_target_site_link, LinkKind, SiteLinks};

fn normalize_line(line: &str) -> Option<String> {
    let url = find_target_site_link(line)?;
    normalize_target_site_link(&url).map(|canonical| canonical.to_string())
}

#[test]
fn test_every_surface_form_normalizes() {
    let cases = [
        ("https://stackoverflow.com/q/4315190", "https://stackoverflow.com/q/4315190"),
        ("https://stackoverflow.com/questions/4315190", "https://stackoverflow.com/q/4315190"),
        (
            "https://stackoverflow.com/questions/4315190/single-precision-big-endian",
            "https://stackoverflow.com/q/4315190",
        ),
        ("https://stackoverflow.com/a/53022912/1234", "https://stackoverflow.com/a/53022912"),
        (
            "https://stackoverflow.com/questions/52761212/some-slug/52761348#52761348",
            "https://stackoverflow.com/a/52761348",
        ),
        (
            "https://stackoverflow.com/questions/52761212/some-slug#comment92462603_52761348",
            "https://stackoverflow.com/questions/52761212#comment92462603_52761348",
        ),
    ];

    for (input, expected) in cases {
        let line = format!("// {}", input);
        assert_eq!(normalize_line(&line).as_deref(), Some(expected), "input: {}", input);
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        "http://www.stackoverflow.com/questions/1/slug#comment2_3",
        "https://stackoverflow.com/questions/1/slug/2#2",
        "https://STACKOVERFLOW.com/q/5",
    ];

    for input in inputs {
        let once = normalize_line(input).unwrap();
        let twice = normalize_line(&once).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_markdown_line() {
    let line = "Based on [this answer](https://stackoverflow.com/a/4315190).";
    assert_eq!(normalize_line(line).as_deref(), Some("https://stackoverflow.com/a/4315190"));
}

#[test]
fn test_non_post_links() {
    assert!(normalize_line("https://stackoverflow.com/users/1/someone").is_none());
    assert!(normalize_line("https://stackoverflow.com/help/how-to-ask").is_none());
    assert!(normalize_line("no link here").is_none());
}

#[test]
fn test_configured_site() -> Result<()> {
    let site = SiteLinks::new("askubuntu.com")?;
    let url = site
        .find_link("* https://www.askubuntu.com/questions/22/slug/33#33")
        .unwrap();

    assert_eq!(site.classify(&url), Some(LinkKind::LongAnswer));
    assert_eq!(site.normalize(&url).unwrap().as_str(), "https://askubuntu.com/a/33");
    Ok(())
}
