//! Parsing of GitLab merge-request web URLs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::MrUrlError;
use crate::types::MergeRequestRef;

lazy_static! {
    // Matches "gitlab.com/<group>/<project...>/-/merge_requests/<iid>".
    // The project path needs at least two segments and may contain nested
    // subgroups; the "/-/" separator keeps the match unambiguous.
    static ref MR_URL_RE: Regex =
        Regex::new(r"gitlab\.com/([^/]+/[^/]+(?:/[^/]+)*?)/-/merge_requests/(\d+)").unwrap();
}

/// Extracts the project path and MR IID from a merge-request web URL.
///
/// Accepts URLs of the form
/// `https://gitlab.com/group/sub/project/-/merge_requests/123`, with any
/// trailing path, query or fragment ignored.
///
/// # Errors
/// - [`MrUrlError::NotMergeRequestUrl`] when the URL is not a GitLab MR URL
/// - [`MrUrlError::Unrecognized`] when project path / iid cannot be extracted
pub fn parse_mr_url(url: &str) -> Result<MergeRequestRef, MrUrlError> {
    if !url.contains("gitlab.com") || !url.contains("/merge_requests/") {
        return Err(MrUrlError::NotMergeRequestUrl(url.to_string()));
    }

    let caps = MR_URL_RE
        .captures(url)
        .ok_or_else(|| MrUrlError::Unrecognized(url.to_string()))?;

    let project = caps[1].to_string();
    let iid: u64 = caps[2]
        .parse()
        .map_err(|_| MrUrlError::Unrecognized(url.to_string()))?;

    Ok(MergeRequestRef { project, iid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_mr_url() {
        let mr = parse_mr_url("https://gitlab.com/acme/widget/-/merge_requests/42").unwrap();
        assert_eq!(mr.project, "acme/widget");
        assert_eq!(mr.iid, 42);
    }

    #[test]
    fn parses_nested_subgroups() {
        let mr =
            parse_mr_url("https://gitlab.com/acme/mobile/ios-source-code/-/merge_requests/7")
                .unwrap();
        assert_eq!(mr.project, "acme/mobile/ios-source-code");
        assert_eq!(mr.iid, 7);
    }

    #[test]
    fn ignores_trailing_path_and_query() {
        let mr = parse_mr_url(
            "https://gitlab.com/acme/widget/-/merge_requests/42/diffs?commit_id=abc#note_1",
        )
        .unwrap();
        assert_eq!(mr.project, "acme/widget");
        assert_eq!(mr.iid, 42);
    }

    #[test]
    fn rejects_non_gitlab_hosts() {
        let err = parse_mr_url("https://github.com/acme/widget/pull/42").unwrap_err();
        assert!(matches!(err, MrUrlError::NotMergeRequestUrl(_)));
    }

    #[test]
    fn rejects_non_mr_gitlab_urls() {
        let err = parse_mr_url("https://gitlab.com/acme/widget/-/issues/42").unwrap_err();
        assert!(matches!(err, MrUrlError::NotMergeRequestUrl(_)));
    }

    #[test]
    fn rejects_url_without_iid() {
        let err = parse_mr_url("https://gitlab.com/acme/widget/-/merge_requests/").unwrap_err();
        assert!(matches!(err, MrUrlError::Unrecognized(_)));
    }
}
