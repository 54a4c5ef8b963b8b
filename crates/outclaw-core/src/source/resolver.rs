//! Specifier classification.
//!
//! [`RULES`] is evaluated top to bottom and the first matching rule wins, so
//! the order of the table is part of the contract. The last rule matches
//! everything, which makes [`resolve`] total.

use super::spec::{HOSTED_SITE, HostedRef, Specifier};

/// Explicit prefix for hosted repositories.
pub const HOSTED_PREFIX: &str = "hosted:";

/// One classification rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    matches: fn(&str) -> bool,
    build: fn(&str) -> Specifier,
}

impl Rule {
    pub fn matches(&self, raw: &str) -> bool {
        (self.matches)(raw)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "hosted-prefix",
        matches: has_hosted_prefix,
        build: build_hosted_prefix,
    },
    Rule {
        name: "hosted-url",
        matches: has_hosted_site,
        build: build_hosted_url,
    },
    Rule {
        name: "url",
        matches: is_http_url,
        build: build_url,
    },
    Rule {
        name: "local-path",
        matches: is_local_path,
        build: build_local,
    },
    Rule {
        name: "hosted-shorthand",
        matches: has_slash,
        build: build_shorthand,
    },
    Rule {
        name: "registry-id",
        matches: is_uuid,
        build: build_registry,
    },
    Rule {
        name: "registry-slug",
        matches: always,
        build: build_registry,
    },
];

/// Classify a raw specifier. Never fails.
pub fn resolve(raw: &str) -> Specifier {
    classify(raw).1
}

/// Classify a raw specifier and report which rule matched.
///
/// The input is used exactly as given; callers trim user input first.
pub fn classify(raw: &str) -> (&'static str, Specifier) {
    let spec = RULES
        .iter()
        .find(|rule| rule.matches(raw))
        .map(|rule| (rule.name, (rule.build)(raw)))
        .unwrap_or_else(|| ("registry-slug", build_registry(raw)));
    tracing::debug!(input = raw, rule = spec.0, kind = spec.1.kind(), "classified specifier");
    spec
}

/// True for `8-4-4-4-12` groups of hex digits (any case).
pub fn is_uuid(raw: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];
    let mut parts = raw.split('-');
    let shaped = GROUPS.iter().all(|&len| {
        parts
            .next()
            .is_some_and(|part| part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit()))
    });
    shaped && parts.next().is_none()
}

fn has_hosted_prefix(raw: &str) -> bool {
    raw.starts_with(HOSTED_PREFIX)
}

fn has_hosted_site(raw: &str) -> bool {
    raw.contains(HOSTED_SITE)
}

fn is_http_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

fn is_local_path(raw: &str) -> bool {
    raw.starts_with("./") || raw.starts_with('/') || raw.starts_with("../")
}

fn has_slash(raw: &str) -> bool {
    raw.contains('/')
}

fn always(_: &str) -> bool {
    true
}

fn build_hosted_prefix(raw: &str) -> Specifier {
    let rest = raw.strip_prefix(HOSTED_PREFIX).unwrap_or(raw);
    Specifier::Hosted(parse_shorthand(rest))
}

fn build_shorthand(raw: &str) -> Specifier {
    Specifier::Hosted(parse_shorthand(raw))
}

fn build_hosted_url(raw: &str) -> Specifier {
    Specifier::Hosted(parse_hosted_url(raw))
}

fn build_url(raw: &str) -> Specifier {
    Specifier::Url {
        url: raw.to_string(),
    }
}

fn build_local(raw: &str) -> Specifier {
    Specifier::Local {
        path: raw.to_string(),
    }
}

fn build_registry(raw: &str) -> Specifier {
    Specifier::Registry {
        id_or_slug: raw.to_string(),
    }
}

/// Parse `owner/repo[@ref][/subpath]`.
fn parse_shorthand(shorthand: &str) -> HostedRef {
    let mut segments = shorthand.split('/');
    let owner = segments.next().unwrap_or_default();
    let repo_segment = segments.next().unwrap_or_default();
    let subpath = join_segments(segments);

    let (repo, reference) = match repo_segment.split_once('@') {
        Some((repo, reference)) => (repo, non_empty(reference)),
        None => (repo_segment, None),
    };

    HostedRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
        reference,
        subpath,
    }
}

/// Parse `…github.com/owner/repo[.git][/tree/<ref>[/subpath]]`.
fn parse_hosted_url(raw: &str) -> HostedRef {
    let after_host = raw
        .split_once(HOSTED_SITE)
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    let path = after_host
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_start_matches([':', '/']);

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let owner = segments.first().copied().unwrap_or_default();
    let repo = segments.get(1).copied().unwrap_or_default();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    let (reference, subpath) = if segments.get(2) == Some(&"tree") {
        (
            segments.get(3).map(|s| s.to_string()),
            join_segments(segments.iter().skip(4).copied()),
        )
    } else {
        (None, None)
    };

    HostedRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
        reference,
        subpath,
    }
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> Option<String> {
    let parts: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    non_empty(&parts.join("/"))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
