//! Tests for the source module.

use super::*;

fn hosted(raw: &str) -> HostedRef {
    match resolve(raw) {
        Specifier::Hosted(hosted) => hosted,
        other => panic!("expected hosted ref for {raw}, got {other:?}"),
    }
}

mod hosted_prefix_tests {
    use super::*;

    #[test]
    fn owner_and_repo_only() {
        let spec = hosted("hosted:acme/widgets");
        assert_eq!(spec, HostedRef::new("acme", "widgets"));
        assert_eq!(spec.reference, None);
        assert_eq!(spec.subpath, None);
    }

    #[test]
    fn ref_and_subpath() {
        let spec = hosted("hosted:acme/widgets@v2/tools/lint");
        assert_eq!(
            spec,
            HostedRef::new("acme", "widgets")
                .with_reference("v2")
                .with_subpath("tools/lint")
        );
    }

    #[test]
    fn subpath_without_ref() {
        let spec = hosted("hosted:acme/widgets/skills/pdf");
        assert_eq!(spec.reference, None);
        assert_eq!(spec.subpath.as_deref(), Some("skills/pdf"));
    }

    #[test]
    fn prefix_beats_everything_else() {
        let (rule, _) = classify("hosted:acme/github.com");
        assert_eq!(rule, "hosted-prefix");
    }

    #[test]
    fn missing_ref_is_left_unset() {
        let spec = hosted("hosted:acme/widgets");
        assert_eq!(spec.reference, None);
        assert_eq!(spec.reference_or_default(), DEFAULT_REF);
    }
}

mod hosted_url_tests {
    use super::*;

    #[test]
    fn repo_url() {
        let spec = hosted("https://github.com/acme/widgets");
        assert_eq!(spec, HostedRef::new("acme", "widgets"));
    }

    #[test]
    fn strips_dot_git() {
        let spec = hosted("https://github.com/acme/widgets.git");
        assert_eq!(spec.repo, "widgets");
    }

    #[test]
    fn tree_url_with_ref_and_subpath() {
        let spec = hosted("https://github.com/acme/widgets/tree/v1.0.0/skills/pdf");
        assert_eq!(spec.reference.as_deref(), Some("v1.0.0"));
        assert_eq!(spec.subpath.as_deref(), Some("skills/pdf"));
    }

    #[test]
    fn tree_url_with_ref_only() {
        let spec = hosted("https://github.com/acme/widgets/tree/dev");
        assert_eq!(spec.reference.as_deref(), Some("dev"));
        assert_eq!(spec.subpath, None);
    }

    #[test]
    fn non_tree_segments_are_ignored() {
        let spec = hosted("https://github.com/acme/widgets/blob/main/SKILL.md");
        assert_eq!(spec.reference, None);
        assert_eq!(spec.subpath, None);
    }

    #[test]
    fn schemeless_and_ssh_forms() {
        assert_eq!(hosted("github.com/acme/widgets").owner, "acme");
        let ssh = hosted("git@github.com:acme/widgets.git");
        assert_eq!((ssh.owner.as_str(), ssh.repo.as_str()), ("acme", "widgets"));
    }

    #[test]
    fn query_and_fragment_are_dropped() {
        let spec = hosted("https://github.com/acme/widgets?tab=readme#top");
        assert_eq!(spec.repo, "widgets");
    }
}

mod url_tests {
    use super::*;

    #[test]
    fn other_https_hosts_are_urls() {
        assert_eq!(
            resolve("https://example.com/skills/pdf/SKILL.md"),
            Specifier::Url {
                url: "https://example.com/skills/pdf/SKILL.md".to_string()
            }
        );
    }

    #[test]
    fn plain_http_is_url() {
        assert_eq!(resolve("http://example.com/x").kind(), "url");
    }
}

mod local_tests {
    use super::*;

    #[test]
    fn relative_path() {
        assert_eq!(
            resolve("./local/my-skill"),
            Specifier::Local {
                path: "./local/my-skill".to_string()
            }
        );
    }

    #[test]
    fn absolute_and_parent_paths() {
        assert_eq!(resolve("/abs/skill").kind(), "local");
        assert_eq!(resolve("../sibling/skill").kind(), "local");
    }

    #[test]
    fn absolute_path_containing_host_token_is_hosted() {
        // The hosted-site rule is checked before the path rule.
        assert_eq!(resolve("/mirror/github.com/acme/widgets").kind(), "hosted");
    }
}

mod shorthand_tests {
    use super::*;

    #[test]
    fn owner_repo() {
        assert_eq!(hosted("acme/widgets"), HostedRef::new("acme", "widgets"));
    }

    #[test]
    fn owner_repo_at_ref() {
        let spec = hosted("acme/widgets@release");
        assert_eq!(spec.repo, "widgets");
        assert_eq!(spec.reference.as_deref(), Some("release"));
    }
}

mod registry_tests {
    use super::*;

    #[test]
    fn uuid_is_registry_id_verbatim() {
        let id = "3F2504E0-4F89-41D3-9A0C-0305E82C3301";
        let (rule, spec) = classify(id);
        assert_eq!(rule, "registry-id");
        assert_eq!(
            spec,
            Specifier::Registry {
                id_or_slug: id.to_string()
            }
        );
    }

    #[test]
    fn input_is_not_trimmed() {
        let padded = " 3f2504e0-4f89-41d3-9a0c-0305e82c3301 ";
        let (rule, spec) = classify(padded);
        assert_eq!(rule, "registry-slug");
        assert_eq!(
            spec,
            Specifier::Registry {
                id_or_slug: padded.to_string()
            }
        );
    }

    #[test]
    fn slug_falls_through_to_search_term() {
        let (rule, spec) = classify("pdf-tools");
        assert_eq!(rule, "registry-slug");
        assert_eq!(
            spec,
            Specifier::Registry {
                id_or_slug: "pdf-tools".to_string()
            }
        );
    }

    #[test]
    fn uuid_shape() {
        assert!(is_uuid("3f2504e0-4f89-41d3-9a0c-0305e82c3301"));
        assert!(!is_uuid("3f2504e04f8941d39a0c0305e82c3301"));
        assert!(!is_uuid("3f2504e0-4f89-41d3-9a0c-0305e82c330"));
        assert!(!is_uuid("3f2504e0-4f89-41d3-9a0c-0305e82c3301-00"));
        assert!(!is_uuid("zf2504e0-4f89-41d3-9a0c-0305e82c3301"));
    }

    #[test]
    fn empty_input_is_registry() {
        assert_eq!(resolve("").kind(), "registry");
    }
}

mod precedence_tests {
    use super::*;

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            vec![
                "hosted-prefix",
                "hosted-url",
                "url",
                "local-path",
                "hosted-shorthand",
                "registry-id",
                "registry-slug",
            ]
        );
    }

    #[test]
    fn last_rule_matches_anything() {
        let last = RULES.last().unwrap();
        assert!(last.matches(""));
        assert!(last.matches("anything at all"));
    }

    #[test]
    fn every_input_classifies() {
        for raw in ["", "x", "a/b", "./a", "http://a", "hosted:", "github.com", "@@@"] {
            let _ = resolve(raw);
        }
    }
}
