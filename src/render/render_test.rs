//! Tests for the text reports.

#[cfg(test)]
mod tests {
    use crate::config::RuleSet;
    use crate::diff::{DiffNode, Differ};
    use crate::render::{
        render, AnsiPalette, DiffRenderer, GroupedRenderer, HierarchicalRenderer, PlainPalette, Style,
    };
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn compare(lhs: &str, rhs: &str) -> DiffNode {
        let lhs = from_json(lhs).unwrap().into_map().unwrap();
        let rhs = from_json(rhs).unwrap().into_map().unwrap();
        Differ::new(&RuleSet::empty(), false).compare(&lhs, &rhs)
    }

    fn header(name1: &str, name2: &str) -> String {
        format!("Comparing: {} <-> {}\n{}\n", name1, name2, "-".repeat(80))
    }

    fn grouped(tree: &DiffNode) -> String {
        GroupedRenderer::new(&PlainPalette).render_to_string(tree, "vm-1", "vm-2")
    }

    fn hierarchical(tree: &DiffNode) -> String {
        HierarchicalRenderer::new(&PlainPalette).render_to_string(tree, "fw-1", "fw-2")
    }

    #[test]
    fn test_no_differences_in_both_styles() {
        let tree = compare(r#"{"a": 1}"#, r#"{"a": 1}"#);
        let expected = "✓ No differences found\n";

        assert_eq!(grouped(&tree), header("vm-1", "vm-2") + expected);
        assert_eq!(hierarchical(&tree), header("fw-1", "fw-2") + expected);
    }

    #[test]
    fn test_grouped_report() {
        let tree = compare(
            r#"{"name": "old", "tags": ["a"], "meta": {"x": 1}}"#,
            r#"{"name": "new", "labels": {"env": "prod"}, "meta": {"x": 1}}"#,
        );

        let expected = [
            "",
            "Summary: 3 difference(s) found",
            "  + 1 field(s)",
            "  - 1 field(s)",
            "  ~ 1 field(s)",
            "",
            "Added Fields:",
            "",
            "  + labels",
            "      {",
            "        \"env\": \"prod\"",
            "      }",
            "",
            "Removed Fields:",
            "",
            "  - tags",
            "      [",
            "        \"a\"",
            "      ]",
            "",
            "Modified Fields:",
            "",
            "  ~ name",
            "      - \"old\"",
            "      + \"new\"",
            "",
        ]
        .map(|line| format!("{}\n", line))
        .concat();

        assert_eq!(grouped(&tree), header("vm-1", "vm-2") + &expected);
    }

    #[test]
    fn test_grouped_skips_empty_sections() {
        let tree = compare(r#"{"zone": "a", "size": 10}"#, r#"{"zone": "b", "size": 10.5}"#);
        let output = grouped(&tree);

        assert!(output.contains("Summary: 2 difference(s) found"));
        assert!(output.contains("  ~ 2 field(s)"));
        assert!(!output.contains("Added Fields"));
        assert!(!output.contains("Removed Fields"));
        assert!(output.contains("  ~ size\n      - 10\n      + 10.5\n"));

        // Entries are sorted by path.
        let size = output.find("~ size").unwrap();
        let zone = output.find("~ zone").unwrap();
        assert!(size < zone);
    }

    #[test]
    fn test_grouped_lists_nested_paths() {
        let tree = compare(
            r#"{"disks": [{"type": "pd-standard"}], "meta": {"labels": {"a": "1"}}}"#,
            r#"{"disks": [{"type": "pd-ssd"}, {"type": "pd-ssd"}], "meta": {"labels": {}}}"#,
        );
        let output = grouped(&tree);

        assert!(output.contains("  + disks[1]\n      {\n        \"type\": \"pd-ssd\"\n      }\n"));
        assert!(output.contains("  - meta.labels.a\n      \"1\"\n"));
        assert!(output.contains("  ~ disks[0].type\n      - \"pd-standard\"\n      + \"pd-ssd\"\n"));
    }

    #[test]
    fn test_hierarchical_report() {
        let tree = compare(
            r#"{
                "name": "a",
                "allowed": [{"IPProtocol": "tcp", "ports": ["80"]}, {"IPProtocol": "tcp"}],
                "labels": {"env": "prod", "team": "x"},
                "tags": ["a", "b"]
            }"#,
            r#"{
                "name": "b",
                "allowed": [{"IPProtocol": "udp", "ports": ["80"]}, {"IPProtocol": "tcp"}, {"IPProtocol": "icmp"}],
                "labels": {"env": "dev"},
                "tags": ["a"]
            }"#,
        );

        let expected = [
            "",
            "~ allowed (array with changes)",
            "    ~ [0] (modified)",
            "        ~ IPProtocol",
            "            - \"tcp\"",
            "            + \"udp\"",
            "    + [2] {\"IPProtocol\":\"icmp\"}",
            "",
            "~ labels",
            "  ~ env",
            "      - \"prod\"",
            "      + \"dev\"",
            "  - team",
            "      \"x\"",
            "",
            "~ name",
            "    - \"a\"",
            "    + \"b\"",
            "",
            "~ tags (array with changes)",
            "    - [1] \"b\"",
            "",
        ]
        .map(|line| format!("{}\n", line))
        .concat();

        assert_eq!(hierarchical(&tree), header("fw-1", "fw-2") + &expected);
    }

    #[test]
    fn test_hierarchical_scalar_items_and_nested_additions() {
        let tree = compare(
            r#"{"ports": [80, 443], "rules": [{"match": {"src": "a"}}]}"#,
            r#"{"ports": [8080, 443], "rules": [{"match": {"src": "b", "dst": "c"}}]}"#,
        );
        let output = hierarchical(&tree);

        assert!(output.contains(
            "~ ports (array with changes)\n    ~ [0]\n        - 80\n        + 8080\n"
        ));
        assert!(output.contains(concat!(
            "~ rules (array with changes)\n",
            "    ~ [0] (modified)\n",
            "        ~ match\n",
            "          + dst: \"c\"\n",
            "          ~ src\n",
            "              - \"a\"\n",
            "              + \"b\"\n",
        )));
        assert!(!output.contains("[1]"));
    }

    #[test]
    fn test_hierarchical_added_compound_field() {
        let tree = compare(r#"{}"#, r#"{"labels": {"env": "prod"}}"#);
        let output = hierarchical(&tree);
        assert!(output.contains("+ labels\n    {\n      \"env\": \"prod\"\n    }\n"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let tree = compare(
            r#"{"a": [1, 2, 3], "b": {"c": null, "d": "x"}, "e": true}"#,
            r#"{"a": [0, 1, 2, 3], "b": {"c": 1, "d": 5}, "f": false}"#,
        );

        for style in [Style::Grouped, Style::Hierarchical] {
            let mut first = Vec::new();
            let mut second = Vec::new();
            render(style, &AnsiPalette, &tree, "one", "two", &mut first).unwrap();
            render(style, &AnsiPalette, &tree, "one", "two", &mut second).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_ansi_palette_colors_output() {
        let tree = compare(r#"{"a": 1}"#, r#"{"a": 2}"#);
        let colored = GroupedRenderer::new(&AnsiPalette).render_to_string(&tree, "x", "y");
        let plain = GroupedRenderer::new(&PlainPalette).render_to_string(&tree, "x", "y");

        assert!(colored.contains("\x1b["));
        assert!(!plain.contains("\x1b["));
    }

    #[test]
    fn test_grouped_entries_follow_index_order() {
        let lhs: Vec<i64> = (0..12).collect();
        let rhs: Vec<i64> = (0..12).map(|i| i * 10).collect();
        let tree = compare(
            &format!(r#"{{"ports": {:?}}}"#, lhs),
            &format!(r#"{{"ports": {:?}}}"#, rhs),
        );
        let output = grouped(&tree);

        assert!(output.contains("Summary: 11 difference(s) found"));
        let second = output.find("~ ports[2]\n").unwrap();
        let tenth = output.find("~ ports[10]\n").unwrap();
        assert!(second < tenth);
    }
}
