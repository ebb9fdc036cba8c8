//! Property-based tests for request options.
//!
//! These tests use proptest to generate option sequences and content and
//! verify that the ordering and validation guarantees hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::options::{
        get_request, stub_data, template_data, validated, values_node, ApplyToRequest, Options,
        RequestOption,
    };
    use crate::request::Request;
    use proptest::prelude::*;

    const SCHEMA: &str = "type: object\nrequired: [name]\n";

    // ============================================================================
    // source factory properties
    // ============================================================================

    proptest! {
        /// Property: non-empty template data is stored verbatim under its name
        #[test]
        fn template_data_keeps_name_and_content(
            name in "[a-z]{1,12}",
            data in prop::collection::vec(any::<u8>(), 1..256),
        ) {
            let r = get_request([template_data(name.clone(), data.clone())]).unwrap();
            let template = r.template.unwrap();
            prop_assert_eq!(template.name(), name.as_str());
            prop_assert_eq!(template.data().unwrap(), data);
        }

        /// Property: empty template data always fails and never touches the request
        #[test]
        fn empty_template_data_fails(name in ".*", preset in prop::option::of("[a-z]{1,8}")) {
            let mut r = Request::new();
            if let Some(preset) = &preset {
                template_data(preset.clone(), "a: 1").apply_to_request(&mut r).unwrap();
            }
            let result = template_data(name, Vec::<u8>::new()).apply_to_request(&mut r);
            prop_assert!(matches!(result, Err(Error::EmptyInput { .. })), "expected EmptyInput");
            prop_assert_eq!(r.template.map(|t| t.name().to_string()), preset);
        }

        /// Property: stubs keep application order and skip empty content
        #[test]
        fn stubs_preserve_order(
            stubs in prop::collection::vec(("[a-z]{1,8}", prop::collection::vec(any::<u8>(), 0..4)), 0..16),
        ) {
            let r = get_request(
                stubs.iter().map(|(name, data)| stub_data(name.clone(), data.clone())),
            )
            .unwrap();
            let expected: Vec<&str> = stubs
                .iter()
                .filter(|(_, data)| !data.is_empty())
                .map(|(name, _)| name.as_str())
                .collect();
            prop_assert_eq!(r.stub_names(), expected);
        }
    }

    // ============================================================================
    // aggregation properties
    // ============================================================================

    proptest! {
        /// Property: adding None anywhere changes neither the list nor the outcome
        #[test]
        fn add_none_is_noop(names in prop::collection::vec("[a-z]{1,8}", 0..8), gaps in prop::collection::vec(any::<bool>(), 0..8)) {
            let mut plain = Options::new();
            let mut with_gaps = Options::new();
            for (idx, name) in names.iter().enumerate() {
                plain.add(stub_data(name.clone(), "x: 1"));
                if gaps.get(idx).copied().unwrap_or(false) {
                    with_gaps.add(None);
                }
                with_gaps.add(stub_data(name.clone(), "x: 1"));
            }
            with_gaps.add(None);
            prop_assert_eq!(plain.len(), with_gaps.len());

            let mut a = Request::new();
            let mut b = Request::new();
            plain.apply_to_request(&mut a).unwrap();
            with_gaps.apply_to_request(&mut b).unwrap();
            prop_assert_eq!(a.stub_names(), b.stub_names());
        }
    }

    // ============================================================================
    // validated properties
    // ============================================================================

    fn inner_options(names: &[String], with_bad: bool) -> Vec<RequestOption> {
        let mut options: Vec<RequestOption> = names
            .iter()
            .map(|n| stub_data(n.clone(), format!("name: {}", n)))
            .collect();
        if with_bad {
            options.push(stub_data("bad", "other: 1"));
        }
        options.push(values_node("node"));
        options
    }

    proptest! {
        /// Property: a rejected source leaves the real request untouched
        #[test]
        fn validated_failure_is_atomic(names in prop::collection::vec("[a-z]{1,8}", 0..6)) {
            let mut r = Request::new();
            let result = validated(SCHEMA, inner_options(&names, true)).apply_to_request(&mut r);
            prop_assert!(matches!(result, Err(Error::SchemaValidation { .. })), "expected SchemaValidation");
            prop_assert!(r.stubs.is_empty());
            prop_assert!(r.values_node.is_none());
        }

        /// Property: an empty schema behaves exactly like a plain option list
        #[test]
        fn validated_without_schema_equals_plain(names in prop::collection::vec("[a-z]{1,8}", 0..6), with_bad in any::<bool>()) {
            let mut a = Request::new();
            let mut b = Request::new();
            let ra = validated(Vec::<u8>::new(), inner_options(&names, with_bad)).apply_to_request(&mut a);
            let rb = Options::from(inner_options(&names, with_bad)).apply_to_request(&mut b);
            prop_assert_eq!(ra.is_ok(), rb.is_ok());
            prop_assert_eq!(a.stub_names(), b.stub_names());
            prop_assert_eq!(a.values_node, b.values_node);
        }

        /// Property: accepted sources commit in the same order as plain application
        #[test]
        fn validated_success_commits_in_order(names in prop::collection::vec("[a-z]{1,8}", 0..6)) {
            let mut r = Request::new();
            validated(SCHEMA, inner_options(&names, false)).apply_to_request(&mut r).unwrap();
            let expected: Vec<&str> = names.iter().map(String::as_str).collect();
            prop_assert_eq!(r.stub_names(), expected);
            prop_assert_eq!(r.values_node.as_deref(), Some("node"));
        }
    }
}
