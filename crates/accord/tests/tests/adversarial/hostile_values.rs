//! Adversarial test: attribute values crafted to confuse the index or the
//! evaluator still produce exactly the evaluator's answer.

use accord_filter::{AttributeValue, Attributes, Version};
use accord_index::CapabilityIndex;
use accord_tests::{capability, requirement, typed_capability};

fn owners(index: &CapabilityIndex, filter: &str) -> Vec<u64> {
    index
        .find_matches(&requirement("pkg", filter))
        .map(|c| c.owner().0)
        .collect()
}

#[test]
fn list_string_form_does_not_fake_equality() {
    let index = CapabilityIndex::new();
    let list: Attributes = [("arch", AttributeValue::from(vec!["x86", "arm"]))]
        .into_iter()
        .collect();
    index.insert(typed_capability(1, "pkg", list));
    index.insert(capability(2, "pkg", &[("arch", "x86,arm")]));

    assert_eq!(owners(&index, "(arch=x86,arm)"), vec![2]);
    assert_eq!(owners(&index, "(arch=arm)"), vec![1]);
}

#[test]
fn mixed_value_types_for_one_attribute() {
    let index = CapabilityIndex::new();
    index.insert(capability(1, "pkg", &[("version", "1.0")]));
    let typed: Attributes = [("version", AttributeValue::from(Version::new(1, 0, 0)))]
        .into_iter()
        .collect();
    index.insert(typed_capability(2, "pkg", typed));

    assert_eq!(owners(&index, "(version=1.0)"), vec![1, 2]);
    assert_eq!(owners(&index, "(version=1.0.0)"), vec![2]);
}

#[test]
fn literal_stars_and_parens_in_values() {
    let index = CapabilityIndex::new();
    index.insert(capability(1, "pkg", &[("name", "a*b")]));
    index.insert(capability(2, "pkg", &[("name", "axxb")]));
    index.insert(capability(3, "pkg", &[("name", "f(x)")]));

    assert_eq!(owners(&index, "(name=a\\*b)"), vec![1]);
    assert_eq!(owners(&index, "(name=a*b)"), vec![1, 2]);
    assert_eq!(owners(&index, "(name=f\\(x\\))"), vec![3]);
}

#[test]
fn pathological_wildcards_stay_correct() {
    let index = CapabilityIndex::new();
    let long = "a".repeat(200);
    index.insert(capability(1, "pkg", &[("name", long.as_str())]));

    assert_eq!(owners(&index, "(name=a*a*a*a*a*a*a*a*a*a*b)"), Vec::<u64>::new());
    assert_eq!(owners(&index, "(name=a*a*a*a*a*a*a*a*a*a)"), vec![1]);
}

#[test]
fn garbage_operands_do_not_match_typed_attributes() {
    let index = CapabilityIndex::new();
    let attrs: Attributes = [
        ("size", AttributeValue::from(10i64)),
        ("ratio", AttributeValue::from(0.5f64)),
        ("version", AttributeValue::from(Version::new(2, 0, 0))),
    ]
    .into_iter()
    .collect();
    index.insert(typed_capability(1, "pkg", attrs));

    assert!(owners(&index, "(size>=ten)").is_empty());
    assert!(owners(&index, "(ratio<=half)").is_empty());
    assert!(owners(&index, "(version>=two)").is_empty());
    assert_eq!(owners(&index, "(!(size>=ten))"), vec![1]);
}
