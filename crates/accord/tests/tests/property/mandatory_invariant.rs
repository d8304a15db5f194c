//! Property tests: capability publication succeeds exactly when every
//! mandatory attribute is present, whatever the values.

use accord_filter::{AttributeValue, Attributes};
use accord_model::directives::MANDATORY;
use accord_model::{build_capability, ConstructionError, Directives, ResourceId};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-e]", 0..5)
}

proptest! {
    #[test]
    fn construction_succeeds_iff_mandatory_subset_of_attributes(
        mandatory in arb_names(),
        present in arb_names(),
        value in ".{0,4}",
    ) {
        let directives: Directives = [(
            MANDATORY.to_string(),
            mandatory.iter().cloned().collect::<Vec<_>>().join(", "),
        )]
        .into_iter()
        .collect();
        let attributes: Attributes = present
            .iter()
            .map(|name| (name.clone(), AttributeValue::from(value.clone())))
            .collect();

        let result = build_capability(ResourceId(1), "pkg", directives, attributes);
        match mandatory.iter().find(|name| !present.contains(*name)) {
            None => {
                let capability = result.unwrap();
                prop_assert_eq!(capability.mandatory(), &mandatory);
            }
            Some(missing) => match result {
                Err(ConstructionError::MandatoryAttributeMissing(err)) => {
                    prop_assert_eq!(&err.0, missing);
                }
                other => prop_assert!(false, "expected missing '{}', got {:?}", missing, other),
            },
        }
    }
}
