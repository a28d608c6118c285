use pinvault_session::{Mutation, NewEntry, PasswordCollection};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    r#"[A-Za-z0-9 @._!"{}\[\]]{1,40}"#.prop_filter("not blank", |s| !s.trim().is_empty())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_collection_survives_json(
        drafts in proptest::collection::vec((field(), field(), field(), ".{0,60}"), 0..8),
    ) {
        let mut collection = PasswordCollection::new();
        for (service, user, password, notes) in drafts {
            collection
                .apply(Mutation::Add(NewEntry::new(service, user, password).notes(notes)))
                .unwrap();
        }

        let bytes = collection.to_json().unwrap();
        prop_assert_eq!(PasswordCollection::from_json(&bytes).unwrap(), collection);
    }
}
