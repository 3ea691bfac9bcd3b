//! Property tests for global-name derivation.

use kiln_config::derive_bundle_name;
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

proptest! {
    #[test]
    fn hyphenated_words_become_pascal_case(words in prop::collection::vec(word(), 1..5)) {
        // A leading "svelte" word would be treated as the prefix.
        prop_assume!(words[0] != "svelte");

        let name = words.join("-");
        let expected: String = words
            .iter()
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();

        prop_assert_eq!(derive_bundle_name(&name), expected);
    }

    #[test]
    fn scope_and_prefix_are_stripped(scope in word(), rest in word()) {
        let plain = derive_bundle_name(&rest);
        prop_assert_eq!(derive_bundle_name(&format!("svelte-{rest}")), plain.clone());
        prop_assert_eq!(derive_bundle_name(&format!("@{scope}/svelte-{rest}")), plain.clone());
        prop_assert_eq!(derive_bundle_name(&format!("@{scope}/{rest}")), plain);
    }
}
