use pinvault_crypto::prelude::*;
use proptest::prelude::*;

fn pin_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[0-9]{4}").unwrap()
}

proptest! {
    // Each case runs PBKDF2 twice.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn roundtrip_arbitrary_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        raw_pin in pin_strategy(),
    ) {
        let pin = Pin::parse(&raw_pin).unwrap();
        let sealed = VaultCipher::seal(&data, &pin).unwrap();
        let opened = VaultCipher::open(&sealed, &pin).unwrap();
        prop_assert_eq!(data.as_slice(), opened.as_slice());
    }
}

proptest! {
    #[test]
    fn parse_accepts_exactly_four_digits(raw in "\\PC{0,8}") {
        let valid = raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(Pin::parse(&raw).is_ok(), valid);
    }

    #[test]
    fn digest_verifies_own_pin(raw_pin in pin_strategy()) {
        let pin = Pin::parse(&raw_pin).unwrap();
        prop_assert!(PinVerifier::verify(&pin, &PinVerifier::digest(&pin)));
    }
}
