#![no_main]

use libfuzzer_sys::fuzz_target;
use schemarules_core::{ColumnDescriptor, Driver, RuleToken, RulesConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(raw_type) = std::str::from_utf8(data) {
        let config = RulesConfig::default();
        let column = ColumnDescriptor::new("fuzzed", raw_type).with_nullable(data.len() % 2 == 0);

        for driver in Driver::ALL {
            let rules = driver.classifier()(&column, &config);
            let first = rules.tokens().first();
            assert!(matches!(
                first,
                Some(RuleToken::Required | RuleToken::Nullable)
            ));
        }
    }
});
