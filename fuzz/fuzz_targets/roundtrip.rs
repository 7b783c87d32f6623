#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = tagtree::from_bytes(data) {
        // whatever decodes must encode, and re-encoding must be stable
        let once = tagtree::to_string(&tree).expect("decoded tree must encode");
        let reparsed = tagtree::from_str(&once).expect("encoded output must decode");
        let twice = tagtree::to_string(&reparsed).expect("re-encode must succeed");
        assert_eq!(once, twice);
    }
});
