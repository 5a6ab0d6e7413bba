#![no_main]
use libfuzzer_sys::fuzz_target;
use refuri::path::HierarchicalPath;

fuzz_target!(|data: &str| {
    let path = HierarchicalPath::new(data);
    assert_eq!(path.to_string(), data);

    // Lexical normalization reaches a fixed point in one step.
    let once = path.lexically_normalize();
    let twice = once.clone().lexically_normalize();
    assert_eq!(once, twice);
});
