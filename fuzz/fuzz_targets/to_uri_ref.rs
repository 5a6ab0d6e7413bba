#![no_main]
use libfuzzer_sys::fuzz_target;
use refuri::{component::ReferenceSource, UriRef};

fuzz_target!(|data: &str| {
    let Ok(r) = UriRef::parse(data) else {
        return;
    };

    let c = r.to_components();
    let r2 = c.to_uri_ref().unwrap();
    assert_eq!(r2.to_components(), c);
    assert_eq!(r2.kind(), r.kind());
});
