#![no_main]
use libfuzzer_sys::fuzz_target;
use refuri::{normalize::normalize_percent_encoding, UriRef};

fuzz_target!(|data: &str| {
    let Ok(r) = UriRef::parse(data) else {
        return;
    };

    let r1 = r.normalize();
    let r2 = UriRef::parse(r1.as_str()).unwrap();
    assert_eq!(r1, r2);
    assert_eq!(r1.kind().is_uri(), r.kind().is_uri());

    // `normalize` is idempotent: we cannot normalize beyond a normalized `UriRef`.
    assert_eq!(r1.normalize(), r1);

    let c = normalize_percent_encoding(&r, false);
    assert_eq!(c.decoded_path(), r.path().decode().to_string_lossy());
    assert_eq!(normalize_percent_encoding(&c, false), c);
});
