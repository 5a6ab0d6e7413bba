#![no_main]
use libfuzzer_sys::fuzz_target;
use refuri::{base::as_base, relativize::relativize, UriRef};

fuzz_target!(|data: (&str, &str, bool)| {
    let (Ok(base), Ok(r)) = (UriRef::parse(data.0), UriRef::parse(data.1)) else {
        return;
    };

    // Components are compared exactly, so only normalized inputs round-trip.
    let (base, r) = (base.normalize(), r.normalize());

    let Ok(rel) = relativize(&r, &base, data.2) else {
        return;
    };
    assert!(rel.kind().is_relative());

    // Resolving the relative reference gives back the reference.
    let base = as_base(&base).unwrap();
    let resolved = rel.resolve_against(&base).unwrap();
    assert_eq!(resolved.normalize(), r);
});
