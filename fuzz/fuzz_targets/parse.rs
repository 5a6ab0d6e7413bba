#![no_main]
use libfuzzer_sys::fuzz_target;
use refuri::UriRef;

fuzz_target!(|data: &str| {
    let Ok(r) = UriRef::parse(data) else {
        return;
    };

    // The pieces add up to the input.
    let mut len = 0;
    if let Some(scheme) = r.scheme() {
        len += scheme.len() + 1;
    }
    if let Some(authority) = r.authority() {
        len += authority.len() + 2;
        assert!(r.host().is_some());
    }
    len += r.path().len();
    if let Some(query) = r.query() {
        len += query.len() + 1;
    }
    if let Some(fragment) = r.fragment() {
        len += fragment.len() + 1;
    }
    assert_eq!(len, data.len());
});
