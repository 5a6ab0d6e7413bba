use refuri::{
    base::as_base,
    relativize::{relativize, RelativizeError, Relativizer},
    resolve::resolve,
    UriRef,
};

trait Test {
    fn pass(&self, r: &str, expected: &str);
    fn pass_ascending(&self, r: &str, expected: &str);
    fn fail(&self, r: &str, err: RelativizeError);
}

impl Test for UriRef<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let r = UriRef::parse(r).unwrap();
        for allow_ascending in [false, true] {
            let relativizer = Relativizer::with_base(self).allow_ascending(allow_ascending);
            let rel = relativizer.relativize(&r).unwrap();
            assert_eq!(rel, expected);
            assert_eq!(rel.resolve_against(&as_base(self).unwrap()).unwrap(), r.normalize());
        }
    }

    #[track_caller]
    fn pass_ascending(&self, r: &str, expected: &str) {
        let r = UriRef::parse(r).unwrap();
        assert_eq!(
            relativize(&r, self, false).unwrap_err(),
            RelativizeError::AscentNotAllowed
        );
        let rel = relativize(&r, self, true).unwrap();
        assert_eq!(rel, expected);
        assert_eq!(rel.resolve_against(&as_base(self).unwrap()).unwrap(), r.normalize());
    }

    #[track_caller]
    fn fail(&self, r: &str, expected: RelativizeError) {
        let r = UriRef::parse(r).unwrap();
        for allow_ascending in [false, true] {
            assert_eq!(relativize(&r, self, allow_ascending).unwrap_err(), expected);
        }
    }
}

#[test]
fn relativize_descending() {
    let base = UriRef::parse("https://github.com/apple/swift/").unwrap();
    base.pass("https://github.com/apple/swift/README.md", "README.md");
    base.pass("https://github.com/apple/swift/docs/", "docs/");
    base.pass("https://github.com/apple/swift/docs/a/b", "docs/a/b");
    base.pass("https://github.com/apple/swift/", "./");
    base.pass("https://github.com/apple/swift/?tab=readme", "?tab=readme");
    base.pass("https://github.com/apple/swift/#top", "#top");
    base.pass("https://github.com/apple/swift/a:b", "./a:b");
    base.pass("https://github.com/apple/swift//x", ".//x");
    base.pass("HTTPS://github.com/apple/swift/x", "x");

    let base = UriRef::parse("https://example.com/a/b?q#f").unwrap();
    base.pass("https://example.com/a/b", "b");
    base.pass("https://example.com/a/b?y", "b?y");
    base.pass("https://example.com/a/c#g", "c#g");
    base.pass("https://example.com/a/", "./");
    base.pass("https://example.com/a/?q", "./?q");
    base.pass("https://example.com/a/#g", "./#g");

    let base = UriRef::parse("https://example.com/a/?q").unwrap();
    base.pass("https://example.com/a/#g", "./#g");
    base.pass("https://example.com/a/?q#g", "?q#g");

    let base = UriRef::parse("https://example.com").unwrap();
    base.pass("https://example.com", "./");
    base.pass("https://example.com/", "./");
    base.pass("https://example.com/a/b/", "a/b/");
    base.pass("https://example.com?x", "?x");
}

#[test]
fn relativize_ascending() {
    let base = UriRef::parse("https://github.com/apple/").unwrap();
    base.pass_ascending("https://github.com/microsoft/", "../microsoft/");
    base.pass_ascending("https://github.com/", "../");
    base.pass_ascending("https://github.com", "../");
    base.pass_ascending("https://github.com/readme", "../readme");

    let base = UriRef::parse("https://example.com/a/b/c/d").unwrap();
    base.pass_ascending("https://example.com/a/x/y", "../../x/y");
    base.pass_ascending("https://example.com/a/b/", "../");
    base.pass_ascending("https://example.com/", "../../../");
    base.pass_ascending("https://example.com//x", "../../..//x");
    base.pass_ascending("https://example.com/a:b/", "../../../a:b/");
    base.pass_ascending("https://example.com/a/b?q", "../../b?q");
}

#[test]
fn relativize_failure() {
    let base = UriRef::parse("https://example.com/a/").unwrap();
    base.fail("http://example.com/a/b", RelativizeError::UnrelatedReference);
    base.fail("https://example.org/a/b", RelativizeError::UnrelatedReference);
    base.fail("https://EXAMPLE.com/a/b", RelativizeError::UnrelatedReference);
    base.fail("https://example.com:443/a/b", RelativizeError::UnrelatedReference);
    base.fail("https://user@example.com/a/b", RelativizeError::UnrelatedReference);
    base.fail("//example.com/a/b", RelativizeError::UnrelatedReference);
    base.fail("/a/b", RelativizeError::UnrelatedReference);
    base.fail("b", RelativizeError::UnrelatedReference);

    // An empty path with an empty host cannot be reached from a base path.
    let base = UriRef::parse("file:///").unwrap();
    base.fail("file://", RelativizeError::UnreachablePath);
    base.fail("file://?q", RelativizeError::UnreachablePath);
    base.fail("file://#f", RelativizeError::UnreachablePath);
    base.pass("file:///", "./");
    base.pass("file:///?q", "?q");

    for s in ["/a/", "a", "mailto:x@example.com", "//example.com/a/", "file://"] {
        let base = UriRef::parse(s).unwrap();
        base.fail("https://example.com/a/b", RelativizeError::InvalidBase);
        assert_eq!(base, s);
    }
}

#[test]
fn exact_comparison() {
    // Components are compared without normalization.
    let base = UriRef::parse("https://example.com/%61/").unwrap();
    base.pass_ascending("https://example.com/a/b", "../a/b");

    let base = UriRef::parse("https://example.com/a/./").unwrap();
    let r = UriRef::parse("https://example.com/a/b").unwrap();
    assert_eq!(
        relativize(&r, &base, false).unwrap_err(),
        RelativizeError::AscentNotAllowed
    );

    let base = base.normalize();
    assert_eq!(relativize(&r, &base, false).unwrap(), "b");
}

#[test]
fn inverse() {
    let bases = [
        "http://a/b/c/d;p?q",
        "http://a/b/c/",
        "http://a/",
        "http://a",
        "http://a/b//c/d",
        "file:///usr/local/",
        "file:///",
    ];
    let refs = [
        "http://a/b/c/g",
        "http://a/b/c/g/",
        "http://a/b/c/d;p",
        "http://a/b/c/d;p?q",
        "http://a/b/c/d;p?y#s",
        "http://a/b/c/",
        "http://a/b/",
        "http://a/",
        "http://a/g:h",
        "http://a/b//c/x",
        "http://a//",
        "http://a/b/c/?q",
        "http://a/b/c/#s",
        "file:///usr/local/bin/",
        "file:///usr/share",
        "file:///",
        "file:///?q",
        "file://",
        "file://?q",
    ];

    for base in bases {
        let base = UriRef::parse(base).unwrap();
        for r in refs {
            let r = UriRef::parse(r).unwrap();
            for allow_ascending in [false, true] {
                if let Ok(rel) = relativize(&r, &base, allow_ascending) {
                    assert!(rel.kind().is_relative(), "{rel} against {base}");
                    let resolved = resolve(&rel, &base).unwrap();
                    assert_eq!(resolved, r, "{r} -> {rel} against {base}");
                }
            }
        }
    }
}
