use refuri::{
    component::Components,
    resolve::{resolve, ResolveError},
    UriRef,
};

trait Test {
    fn pass(&self, r: &str, res: &str);
    fn fail(&self, r: &str, err: ResolveError);
}

impl Test for UriRef<&str> {
    #[track_caller]
    fn pass(&self, r: &str, expected: &str) {
        let r = UriRef::parse(r).unwrap();
        assert_eq!(r.resolve_against(self).unwrap(), expected);
    }

    #[track_caller]
    fn fail(&self, r: &str, expected: ResolveError) {
        let r = UriRef::parse(r).unwrap();
        assert_eq!(r.resolve_against(self).unwrap_err(), expected);
    }
}

#[test]
fn resolve_normal() {
    // Examples from Section 5.4 of RFC 3986.
    let base = UriRef::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("g:h", "g:h");
    base.pass("g", "http://a/b/c/g");
    base.pass("./g", "http://a/b/c/g");
    base.pass("g/", "http://a/b/c/g/");
    base.pass("/g", "http://a/g");
    base.pass("//g", "http://g");
    base.pass("?y", "http://a/b/c/d;p?y");
    base.pass("g?y", "http://a/b/c/g?y");
    base.pass("#s", "http://a/b/c/d;p?q#s");
    base.pass("g#s", "http://a/b/c/g#s");
    base.pass("g?y#s", "http://a/b/c/g?y#s");
    base.pass(";x", "http://a/b/c/;x");
    base.pass("g;x", "http://a/b/c/g;x");
    base.pass("g;x?y#s", "http://a/b/c/g;x?y#s");
    base.pass("", "http://a/b/c/d;p?q");
    base.pass(".", "http://a/b/c/");
    base.pass("./", "http://a/b/c/");
    base.pass("..", "http://a/b/");
    base.pass("../", "http://a/b/");
    base.pass("../g", "http://a/b/g");
    base.pass("../..", "http://a/");
    base.pass("../../", "http://a/");
    base.pass("../../g", "http://a/g");
}

#[test]
fn resolve_abnormal() {
    // Examples from Section 5.4 of RFC 3986.
    let base = UriRef::parse("http://a/b/c/d;p?q").unwrap();

    base.pass("../../../g", "http://a/g");
    base.pass("../../../../g", "http://a/g");

    base.pass("/./g", "http://a/g");
    base.pass("/../g", "http://a/g");
    base.pass("g.", "http://a/b/c/g.");
    base.pass(".g", "http://a/b/c/.g");
    base.pass("g..", "http://a/b/c/g..");
    base.pass("..g", "http://a/b/c/..g");

    base.pass("./../g", "http://a/b/g");
    base.pass("./g/.", "http://a/b/c/g/");
    base.pass("g/./h", "http://a/b/c/g/h");
    base.pass("g/../h", "http://a/b/c/h");
    base.pass("g;x=1/./y", "http://a/b/c/g;x=1/y");
    base.pass("g;x=1/../y", "http://a/b/c/y");

    base.pass("g?y/./x", "http://a/b/c/g?y/./x");
    base.pass("g?y/../x", "http://a/b/c/g?y/../x");
    base.pass("g#s/./x", "http://a/b/c/g#s/./x");
    base.pass("g#s/../x", "http://a/b/c/g#s/../x");

    base.pass("http:g", "http:g");
}

#[test]
fn resolve_edge_cases() {
    // Encoded dot segments
    let base = UriRef::parse("http://a/b/c/d").unwrap();
    base.pass("%2E%2e/g", "http://a/b/g");
    base.pass("%2e", "http://a/b/c/");

    // Base ending in a double-dot segment
    let base = UriRef::parse("http://a/b/..").unwrap();
    base.pass("g", "http://a/g");

    // Empty base path
    let base = UriRef::parse("http://a").unwrap();
    base.pass("g", "http://a/g");
    base.pass("", "http://a");
    base.pass("?q", "http://a?q");

    // Path starting with "//" without authority
    let base = UriRef::parse("foo:/").unwrap();
    base.pass(".//@@", "foo:/.//@@");
    base.pass("foo:/..//@@", "foo:/.//@@");

    let base = UriRef::parse("file:///etc/").unwrap();
    base.pass("hosts", "file:///etc/hosts");
    base.pass("//host/share", "file://host/share");
}

#[test]
fn resolve_error() {
    let base = UriRef::parse("foo:bar").unwrap();
    base.pass("", "foo:bar");
    base.pass("#baz", "foo:bar#baz");
    base.pass("http://example.com/", "http://example.com/");
    base.fail("baz", ResolveError::InvalidReferenceAgainstOpaqueBase);
    base.fail("?baz", ResolveError::InvalidReferenceAgainstOpaqueBase);
    base.fail("/baz", ResolveError::InvalidReferenceAgainstOpaqueBase);
    base.fail("//baz", ResolveError::InvalidReferenceAgainstOpaqueBase);

    let base = UriRef::parse("http://example.com/#f").unwrap();
    base.fail("a", ResolveError::BaseWithFragment);

    let base = UriRef::parse("/a/b").unwrap();
    base.fail("c", ResolveError::BaseWithoutScheme);

    // Components that do not materialize
    let base = Components {
        scheme: Some("http".into()),
        host: Some("exa mple".into()),
        path: "/".into(),
        ..Default::default()
    };
    let r = UriRef::parse("a").unwrap();
    assert!(matches!(resolve(&r, &base), Err(ResolveError::Build(_))));
}
