use refuri::{
    kind::{ReferenceKind::*, RelativeKind, UriKind},
    pct_enc::{encoder::User, EStr, Encoder},
    ParseErrorKind::*,
    UriRef,
};

#[test]
fn parse_absolute() {
    let r = UriRef::parse("file:///etc/hosts").unwrap();
    assert_eq!(r.as_str(), "file:///etc/hosts");
    assert_eq!(r.scheme(), Some("file"));
    assert_eq!(r.authority(), Some(""));
    assert_eq!(r.userinfo(), None);
    assert_eq!(r.host().unwrap(), "");
    assert_eq!(r.port_str(), None);
    assert_eq!(r.port(), None);
    assert_eq!(r.path(), "/etc/hosts");
    assert!(r.path().split('/').eq(["", "etc", "hosts"]));
    assert_eq!(r.query(), None);
    assert_eq!(r.fragment(), None);
    assert_eq!(r.kind(), Uri(UriKind::Absolute));

    let r = UriRef::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(r.scheme(), Some("ftp"));
    assert_eq!(r.authority(), Some("ftp.is.co.za"));
    assert_eq!(r.host().unwrap(), "ftp.is.co.za");
    assert_eq!(r.path(), "/rfc/rfc1808.txt");

    let r = UriRef::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(r.scheme(), Some("ldap"));
    assert_eq!(r.authority(), Some("[2001:db8::7]"));
    assert_eq!(r.host().unwrap(), "[2001:db8::7]");
    assert_eq!(r.port(), None);
    assert_eq!(r.path(), "/c=GB");
    assert_eq!(r.query().unwrap(), "objectClass?one");
    assert_eq!(r.fragment(), None);

    let r = UriRef::parse("mailto:John.Doe@example.com").unwrap();
    assert_eq!(r.scheme(), Some("mailto"));
    assert_eq!(r.authority(), None);
    assert_eq!(r.host(), None);
    assert_eq!(r.path(), "John.Doe@example.com");

    let r = UriRef::parse("news:comp.infosystems.www.servers.unix").unwrap();
    assert_eq!(r.path(), "comp.infosystems.www.servers.unix");

    let r = UriRef::parse("tel:+1-816-555-1212").unwrap();
    assert_eq!(r.path(), "+1-816-555-1212");

    let r = UriRef::parse("telnet://192.0.2.16:80/").unwrap();
    assert_eq!(r.authority(), Some("192.0.2.16:80"));
    assert_eq!(r.host().unwrap(), "192.0.2.16");
    assert_eq!(r.port_str(), Some("80"));
    assert_eq!(r.port(), Some(80));
    assert_eq!(r.path(), "/");

    let r = UriRef::parse("urn:oasis:names:specification:docbook:dtd:xml:4.1.2").unwrap();
    assert_eq!(r.scheme(), Some("urn"));
    assert_eq!(r.path(), "oasis:names:specification:docbook:dtd:xml:4.1.2");
}

#[test]
fn parse_userinfo() {
    let r = UriRef::parse("https://user:pw@example.com:8080/a/b?q#f").unwrap();
    assert_eq!(r.authority(), Some("user:pw@example.com:8080"));
    assert_eq!(r.userinfo().unwrap(), "user:pw");
    assert_eq!(r.user().unwrap(), "user");
    assert_eq!(r.password().unwrap(), "pw");
    assert_eq!(r.host().unwrap(), "example.com");
    assert_eq!(r.port(), Some(8080));
    assert_eq!(r.fragment().unwrap(), "f");
    assert_eq!(r.kind(), Uri(UriKind::Generic));

    // Digits after a colon in userinfo are not a port.
    let r = UriRef::parse("http://user:99999@h/").unwrap();
    assert_eq!(r.user().unwrap(), "user");
    assert_eq!(r.password().unwrap(), "99999");
    assert_eq!(r.host().unwrap(), "h");
    assert_eq!(r.port(), None);

    // Only the first colon delimits the password.
    let r = UriRef::parse("ftp://a:b:c@h").unwrap();
    assert_eq!(r.user().unwrap(), "a");
    assert_eq!(r.password().unwrap(), "b:c");

    let r = UriRef::parse("ftp://a@h").unwrap();
    assert_eq!(r.user().unwrap(), "a");
    assert_eq!(r.password(), None);

    let r = UriRef::parse("ftp://@h").unwrap();
    assert_eq!(r.userinfo().unwrap(), "");
    assert_eq!(r.user().unwrap(), "");

    // The user name never contains a literal colon.
    let r = UriRef::parse("ftp://a%3Ab%20c:d@h").unwrap();
    let user: &EStr<User> = r.user().unwrap();
    assert_eq!(user, "a%3Ab%20c");
    assert_eq!(user.decode().to_string_lossy(), "a:b c");
    assert!(!User::TABLE.allows(':'));
}

#[test]
fn parse_empty_port() {
    let r = UriRef::parse("http://example.com:/").unwrap();
    assert_eq!(r.port_str(), Some(""));
    assert_eq!(r.port(), None);

    let r = UriRef::parse("http://example.com:65535").unwrap();
    assert_eq!(r.port(), Some(65535));
}

#[test]
fn parse_relative() {
    let r = UriRef::parse("").unwrap();
    assert_eq!(r.scheme(), None);
    assert_eq!(r.authority(), None);
    assert_eq!(r.path(), "");
    assert_eq!(r.query(), None);
    assert_eq!(r.fragment(), None);
    assert_eq!(r.kind(), Relative(RelativeKind::SameDocument));

    let r = UriRef::parse("#frag").unwrap();
    assert_eq!(r.fragment().unwrap(), "frag");
    assert_eq!(r.kind(), Relative(RelativeKind::SameDocument));

    let r = UriRef::parse("?q").unwrap();
    assert_eq!(r.path(), "");
    assert_eq!(r.query().unwrap(), "q");
    assert_eq!(r.kind(), Relative(RelativeKind::RelativePath));

    let r = UriRef::parse("//example.com").unwrap();
    assert_eq!(r.authority(), Some("example.com"));
    assert_eq!(r.path(), "");
    assert_eq!(r.kind(), Relative(RelativeKind::NetworkPath));

    let r = UriRef::parse("/a/b").unwrap();
    assert_eq!(r.kind(), Relative(RelativeKind::AbsolutePath));

    let r = UriRef::parse("./this:that").unwrap();
    assert_eq!(r.path(), "./this:that");
    assert_eq!(r.kind(), Relative(RelativeKind::RelativePath));

    let r = UriRef::parse("a/b%20c?d#e").unwrap();
    assert_eq!(r.path(), "a/b%20c");
    assert_eq!(r.path().decode().to_string_lossy(), "a/b c");
}

#[test]
fn parse_error() {
    // Empty scheme
    let e = UriRef::parse(":hello").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), UnexpectedCharOrEnd);

    // Scheme starts with non-letter
    let e = UriRef::parse("3ttp://a.com").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), UnexpectedCharOrEnd);

    // Colon in the first path segment of a relative reference
    let e = UriRef::parse("exam=ple:foo").unwrap_err();
    assert_eq!(e.index(), 8);

    let e = UriRef::parse("(:").unwrap_err();
    assert_eq!(e.index(), 1);

    let e = UriRef::parse("a%20:foo").unwrap_err();
    assert_eq!(e.index(), 4);

    // Unexpected char in path
    let e = UriRef::parse("foo\\bar").unwrap_err();
    assert_eq!(e.index(), 3);
    assert_eq!(e.kind(), UnexpectedCharOrEnd);

    // Non-hexadecimal and incomplete octets
    let e = UriRef::parse("%zz").unwrap_err();
    assert_eq!(e.index(), 1);
    let e = UriRef::parse("%4").unwrap_err();
    assert_eq!(e.index(), 0);

    // Unclosed and empty IP literals
    let e = UriRef::parse("http://[::1").unwrap_err();
    assert_eq!(e.index(), 11);
    let e = UriRef::parse("http://[]").unwrap_err();
    assert_eq!(e.index(), 8);

    // Port out of range
    let e = UriRef::parse("http://a:65536/").unwrap_err();
    assert_eq!(e.index(), 9);
    assert_eq!(e.kind(), InvalidPort);

    // Rootless path after authority
    let e = UriRef::parse("//h@x@y").unwrap_err();
    assert_eq!(e.index(), 5);

    // Non-ASCII
    let e = UriRef::parse("http://example.com/café").unwrap_err();
    assert_eq!(e.index(), 22);

    assert_eq!(
        UriRef::parse("http://a:65536/").unwrap_err().to_string(),
        "port number out of range at index 9"
    );
}

#[test]
fn owned() {
    let s = String::from("https://example.com/a?b#c");
    let r = UriRef::parse_from(s).unwrap();
    assert_eq!(r.path(), "/a");
    assert_eq!(r.borrow().query().unwrap(), "b");
    assert_eq!(r.into_string(), "https://example.com/a?b#c");

    let (s, e) = UriRef::parse_from(String::from("a b")).unwrap_err();
    assert_eq!(s, "a b");
    assert_eq!(e.index(), 1);

    let r: UriRef<String> = "//x".parse().unwrap();
    assert_eq!(r.host().unwrap(), "x");
    assert_eq!(r, UriRef::parse("//x").unwrap());
}
