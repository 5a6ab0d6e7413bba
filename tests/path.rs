use refuri::path::HierarchicalPath;

trait Test {
    fn normalizes_to(&self, expected: &str);
}

impl Test for str {
    #[track_caller]
    fn normalizes_to(&self, expected: &str) {
        let once = HierarchicalPath::new(self).lexically_normalize();
        assert_eq!(once.to_string(), expected);

        let twice = once.clone().lexically_normalize();
        assert_eq!(twice, once);
        assert_eq!(twice.to_string(), expected);
    }
}

#[test]
fn round_trip() {
    for s in [
        "", "/", "//", "///", "a", "a/", "/a", "/a/", "a//", "//a", "/a//b/", "a/b/c",
        "./a:b", "..", "../", "/./..", "%2E/%2F",
    ] {
        assert_eq!(HierarchicalPath::new(s).to_string(), s);
        assert_eq!(s.parse::<HierarchicalPath>().unwrap(), HierarchicalPath::new(s));
    }
}

#[test]
fn parse() {
    let path = HierarchicalPath::new("/a//b/");
    assert!(path.is_absolute());
    assert_eq!(path.components(), ["a", "", "b"]);
    assert!(path.has_directory_path());

    let path = HierarchicalPath::new("///");
    assert_eq!(path.components(), ["", ""]);
    assert!(path.has_directory_path());

    let path = HierarchicalPath::new("a");
    assert!(!path.is_absolute());
    assert_eq!(path.components(), ["a"]);
    assert!(!path.has_directory_path());
}

#[test]
fn lexically_normalize() {
    "/a/./b/../c".normalizes_to("/a/c");
    "a/../../b".normalizes_to("../b");
    "/a/b/c/./../../g".normalizes_to("/a/g");
    "mid/content=5/../6".normalizes_to("mid/6");

    // Trailing dot segments make a directory.
    "a/.".normalizes_to("a/");
    "a/b/..".normalizes_to("a/");
    "/a/b/..".normalizes_to("/a/");
    "/a/.".normalizes_to("/a/");

    // Underflow is kept in relative paths and dropped in absolute ones.
    "..".normalizes_to("..");
    "../..".normalizes_to("../..");
    "../x".normalizes_to("../x");
    "a/../..".normalizes_to("..");
    "/..".normalizes_to("/");
    "/../b".normalizes_to("/b");
    "/a/b/../../..".normalizes_to("/");

    "/.".normalizes_to("/");
    ".".normalizes_to("");
    "./".normalizes_to("");
    "".normalizes_to("");
    "/".normalizes_to("/");

    // Empty components are kept.
    "/a//b/".normalizes_to("/a//b/");
    "a//..".normalizes_to("a/");

    // Encoded dots are not dot segments.
    "/a/%2E%2E/b".normalizes_to("/a/%2E%2E/b");
}

#[test]
fn remove_empty_components() {
    let path = HierarchicalPath::new("//a///b//").remove_empty_components();
    assert_eq!(path.to_string(), "/a/b/");
    assert!(path.has_directory_path());

    let path = HierarchicalPath::new("//").remove_empty_components();
    assert_eq!(path.to_string(), "/");
    assert!(path.is_root());
}

#[test]
fn remove_non_directory_component() {
    let path = HierarchicalPath::new("/a/b").remove_non_directory_component();
    assert_eq!(path.to_string(), "/a/");

    let path = HierarchicalPath::new("/a/b/").remove_non_directory_component();
    assert_eq!(path.to_string(), "/a/b/");

    let path = HierarchicalPath::new("a").remove_non_directory_component();
    assert_eq!(path.to_string(), "");
    assert!(path.components().is_empty());

    let path = HierarchicalPath::new("/").remove_non_directory_component();
    assert!(path.is_root());
}

#[test]
fn normalize_relative_path_reference() {
    let f = |s: &str| {
        HierarchicalPath::new(s)
            .normalize_relative_path_reference()
            .to_string()
    };
    assert_eq!(f("a:b"), "./a:b");
    assert_eq!(f("a:b/c/"), "./a:b/c/");
    assert_eq!(f("a/b:c"), "a/b:c");
    assert_eq!(f("/a:b"), "/a:b");
    assert_eq!(f(""), "");
    assert_eq!(f("a"), "a");

    let path = HierarchicalPath::from_parts(false, vec![String::new(), "a".into()], false)
        .normalize_relative_path_reference();
    assert_eq!(path.to_string(), ".//a");
}

#[test]
fn equality() {
    assert_eq!(HierarchicalPath::new("/a/b/"), HierarchicalPath::new("/a/b/"));
    assert_ne!(HierarchicalPath::new("/a/b/"), HierarchicalPath::new("/a/b"));
    assert_ne!(HierarchicalPath::new("a"), HierarchicalPath::new("/a"));
    assert_eq!(
        HierarchicalPath::from_parts(true, Vec::new(), true),
        HierarchicalPath::new("/")
    );
    assert_eq!(String::from(HierarchicalPath::new("a//")), "a//");
}
