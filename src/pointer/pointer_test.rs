use super::*;
use crate::diagnostic::Diagnostic;
use alloc::vec::Vec;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[test]
#[cfg(all(feature = "json", feature = "resolve"))]
fn rfc_examples() {
    use crate::Resolve;
    use serde_json::json;

    let data = json!({
        "foo": ["bar", "baz"],
        "": 0,
        "a/b": 1,
        "c%d": 2,
        "e^f": 3,
        "g|h": 4,
        "i\\j": 5,
        "k\"l": 6,
        " ": 7,
        "m~n": 8
    });

    let cases = [
        ("", data.clone()),
        ("/foo", json!(["bar", "baz"])),
        ("/foo/0", json!("bar")),
        ("/", json!(0)),
        ("/a~1b", json!(1)),
        ("/c%d", json!(2)),
        ("/e^f", json!(3)),
        ("/g|h", json!(4)),
        ("/i\\j", json!(5)),
        ("/k\"l", json!(6)),
        ("/ ", json!(7)),
        ("/m~0n", json!(8)),
    ];
    for (ptr, expected) in cases {
        let ptr = Pointer::parse(ptr).unwrap();
        assert_eq!(data.resolve(ptr).unwrap(), &expected, "pointer {ptr}");
    }
}

#[test]
fn parse() {
    let valid = ["", "/", "//", "/a", "/a/b", "/~0", "/~1", "/a~0b~1c", "/ /x"];
    for s in valid {
        assert_eq!(Pointer::parse(s).unwrap().as_str(), s);
        assert_eq!(PointerBuf::parse(s).unwrap(), s);
    }

    assert_eq!(Pointer::parse("a"), Err(ParseError::NoLeadingSlash));
    assert_eq!(Pointer::parse("a/b"), Err(ParseError::NoLeadingSlash));

    let err = Pointer::parse("/abc/~/b").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidEncoding {
            offset: 4,
            source: EncodingError::InvalidEscape { offset: 0 },
        }
    );
    assert_eq!(err.complete_offset(), 5);

    let err = Pointer::parse("/a/~").unwrap_err();
    assert_eq!(err.pointer_offset(), 2);
    assert!(err.is_invalid_encoding());

    let err = Pointer::parse("/~2").unwrap_err();
    assert_eq!(err.pointer_offset(), 0);
    assert_eq!(err.source_offset(), 0);
}

#[test]
fn parse_error_prefix() {
    let subject = "/abc/~/b";
    let err = Pointer::parse(subject).unwrap_err();
    assert_eq!(err.into_report(subject).prefix(), "/abc/~");

    let subject = "abc";
    let err = Pointer::parse(subject).unwrap_err();
    let report = err.into_report(subject);
    assert_eq!(report.prefix(), "abc");
    assert!(report.to_string().starts_with("\"abc\": "));
}

#[test]
fn parse_error_label() {
    let subject = "/foo/bar~2baz";
    let err = Pointer::parse(subject).unwrap_err();
    let label = err.label(subject).unwrap();
    assert_eq!(label.offset(), 8);
    assert_eq!(label.len(), 2);
}

#[test]
#[should_panic = "invalid json pointer"]
fn from_static_panics() {
    let _ = Pointer::from_static("nope");
}

#[test]
fn root() {
    let root = Pointer::root();
    assert!(root.is_root());
    assert_eq!(root.count(), 0);
    assert_eq!(root.first(), None);
    assert_eq!(root.last(), None);
    assert_eq!(root.parent(), None);
    assert!(PointerBuf::new().is_root());
    assert!(!Pointer::from_static("/").is_root());
}

#[test]
fn tokens_and_count() {
    let ptr = Pointer::from_static("/foo/~1/~0/");
    let decoded: Vec<_> = ptr.tokens().map(|t| t.decoded().into_owned()).collect();
    assert_eq!(decoded, ["foo", "/", "~", ""]);
    assert_eq!(ptr.count(), 4);
    assert_eq!(ptr.first().unwrap().decoded(), "foo");
    assert_eq!(ptr.last().unwrap().decoded(), "");
}

#[test]
fn split() {
    let ptr = Pointer::from_static("/a/b/c");
    let (front, rest) = ptr.split_front().unwrap();
    assert_eq!(front.encoded(), "a");
    assert_eq!(rest, "/b/c");

    let (parent, back) = ptr.split_back().unwrap();
    assert_eq!(parent, "/a/b");
    assert_eq!(back.encoded(), "c");

    let single = Pointer::from_static("/x");
    let (front, rest) = single.split_front().unwrap();
    assert_eq!(front.encoded(), "x");
    assert!(rest.is_root());
    let (parent, _) = single.split_back().unwrap();
    assert!(parent.is_root());
}

#[test]
fn concat() {
    let a = Pointer::from_static("/a");
    let b = Pointer::from_static("/b/c");
    assert_eq!(a.concat(b), "/a/b/c");
    assert_eq!(Pointer::root().concat(b), "/b/c");
    assert_eq!(a.concat(Pointer::root()), "/a");
}

#[test]
fn navigation() {
    let mut ptr = PointerBuf::new();
    ptr.push_back("foo");
    assert_eq!(ptr, "/foo");
    ptr.push_index(3);
    assert_eq!(ptr, "/foo/3");
    ptr.push_back("a/b");
    assert_eq!(ptr, "/foo/3/a~1b");

    ptr.ascend().unwrap();
    assert_eq!(ptr, "/foo/3");
    ptr.push_back("c~d");
    assert_eq!(ptr, "/foo/3/c~0d");

    ptr.ascend().unwrap();
    ptr.ascend().unwrap();
    ptr.push_index(-1);
    assert_eq!(ptr, "/foo/-");
    assert_eq!(ptr.leaf_index(), Some(Ok(Index::Next)));

    ptr.ascend().unwrap();
    ptr.ascend().unwrap();
    assert!(ptr.is_root());
    assert_eq!(ptr.ascend(), Err(RootError));
    assert!(ptr.is_root());
}

#[test]
fn pop_back() {
    let mut ptr = PointerBuf::parse("/a/b~1c").unwrap();
    assert_eq!(ptr.pop_back().unwrap().decoded(), "b/c");
    assert_eq!(ptr, "/a");
    assert_eq!(ptr.pop_back().unwrap().decoded(), "a");
    assert!(ptr.is_root());
    assert_eq!(ptr.pop_back(), None);
}

#[test]
fn clone_is_independent() {
    let mut a = PointerBuf::from_tokens(["x", "y"]);
    let b = a.clone();
    a.push_back("z");
    a.ascend().unwrap();
    a.ascend().unwrap();
    assert_eq!(a, "/x");
    assert_eq!(b, "/x/y");
}

#[test]
fn leaf_index() {
    assert_eq!(
        Pointer::from_static("/a/01").leaf_index(),
        Some(Err(ParseIndexError::LeadingZeros))
    );
    assert_eq!(
        Pointer::from_static("/7").leaf_index(),
        Some(Ok(Index::Num(7)))
    );
}

#[test]
fn from_tokens() {
    let ptr = PointerBuf::from_tokens(["a/b", "~", ""]);
    assert_eq!(ptr, "/a~1b/~0/");
    let ptr: PointerBuf = ptr.tokens().collect();
    assert_eq!(ptr, "/a~1b/~0/");
    assert_eq!(PointerBuf::from(4usize), "/4");
}

#[test]
fn conversions() {
    let ptr: PointerBuf = "/a/b".parse().unwrap();
    let borrowed: &Pointer = "/a/b".try_into().unwrap();
    assert_eq!(ptr, borrowed);
    assert_eq!(borrowed.to_owned(), ptr);
    assert_eq!(ptr.as_ptr().to_string(), "/a/b");
    assert!(PointerBuf::try_from(String::from("x")).is_err());
}

#[test]
#[cfg(feature = "json")]
fn serde() {
    let ptr = PointerBuf::parse("/a~1b/0").unwrap();
    let s = serde_json::to_string(&ptr).unwrap();
    assert_eq!(s, r#""/a~1b/0""#);
    let back: PointerBuf = serde_json::from_str(&s).unwrap();
    assert_eq!(back, ptr);
    let borrowed: &Pointer = serde_json::from_str(&s).unwrap();
    assert_eq!(borrowed, ptr);

    let err = serde_json::from_str::<PointerBuf>(r#""/~x""#).unwrap_err();
    assert!(err.to_string().contains("\"/~x\""));
}

#[quickcheck]
fn parse_renders_back(tokens: Vec<String>) -> TestResult {
    let ptr = PointerBuf::from_tokens(&tokens);
    let parsed = PointerBuf::parse(ptr.to_string()).unwrap();
    let decoded: Vec<_> = parsed.tokens().map(|t| t.decoded().into_owned()).collect();
    TestResult::from_bool(parsed == ptr && decoded == tokens)
}

#[quickcheck]
fn split_front_back_agree(ptr: PointerBuf) -> bool {
    match (ptr.split_front(), ptr.split_back()) {
        (None, None) => ptr.is_root(),
        (Some((front, rest)), Some((parent, back))) => {
            let mut rebuilt = PointerBuf::from_tokens([front]);
            rebuilt = rebuilt.concat(rest);
            let mut other = parent.to_buf();
            other.push_back(back);
            rebuilt == ptr && other == ptr
        }
        _ => false,
    }
}
