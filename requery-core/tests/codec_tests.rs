//! Integration tests for the resolver and query codec through the public API.

use requery_core::{decode_query, encode_query, QueryValue, UrlResolver};

#[test]
fn test_resolver_contract() {
    let resolver = UrlResolver::new("http://h");
    assert_eq!(resolver.resolve("https://x/y"), "https://x/y");
    assert_eq!(resolver.resolve("users"), "http://h/users");

    let trailing = UrlResolver::new("http://h/");
    assert_eq!(trailing.resolve("users"), "http://h/users");
}

#[test]
fn test_codec_round_trip_recovers_valid_entries() {
    let params = vec![
        ("category".to_string(), QueryValue::from("books")),
        ("price".to_string(), QueryValue::from("")),
        ("page".to_string(), QueryValue::from(3_i64)),
    ];

    let url = encode_query("/items", &params);
    let parsed = decode_query(&url);

    assert_eq!(parsed["category"], "books");
    assert_eq!(parsed["page"], "3");
    assert!(!parsed.contains_key("price"));
}
