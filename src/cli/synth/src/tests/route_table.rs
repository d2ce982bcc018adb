/* src/cli/synth/src/tests/route_table.rs */

use crate::route_table::build_route_table;

fn paths(list: &[&str]) -> Vec<String> {
  list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn root_path() {
  let table = build_route_table(&paths(&["/"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/$");
  assert!(table.entries[0].params.is_empty());
  assert_eq!(table.statics, vec![("/".to_string(), 0)]);
}

#[test]
fn static_path() {
  let table = build_route_table(&paths(&["/about/team"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/about\\/team$");
  assert_eq!(table.statics.len(), 1);
}

#[test]
fn param_segments() {
  let table = build_route_table(&paths(&["/users/:id/posts/:slug"])).unwrap();
  let entry = &table.entries[0];
  assert_eq!(entry.pattern, "^\\/users\\/([^\\/]+)\\/posts\\/([^\\/]+)$");
  assert_eq!(entry.params, vec!["id".to_string(), "slug".to_string()]);
  assert!(table.statics.is_empty());
}

#[test]
fn custom_matcher() {
  let table = build_route_table(&paths(&["/posts/:id{[0-9]+}"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/posts\\/([0-9]+)$");
  assert_eq!(table.entries[0].params, vec!["id".to_string()]);
}

#[test]
fn non_capturing_group_in_matcher_is_allowed() {
  let table = build_route_table(&paths(&["/files/:name{(?:a|b)+}"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/files\\/((?:a|b)+)$");
}

#[test]
fn trailing_wildcard_swallows_rest() {
  let table = build_route_table(&paths(&["/static/*"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/static\\/.*$");
  // Wildcard routes never land in the static map.
  assert!(table.statics.is_empty());
}

#[test]
fn mid_path_wildcard_matches_one_segment() {
  let table = build_route_table(&paths(&["/api/*/status"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/api\\/[^\\/]+\\/status$");
}

#[test]
fn registration_order_preserved() {
  let input = paths(&["/", "/users/:id", "/users/new", "/static/*"]);
  let table = build_route_table(&input).unwrap();
  assert_eq!(table.len(), 4);
  let got: Vec<&str> = table.entries.iter().map(|e| e.path.as_str()).collect();
  assert_eq!(got, vec!["/", "/users/:id", "/users/new", "/static/*"]);
  // Static map indexes point at the right entries.
  assert_eq!(table.statics, vec![("/".to_string(), 0), ("/users/new".to_string(), 2)]);
}

#[test]
fn regex_metacharacters_in_static_segments_are_escaped() {
  let table = build_route_table(&paths(&["/v1.0/items+all"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/v1\\.0\\/items\\+all$");
}

#[test]
fn control_characters_are_hex_escaped() {
  let table = build_route_table(&paths(&["/we\nird"])).unwrap();
  assert_eq!(table.entries[0].pattern, "^\\/we\\x0aird$");
  assert!(!table.entries[0].pattern.contains('\n'));
}

#[test]
fn duplicate_param_name_rejected() {
  let err = build_route_table(&paths(&["/a/:id/b/:id"])).unwrap_err();
  assert!(err.to_string().contains("more than once"));
}

#[test]
fn unterminated_matcher_rejected() {
  let err = build_route_table(&paths(&["/posts/:id{[0-9]+"])).unwrap_err();
  assert!(err.to_string().contains("unterminated"));
}

#[test]
fn capturing_group_in_matcher_rejected() {
  let err = build_route_table(&paths(&["/posts/:id{([0-9]+)}"])).unwrap_err();
  assert!(err.to_string().contains("capturing group"));
}

#[test]
fn control_character_in_matcher_rejected() {
  // Matcher content is spliced raw into the regex literal; a raw newline
  // there would split the emitted payload across source lines.
  let err = build_route_table(&paths(&["/x/:a{b\nc}"])).unwrap_err();
  assert!(err.to_string().contains("control character"));
  assert!(build_route_table(&paths(&["/x/:a{b\u{2028}c}"])).is_err());
}

#[test]
fn trailing_backslash_in_matcher_rejected() {
  // `\` as the last matcher byte would escape the literal's closing `/`.
  let err = build_route_table(&paths(&["/x/:a{\\d+\\}"])).unwrap_err();
  assert!(err.to_string().contains("trailing backslash"));
  // An escaped backslash pair is fine.
  assert!(build_route_table(&paths(&["/x/:a{\\d+\\\\}"])).is_ok());
}

#[test]
fn empty_param_name_rejected() {
  assert!(build_route_table(&paths(&["/users/:"])).is_err());
}

#[test]
fn missing_leading_slash_rejected() {
  assert!(build_route_table(&paths(&["users"])).is_err());
}

#[test]
fn one_bad_path_fails_the_whole_table() {
  let err = build_route_table(&paths(&["/ok", "/bad/:x/:x"])).unwrap_err();
  assert!(err.to_string().contains("/bad/:x/:x"));
}
