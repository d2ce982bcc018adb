/* src/cli/synth/src/tests/serialize.rs */

use crate::route_table::build_route_table;
use crate::serialize::serialize_init_params;

fn paths(list: &[&str]) -> Vec<String> {
  list.iter().map(|s| (*s).to_string()).collect()
}

/// Count route entries in a serialized payload: each one opens with a JSON
/// path string followed by `,/^` (the start of its regex literal).
fn entry_count(payload: &str) -> usize {
  payload.matches(",/^").count()
}

#[test]
fn payload_shape() {
  let table = build_route_table(&paths(&["/", "/users/:id"])).unwrap();
  let payload = serialize_init_params(&table);
  assert_eq!(
    payload,
    "[[[\"/\",/^\\/$/,[]],[\"/users/:id\",/^\\/users\\/([^\\/]+)$/,[\"id\"]]],{\"/\":0}]"
  );
}

#[test]
fn entry_count_matches_route_count() {
  let input = paths(&["/", "/users/:id", "/users/new", "/posts/:id{[0-9]+}", "/static/*"]);
  let table = build_route_table(&input).unwrap();
  let payload = serialize_init_params(&table);
  assert_eq!(entry_count(&payload), input.len());
}

#[test]
fn order_preserved_in_payload() {
  let table = build_route_table(&paths(&["/alpha", "/beta", "/gamma"])).unwrap();
  let payload = serialize_init_params(&table);
  let a = payload.find("\"/alpha\"").unwrap();
  let b = payload.find("\"/beta\"").unwrap();
  let g = payload.find("\"/gamma\"").unwrap();
  assert!(a < b && b < g);
}

#[test]
fn empty_route_set() {
  let table = build_route_table(&[]).unwrap();
  assert_eq!(serialize_init_params(&table), "[[],{}]");
}

#[test]
fn quotes_and_backslashes_survive_embedding() {
  let table = build_route_table(&paths(&["/say/\"hi\"", "/back\\slash"])).unwrap();
  let payload = serialize_init_params(&table);
  // Path strings are JSON-encoded...
  assert!(payload.contains("\"/say/\\\"hi\\\"\""));
  assert!(payload.contains("\"/back\\\\slash\""));
  // ...and the regex sources escape their own metacharacters.
  assert!(payload.contains("\\\\slash"));
}

#[test]
fn payload_is_single_line() {
  let table = build_route_table(&paths(&["/we\nird", "/tab\there"])).unwrap();
  let payload = serialize_init_params(&table);
  assert!(!payload.contains('\n'));
  assert!(!payload.contains('\t'));
}

#[test]
fn matcher_content_stays_inside_the_literal() {
  // Custom matchers reach the payload verbatim; anything that could break
  // the literal open is rejected at table build, so whatever builds here
  // must serialize on one line.
  let table = build_route_table(&paths(&["/posts/:id{\\d+}"])).unwrap();
  let payload = serialize_init_params(&table);
  assert!(payload.contains("/^\\/posts\\/(\\d+)$/"));
  assert!(!payload.contains('\n'));
}

#[test]
fn static_map_indexes() {
  let table = build_route_table(&paths(&["/users/:id", "/about", "/contact"])).unwrap();
  let payload = serialize_init_params(&table);
  assert!(payload.ends_with(",{\"/about\":1,\"/contact\":2}]"));
}
