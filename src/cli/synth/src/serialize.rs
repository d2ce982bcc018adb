/* src/cli/synth/src/serialize.rs */

// Renders a RouteTable as the JS source literal passed to
// `new PreparedRegExpRouter(...)`. Shape:
//
//   [[["/users/:id", /^\/users\/([^\/]+)$/, ["id"]], ...], {"/": 0, ...}]
//
// First element: one entry per registered route, in registration order.
// Second element: static-path fast map (path -> entry index).

use serde_json::json;

use crate::route_table::RouteTable;

pub fn serialize_init_params(table: &RouteTable) -> String {
  let mut out = String::from("[[");
  for (i, entry) in table.entries.iter().enumerate() {
    if i > 0 {
      out.push(',');
    }
    out.push('[');
    out.push_str(&json!(entry.path).to_string());
    out.push_str(",/");
    out.push_str(&entry.pattern);
    out.push_str("/,");
    out.push_str(&json!(entry.params).to_string());
    out.push(']');
  }
  out.push_str("],{");
  for (i, (path, index)) in table.statics.iter().enumerate() {
    if i > 0 {
      out.push(',');
    }
    out.push_str(&json!(path).to_string());
    out.push(':');
    out.push_str(&index.to_string());
  }
  out.push_str("}]");
  out
}
