/* src/cli/synth/src/lib.rs */

mod plan;
mod route_table;
mod serialize;

#[cfg(test)]
mod tests;

pub use plan::{RouterPlan, RouterVariant, synthesize};
pub use route_table::{RouteEntry, RouteTable, build_route_table};
pub use serialize::serialize_init_params;
