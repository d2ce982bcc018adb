/* src/cli/synth/src/tests.rs */

mod route_table;
mod serialize;
