/* src/cli/core/src/optimize/tests.rs */
