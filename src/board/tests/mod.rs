//! Unit suites for the rules core.

mod endings;
