//! Tests for the date/time format specification compiler

mod compiler_tests;
