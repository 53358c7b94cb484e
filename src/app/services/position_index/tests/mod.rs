//! Tests for the seek index
