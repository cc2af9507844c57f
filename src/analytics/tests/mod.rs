//! Unit tests for scoping, criteria, aggregations and the dashboard service.

mod support;
