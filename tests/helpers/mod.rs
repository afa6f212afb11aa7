#![allow(dead_code)]

// Shared test helpers: in-memory repository doubles and test data.
//
// The doubles honor the same store contract the MySQL implementations do,
// including the not-found and integrity-conflict signals, so service-level
// behavior can be exercised without a database.
