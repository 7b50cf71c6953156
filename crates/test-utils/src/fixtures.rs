// Copyright (c) 2025 sqlform contributors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Fixture documents
//!
//! Canned sqlform documents used across crates. Line numbers in the
//! comments are 1-indexed; several tests assert against them, so keep
//! the comments honest when editing.

/// Plain table, multi-line config:
/// config lines 1..=3, body line 4.
pub const PLAIN_TABLE: &str = "config {\n  type: \"table\"\n}\nSELECT 1\n";

/// Plain table with single-line config and pre-operations:
/// config line 1, pre_operations line 2, body line 3.
pub const PLAIN_WITH_PRE_OPERATIONS: &str =
    "config { type: \"table\" }\npre_operations { DECLARE x INT64; }\nSELECT x\n";

/// The document behind the canonical remap arithmetic example:
/// pre_operations lines 3..=5, main body starting at line 7.
pub const REMAP_WORKED_EXAMPLE: &str = "\
config { type: \"table\" }

pre_operations {
  DECLARE run_date DATE DEFAULT CURRENT_DATE();
}

SELECT usre_id
FROM analytics.events
WHERE date = run_date
";

/// Incremental table with both pre-operation styles and two
/// post-operations blocks.
pub const INCREMENTAL_TABLE: &str = "\
config {
  type: \"incremental\"
}
pre_operations {
  DECLARE latest DATE;
}
post_operations {
  GRANT SELECT ON dataset.events TO GROUP analysts;
}
post_operations { DROP TABLE IF EXISTS scratch.tmp; }
SELECT * FROM source.events
";

/// Assertion document: config lines 1..=3, body lines 4..=5.
pub const ASSERTION: &str = "\
config {
  type: \"assertion\"
}
SELECT id FROM analytics.users
WHERE id IS NULL
";

/// Operations document with no single target object.
pub const OPERATIONS: &str = "\
config {
  type: \"operations\"
}
DROP TABLE IF EXISTS scratch.tmp;
CREATE TABLE scratch.tmp AS SELECT 1 AS one;
";
